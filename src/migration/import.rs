//! 旧版模块接入
//!
//! 旧版操作目录存在两种导出形态：裸的元数据记录序列，
//! 以及携带元数据（可选 v2 扩展）的可调用对象。
//! 接入前先显式分类为 `LegacyModule` 变体，再穷举匹配处理，
//! 取代旧实现里的临时形状嗅探。

use serde_json::Value;
use tracing::debug;

use super::transform::{LegacyOpMeta, OpExtension, meta_to_operation};
use crate::error::Result;
use crate::models::operation::Operation;
use crate::registry::SemanticRegistry;

/// 携带元数据的可调用操作
///
/// 旧版调用点逐步迁移的中间态：旧元数据 + 可选 v2 扩展
/// 附着在一个可执行闭包上，`to_operation()` 惰性合并两者。
pub struct AnnotatedOp {
    /// 旧版元数据
    pub meta: LegacyOpMeta,

    /// v2 扩展
    pub extension: Option<OpExtension>,

    handler: Box<dyn Fn(&[Value]) -> Result<Value> + Send + Sync>,
}

impl std::fmt::Debug for AnnotatedOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotatedOp")
            .field("meta", &self.meta)
            .field("extension", &self.extension)
            .finish_non_exhaustive()
    }
}

impl AnnotatedOp {
    /// 创建仅携带旧元数据的可调用操作
    pub fn new(
        meta: LegacyOpMeta,
        handler: impl Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            meta,
            extension: None,
            handler: Box::new(handler),
        }
    }

    /// 附加 v2 扩展
    pub fn with_extension(mut self, extension: OpExtension) -> Self {
        self.extension = Some(extension);
        self
    }

    /// 调用底层实现
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        (self.handler)(args)
    }

    /// 惰性合并元数据与扩展为完整 Operation
    pub fn to_operation(&self) -> Operation {
        let mut op = meta_to_operation(&self.meta);
        if let Some(ext) = &self.extension {
            op.inputs = ext.inputs.clone();
            op.outputs = ext.outputs.clone();
            op.synonyms = ext.synonyms.clone();
            op.canonical_prompt = ext.canonical_prompt.clone();
            op.examples = ext.examples.clone();
            op.invariants = ext.invariants.clone();
        }
        op
    }
}

/// 旧版模块的显式分类
#[derive(Debug)]
pub enum LegacyModule {
    /// 裸元数据记录序列
    MetaRecords(Vec<LegacyOpMeta>),

    /// 携带元数据的可调用操作集合
    AnnotatedOps(Vec<AnnotatedOp>),

    /// 无法识别的导出形态
    Unrecognized,
}

impl LegacyModule {
    /// 从 JSON 值分类旧版模块导出
    ///
    /// 数组中无法按元数据记录解析的元素被逐项跳过；
    /// 非数组或没有任何可识别元素时归为 `Unrecognized`。
    pub fn classify(source: &Value) -> LegacyModule {
        let Value::Array(items) = source else {
            return LegacyModule::Unrecognized;
        };

        let mut records = Vec::new();
        for (index, item) in items.iter().enumerate() {
            match serde_json::from_value::<LegacyOpMeta>(item.clone()) {
                Ok(meta) if !meta.id.is_empty() => records.push(meta),
                _ => debug!(index, "元素不符合旧版元数据形状，跳过"),
            }
        }

        if records.is_empty() {
            LegacyModule::Unrecognized
        } else {
            LegacyModule::MetaRecords(records)
        }
    }
}

/// 迁移一个旧版模块为 Operation 列表
pub fn migrate_module(module: &LegacyModule) -> Vec<Operation> {
    match module {
        LegacyModule::MetaRecords(records) => records.iter().map(meta_to_operation).collect(),
        LegacyModule::AnnotatedOps(ops) => ops.iter().map(AnnotatedOp::to_operation).collect(),
        LegacyModule::Unrecognized => Vec::new(),
    }
}

/// 迁移并注册一个旧版模块
///
/// 返回注册成功的操作数；重复注册错误不在此捕获，向上传播。
pub fn register_module(module: &LegacyModule, registry: &mut SemanticRegistry) -> Result<usize> {
    let operations = migrate_module(module);
    let count = operations.len();
    for op in operations {
        registry.register_operation(op)?;
    }
    Ok(count)
}
