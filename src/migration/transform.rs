//! 格式转换
//!
//! 旧版元数据是 camelCase 的扁平记录，不携带输入输出 schema。
//! 向 Operation 转换时附加一次固定规则的安全级别推断；
//! 反向投影丢弃 v2 独有字段并重新派生 `stable` 布尔值。

use serde::{Deserialize, Serialize};

use crate::models::entity::Stability;
use crate::models::operation::{ArgSchema, OpExample, Operation, SafetyClass, SideEffectKind};

/// 旧版扁平操作元数据
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyOpMeta {
    /// 操作 id
    pub id: String,

    /// 所属领域
    pub domain: String,

    /// 操作名称
    pub name: String,

    /// 领域内分类
    pub category: String,

    /// 标签集合
    pub tags: Vec<String>,

    /// 复杂度提示
    pub complexity: Option<String>,

    /// 成本提示
    pub cost: Option<String>,

    /// 是否纯函数
    pub pure: bool,

    /// 是否确定性
    pub deterministic: bool,

    /// 声明的副作用
    pub side_effects: Vec<SideEffectKind>,

    /// 依赖的操作 id
    pub dependencies: Vec<String>,

    /// 引入版本
    pub since: Option<String>,

    /// 旧版稳定标志
    pub stable: bool,
}

impl Default for LegacyOpMeta {
    fn default() -> Self {
        Self {
            id: String::new(),
            domain: String::new(),
            name: String::new(),
            category: String::new(),
            tags: Vec::new(),
            complexity: None,
            cost: None,
            pure: false,
            deterministic: false,
            side_effects: Vec::new(),
            dependencies: Vec::new(),
            since: None,
            stable: true,
        }
    }
}

impl LegacyOpMeta {
    /// 创建最小合法记录
    pub fn new(id: &str, domain: &str, name: &str, category: &str) -> Self {
        Self {
            id: id.to_string(),
            domain: domain.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            ..Default::default()
        }
    }
}

/// v2 扩展
///
/// 旧版格式缺失、仅 v2 Operation 携带的字段。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OpExtension {
    /// 有序输入参数 schema
    pub inputs: Vec<ArgSchema>,

    /// 有序输出 schema
    pub outputs: Vec<ArgSchema>,

    /// 同义词
    pub synonyms: Vec<String>,

    /// 规范化提示语
    pub canonical_prompt: Option<String>,

    /// 用例列表
    pub examples: Vec<OpExample>,

    /// 不变量描述
    pub invariants: Vec<String>,
}

/// 安全级别推断
///
/// 固定优先级：破坏性副作用 > 外部副作用 > 其他副作用 >
/// 纯且确定 > 纯但非确定 > 保守兜底 stateful。
pub fn infer_safety(meta: &LegacyOpMeta) -> SafetyClass {
    if meta.side_effects.iter().any(|e| e.is_destructive()) {
        return SafetyClass::Destructive;
    }
    if meta.side_effects.iter().any(|e| e.is_external()) {
        return SafetyClass::External;
    }
    if !meta.side_effects.is_empty() {
        return SafetyClass::Stateful;
    }
    if meta.pure && meta.deterministic {
        return SafetyClass::Safe;
    }
    if meta.pure {
        return SafetyClass::Idempotent;
    }
    SafetyClass::Stateful
}

/// 旧版元数据 → Operation
///
/// 结构化拷贝共享字段并派生安全级别；输入输出默认为空
/// （旧版格式不携带 schema）。
pub fn meta_to_operation(meta: &LegacyOpMeta) -> Operation {
    let mut op = Operation::new(&meta.id, &meta.name, &meta.domain, &meta.category);
    op.tags = meta.tags.clone();
    op.complexity = meta.complexity.clone();
    op.cost = meta.cost.clone();
    op.pure = meta.pure;
    op.deterministic = meta.deterministic;
    op.side_effects = meta.side_effects.clone();
    op.dependencies = meta.dependencies.clone();
    op.core.since = meta.since.clone();
    op.core.stability = Some(if meta.stable {
        Stability::Stable
    } else {
        Stability::Experimental
    });
    op.safety = Some(infer_safety(meta));
    op
}

/// Operation → 旧版元数据
///
/// 逆向投影，丢弃 v2 独有字段（inputs/outputs/examples/synonyms/
/// canonical_prompt/invariants）；`stable` 重新派生为
/// “稳定性既非 experimental 也非 deprecated”。
pub fn operation_to_meta(op: &Operation) -> LegacyOpMeta {
    LegacyOpMeta {
        id: op.core.id.clone(),
        domain: op.domain.clone(),
        name: op.core.name.clone(),
        category: op.category.clone(),
        tags: op.tags.clone(),
        complexity: op.complexity.clone(),
        cost: op.cost.clone(),
        pure: op.pure,
        deterministic: op.deterministic,
        side_effects: op.side_effects.clone(),
        dependencies: op.dependencies.clone(),
        since: op.core.since.clone(),
        stable: !matches!(
            op.core.stability,
            Some(Stability::Experimental) | Some(Stability::Deprecated)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(vec![SideEffectKind::Filesystem], false, false, SafetyClass::Destructive)]
    #[case(vec![SideEffectKind::Storage], true, true, SafetyClass::Destructive)]
    #[case(vec![SideEffectKind::Network], false, false, SafetyClass::External)]
    #[case(vec![SideEffectKind::Filesystem, SideEffectKind::Network], false, false, SafetyClass::Destructive)]
    #[case(vec![SideEffectKind::Console], true, true, SafetyClass::Stateful)]
    #[case(vec![], true, true, SafetyClass::Safe)]
    #[case(vec![], true, false, SafetyClass::Idempotent)]
    #[case(vec![], false, true, SafetyClass::Stateful)]
    #[case(vec![], false, false, SafetyClass::Stateful)]
    fn test_safety_inference(
        #[case] side_effects: Vec<SideEffectKind>,
        #[case] pure: bool,
        #[case] deterministic: bool,
        #[case] expected: SafetyClass,
    ) {
        let mut meta = LegacyOpMeta::new("x.y", "x", "Y", "misc");
        meta.side_effects = side_effects;
        meta.pure = pure;
        meta.deterministic = deterministic;
        assert_eq!(infer_safety(&meta), expected);
    }

    #[test]
    fn test_meta_operation_roundtrip_preserves_legacy_fields() {
        let mut meta = LegacyOpMeta::new("data.sort", "data", "Sort", "list");
        meta.tags = vec!["list".to_string(), "order".to_string()];
        meta.complexity = Some("O(n log n)".to_string());
        meta.pure = true;
        meta.deterministic = true;
        meta.dependencies = vec!["data.compare".to_string()];
        meta.since = Some("0.3".to_string());
        meta.stable = false;

        let op = meta_to_operation(&meta);
        let back = operation_to_meta(&op);

        assert_eq!(back.id, meta.id);
        assert_eq!(back.domain, meta.domain);
        assert_eq!(back.name, meta.name);
        assert_eq!(back.category, meta.category);
        assert_eq!(back.tags, meta.tags);
        assert_eq!(back.complexity, meta.complexity);
        assert_eq!(back.pure, meta.pure);
        assert_eq!(back.deterministic, meta.deterministic);
        assert_eq!(back.dependencies, meta.dependencies);
        assert_eq!(back.since, meta.since);
        assert_eq!(back.stable, meta.stable);
    }

    #[test]
    fn test_meta_to_operation_derives_safety_and_empty_schema() {
        let mut meta = LegacyOpMeta::new("math.random", "math", "Random", "arithmetic");
        meta.pure = true;
        meta.deterministic = false;

        let op = meta_to_operation(&meta);
        assert_eq!(op.safety, Some(SafetyClass::Idempotent));
        assert!(op.inputs.is_empty());
        assert!(op.outputs.is_empty());
    }

    #[test]
    fn test_legacy_camel_case_decoding() {
        let json = serde_json::json!({
            "id": "io.export",
            "domain": "workflow",
            "name": "Export Scene",
            "category": "io",
            "sideEffects": ["filesystem"],
            "stable": true,
        });
        let meta: LegacyOpMeta = serde_json::from_value(json).unwrap();
        assert_eq!(meta.side_effects, vec![SideEffectKind::Filesystem]);
        assert_eq!(infer_safety(&meta), SafetyClass::Destructive);
    }
}
