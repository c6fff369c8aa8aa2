//! 语义操作模型
//!
//! 操作是对一个计算能力的描述（领域、输入输出、安全级别），
//! 与其具体实现解耦。注册中心只存储描述，从不执行操作本身。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::entity::EntityCore;

/// 副作用种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SideEffectKind {
    /// 文件系统写入
    #[serde(rename = "filesystem")]
    Filesystem,

    /// 持久化存储变更
    #[serde(rename = "storage")]
    Storage,

    /// 网络访问
    #[serde(rename = "network")]
    Network,

    /// 控制台输出
    #[serde(rename = "console")]
    Console,

    /// 场景图变更
    #[serde(rename = "scene")]
    Scene,

    /// 剪贴板写入
    #[serde(rename = "clipboard")]
    Clipboard,
}

impl SideEffectKind {
    /// 是否属于破坏性副作用（持久化数据被改写）
    pub fn is_destructive(&self) -> bool {
        matches!(self, SideEffectKind::Filesystem | SideEffectKind::Storage)
    }

    /// 是否属于外部副作用（越过进程边界）
    pub fn is_external(&self) -> bool {
        matches!(self, SideEffectKind::Network)
    }
}

impl std::fmt::Display for SideEffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SideEffectKind::Filesystem => write!(f, "filesystem"),
            SideEffectKind::Storage => write!(f, "storage"),
            SideEffectKind::Network => write!(f, "network"),
            SideEffectKind::Console => write!(f, "console"),
            SideEffectKind::Scene => write!(f, "scene"),
            SideEffectKind::Clipboard => write!(f, "clipboard"),
        }
    }
}

/// 安全级别
///
/// 粗粒度风险标签，约束 Agent 能否自主调用该操作。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SafetyClass {
    /// 纯函数且确定，可无限制调用
    #[serde(rename = "safe")]
    Safe,

    /// 纯函数但非确定（如使用随机数），重复调用无副作用
    #[serde(rename = "idempotent")]
    Idempotent,

    /// 修改进程内状态
    #[serde(rename = "stateful")]
    Stateful,

    /// 改写持久化数据，不可自动回滚
    #[serde(rename = "destructive")]
    Destructive,

    /// 越过进程边界（网络、文件 IO）
    #[serde(rename = "external")]
    External,
}

impl std::fmt::Display for SafetyClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SafetyClass::Safe => write!(f, "safe"),
            SafetyClass::Idempotent => write!(f, "idempotent"),
            SafetyClass::Stateful => write!(f, "stateful"),
            SafetyClass::Destructive => write!(f, "destructive"),
            SafetyClass::External => write!(f, "external"),
        }
    }
}

impl SafetyClass {
    /// 全部安全级别（用于统计分桶）
    pub const ALL: [SafetyClass; 5] = [
        SafetyClass::Safe,
        SafetyClass::Idempotent,
        SafetyClass::Stateful,
        SafetyClass::Destructive,
        SafetyClass::External,
    ];
}

/// 参数 schema
///
/// 描述操作的一个输入或输出槽位。顺序即声明顺序。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgSchema {
    /// 参数名
    pub name: String,

    /// 引用的数据类型 id
    #[serde(rename = "type")]
    pub type_id: String,

    /// 默认值
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,

    /// 引用的单位 id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// 是否必填
    #[serde(default = "default_required")]
    pub required: bool,

    /// 取值约束（范围、枚举等）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<serde_json::Value>,
}

fn default_required() -> bool {
    true
}

impl ArgSchema {
    /// 创建必填参数
    pub fn new(name: &str, type_id: &str) -> Self {
        Self {
            name: name.to_string(),
            type_id: type_id.to_string(),
            default: None,
            unit: None,
            required: true,
            constraints: None,
        }
    }

    /// 标记为可选并附带默认值
    pub fn optional(mut self, default: serde_json::Value) -> Self {
        self.required = false;
        self.default = Some(default);
        self
    }

    /// 指定单位
    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }
}

/// 操作用例
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpExample {
    /// 用例说明
    pub description: String,

    /// 输入记录
    pub inputs: serde_json::Value,

    /// 期望输出
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<serde_json::Value>,
}

/// 语义操作实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// 公共字段
    #[serde(flatten)]
    pub core: EntityCore,

    /// 所属领域（math / vector / geometry …）
    pub domain: String,

    /// 领域内分类
    pub category: String,

    /// 标签集合
    #[serde(default)]
    pub tags: Vec<String>,

    /// 有序输入参数 schema
    #[serde(default)]
    pub inputs: Vec<ArgSchema>,

    /// 有序输出 schema
    #[serde(default)]
    pub outputs: Vec<ArgSchema>,

    /// 不变量描述
    #[serde(default)]
    pub invariants: Vec<String>,

    /// 用例列表
    #[serde(default)]
    pub examples: Vec<OpExample>,

    /// 复杂度提示（如 "O(n)"）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<String>,

    /// 成本提示
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,

    /// 是否纯函数
    pub pure: bool,

    /// 是否确定性
    pub deterministic: bool,

    /// 声明的副作用
    #[serde(default)]
    pub side_effects: Vec<SideEffectKind>,

    /// 派生的安全级别
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety: Option<SafetyClass>,

    /// 同义词（供 Agent 检索）
    #[serde(default)]
    pub synonyms: Vec<String>,

    /// 规范化提示语（供 Agent 检索）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_prompt: Option<String>,

    /// 依赖的其他操作 id
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl Operation {
    /// 创建操作
    pub fn new(id: &str, name: &str, domain: &str, category: &str) -> Self {
        Self {
            core: EntityCore::new(id, name),
            domain: domain.to_string(),
            category: category.to_string(),
            tags: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            invariants: Vec::new(),
            examples: Vec::new(),
            complexity: None,
            cost: None,
            pure: true,
            deterministic: true,
            side_effects: Vec::new(),
            safety: None,
            synonyms: Vec::new(),
            canonical_prompt: None,
            dependencies: Vec::new(),
        }
    }

    /// 是否声明了输入或输出 schema
    pub fn has_schema(&self) -> bool {
        !self.inputs.is_empty() || !self.outputs.is_empty()
    }

    /// 是否携带面向 Agent 的检索元数据
    pub fn has_agent_metadata(&self) -> bool {
        !self.synonyms.is_empty() || self.canonical_prompt.is_some()
    }

    /// 收集被引用的全部数据类型 id
    pub fn referenced_types(&self) -> Vec<&str> {
        self.inputs
            .iter()
            .chain(self.outputs.iter())
            .map(|arg| arg.type_id.as_str())
            .collect()
    }

    /// 收集被引用的全部单位 id
    pub fn referenced_units(&self) -> Vec<&str> {
        self.inputs
            .iter()
            .chain(self.outputs.iter())
            .filter_map(|arg| arg.unit.as_deref())
            .collect()
    }
}

/// 注册中心统计信息
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RegistryStats {
    /// 按类别统计实体数
    pub by_kind: HashMap<String, usize>,

    /// 按领域统计操作数
    pub by_domain: HashMap<String, usize>,

    /// 按安全级别统计操作数
    pub by_safety: HashMap<String, usize>,

    /// 纯函数操作总数
    pub pure_operations: usize,

    /// 确定性操作总数
    pub deterministic_operations: usize,

    /// 关系总数
    pub relations: usize,
}
