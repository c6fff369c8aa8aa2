//! 实体基础数据模型
//!
//! 所有可注册实体（数据类型、单位、操作、节点、命令、目标、求解器）
//! 共享的公共字段与类别标签。

use serde::{Deserialize, Serialize};

/// 实体类别枚举
///
/// 每个类别在注册中心拥有独立的存储；id 在全部类别间全局唯一。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// 数据类型
    #[serde(rename = "datatype")]
    DataType,

    /// 物理单位
    #[serde(rename = "unit")]
    Unit,

    /// 语义操作
    #[serde(rename = "operation")]
    Operation,

    /// 图节点
    #[serde(rename = "node")]
    Node,

    /// 编辑器命令
    #[serde(rename = "command")]
    Command,

    /// 求解目标
    #[serde(rename = "goal")]
    Goal,

    /// 求解器
    #[serde(rename = "solver")]
    Solver,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::DataType => write!(f, "datatype"),
            EntityKind::Unit => write!(f, "unit"),
            EntityKind::Operation => write!(f, "operation"),
            EntityKind::Node => write!(f, "node"),
            EntityKind::Command => write!(f, "command"),
            EntityKind::Goal => write!(f, "goal"),
            EntityKind::Solver => write!(f, "solver"),
        }
    }
}

/// 稳定性标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stability {
    /// 稳定接口
    #[serde(rename = "stable")]
    Stable,

    /// 实验性接口
    #[serde(rename = "experimental")]
    Experimental,

    /// 已废弃
    #[serde(rename = "deprecated")]
    Deprecated,
}

impl std::fmt::Display for Stability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stability::Stable => write!(f, "stable"),
            Stability::Experimental => write!(f, "experimental"),
            Stability::Deprecated => write!(f, "deprecated"),
        }
    }
}

/// 实体公共字段
///
/// 以 `#[serde(flatten)]` 嵌入每个实体类别。实体注册后不可变。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityCore {
    /// 稳定的实体唯一标识
    pub id: String,

    /// 人类可读名称
    pub name: String,

    /// 描述
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// 版本号
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// 稳定性标记
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stability: Option<Stability>,

    /// 引入版本
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,

    /// 取代本实体的后继 id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superseded_by: Option<String>,
}

impl EntityCore {
    /// 创建实体公共字段
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            version: None,
            stability: None,
            since: None,
            superseded_by: None,
        }
    }

    /// 附加描述
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// 附加稳定性标记
    pub fn with_stability(mut self, stability: Stability) -> Self {
        self.stability = Some(stability);
        self
    }
}
