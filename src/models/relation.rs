//! 关系数据模型
//!
//! 实体间的带类型有向边。只追加、不去重，端点在插入时不检查。

use serde::{Deserialize, Serialize};

/// 关系类型枚举
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationKind {
    /// 依赖
    #[serde(rename = "depends_on")]
    DependsOn,

    /// 使用
    #[serde(rename = "uses")]
    Uses,

    /// 产出
    #[serde(rename = "produces")]
    Produces,

    /// 类型可转换
    #[serde(rename = "converts_to")]
    ConvertsTo,

    /// 实现
    #[serde(rename = "implements")]
    Implements,

    /// 取代
    #[serde(rename = "supersedes")]
    Supersedes,

    /// 相似
    #[serde(rename = "similar_to")]
    SimilarTo,

    /// 属于（部分）
    #[serde(rename = "part_of")]
    PartOf,

    /// 其他
    #[serde(rename = "other")]
    Other,
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelationKind::DependsOn => write!(f, "depends_on"),
            RelationKind::Uses => write!(f, "uses"),
            RelationKind::Produces => write!(f, "produces"),
            RelationKind::ConvertsTo => write!(f, "converts_to"),
            RelationKind::Implements => write!(f, "implements"),
            RelationKind::Supersedes => write!(f, "supersedes"),
            RelationKind::SimilarTo => write!(f, "similar_to"),
            RelationKind::PartOf => write!(f, "part_of"),
            RelationKind::Other => write!(f, "other"),
        }
    }
}

/// 关系
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relation {
    /// 关系类型
    pub kind: RelationKind,

    /// 源实体 id
    pub source: String,

    /// 目标实体 id
    pub target: String,

    /// 附加元数据
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl Relation {
    /// 创建关系
    pub fn new(kind: RelationKind, source: &str, target: &str) -> Self {
        Self {
            kind,
            source: source.to_string(),
            target: target.to_string(),
            metadata: None,
        }
    }

    /// 是否涉及给定实体
    pub fn involves(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }
}
