//! 数据类型模型
//!
//! 描述操作输入输出可引用的类型词汇，支持单继承的类型层级。

use serde::{Deserialize, Serialize};

use super::entity::EntityCore;

/// 基础表示标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseRepr {
    /// 数值
    #[serde(rename = "number")]
    Number,

    /// 字符串
    #[serde(rename = "string")]
    String,

    /// 布尔值
    #[serde(rename = "boolean")]
    Boolean,

    /// 数组
    #[serde(rename = "array")]
    Array,

    /// 对象
    #[serde(rename = "object")]
    Object,

    /// 函数
    #[serde(rename = "function")]
    Function,

    /// 任意类型
    #[serde(rename = "any")]
    Any,
}

impl std::fmt::Display for BaseRepr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BaseRepr::Number => write!(f, "number"),
            BaseRepr::String => write!(f, "string"),
            BaseRepr::Boolean => write!(f, "boolean"),
            BaseRepr::Array => write!(f, "array"),
            BaseRepr::Object => write!(f, "object"),
            BaseRepr::Function => write!(f, "function"),
            BaseRepr::Any => write!(f, "any"),
        }
    }
}

/// 集合形态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionShape {
    /// 标量
    #[serde(rename = "scalar")]
    Scalar,

    /// 定长向量
    #[serde(rename = "vector")]
    Vector,

    /// 列表
    #[serde(rename = "list")]
    List,

    /// 树
    #[serde(rename = "tree")]
    Tree,

    /// 网格
    #[serde(rename = "grid")]
    Grid,

    /// 场
    #[serde(rename = "field")]
    Field,
}

/// 数据类型实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataType {
    /// 公共字段
    #[serde(flatten)]
    pub core: EntityCore,

    /// 父类型 id（类型层级）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// 基础表示标签
    pub repr: BaseRepr,

    /// 校验 schema（JSON Schema 片段）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<serde_json::Value>,

    /// 物理量纲
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<String>,

    /// 集合形态
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<CollectionShape>,
}

impl DataType {
    /// 创建数据类型
    pub fn new(id: &str, name: &str, repr: BaseRepr) -> Self {
        Self {
            core: EntityCore::new(id, name),
            parent: None,
            repr,
            schema: None,
            dimension: None,
            shape: None,
        }
    }

    /// 指定父类型
    pub fn with_parent(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    /// 指定物理量纲
    pub fn with_dimension(mut self, dimension: &str) -> Self {
        self.dimension = Some(dimension.to_string());
        self
    }

    /// 指定集合形态
    pub fn with_shape(mut self, shape: CollectionShape) -> Self {
        self.shape = Some(shape);
        self
    }
}
