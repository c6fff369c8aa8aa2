//! 错误处理模块
//!
//! 定义注册中心的错误类型和错误处理逻辑。
//! 引用完整性问题不属于错误：`validate()` 以批量数据形式返回
//! （参见 `registry::validate`），注册过程中允许暂时悬空的引用。

use thiserror::Error;

use crate::models::entity::EntityKind;

/// 注册中心错误类型
#[derive(Error, Debug)]
pub enum RegistryError {
    /// 实体重复注册
    #[error("实体重复注册: id '{id}' 已被 {kind} 占用")]
    DuplicateEntity {
        /// 已持有该 id 的实体类别
        kind: EntityKind,
        /// 冲突的实体 id
        id: String,
    },

    /// 引用缺失（显式解析失败）
    #[error("引用缺失: {entity} 引用了未注册的 '{reference}'")]
    MissingReference {
        /// 发起引用的实体 id
        entity: String,
        /// 未注册的目标 id
        reference: String,
    },

    /// 本体错误
    #[error("本体错误: {0}")]
    Ontology(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    Serialization(String),

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(String),
}

impl From<std::io::Error> for RegistryError {
    fn from(e: std::io::Error) -> Self {
        RegistryError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(e: serde_json::Error) -> Self {
        RegistryError::Serialization(e.to_string())
    }
}

impl From<figment::Error> for RegistryError {
    fn from(e: figment::Error) -> Self {
        RegistryError::Config(e.to_string())
    }
}

/// 应用程序结果类型
pub type Result<T> = std::result::Result<T, RegistryError>;
