//! Synapse - 语义操作注册中心
//!
//! 为 AI Agent 提供进程级的类型化能力目录：七类元数据实体的注册
//! 与完整性校验、旧版扁平格式的双向迁移桥、会话粒度的调用溯源，
//! 以及作为 CI 质量门的多维覆盖率评分。

pub mod catalog;
pub mod config;
pub mod coverage;
pub mod error;
pub mod migration;
pub mod models;
pub mod observability;
pub mod provenance;
pub mod registry;
pub mod seed;
