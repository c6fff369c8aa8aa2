//! 迁移模块
//!
//! 旧版扁平操作元数据格式与注册中心 Operation 之间的双向桥。
//! 包含格式转换、安全级别推断与旧版模块的批量接入。

pub mod import;
pub mod transform;

use serde::{Deserialize, Serialize};

pub use import::{AnnotatedOp, LegacyModule, migrate_module, register_module};
pub use transform::{LegacyOpMeta, OpExtension, infer_safety, meta_to_operation, operation_to_meta};

/// 批量迁移报告
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MigrationReport {
    /// 处理的模块数
    pub modules: usize,

    /// 转换出的操作数
    pub operations_converted: usize,

    /// 成功注册的操作数
    pub operations_registered: usize,

    /// 因 id 重复被跳过的操作数
    pub duplicates_skipped: usize,
}

impl MigrationReport {
    /// 合并另一份报告
    pub fn merge(&mut self, other: &MigrationReport) {
        self.modules += other.modules;
        self.operations_converted += other.operations_converted;
        self.operations_registered += other.operations_registered;
        self.duplicates_skipped += other.duplicates_skipped;
    }
}
