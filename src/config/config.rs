use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::coverage::gates::GateThresholds;

/// 溯源存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvenanceConfig {
    /// 单会话条目上限（FIFO 淘汰）
    pub max_entries_per_session: usize,
}

impl Default for ProvenanceConfig {
    fn default() -> Self {
        Self {
            max_entries_per_session: crate::provenance::DEFAULT_MAX_ENTRIES,
        }
    }
}

/// 导出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// 输出目录
    pub output_dir: PathBuf,

    /// 本体文档文件名
    pub ontology_file: String,

    /// Agent 能力目录文件名
    pub catalog_file: String,

    /// DOT 图文件名
    pub graph_file: String,

    /// 覆盖率报告文件名
    pub report_file: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./docs/generated"),
            ontology_file: "ontology.json".to_string(),
            catalog_file: "agent_catalog.json".to_string(),
            graph_file: "ontology.dot".to_string(),
            report_file: "coverage.txt".to_string(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,

    /// 结构化日志格式
    pub structured: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            structured: false,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 溯源存储配置
    pub provenance: ProvenanceConfig,

    /// 质量门限配置
    pub gates: GateThresholds,

    /// 导出配置
    pub export: ExportConfig,

    /// 日志配置
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.provenance.max_entries_per_session, 1000);
        assert_eq!(config.gates.min_overall, 60.0);
        assert_eq!(config.export.catalog_file, "agent_catalog.json");
    }
}
