use crate::config::config::AppConfig;
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use std::path::PathBuf;

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 搜索路径：
    /// 1. ./synapse.toml
    /// 2. 环境变量（SYNAPSE_ 前缀）
    pub fn load() -> Result<AppConfig, figment::Error> {
        let figment = Figment::new()
            .merge(Toml::file("synapse.toml"))
            .merge(Env::prefixed("SYNAPSE_").split("_").global());

        figment.extract()
    }

    /// 从指定路径加载配置
    pub fn load_from(path: PathBuf) -> Result<AppConfig, figment::Error> {
        let figment = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("SYNAPSE_").split("_").global());

        figment.extract()
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.provenance.max_entries_per_session == 0 {
            return Err(ConfigValidationError::InvalidSessionCap);
        }

        for (name, score) in [
            ("min_overall", config.gates.min_overall),
            ("min_safety", config.gates.min_safety),
            ("min_integrity", config.gates.min_integrity),
        ] {
            if !(0.0..=100.0).contains(&score) {
                return Err(ConfigValidationError::InvalidThreshold(name.to_string()));
            }
        }

        if config.export.output_dir.as_os_str().is_empty() {
            return Err(ConfigValidationError::MissingOutputDir);
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("会话条目上限无效，必须大于 0")]
    InvalidSessionCap,

    #[error("门限 {0} 超出 0-100 范围")]
    InvalidThreshold(String),

    #[error("导出目录未配置")]
    MissingOutputDir,
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("synapse.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_session_cap_rejected() {
        let mut config = AppConfig::default();
        config.provenance.max_entries_per_session = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidSessionCap)
        ));
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let mut config = AppConfig::default();
        config.gates.min_safety = 130.0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidThreshold(_))
        ));
    }
}
