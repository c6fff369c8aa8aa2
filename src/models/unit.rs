//! 物理单位模型
//!
//! 每个单位锚定到一个 SI 基准单位，携带换算系数。

use serde::{Deserialize, Serialize};

use super::entity::EntityCore;

/// 物理单位实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    /// 公共字段
    #[serde(flatten)]
    pub core: EntityCore,

    /// 单位符号
    pub symbol: String,

    /// 物理量纲
    pub dimension: String,

    /// 到 SI 基准单位的换算系数
    pub to_si_factor: f64,

    /// 对应 SI 单位的实体 id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub si_unit: Option<String>,
}

impl Unit {
    /// 创建单位
    pub fn new(id: &str, name: &str, symbol: &str, dimension: &str, to_si_factor: f64) -> Self {
        Self {
            core: EntityCore::new(id, name),
            symbol: symbol.to_string(),
            dimension: dimension.to_string(),
            to_si_factor,
            si_unit: None,
        }
    }

    /// 指定对应的 SI 单位 id
    pub fn with_si_unit(mut self, si_unit: &str) -> Self {
        self.si_unit = Some(si_unit.to_string());
        self
    }

    /// 换算到 SI 基准单位
    pub fn to_si(&self, value: f64) -> f64 {
        value * self.to_si_factor
    }

    /// 从 SI 基准单位换算回本单位
    pub fn from_si(&self, value: f64) -> f64 {
        value / self.to_si_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversion() {
        let mm = Unit::new("unit.mm", "Millimeter", "mm", "length", 0.001).with_si_unit("unit.m");

        assert_eq!(mm.to_si(1000.0), 1.0);
        assert_eq!(mm.from_si(1.0), 1000.0);
        assert_eq!(mm.si_unit.as_deref(), Some("unit.m"));
    }

    #[test]
    fn test_unit_roundtrip_through_si() {
        let deg = Unit::new("unit.deg", "Degree", "°", "angle", std::f64::consts::PI / 180.0);
        let value = 45.0;
        let back = deg.from_si(deg.to_si(value));
        assert!((back - value).abs() < 1e-9);
    }
}
