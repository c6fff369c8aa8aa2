//! CI Quality Gates
//!
//! Threshold checks over coverage metrics. Gate failures are structured
//! pass/fail plus itemized string reasons, never exceptions; the embedding
//! CI process decides the consequence (typically the build's exit status).

use serde::{Deserialize, Serialize};

use super::CoverageMetrics;

/// Configurable gate thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateThresholds {
    /// Minimum weighted overall score.
    pub min_overall: f64,

    /// Minimum safety coverage score.
    pub min_safety: f64,

    /// Minimum ontology integrity score.
    pub min_integrity: f64,

    /// Maximum tolerated validation error count.
    pub max_validation_errors: usize,
}

impl Default for GateThresholds {
    fn default() -> Self {
        Self {
            min_overall: 60.0,
            min_safety: 80.0,
            min_integrity: 95.0,
            max_validation_errors: 10,
        }
    }
}

/// Gate check outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateVerdict {
    /// Whether every gate passed.
    pub passed: bool,

    /// One reason per failed gate.
    pub reasons: Vec<String>,
}

/// Check every gate independently and collect all failures.
pub fn check_gates(metrics: &CoverageMetrics, thresholds: &GateThresholds) -> GateVerdict {
    let mut reasons = Vec::new();

    if metrics.overall < thresholds.min_overall {
        reasons.push(format!(
            "Overall score {:.1} is below the minimum {:.1}",
            metrics.overall, thresholds.min_overall
        ));
    }
    if metrics.scores.safety < thresholds.min_safety {
        reasons.push(format!(
            "Safety coverage {:.1} is below the minimum {:.1}",
            metrics.scores.safety, thresholds.min_safety
        ));
    }
    if metrics.scores.integrity < thresholds.min_integrity {
        reasons.push(format!(
            "Ontology integrity {:.1} is below the minimum {:.1}",
            metrics.scores.integrity, thresholds.min_integrity
        ));
    }
    if metrics.validation_errors > thresholds.max_validation_errors {
        reasons.push(format!(
            "Validation errors {} exceed the maximum {}",
            metrics.validation_errors, thresholds.max_validation_errors
        ));
    }

    GateVerdict {
        passed: reasons.is_empty(),
        reasons,
    }
}
