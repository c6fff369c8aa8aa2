//! Coverage Analyzer
//!
//! Reads the registry's operation set and computes a weighted
//! multi-dimensional documentation/classification score used as an
//! automated quality gate. The first `analyze` call of an analyzer
//! instance bulk-registers the builtin legacy operation modules,
//! silently skipping duplicate ids, so CI runs are self-contained.

pub mod gates;
pub mod report;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::registry::SemanticRegistry;
use crate::seed::legacy_ops::register_builtin_modules;

/// Fixed dimension weights for the overall score.
const WEIGHT_OPERATION: f64 = 1.0;
const WEIGHT_SCHEMA: f64 = 0.8;
const WEIGHT_EXAMPLE: f64 = 0.5;
const WEIGHT_SAFETY: f64 = 1.0;
const WEIGHT_AGENT: f64 = 0.3;
const WEIGHT_INTEGRITY: f64 = 1.5;
const WEIGHT_PURITY: f64 = 0.5;

/// Integrity penalty per validation error.
const INTEGRITY_PENALTY: f64 = 5.0;

/// The seven 0-100 dimension scores.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DimensionScores {
    /// Operation coverage; registered implies covered, always 100.
    pub operation: f64,

    /// Share of operations with a non-empty input or output schema.
    pub schema: f64,

    /// Share of operations with at least one example.
    pub example: f64,

    /// Share of operations with a safety classification.
    pub safety: f64,

    /// Share of operations with agent discovery metadata.
    pub agent_readiness: f64,

    /// 100 minus a fixed penalty per validation error, floored at 0.
    pub integrity: f64,

    /// Share of pure operations.
    pub purity: f64,
}

/// Per-domain coverage bucket.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DomainCoverage {
    /// Operations in the domain.
    pub total: usize,

    /// Operations with a schema.
    pub with_schema: usize,

    /// Operations with examples.
    pub with_examples: usize,

    /// Pure operations.
    pub pure: usize,

    /// Deterministic operations.
    pub deterministic: usize,
}

/// Structured coverage metrics consumed by the CI gate.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CoverageMetrics {
    /// Total registered operations.
    pub total_operations: usize,

    /// Operations with a non-empty input or output schema.
    pub with_schema: usize,

    /// Operations with at least one example.
    pub with_examples: usize,

    /// Operations with a safety classification.
    pub with_safety: usize,

    /// Operations with synonyms or a canonical prompt.
    pub with_agent_metadata: usize,

    /// Pure operations.
    pub pure: usize,

    /// Deterministic operations.
    pub deterministic: usize,

    /// Operation counts per safety class.
    pub by_safety: BTreeMap<String, usize>,

    /// Coverage buckets per domain.
    pub by_domain: BTreeMap<String, DomainCoverage>,

    /// Validation error count from the integrity sweep.
    pub validation_errors: usize,

    /// Dimension scores.
    pub scores: DimensionScores,

    /// Weighted overall score.
    pub overall: f64,
}

/// Coverage analyzer with one-time builtin module seeding.
#[derive(Debug, Default)]
pub struct CoverageAnalyzer {
    seeded: bool,
}

impl CoverageAnalyzer {
    /// Create an analyzer that has not seeded yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed builtin legacy modules (first call only), then compute metrics.
    pub fn analyze(&mut self, registry: &mut SemanticRegistry) -> Result<CoverageMetrics> {
        if !self.seeded {
            let report = register_builtin_modules(registry)?;
            info!(
                modules = report.modules,
                registered = report.operations_registered,
                skipped = report.duplicates_skipped,
                "builtin legacy modules migrated"
            );
            self.seeded = true;
        }
        Ok(compute_metrics(registry))
    }
}

/// Compute coverage metrics for the registry as-is (no seeding).
pub fn compute_metrics(registry: &SemanticRegistry) -> CoverageMetrics {
    let mut metrics = CoverageMetrics::default();

    for op in registry.list_operations() {
        metrics.total_operations += 1;
        let domain = metrics.by_domain.entry(op.domain.clone()).or_default();
        domain.total += 1;

        if op.has_schema() {
            metrics.with_schema += 1;
            domain.with_schema += 1;
        }
        if !op.examples.is_empty() {
            metrics.with_examples += 1;
            domain.with_examples += 1;
        }
        if let Some(safety) = op.safety {
            metrics.with_safety += 1;
            *metrics.by_safety.entry(safety.to_string()).or_insert(0) += 1;
        }
        if op.has_agent_metadata() {
            metrics.with_agent_metadata += 1;
        }
        if op.pure {
            metrics.pure += 1;
            domain.pure += 1;
        }
        if op.deterministic {
            metrics.deterministic += 1;
            domain.deterministic += 1;
        }
    }

    metrics.validation_errors = registry.validate().len();

    let ratio = |part: usize| -> f64 {
        if metrics.total_operations == 0 {
            100.0
        } else {
            part as f64 / metrics.total_operations as f64 * 100.0
        }
    };
    metrics.scores = DimensionScores {
        operation: 100.0,
        schema: ratio(metrics.with_schema),
        example: ratio(metrics.with_examples),
        safety: ratio(metrics.with_safety),
        agent_readiness: ratio(metrics.with_agent_metadata),
        integrity: (100.0 - INTEGRITY_PENALTY * metrics.validation_errors as f64).max(0.0),
        purity: ratio(metrics.pure),
    };

    let weighted = metrics.scores.operation * WEIGHT_OPERATION
        + metrics.scores.schema * WEIGHT_SCHEMA
        + metrics.scores.example * WEIGHT_EXAMPLE
        + metrics.scores.safety * WEIGHT_SAFETY
        + metrics.scores.agent_readiness * WEIGHT_AGENT
        + metrics.scores.integrity * WEIGHT_INTEGRITY
        + metrics.scores.purity * WEIGHT_PURITY;
    let weight_sum = WEIGHT_OPERATION
        + WEIGHT_SCHEMA
        + WEIGHT_EXAMPLE
        + WEIGHT_SAFETY
        + WEIGHT_AGENT
        + WEIGHT_INTEGRITY
        + WEIGHT_PURITY;
    metrics.overall = weighted / weight_sum;

    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::operation::{ArgSchema, OpExample, Operation, SafetyClass};
    use serde_json::json;

    fn documented_op(id: &str, domain: &str) -> Operation {
        let mut op = Operation::new(id, id, domain, "misc");
        op.inputs.push(ArgSchema::new("a", "core.any"));
        op.examples.push(OpExample {
            description: "basic".to_string(),
            inputs: json!({"a": 1}),
            expected: None,
        });
        op.safety = Some(SafetyClass::Safe);
        op.synonyms.push("alias".to_string());
        op
    }

    #[test]
    fn test_fully_documented_set_scores_100() {
        let mut registry = SemanticRegistry::new();
        registry
            .register_datatype(crate::models::datatype::DataType::new(
                "core.any",
                "Any",
                crate::models::datatype::BaseRepr::Any,
            ))
            .unwrap();
        registry.register_operation(documented_op("a.x", "a")).unwrap();
        registry.register_operation(documented_op("a.y", "a")).unwrap();

        let metrics = compute_metrics(&registry);
        assert_eq!(metrics.scores.schema, 100.0);
        assert_eq!(metrics.scores.example, 100.0);
        assert_eq!(metrics.scores.safety, 100.0);
        assert_eq!(metrics.scores.purity, 100.0);
        assert_eq!(metrics.scores.integrity, 100.0);
        assert!((metrics.overall - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_removing_examples_drops_only_example_dimension() {
        let mut registry = SemanticRegistry::new();
        registry
            .register_datatype(crate::models::datatype::DataType::new(
                "core.any",
                "Any",
                crate::models::datatype::BaseRepr::Any,
            ))
            .unwrap();
        let mut op = documented_op("a.x", "a");
        op.examples.clear();
        registry.register_operation(op).unwrap();

        let metrics = compute_metrics(&registry);
        assert_eq!(metrics.scores.example, 0.0);
        assert_eq!(metrics.scores.schema, 100.0);
        assert_eq!(metrics.scores.safety, 100.0);
        assert_eq!(metrics.scores.purity, 100.0);
    }

    #[test]
    fn test_integrity_penalty_floors_at_zero() {
        let mut registry = SemanticRegistry::new();
        let mut op = Operation::new("a.x", "X", "a", "misc");
        // 25 dangling dependencies -> 125 penalty points, floored at 0
        for i in 0..25 {
            op.dependencies.push(format!("ghost.{i}"));
        }
        registry.register_operation(op).unwrap();

        let metrics = compute_metrics(&registry);
        assert_eq!(metrics.validation_errors, 25);
        assert_eq!(metrics.scores.integrity, 0.0);
    }

    #[test]
    fn test_analyzer_seeds_once() {
        let mut registry = SemanticRegistry::new();
        let mut analyzer = CoverageAnalyzer::new();

        let first = analyzer.analyze(&mut registry).unwrap();
        assert!(first.total_operations > 0);

        let count_before = registry.list_operations().len();
        let second = analyzer.analyze(&mut registry).unwrap();
        assert_eq!(second.total_operations, count_before);
    }

    #[test]
    fn test_domain_buckets() {
        let mut registry = SemanticRegistry::new();
        registry
            .register_datatype(crate::models::datatype::DataType::new(
                "core.any",
                "Any",
                crate::models::datatype::BaseRepr::Any,
            ))
            .unwrap();
        registry.register_operation(documented_op("a.x", "alpha")).unwrap();
        let mut bare = Operation::new("b.y", "Y", "beta", "misc");
        bare.pure = false;
        registry.register_operation(bare).unwrap();

        let metrics = compute_metrics(&registry);
        assert_eq!(metrics.by_domain["alpha"].with_schema, 1);
        assert_eq!(metrics.by_domain["beta"].with_schema, 0);
        assert_eq!(metrics.by_safety["safe"], 1);
    }
}
