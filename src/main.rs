use std::collections::HashMap;

use anyhow::{Context, Result};
use synapse::config::ConfigLoader;
use synapse::coverage::gates::check_gates;
use synapse::coverage::report::format_coverage_report;
use synapse::coverage::CoverageAnalyzer;
use synapse::observability::init_tracing;
use synapse::provenance::{ProvenanceStore, export::to_json_lines};
use synapse::registry::SemanticRegistry;
use synapse::seed::register_core_vocabulary;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("synapse");

    info!("Starting Synapse catalog export...");

    let config = ConfigLoader::load().context("配置加载失败")?;
    ConfigLoader::validate(&config)?;
    info!("Configuration loaded successfully");

    let mut registry = SemanticRegistry::new();
    register_core_vocabulary(&mut registry)?;
    info!("Core vocabulary registered");

    let mut store =
        ProvenanceStore::with_max_entries(config.provenance.max_entries_per_session);
    store.start_session(HashMap::from([(
        "purpose".to_string(),
        "catalog-export".to_string(),
    )]));

    let mut analyzer = CoverageAnalyzer::new();
    let metrics = store.with_trace("workflow.analyze_coverage", &[], || {
        analyzer.analyze(&mut registry)
    })?;
    info!(
        operations = metrics.total_operations,
        overall = metrics.overall,
        "Coverage analysis finished"
    );

    let issues = registry.validate();
    if issues.is_empty() {
        info!("Ontology validation passed");
    } else {
        warn!(count = issues.len(), "Ontology validation reported issues");
        for issue in &issues {
            warn!(kind = %issue.kind, "{}", issue.message);
        }
    }

    let ontology = store.with_trace("workflow.export_ontology", &[], || registry.to_json())?;
    let catalog = serde_json::to_string_pretty(&registry.to_agent_catalog())?;
    let graph = registry.to_dot();
    let report = format_coverage_report(&metrics);

    let out_dir = &config.export.output_dir;
    tokio::fs::create_dir_all(out_dir)
        .await
        .with_context(|| format!("创建输出目录失败: {}", out_dir.display()))?;
    tokio::fs::write(out_dir.join(&config.export.ontology_file), ontology).await?;
    tokio::fs::write(out_dir.join(&config.export.catalog_file), catalog).await?;
    tokio::fs::write(out_dir.join(&config.export.graph_file), graph).await?;
    tokio::fs::write(out_dir.join(&config.export.report_file), report).await?;
    info!(dir = %out_dir.display(), "Catalog documents written");

    if let Some(session) = store.end_session() {
        let jsonl = to_json_lines(&session)?;
        tokio::fs::write(out_dir.join("provenance.jsonl"), jsonl).await?;
        info!(session = %session.id, entries = session.entries.len(), "Provenance session archived");
    }
    tokio::fs::write(out_dir.join("metrics.prom"), store.metrics().gather()).await?;

    let verdict = check_gates(&metrics, &config.gates);
    if !verdict.passed {
        for reason in &verdict.reasons {
            error!("质量门未通过: {reason}");
        }
        std::process::exit(1);
    }

    info!("All quality gates passed");
    Ok(())
}
