//! 覆盖率报告渲染
//!
//! 纯格式化器：把结构化指标渲染为确定性的文本报告
//! （进度条、按领域/按安全级别的表格），不做任何 IO。

use std::fmt::Write as _;

use super::CoverageMetrics;

/// 进度条字符宽度
const BAR_WIDTH: usize = 20;

/// 渲染一个 0-100 分值的进度条
fn bar(score: f64) -> String {
    let filled = ((score / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// 渲染覆盖率报告
pub fn format_coverage_report(metrics: &CoverageMetrics) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "== 操作目录覆盖率报告 ==");
    let _ = writeln!(out, "操作总数: {}", metrics.total_operations);
    let _ = writeln!(out, "校验错误: {}", metrics.validation_errors);
    out.push('\n');

    let rows = [
        ("操作覆盖", metrics.scores.operation),
        ("Schema 覆盖", metrics.scores.schema),
        ("用例覆盖", metrics.scores.example),
        ("安全标注", metrics.scores.safety),
        ("Agent 就绪", metrics.scores.agent_readiness),
        ("本体完整性", metrics.scores.integrity),
        ("纯度", metrics.scores.purity),
    ];
    for (label, score) in rows {
        let _ = writeln!(out, "{label:<12} {} {score:>5.1}", bar(score));
    }
    out.push('\n');
    let _ = writeln!(out, "总分: {:.1} {}", metrics.overall, bar(metrics.overall));
    out.push('\n');

    if !metrics.by_safety.is_empty() {
        let _ = writeln!(out, "-- 按安全级别 --");
        for (safety, count) in &metrics.by_safety {
            let _ = writeln!(out, "{safety:<12} {count:>5}");
        }
        out.push('\n');
    }

    if !metrics.by_domain.is_empty() {
        let _ = writeln!(out, "-- 按领域 --");
        let _ = writeln!(
            out,
            "{:<12} {:>5} {:>7} {:>7} {:>5} {:>5}",
            "领域", "操作", "schema", "用例", "纯", "确定"
        );
        for (domain, bucket) in &metrics.by_domain {
            let _ = writeln!(
                out,
                "{:<12} {:>5} {:>7} {:>7} {:>5} {:>5}",
                domain,
                bucket.total,
                bucket.with_schema,
                bucket.with_examples,
                bucket.pure,
                bucket.deterministic
            );
        }
    }

    out
}
