//! 可观测性模块
//!
//! 提供结构化日志初始化与溯源存储的简单指标计数。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

// ===== Simple Metrics (using atomics for zero-dep implementation) =====

/// 溯源存储指标
#[derive(Clone, Default)]
pub struct StoreMetrics {
    pub sessions_started: Arc<AtomicU64>,
    pub sessions_archived: Arc<AtomicU64>,
    pub entries_recorded: Arc<AtomicU64>,
    pub entries_evicted: Arc<AtomicU64>,
    pub errors_recorded: Arc<AtomicU64>,
}

impl StoreMetrics {
    /// 记录会话开始
    pub fn record_session_start(&self) {
        self.sessions_started.fetch_add(1, Ordering::SeqCst);
    }

    /// 记录会话归档
    pub fn record_session_archive(&self) {
        self.sessions_archived.fetch_add(1, Ordering::SeqCst);
    }

    /// 记录一条溯源条目
    pub fn record_entry(&self, is_error: bool, evicted: bool) {
        self.entries_recorded.fetch_add(1, Ordering::SeqCst);
        if is_error {
            self.errors_recorded.fetch_add(1, Ordering::SeqCst);
        }
        if evicted {
            self.entries_evicted.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// 生成 Prometheus 格式指标
    pub fn gather(&self) -> String {
        format!(
            r#"# HELP provenance_sessions_started_total Started provenance sessions
# TYPE provenance_sessions_started_total counter
provenance_sessions_started_total {}
# HELP provenance_sessions_archived_total Archived provenance sessions
# TYPE provenance_sessions_archived_total counter
provenance_sessions_archived_total {}
# HELP provenance_entries_recorded_total Recorded trace entries
# TYPE provenance_entries_recorded_total counter
provenance_entries_recorded_total {}
# HELP provenance_entries_evicted_total Entries evicted by the session cap
# TYPE provenance_entries_evicted_total counter
provenance_entries_evicted_total {}
# HELP provenance_errors_recorded_total Trace entries that captured an error
# TYPE provenance_errors_recorded_total counter
provenance_errors_recorded_total {}
"#,
            self.sessions_started.load(Ordering::SeqCst),
            self.sessions_archived.load(Ordering::SeqCst),
            self.entries_recorded.load(Ordering::SeqCst),
            self.entries_evicted.load(Ordering::SeqCst),
            self.errors_recorded.load(Ordering::SeqCst),
        )
    }
}

// ===== Structured Logging =====

/// 初始化结构化日志
pub fn init_tracing(service_name: &str) {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| format!("info,{}", service_name));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}
