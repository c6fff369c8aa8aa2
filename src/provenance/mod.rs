//! 溯源存储
//!
//! 以会话为粒度捕获操作调用轨迹，独立于注册中心。
//! “当前会话”是单一可变槽位而非栈；捕获逻辑是纯观察性的旁路，
//! 从不改变被包装调用的控制流，也从不吞掉错误。

pub mod analyzer;
pub mod export;

use std::collections::HashMap;
use std::future::Future;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::models::trace::{SessionTrace, TraceEntry};
use crate::observability::StoreMetrics;

/// 默认的单会话条目上限
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// 手动记录条目时的可选项
#[derive(Debug, Clone)]
pub struct TraceOptions {
    /// 随机种子
    pub seed: Option<u64>,

    /// 本次调用是否确定性
    pub deterministic: bool,

    /// 父条目 id 列表
    pub parents: Vec<String>,

    /// 附加元数据
    pub metadata: HashMap<String, String>,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            seed: None,
            deterministic: true,
            parents: Vec::new(),
            metadata: HashMap::new(),
        }
    }
}

/// 溯源存储
///
/// 状态机：无会话 → start_session → 活跃 → add_entry* →
/// end_session → 按会话 id 归档 → 无会话。
pub struct ProvenanceStore {
    current: Option<SessionTrace>,
    archive: HashMap<String, SessionTrace>,
    max_entries: usize,
    metrics: StoreMetrics,
}

impl Default for ProvenanceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProvenanceStore {
    /// 创建使用默认条目上限的存储
    pub fn new() -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES)
    }

    /// 创建指定条目上限的存储
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            current: None,
            archive: HashMap::new(),
            max_entries,
            metrics: StoreMetrics::default(),
        }
    }

    /// 指标计数
    pub fn metrics(&self) -> &StoreMetrics {
        &self.metrics
    }

    /// 开始新会话，返回会话 id
    ///
    /// 若存在未结束的活跃会话，先将其归档（写入结束时间），
    /// 条目不会被静默丢弃。
    pub fn start_session(&mut self, metadata: HashMap<String, String>) -> String {
        if self.current.is_some() {
            debug!("检测到未结束的活跃会话，先归档再开始新会话");
            self.end_session();
        }
        let session = SessionTrace::new(metadata);
        let id = session.id.clone();
        self.current = Some(session);
        self.metrics.record_session_start();
        id
    }

    /// 追加一条溯源条目，返回条目 id
    ///
    /// 没有活跃会话时惰性开启一个，保证追踪不会因缺少初始化而失败。
    pub fn add_entry(&mut self, entry: TraceEntry) -> String {
        if self.current.is_none() {
            self.start_session(HashMap::new());
        }
        let is_error = entry.is_error();
        let id = entry.id.clone();
        let cap = self.max_entries;
        // current 在上面保证存在
        let Some(session) = self.current.as_mut() else {
            return id;
        };
        let evicted = session.push_capped(entry, cap);
        self.metrics.record_entry(is_error, evicted);
        id
    }

    /// 结束当前会话并归档，返回归档的会话
    pub fn end_session(&mut self) -> Option<SessionTrace> {
        let mut session = self.current.take()?;
        session.finish();
        self.metrics.record_session_archive();
        self.archive.insert(session.id.clone(), session.clone());
        Some(session)
    }

    /// 查看当前活跃会话
    pub fn current_session(&self) -> Option<&SessionTrace> {
        self.current.as_ref()
    }

    /// 按 id 查找归档会话
    pub fn get_session(&self, id: &str) -> Option<&SessionTrace> {
        self.archive.get(id)
    }

    /// 列举归档会话（按开始时间排序）
    pub fn list_sessions(&self) -> Vec<&SessionTrace> {
        let mut sessions: Vec<_> = self.archive.values().collect();
        sessions.sort_by_key(|s| s.started_at);
        sessions
    }

    /// 清空归档与活跃会话
    pub fn clear(&mut self) {
        self.current = None;
        self.archive.clear();
    }

    /// 导出全部归档会话
    pub fn export_all(&self) -> Vec<SessionTrace> {
        self.list_sessions().into_iter().cloned().collect()
    }

    /// 包装一次同步调用并记录轨迹
    ///
    /// 无论成败都追加恰好一条条目；原始结果/错误原样返回。
    pub fn with_trace<T, E, F>(&mut self, op_id: &str, args: &[Value], f: F) -> Result<T, E>
    where
        T: Serialize,
        E: std::fmt::Display,
        F: FnOnce() -> Result<T, E>,
    {
        let started_at = Utc::now();
        let start = Instant::now();
        let result = f();
        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
        self.record_outcome(op_id, args, started_at, duration_ms, &result);
        result
    }

    /// 包装一次异步调用并记录轨迹
    ///
    /// 等待被包装操作时可能挂起，但轨迹记录本身不挂起，
    /// 且每次调用恰好执行一次。
    pub async fn with_trace_async<T, E, F, Fut>(
        &mut self,
        op_id: &str,
        args: &[Value],
        f: F,
    ) -> Result<T, E>
    where
        T: Serialize,
        E: std::fmt::Display,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let started_at = Utc::now();
        let start = Instant::now();
        let result = f().await;
        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
        self.record_outcome(op_id, args, started_at, duration_ms, &result);
        result
    }

    /// 手动记录一条即时轨迹
    ///
    /// 供无法包装单个函数的调用点（多步操作）使用；
    /// 没有起止括号，耗时恒为零。
    pub fn record_trace(
        &mut self,
        op_id: &str,
        inputs: Map<String, Value>,
        outputs: Option<Map<String, Value>>,
        options: TraceOptions,
    ) -> String {
        let mut entry = TraceEntry::new(op_id, Utc::now(), 0.0);
        entry.inputs = inputs;
        entry.outputs = outputs;
        entry.seed = options.seed;
        entry.deterministic = options.deterministic;
        entry.parents = options.parents;
        entry.metadata = options.metadata;
        self.add_entry(entry)
    }

    fn record_outcome<T, E>(
        &mut self,
        op_id: &str,
        args: &[Value],
        started_at: chrono::DateTime<Utc>,
        duration_ms: f64,
        result: &Result<T, E>,
    ) where
        T: Serialize,
        E: std::fmt::Display,
    {
        let mut entry = TraceEntry::new(op_id, started_at, duration_ms);
        entry.inputs = args
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("arg{i}"), v.clone()))
            .collect();
        match result {
            Ok(value) => {
                let mut outputs = Map::new();
                outputs.insert(
                    "result".to_string(),
                    serde_json::to_value(value).unwrap_or(Value::Null),
                );
                entry.outputs = Some(outputs);
            }
            Err(error) => {
                entry.error = Some(error.to_string());
            }
        }
        self.add_entry(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_with_trace_success() {
        let mut store = ProvenanceStore::new();
        let result: Result<i64, std::convert::Infallible> =
            store.with_trace("x.y", &[json!(2), json!(3)], || Ok(2 + 3));

        assert_eq!(result.unwrap(), 5);
        let session = store.current_session().unwrap();
        assert_eq!(session.entries.len(), 1);

        let entry = &session.entries[0];
        assert_eq!(entry.op_id, "x.y");
        assert_eq!(entry.inputs["arg0"], json!(2));
        assert_eq!(entry.inputs["arg1"], json!(3));
        assert_eq!(entry.outputs.as_ref().unwrap()["result"], json!(5));
        assert!(entry.error.is_none());
    }

    #[test]
    fn test_with_trace_failure_propagates() {
        let mut store = ProvenanceStore::new();
        let result: Result<i64, String> =
            store.with_trace("x.fail", &[json!(1)], || Err("boom".to_string()));

        assert_eq!(result.unwrap_err(), "boom");
        let entry = &store.current_session().unwrap().entries[0];
        assert_eq!(entry.error.as_deref(), Some("boom"));
        assert!(entry.outputs.is_none());
    }

    #[tokio::test]
    async fn test_with_trace_async() {
        let mut store = ProvenanceStore::new();
        let result: Result<i64, std::convert::Infallible> = store
            .with_trace_async("x.async", &[json!(7)], || async { Ok(7 * 2) })
            .await;

        assert_eq!(result.unwrap(), 14);
        let entry = &store.current_session().unwrap().entries[0];
        assert_eq!(entry.outputs.as_ref().unwrap()["result"], json!(14));
    }

    #[test]
    fn test_session_cap_fifo() {
        let mut store = ProvenanceStore::with_max_entries(3);
        for i in 0..8 {
            let _ = store.record_trace(
                &format!("op.{i}"),
                Map::new(),
                None,
                TraceOptions::default(),
            );
        }

        let entries = &store.current_session().unwrap().entries;
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].op_id, "op.5");
        assert_eq!(entries[2].op_id, "op.7");
    }

    #[test]
    fn test_end_session_archives() {
        let mut store = ProvenanceStore::new();
        store.start_session(HashMap::new());
        let _ = store.record_trace("op.a", Map::new(), None, TraceOptions::default());

        let archived = store.end_session().unwrap();
        assert!(archived.ended_at.is_some());
        assert!(store.current_session().is_none());
        assert_eq!(store.get_session(&archived.id).unwrap().entries.len(), 1);
        assert!(store.end_session().is_none());
    }

    #[test]
    fn test_overlapping_start_archives_previous() {
        let mut store = ProvenanceStore::new();
        let first = store.start_session(HashMap::new());
        let _ = store.record_trace("op.a", Map::new(), None, TraceOptions::default());

        let second = store.start_session(HashMap::new());
        assert_ne!(first, second);

        // 未结束的会话被归档而不是丢弃
        let archived = store.get_session(&first).unwrap();
        assert_eq!(archived.entries.len(), 1);
        assert!(archived.ended_at.is_some());
    }

    #[test]
    fn test_lazy_session_start() {
        let mut store = ProvenanceStore::new();
        assert!(store.current_session().is_none());
        let _ = store.record_trace("op.lazy", Map::new(), None, TraceOptions::default());
        assert!(store.current_session().is_some());
    }

    #[test]
    fn test_clear() {
        let mut store = ProvenanceStore::new();
        store.start_session(HashMap::new());
        store.end_session();
        assert_eq!(store.list_sessions().len(), 1);

        store.clear();
        assert!(store.list_sessions().is_empty());
        assert!(store.export_all().is_empty());
    }
}
