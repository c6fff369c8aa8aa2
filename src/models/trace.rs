//! 溯源数据模型
//!
//! 一条 TraceEntry 记录被追踪操作的一次调用；
//! SessionTrace 是显式开始与结束之间的有界有序调用集合。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// 调用溯源条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEntry {
    /// 生成的条目唯一标识
    pub id: String,

    /// 被调用操作的 id
    pub op_id: String,

    /// 调用开始时间
    pub started_at: DateTime<Utc>,

    /// 调用耗时（毫秒）
    pub duration_ms: f64,

    /// 输入记录（按 arg0, arg1, … 命名）
    pub inputs: serde_json::Map<String, serde_json::Value>,

    /// 输出记录（失败时为空）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<serde_json::Map<String, serde_json::Value>>,

    /// 随机种子
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// 本次调用是否确定性
    pub deterministic: bool,

    /// 父条目 id 列表（显式记录的因果链）
    #[serde(default)]
    pub parents: Vec<String>,

    /// 错误消息（成功时为空）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// 附加元数据
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl TraceEntry {
    /// 创建条目并分配 id
    pub fn new(op_id: &str, started_at: DateTime<Utc>, duration_ms: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            op_id: op_id.to_string(),
            started_at,
            duration_ms,
            inputs: serde_json::Map::new(),
            outputs: None,
            seed: None,
            deterministic: true,
            parents: Vec::new(),
            error: None,
            metadata: HashMap::new(),
        }
    }

    /// 本条目是否记录了失败
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// 溯源会话
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTrace {
    /// 生成的会话唯一标识
    pub id: String,

    /// 会话开始时间
    pub started_at: DateTime<Utc>,

    /// 会话结束时间（归档时写入）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,

    /// 有序条目列表
    pub entries: Vec<TraceEntry>,

    /// 会话元数据
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl SessionTrace {
    /// 创建新会话
    pub fn new(metadata: HashMap<String, String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            ended_at: None,
            entries: Vec::new(),
            metadata,
        }
    }

    /// 追加条目并执行 FIFO 上限淘汰
    ///
    /// 达到 `cap` 时淘汰最旧的条目；返回是否发生了淘汰。
    pub fn push_capped(&mut self, entry: TraceEntry, cap: usize) -> bool {
        let mut evicted = false;
        self.entries.push(entry);
        while self.entries.len() > cap {
            self.entries.remove(0);
            evicted = true;
        }
        evicted
    }

    /// 标记会话结束
    pub fn finish(&mut self) {
        self.ended_at = Some(Utc::now());
    }

    /// 会话是否仍在进行
    pub fn is_active(&self) -> bool {
        self.ended_at.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = TraceEntry::new("math.add", Utc::now(), 1.5);
        assert!(!entry.id.is_empty());
        assert_eq!(entry.op_id, "math.add");
        assert!(!entry.is_error());
    }

    #[test]
    fn test_session_fifo_eviction() {
        let mut session = SessionTrace::new(HashMap::new());
        let cap = 3;
        let mut first_surviving = String::new();
        for i in 0..5 {
            let entry = TraceEntry::new(&format!("op.{i}"), Utc::now(), 0.0);
            if i == 2 {
                first_surviving = entry.op_id.clone();
            }
            session.push_capped(entry, cap);
        }

        assert_eq!(session.entries.len(), cap);
        // 最旧的条目先被淘汰
        assert_eq!(session.entries[0].op_id, first_surviving);
        assert_eq!(session.entries[2].op_id, "op.4");
    }

    #[test]
    fn test_session_finish() {
        let mut session = SessionTrace::new(HashMap::new());
        assert!(session.is_active());
        session.finish();
        assert!(!session.is_active());
        assert!(session.ended_at.is_some());
    }
}
