//! 溯源会话导出
//!
//! 供外部轨迹工具消费的 JSON-Lines 与 DOT 导出。
//! 依赖图为每条条目画一个节点（出错的条目标红），
//! 每个显式记录的父条目 id 画一条边；
//! 从未记录父条目的会话导出的图没有边。

use std::fmt::Write as _;

use crate::error::Result;
use crate::models::trace::SessionTrace;

/// 导出为 JSON-Lines 文本，每行一条条目
pub fn to_json_lines(session: &SessionTrace) -> Result<String> {
    let mut out = String::new();
    for entry in &session.entries {
        out.push_str(&serde_json::to_string(entry)?);
        out.push('\n');
    }
    Ok(out)
}

/// 导出为 DOT 格式依赖图
pub fn to_dependency_dot(session: &SessionTrace) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "digraph session_{} {{", short_id(&session.id));
    out.push_str("  node [shape=box, fontsize=10];\n");

    for entry in &session.entries {
        let color = if entry.is_error() { "red" } else { "black" };
        let _ = writeln!(
            out,
            "  \"{}\" [label=\"{}\", color={color}];",
            entry.id, entry.op_id
        );
    }

    for entry in &session.entries {
        for parent in &entry.parents {
            let _ = writeln!(out, "  \"{parent}\" -> \"{}\";", entry.id);
        }
    }

    out.push_str("}\n");
    out
}

fn short_id(id: &str) -> String {
    id.chars().filter(|c| c.is_ascii_alphanumeric()).take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::trace::TraceEntry;
    use chrono::Utc;
    use std::collections::HashMap;

    #[test]
    fn test_json_lines_one_line_per_entry() {
        let mut session = SessionTrace::new(HashMap::new());
        session.entries.push(TraceEntry::new("a", Utc::now(), 1.0));
        session.entries.push(TraceEntry::new("b", Utc::now(), 2.0));

        let jsonl = to_json_lines(&session).unwrap();
        assert_eq!(jsonl.lines().count(), 2);
        let first: serde_json::Value = serde_json::from_str(jsonl.lines().next().unwrap()).unwrap();
        assert_eq!(first["op_id"], "a");
    }

    #[test]
    fn test_dependency_dot_edges_from_parents() {
        let mut session = SessionTrace::new(HashMap::new());
        let parent = TraceEntry::new("a", Utc::now(), 1.0);
        let parent_id = parent.id.clone();
        let mut child = TraceEntry::new("b", Utc::now(), 1.0);
        child.parents.push(parent_id.clone());
        child.error = Some("boom".to_string());
        session.entries.push(parent);
        session.entries.push(child);

        let dot = to_dependency_dot(&session);
        assert!(dot.contains(&format!("\"{parent_id}\" ->")));
        assert!(dot.contains("color=red"));
    }

    #[test]
    fn test_no_parents_means_no_edges() {
        let mut session = SessionTrace::new(HashMap::new());
        session.entries.push(TraceEntry::new("a", Utc::now(), 1.0));
        session.entries.push(TraceEntry::new("b", Utc::now(), 1.0));

        let dot = to_dependency_dot(&session);
        assert!(!dot.contains("->"));
    }
}
