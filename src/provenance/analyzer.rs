//! Trace Analyzer
//!
//! Read-only analysis over one captured session: per-operation call
//! frequency, average duration and error rate, plus the most frequent
//! contiguous three-operation windows across the entry sequence.
//! Intended to surface common usage idioms from real traces.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::trace::SessionTrace;

/// Number of ranked windows to keep.
const TOP_SEQUENCES: usize = 10;

/// Length of the contiguous operation-id window.
const WINDOW_LEN: usize = 3;

/// Aggregated statistics for one operation id.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OpStat {
    /// Number of calls.
    pub count: usize,

    /// Average duration in milliseconds (total / count).
    pub avg_duration_ms: f64,

    /// Error count / call count.
    pub error_rate: f64,
}

/// One ranked operation-id window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequencePattern {
    /// The contiguous operation ids.
    pub ops: Vec<String>,

    /// Occurrence count across the session.
    pub count: usize,
}

/// Full analysis of one session.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionAnalysis {
    /// Per-operation statistics keyed by operation id.
    pub per_op: HashMap<String, OpStat>,

    /// Top windows ranked by frequency, ties broken by first-seen order.
    pub top_sequences: Vec<SequencePattern>,
}

/// Analyze a captured session in one linear pass.
pub fn analyze_session(session: &SessionTrace) -> SessionAnalysis {
    let mut totals: HashMap<String, (usize, f64, usize)> = HashMap::new();
    let mut windows: HashMap<Vec<String>, (usize, usize)> = HashMap::new();
    let mut next_seen = 0usize;

    for (index, entry) in session.entries.iter().enumerate() {
        let slot = totals.entry(entry.op_id.clone()).or_insert((0, 0.0, 0));
        slot.0 += 1;
        slot.1 += entry.duration_ms;
        if entry.is_error() {
            slot.2 += 1;
        }

        if index + WINDOW_LEN <= session.entries.len() {
            let window: Vec<String> = session.entries[index..index + WINDOW_LEN]
                .iter()
                .map(|e| e.op_id.clone())
                .collect();
            let slot = windows.entry(window).or_insert_with(|| {
                let order = next_seen;
                next_seen += 1;
                (0, order)
            });
            slot.0 += 1;
        }
    }

    let per_op = totals
        .into_iter()
        .map(|(op_id, (count, total_ms, errors))| {
            let stat = OpStat {
                count,
                avg_duration_ms: total_ms / count as f64,
                error_rate: errors as f64 / count as f64,
            };
            (op_id, stat)
        })
        .collect();

    let mut ranked: Vec<(Vec<String>, usize, usize)> = windows
        .into_iter()
        .map(|(ops, (count, first_seen))| (ops, count, first_seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(TOP_SEQUENCES);

    SessionAnalysis {
        per_op,
        top_sequences: ranked
            .into_iter()
            .map(|(ops, count, _)| SequencePattern { ops, count })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::trace::TraceEntry;
    use chrono::Utc;
    use std::collections::HashMap;

    fn session_with_ops(ops: &[(&str, f64, bool)]) -> SessionTrace {
        let mut session = SessionTrace::new(HashMap::new());
        for (op_id, duration, is_error) in ops {
            let mut entry = TraceEntry::new(op_id, Utc::now(), *duration);
            if *is_error {
                entry.error = Some("boom".to_string());
            }
            session.entries.push(entry);
        }
        session
    }

    #[test]
    fn test_per_op_stats() {
        let session = session_with_ops(&[
            ("math.add", 2.0, false),
            ("math.add", 4.0, true),
            ("geom.extrude", 10.0, false),
        ]);

        let analysis = analyze_session(&session);
        let add = &analysis.per_op["math.add"];
        assert_eq!(add.count, 2);
        assert!((add.avg_duration_ms - 3.0).abs() < 1e-9);
        assert!((add.error_rate - 0.5).abs() < 1e-9);

        let extrude = &analysis.per_op["geom.extrude"];
        assert_eq!(extrude.count, 1);
        assert_eq!(extrude.error_rate, 0.0);
    }

    #[test]
    fn test_top_sequences_ranked_with_first_seen_ties() {
        // a b c a b c a b  ->  [a,b,c] x2, [b,c,a] x2, [c,a,b] x2
        let ops: Vec<(&str, f64, bool)> = ["a", "b", "c", "a", "b", "c", "a", "b"]
            .iter()
            .map(|op| (*op, 0.0, false))
            .collect();
        let analysis = analyze_session(&session_with_ops(&ops));

        assert_eq!(analysis.top_sequences.len(), 3);
        // Ties broken by first-seen order
        assert_eq!(analysis.top_sequences[0].ops, vec!["a", "b", "c"]);
        assert_eq!(analysis.top_sequences[0].count, 2);
        assert_eq!(analysis.top_sequences[1].ops, vec!["b", "c", "a"]);
        assert_eq!(analysis.top_sequences[2].ops, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_short_session_has_no_sequences() {
        let analysis = analyze_session(&session_with_ops(&[("a", 0.0, false), ("b", 0.0, false)]));
        assert!(analysis.top_sequences.is_empty());
        assert_eq!(analysis.per_op.len(), 2);
    }
}
