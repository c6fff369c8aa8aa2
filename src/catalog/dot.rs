//! DOT 图导出
//!
//! 将注册中心渲染为 Graphviz 有向图：按实体类别聚类，每条关系一条边，
//! 另为节点/命令到其 semantic_ops 的引用绘制虚线 usesOp 边。
//! 未注册的 usesOp 目标不渲染（与 `validate()` 的口径一致），
//! 仅记录告警。

use std::fmt::Write as _;

use tracing::warn;

use crate::models::entity::EntityKind;
use crate::registry::SemanticRegistry;

impl SemanticRegistry {
    /// 渲染为 DOT 格式文本
    pub fn to_dot(&self) -> String {
        let mut out = String::new();
        out.push_str("digraph ontology {\n");
        out.push_str("  rankdir=LR;\n");
        out.push_str("  node [shape=box, fontsize=10];\n");

        self.write_cluster(&mut out, EntityKind::DataType, |r, buf| {
            for dt in r.list_datatypes() {
                let _ = writeln!(buf, "    \"{}\" [label=\"{}\"];", dt.core.id, dt.core.name);
            }
        });
        self.write_cluster(&mut out, EntityKind::Unit, |r, buf| {
            for unit in r.list_units() {
                let _ = writeln!(buf, "    \"{}\" [label=\"{}\"];", unit.core.id, unit.symbol);
            }
        });
        self.write_cluster(&mut out, EntityKind::Operation, |r, buf| {
            for op in r.list_operations() {
                let _ = writeln!(buf, "    \"{}\" [label=\"{}\"];", op.core.id, op.core.name);
            }
        });
        self.write_cluster(&mut out, EntityKind::Node, |r, buf| {
            for node in r.list_nodes() {
                let _ = writeln!(buf, "    \"{}\" [label=\"{}\"];", node.core.id, node.core.name);
            }
        });
        self.write_cluster(&mut out, EntityKind::Command, |r, buf| {
            for cmd in r.list_commands() {
                let _ = writeln!(buf, "    \"{}\" [label=\"{}\"];", cmd.core.id, cmd.core.name);
            }
        });
        self.write_cluster(&mut out, EntityKind::Goal, |r, buf| {
            for goal in r.list_goals() {
                let _ = writeln!(buf, "    \"{}\" [label=\"{}\"];", goal.core.id, goal.core.name);
            }
        });
        self.write_cluster(&mut out, EntityKind::Solver, |r, buf| {
            for solver in r.list_solvers() {
                let _ = writeln!(
                    buf,
                    "    \"{}\" [label=\"{}\"];",
                    solver.core.id, solver.core.name
                );
            }
        });

        // 显式关系边
        for relation in self.list_relations() {
            let _ = writeln!(
                out,
                "  \"{}\" -> \"{}\" [label=\"{}\"];",
                relation.source, relation.target, relation.kind
            );
        }

        // 隐式 usesOp 边（节点/命令 → 语义操作）
        for node in self.list_nodes() {
            self.write_uses_op_edges(&mut out, &node.core.id, &node.semantic_ops);
        }
        for command in self.list_commands() {
            self.write_uses_op_edges(&mut out, &command.core.id, &command.semantic_ops);
        }

        out.push_str("}\n");
        out
    }

    fn write_cluster(
        &self,
        out: &mut String,
        kind: EntityKind,
        write_nodes: impl Fn(&SemanticRegistry, &mut String),
    ) {
        let mut body = String::new();
        write_nodes(self, &mut body);
        if body.is_empty() {
            return;
        }
        let _ = writeln!(out, "  subgraph cluster_{kind} {{");
        let _ = writeln!(out, "    label=\"{kind}\";");
        out.push_str(&body);
        out.push_str("  }\n");
    }

    fn write_uses_op_edges(&self, out: &mut String, owner: &str, ops: &[String]) {
        for op_id in ops {
            if self.get_operation(op_id).is_none() {
                warn!(owner, op_id = %op_id, "usesOp 目标未注册，图中省略");
                continue;
            }
            let _ = writeln!(out, "  \"{owner}\" -> \"{op_id}\" [style=dashed, label=\"usesOp\"];");
        }
    }
}
