//! 完整性校验
//!
//! 对注册中心做一次全量引用扫描，以批量数据形式返回带类型的问题列表，
//! 从不抛错。注册期间允许暂时不一致（多步引导的前向引用是合法的），
//! 只有显式调用 `validate()` 才会标记悬空引用。

use serde::{Deserialize, Serialize};

use super::SemanticRegistry;

/// 校验问题分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueKind {
    /// 操作输入/输出引用了未注册的数据类型
    #[serde(rename = "missing_type")]
    MissingType,

    /// 操作输入/输出引用了未注册的单位
    #[serde(rename = "missing_unit")]
    MissingUnit,

    /// 操作依赖了未注册的操作
    #[serde(rename = "missing_dependency")]
    MissingDependency,

    /// 节点/命令的 semantic_ops 引用了未注册的操作
    #[serde(rename = "missing_semantic_op")]
    MissingSemanticOp,

    /// 目标归属的求解器未注册
    #[serde(rename = "missing_solver")]
    MissingSolver,

    /// 求解器声明的目标未注册
    #[serde(rename = "missing_goal")]
    MissingGoal,

    /// 关系端点无法解析（本体错误）
    #[serde(rename = "dangling_relation")]
    DanglingRelation,
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueKind::MissingType => write!(f, "missing_type"),
            IssueKind::MissingUnit => write!(f, "missing_unit"),
            IssueKind::MissingDependency => write!(f, "missing_dependency"),
            IssueKind::MissingSemanticOp => write!(f, "missing_semantic_op"),
            IssueKind::MissingSolver => write!(f, "missing_solver"),
            IssueKind::MissingGoal => write!(f, "missing_goal"),
            IssueKind::DanglingRelation => write!(f, "dangling_relation"),
        }
    }
}

/// 单条校验问题
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// 问题分类
    pub kind: IssueKind,

    /// 发起引用的实体 id
    pub entity: String,

    /// 未解析的目标 id
    pub reference: String,

    /// 人类可读消息
    pub message: String,
}

impl ValidationIssue {
    fn new(kind: IssueKind, entity: &str, reference: &str, message: String) -> Self {
        Self {
            kind,
            entity: entity.to_string(),
            reference: reference.to_string(),
            message,
        }
    }
}

impl SemanticRegistry {
    /// 全量完整性扫描
    ///
    /// 每个未解析的引用产生恰好一条问题记录。
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        // 操作：输入/输出类型、单位、依赖
        for op in self.list_operations() {
            let id = &op.core.id;
            for arg in op.inputs.iter().chain(op.outputs.iter()) {
                if self.get_datatype(&arg.type_id).is_none() {
                    issues.push(ValidationIssue::new(
                        IssueKind::MissingType,
                        id,
                        &arg.type_id,
                        format!("操作 {id} 的参数 {} 引用了未注册类型 {}", arg.name, arg.type_id),
                    ));
                }
                if let Some(unit) = &arg.unit {
                    if self.get_unit(unit).is_none() {
                        issues.push(ValidationIssue::new(
                            IssueKind::MissingUnit,
                            id,
                            unit,
                            format!("操作 {id} 的参数 {} 引用了未注册单位 {unit}", arg.name),
                        ));
                    }
                }
            }
            for dep in &op.dependencies {
                if self.get_operation(dep).is_none() {
                    issues.push(ValidationIssue::new(
                        IssueKind::MissingDependency,
                        id,
                        dep,
                        format!("操作 {id} 依赖了未注册操作 {dep}"),
                    ));
                }
            }
        }

        // 节点 / 命令：semantic_ops
        for node in self.list_nodes() {
            self.check_semantic_ops(&node.core.id, &node.semantic_ops, &mut issues);
        }
        for command in self.list_commands() {
            self.check_semantic_ops(&command.core.id, &command.semantic_ops, &mut issues);
        }

        // 目标 → 求解器
        for goal in self.list_goals() {
            if self.get_solver(&goal.solver).is_none() {
                issues.push(ValidationIssue::new(
                    IssueKind::MissingSolver,
                    &goal.core.id,
                    &goal.solver,
                    format!("目标 {} 归属的求解器 {} 未注册", goal.core.id, goal.solver),
                ));
            }
        }

        // 求解器 → 目标
        for solver in self.list_solvers() {
            for goal_id in &solver.goals {
                if self.get_goal(goal_id).is_none() {
                    issues.push(ValidationIssue::new(
                        IssueKind::MissingGoal,
                        &solver.core.id,
                        goal_id,
                        format!("求解器 {} 声明的目标 {goal_id} 未注册", solver.core.id),
                    ));
                }
            }
        }

        // 关系端点
        for relation in self.list_relations() {
            for endpoint in [&relation.source, &relation.target] {
                if self.get_entity(endpoint).is_none() {
                    issues.push(ValidationIssue::new(
                        IssueKind::DanglingRelation,
                        &relation.source,
                        endpoint,
                        format!(
                            "关系 {} ({} -> {}) 的端点 {endpoint} 无法解析",
                            relation.kind, relation.source, relation.target
                        ),
                    ));
                }
            }
        }

        issues
    }

    /// 是否通过完整性校验
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    fn check_semantic_ops(&self, owner: &str, ids: &[String], issues: &mut Vec<ValidationIssue>) {
        for op_id in ids {
            if self.get_operation(op_id).is_none() {
                issues.push(ValidationIssue::new(
                    IssueKind::MissingSemanticOp,
                    owner,
                    op_id,
                    format!("{owner} 的 semantic_ops 引用了未注册操作 {op_id}"),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::datatype::{BaseRepr, DataType};
    use crate::models::goal::{Goal, GoalArity, GoalCategory, Solver};
    use crate::models::node::NodeSpec;
    use crate::models::operation::{ArgSchema, Operation};
    use crate::models::relation::{Relation, RelationKind};
    use crate::models::unit::Unit;

    #[test]
    fn test_fully_resolved_registry_is_valid() {
        let mut registry = SemanticRegistry::new();
        registry
            .register_datatype(DataType::new("core.number", "Number", BaseRepr::Number))
            .unwrap();
        registry
            .register_unit(Unit::new("unit.mm", "Millimeter", "mm", "length", 0.001))
            .unwrap();

        let mut op = Operation::new("geom.offset", "Offset", "geometry", "curve");
        op.inputs
            .push(ArgSchema::new("distance", "core.number").with_unit("unit.mm"));
        registry.register_operation(op).unwrap();

        registry
            .register_node(NodeSpec::new("node.offset", "Offset", "geometry").with_ops(&["geom.offset"]))
            .unwrap();
        registry.add_relation(Relation::new(RelationKind::Uses, "node.offset", "geom.offset"));

        assert!(registry.is_valid());
    }

    #[test]
    fn test_each_dangling_reference_reported_once() {
        let mut registry = SemanticRegistry::new();

        let mut op = Operation::new("geom.offset", "Offset", "geometry", "curve");
        op.inputs
            .push(ArgSchema::new("distance", "ghost.type").with_unit("ghost.unit"));
        op.dependencies.push("ghost.dep".to_string());
        registry.register_operation(op).unwrap();

        registry
            .register_node(NodeSpec::new("node.x", "X", "misc").with_ops(&["ghost.op"]))
            .unwrap();
        registry
            .register_goal(Goal::new(
                "goal.anchor",
                "Anchor",
                "ghost.solver",
                GoalCategory::Anchor,
                GoalArity::Unary,
            ))
            .unwrap();
        registry
            .register_solver(Solver::new("solver.x", "X", "physics").with_goals(&["ghost.goal"]))
            .unwrap();
        registry.add_relation(Relation::new(RelationKind::Uses, "node.x", "ghost.target"));

        let issues = registry.validate();
        let count_of = |kind: IssueKind| issues.iter().filter(|i| i.kind == kind).count();

        assert_eq!(count_of(IssueKind::MissingType), 1);
        assert_eq!(count_of(IssueKind::MissingUnit), 1);
        assert_eq!(count_of(IssueKind::MissingDependency), 1);
        assert_eq!(count_of(IssueKind::MissingSemanticOp), 1);
        assert_eq!(count_of(IssueKind::MissingSolver), 1);
        assert_eq!(count_of(IssueKind::MissingGoal), 1);
        // 关系只有 target 端悬空
        assert_eq!(count_of(IssueKind::DanglingRelation), 1);
        assert_eq!(issues.len(), 7);
        assert!(!registry.is_valid());
    }
}
