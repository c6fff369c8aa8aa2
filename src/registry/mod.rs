//! 语义注册中心
//!
//! 七类实体的进程级目录：类型化存储、查询接口、完整性校验与导出。
//! 预期的使用模式是启动期单写入方批量注册，随后长期只读查询；
//! 注册是引用盲目的，悬空引用直到 `validate()` 才被标记。

pub mod document;
pub mod validate;

use std::collections::HashMap;

use tracing::debug;

use crate::error::{RegistryError, Result};
use crate::models::datatype::DataType;
use crate::models::entity::{EntityCore, EntityKind};
use crate::models::goal::{Goal, Solver};
use crate::models::node::{CommandSpec, NodeSpec};
use crate::models::operation::{Operation, RegistryStats, SafetyClass};
use crate::models::relation::{Relation, RelationKind};
use crate::models::unit::Unit;

/// 跨类别实体引用
///
/// `get_entity` 的返回值。id 全局唯一，因此解析无歧义。
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    /// 数据类型
    DataType(&'a DataType),
    /// 物理单位
    Unit(&'a Unit),
    /// 语义操作
    Operation(&'a Operation),
    /// 图节点
    Node(&'a NodeSpec),
    /// 编辑器命令
    Command(&'a CommandSpec),
    /// 求解目标
    Goal(&'a Goal),
    /// 求解器
    Solver(&'a Solver),
}

impl<'a> EntityRef<'a> {
    /// 实体类别
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::DataType(_) => EntityKind::DataType,
            EntityRef::Unit(_) => EntityKind::Unit,
            EntityRef::Operation(_) => EntityKind::Operation,
            EntityRef::Node(_) => EntityKind::Node,
            EntityRef::Command(_) => EntityKind::Command,
            EntityRef::Goal(_) => EntityKind::Goal,
            EntityRef::Solver(_) => EntityKind::Solver,
        }
    }

    /// 实体公共字段
    pub fn core(&self) -> &'a EntityCore {
        match self {
            EntityRef::DataType(e) => &e.core,
            EntityRef::Unit(e) => &e.core,
            EntityRef::Operation(e) => &e.core,
            EntityRef::Node(e) => &e.core,
            EntityRef::Command(e) => &e.core,
            EntityRef::Goal(e) => &e.core,
            EntityRef::Solver(e) => &e.core,
        }
    }

    /// 实体 id
    pub fn id(&self) -> &'a str {
        &self.core().id
    }
}

/// 语义注册中心
///
/// 字典存储，无锁。并发写入方必须由嵌入方自行串行化。
#[derive(Debug, Default)]
pub struct SemanticRegistry {
    datatypes: HashMap<String, DataType>,
    units: HashMap<String, Unit>,
    operations: HashMap<String, Operation>,
    nodes: HashMap<String, NodeSpec>,
    commands: HashMap<String, CommandSpec>,
    goals: HashMap<String, Goal>,
    solvers: HashMap<String, Solver>,
    relations: Vec<Relation>,
    /// 全局 id → 类别索引，保证 id 跨类别唯一
    kind_index: HashMap<String, EntityKind>,
}

impl SemanticRegistry {
    /// 创建空注册中心
    pub fn new() -> Self {
        Self::default()
    }

    /// 占用一个全局唯一 id
    fn claim_id(&mut self, id: &str, kind: EntityKind) -> Result<()> {
        if let Some(existing) = self.kind_index.get(id) {
            return Err(RegistryError::DuplicateEntity {
                kind: *existing,
                id: id.to_string(),
            });
        }
        self.kind_index.insert(id.to_string(), kind);
        debug!(id, %kind, "实体注册");
        Ok(())
    }

    // ===== 注册 =====

    /// 注册数据类型
    pub fn register_datatype(&mut self, datatype: DataType) -> Result<()> {
        self.claim_id(&datatype.core.id, EntityKind::DataType)?;
        self.datatypes.insert(datatype.core.id.clone(), datatype);
        Ok(())
    }

    /// 注册单位
    pub fn register_unit(&mut self, unit: Unit) -> Result<()> {
        self.claim_id(&unit.core.id, EntityKind::Unit)?;
        self.units.insert(unit.core.id.clone(), unit);
        Ok(())
    }

    /// 注册操作
    pub fn register_operation(&mut self, operation: Operation) -> Result<()> {
        self.claim_id(&operation.core.id, EntityKind::Operation)?;
        self.operations.insert(operation.core.id.clone(), operation);
        Ok(())
    }

    /// 注册节点
    pub fn register_node(&mut self, node: NodeSpec) -> Result<()> {
        self.claim_id(&node.core.id, EntityKind::Node)?;
        self.nodes.insert(node.core.id.clone(), node);
        Ok(())
    }

    /// 注册命令
    pub fn register_command(&mut self, command: CommandSpec) -> Result<()> {
        self.claim_id(&command.core.id, EntityKind::Command)?;
        self.commands.insert(command.core.id.clone(), command);
        Ok(())
    }

    /// 注册目标
    pub fn register_goal(&mut self, goal: Goal) -> Result<()> {
        self.claim_id(&goal.core.id, EntityKind::Goal)?;
        self.goals.insert(goal.core.id.clone(), goal);
        Ok(())
    }

    /// 注册求解器
    pub fn register_solver(&mut self, solver: Solver) -> Result<()> {
        self.claim_id(&solver.core.id, EntityKind::Solver)?;
        self.solvers.insert(solver.core.id.clone(), solver);
        Ok(())
    }

    /// 追加关系
    ///
    /// 无条件追加；端点直到 `validate()` 才检查。
    pub fn add_relation(&mut self, relation: Relation) {
        self.relations.push(relation);
    }

    // ===== 查找 =====

    /// 查找数据类型
    pub fn get_datatype(&self, id: &str) -> Option<&DataType> {
        self.datatypes.get(id)
    }

    /// 查找单位
    pub fn get_unit(&self, id: &str) -> Option<&Unit> {
        self.units.get(id)
    }

    /// 查找操作
    pub fn get_operation(&self, id: &str) -> Option<&Operation> {
        self.operations.get(id)
    }

    /// 查找节点
    pub fn get_node(&self, id: &str) -> Option<&NodeSpec> {
        self.nodes.get(id)
    }

    /// 查找命令
    pub fn get_command(&self, id: &str) -> Option<&CommandSpec> {
        self.commands.get(id)
    }

    /// 查找目标
    pub fn get_goal(&self, id: &str) -> Option<&Goal> {
        self.goals.get(id)
    }

    /// 查找求解器
    pub fn get_solver(&self, id: &str) -> Option<&Solver> {
        self.solvers.get(id)
    }

    /// 跨类别查找实体
    pub fn get_entity(&self, id: &str) -> Option<EntityRef<'_>> {
        match self.kind_index.get(id)? {
            EntityKind::DataType => self.datatypes.get(id).map(EntityRef::DataType),
            EntityKind::Unit => self.units.get(id).map(EntityRef::Unit),
            EntityKind::Operation => self.operations.get(id).map(EntityRef::Operation),
            EntityKind::Node => self.nodes.get(id).map(EntityRef::Node),
            EntityKind::Command => self.commands.get(id).map(EntityRef::Command),
            EntityKind::Goal => self.goals.get(id).map(EntityRef::Goal),
            EntityKind::Solver => self.solvers.get(id).map(EntityRef::Solver),
        }
    }

    // ===== 列举 =====
    //
    // 列举结果按 id 排序，保证导出与测试的确定性。

    /// 列举数据类型
    pub fn list_datatypes(&self) -> Vec<&DataType> {
        let mut list: Vec<_> = self.datatypes.values().collect();
        list.sort_by(|a, b| a.core.id.cmp(&b.core.id));
        list
    }

    /// 列举单位
    pub fn list_units(&self) -> Vec<&Unit> {
        let mut list: Vec<_> = self.units.values().collect();
        list.sort_by(|a, b| a.core.id.cmp(&b.core.id));
        list
    }

    /// 列举操作
    pub fn list_operations(&self) -> Vec<&Operation> {
        let mut list: Vec<_> = self.operations.values().collect();
        list.sort_by(|a, b| a.core.id.cmp(&b.core.id));
        list
    }

    /// 列举节点
    pub fn list_nodes(&self) -> Vec<&NodeSpec> {
        let mut list: Vec<_> = self.nodes.values().collect();
        list.sort_by(|a, b| a.core.id.cmp(&b.core.id));
        list
    }

    /// 列举命令
    pub fn list_commands(&self) -> Vec<&CommandSpec> {
        let mut list: Vec<_> = self.commands.values().collect();
        list.sort_by(|a, b| a.core.id.cmp(&b.core.id));
        list
    }

    /// 列举目标
    pub fn list_goals(&self) -> Vec<&Goal> {
        let mut list: Vec<_> = self.goals.values().collect();
        list.sort_by(|a, b| a.core.id.cmp(&b.core.id));
        list
    }

    /// 列举求解器
    pub fn list_solvers(&self) -> Vec<&Solver> {
        let mut list: Vec<_> = self.solvers.values().collect();
        list.sort_by(|a, b| a.core.id.cmp(&b.core.id));
        list
    }

    /// 列举关系（插入顺序）
    pub fn list_relations(&self) -> &[Relation] {
        &self.relations
    }

    // ===== 查询 =====

    /// 按领域筛选操作
    pub fn ops_by_domain(&self, domain: &str) -> Vec<&Operation> {
        let mut list: Vec<_> = self
            .operations
            .values()
            .filter(|op| op.domain == domain)
            .collect();
        list.sort_by(|a, b| a.core.id.cmp(&b.core.id));
        list
    }

    /// 按标签筛选操作
    pub fn ops_by_tag(&self, tag: &str) -> Vec<&Operation> {
        let mut list: Vec<_> = self
            .operations
            .values()
            .filter(|op| op.tags.iter().any(|t| t == tag))
            .collect();
        list.sort_by(|a, b| a.core.id.cmp(&b.core.id));
        list
    }

    /// 按安全级别筛选操作
    pub fn ops_by_safety(&self, safety: SafetyClass) -> Vec<&Operation> {
        let mut list: Vec<_> = self
            .operations
            .values()
            .filter(|op| op.safety == Some(safety))
            .collect();
        list.sort_by(|a, b| a.core.id.cmp(&b.core.id));
        list
    }

    /// 筛选纯函数操作
    pub fn pure_ops(&self) -> Vec<&Operation> {
        let mut list: Vec<_> = self.operations.values().filter(|op| op.pure).collect();
        list.sort_by(|a, b| a.core.id.cmp(&b.core.id));
        list
    }

    /// 按类型筛选关系
    pub fn relations_by_kind(&self, kind: &RelationKind) -> Vec<&Relation> {
        self.relations.iter().filter(|r| r.kind == *kind).collect()
    }

    /// 筛选涉及给定实体的关系
    pub fn relations_involving(&self, id: &str) -> Vec<&Relation> {
        self.relations.iter().filter(|r| r.involves(id)).collect()
    }

    /// 解析节点引用的操作列表
    ///
    /// 未注册的 id 被静默丢弃（完整性问题由 `validate()` 报告）。
    pub fn ops_for_node(&self, node_id: &str) -> Vec<&Operation> {
        let Some(node) = self.nodes.get(node_id) else {
            return Vec::new();
        };
        self.resolve_ops(&node.core.id, &node.semantic_ops)
    }

    /// 解析命令引用的操作列表
    pub fn ops_for_command(&self, command_id: &str) -> Vec<&Operation> {
        let Some(command) = self.commands.get(command_id) else {
            return Vec::new();
        };
        self.resolve_ops(&command.core.id, &command.semantic_ops)
    }

    fn resolve_ops(&self, owner: &str, ids: &[String]) -> Vec<&Operation> {
        ids.iter()
            .filter_map(|id| {
                let op = self.operations.get(id);
                if op.is_none() {
                    debug!(owner, op_id = %id, "semantic_ops 引用未注册，跳过");
                }
                op
            })
            .collect()
    }

    // ===== 统计 =====

    /// 聚合统计
    pub fn stats(&self) -> RegistryStats {
        let mut stats = RegistryStats::default();
        stats
            .by_kind
            .insert(EntityKind::DataType.to_string(), self.datatypes.len());
        stats
            .by_kind
            .insert(EntityKind::Unit.to_string(), self.units.len());
        stats
            .by_kind
            .insert(EntityKind::Operation.to_string(), self.operations.len());
        stats
            .by_kind
            .insert(EntityKind::Node.to_string(), self.nodes.len());
        stats
            .by_kind
            .insert(EntityKind::Command.to_string(), self.commands.len());
        stats
            .by_kind
            .insert(EntityKind::Goal.to_string(), self.goals.len());
        stats
            .by_kind
            .insert(EntityKind::Solver.to_string(), self.solvers.len());

        for op in self.operations.values() {
            *stats.by_domain.entry(op.domain.clone()).or_insert(0) += 1;
            if let Some(safety) = op.safety {
                *stats.by_safety.entry(safety.to_string()).or_insert(0) += 1;
            }
            if op.pure {
                stats.pure_operations += 1;
            }
            if op.deterministic {
                stats.deterministic_operations += 1;
            }
        }
        stats.relations = self.relations.len();
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::datatype::BaseRepr;
    use crate::models::goal::{GoalArity, GoalCategory};

    fn sample_registry() -> SemanticRegistry {
        let mut registry = SemanticRegistry::new();
        registry
            .register_datatype(DataType::new("core.number", "Number", BaseRepr::Number))
            .unwrap();
        registry
            .register_operation(Operation::new("math.add", "Add", "math", "arithmetic"))
            .unwrap();
        registry
            .register_operation(Operation::new("math.sin", "Sine", "math", "trig"))
            .unwrap();
        registry
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = sample_registry();
        let err = registry
            .register_operation(Operation::new("math.add", "Add Again", "math", "arithmetic"))
            .unwrap_err();

        assert!(matches!(
            err,
            RegistryError::DuplicateEntity { kind: EntityKind::Operation, .. }
        ));
        // 首次注册保持不变
        assert_eq!(registry.get_operation("math.add").unwrap().core.name, "Add");
    }

    #[test]
    fn test_cross_kind_id_collision_fails() {
        let mut registry = sample_registry();
        let err = registry
            .register_unit(Unit::new("math.add", "Bogus", "x", "none", 1.0))
            .unwrap_err();

        match err {
            RegistryError::DuplicateEntity { kind, id } => {
                assert_eq!(kind, EntityKind::Operation);
                assert_eq!(id, "math.add");
            }
            other => panic!("意外错误: {other}"),
        }
    }

    #[test]
    fn test_get_entity_resolves_kind() {
        let registry = sample_registry();
        let entity = registry.get_entity("core.number").unwrap();
        assert_eq!(entity.kind(), EntityKind::DataType);
        assert_eq!(entity.id(), "core.number");
        assert!(registry.get_entity("missing").is_none());
    }

    #[test]
    fn test_domain_query_sorted() {
        let registry = sample_registry();
        let ops = registry.ops_by_domain("math");
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].core.id, "math.add");
        assert_eq!(ops[1].core.id, "math.sin");
        assert!(registry.ops_by_domain("geometry").is_empty());
    }

    #[test]
    fn test_ops_for_node_drops_unresolved() {
        let mut registry = sample_registry();
        registry
            .register_node(
                NodeSpec::new("node.calc", "Calculator", "math")
                    .with_ops(&["math.add", "math.missing"]),
            )
            .unwrap();

        let ops = registry.ops_for_node("node.calc");
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].core.id, "math.add");
    }

    #[test]
    fn test_relations_append_unchecked() {
        let mut registry = sample_registry();
        registry.add_relation(Relation::new(RelationKind::Uses, "ghost.a", "ghost.b"));
        registry.add_relation(Relation::new(RelationKind::Uses, "ghost.a", "ghost.b"));

        // 不去重
        assert_eq!(registry.list_relations().len(), 2);
        assert_eq!(registry.relations_involving("ghost.a").len(), 2);
    }

    #[test]
    fn test_stats() {
        let mut registry = sample_registry();
        registry
            .register_goal(Goal::new(
                "goal.anchor",
                "Anchor",
                "solver.particle",
                GoalCategory::Anchor,
                GoalArity::Unary,
            ))
            .unwrap();

        let stats = registry.stats();
        assert_eq!(stats.by_kind["operation"], 2);
        assert_eq!(stats.by_kind["goal"], 1);
        assert_eq!(stats.by_domain["math"], 2);
        assert_eq!(stats.pure_operations, 2);
    }
}
