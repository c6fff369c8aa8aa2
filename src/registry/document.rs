//! 本体文档导出与导入
//!
//! 全量文档快照，供文档生成器消费。重建时按固定类别顺序重放注册，
//! 因为注册是引用盲目的：构建期间前向引用合法，完整性由之后的
//! `validate()` 检查。

use serde::{Deserialize, Serialize};

use super::SemanticRegistry;
use crate::error::Result;
use crate::models::datatype::DataType;
use crate::models::goal::{Goal, Solver};
use crate::models::node::{CommandSpec, NodeSpec};
use crate::models::operation::Operation;
use crate::models::relation::Relation;
use crate::models::unit::Unit;

/// 本体文档
///
/// 字段顺序即重放顺序：datatypes → units → operations → nodes →
/// commands → goals → solvers → relations。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RegistryDocument {
    /// 文档格式版本
    pub format_version: String,

    /// 数据类型
    pub datatypes: Vec<DataType>,

    /// 单位
    pub units: Vec<Unit>,

    /// 操作
    pub operations: Vec<Operation>,

    /// 节点
    pub nodes: Vec<NodeSpec>,

    /// 命令
    pub commands: Vec<CommandSpec>,

    /// 目标
    pub goals: Vec<Goal>,

    /// 求解器
    pub solvers: Vec<Solver>,

    /// 关系
    pub relations: Vec<Relation>,
}

/// 当前文档格式版本
pub const FORMAT_VERSION: &str = "2";

impl SemanticRegistry {
    /// 导出全量文档
    pub fn to_document(&self) -> RegistryDocument {
        RegistryDocument {
            format_version: FORMAT_VERSION.to_string(),
            datatypes: self.list_datatypes().into_iter().cloned().collect(),
            units: self.list_units().into_iter().cloned().collect(),
            operations: self.list_operations().into_iter().cloned().collect(),
            nodes: self.list_nodes().into_iter().cloned().collect(),
            commands: self.list_commands().into_iter().cloned().collect(),
            goals: self.list_goals().into_iter().cloned().collect(),
            solvers: self.list_solvers().into_iter().cloned().collect(),
            relations: self.list_relations().to_vec(),
        }
    }

    /// 从文档重建注册中心
    ///
    /// 按固定类别顺序重放注册；任何重复 id 都会使重建失败。
    pub fn from_document(document: RegistryDocument) -> Result<Self> {
        let mut registry = SemanticRegistry::new();
        for datatype in document.datatypes {
            registry.register_datatype(datatype)?;
        }
        for unit in document.units {
            registry.register_unit(unit)?;
        }
        for operation in document.operations {
            registry.register_operation(operation)?;
        }
        for node in document.nodes {
            registry.register_node(node)?;
        }
        for command in document.commands {
            registry.register_command(command)?;
        }
        for goal in document.goals {
            registry.register_goal(goal)?;
        }
        for solver in document.solvers {
            registry.register_solver(solver)?;
        }
        for relation in document.relations {
            registry.add_relation(relation);
        }
        Ok(registry)
    }

    /// 导出为 JSON 字符串
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    /// 从 JSON 字符串重建
    pub fn from_json(json: &str) -> Result<Self> {
        let document: RegistryDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::datatype::BaseRepr;
    use crate::models::node::NodeSpec;
    use crate::models::operation::ArgSchema;
    use crate::models::relation::RelationKind;

    fn populated_registry() -> SemanticRegistry {
        let mut registry = SemanticRegistry::new();
        registry
            .register_datatype(DataType::new("core.number", "Number", BaseRepr::Number))
            .unwrap();
        registry
            .register_unit(Unit::new("unit.mm", "Millimeter", "mm", "length", 0.001))
            .unwrap();

        let mut op = Operation::new("math.add", "Add", "math", "arithmetic");
        op.inputs.push(ArgSchema::new("a", "core.number"));
        op.inputs.push(ArgSchema::new("b", "core.number"));
        op.outputs.push(ArgSchema::new("sum", "core.number"));
        registry.register_operation(op).unwrap();

        registry
            .register_node(NodeSpec::new("node.add", "Add", "math").with_ops(&["math.add"]))
            .unwrap();
        registry.add_relation(Relation::new(RelationKind::Uses, "node.add", "math.add"));
        registry
    }

    #[test]
    fn test_roundtrip_preserves_stats() {
        let registry = populated_registry();
        let json = registry.to_json().unwrap();
        let rebuilt = SemanticRegistry::from_json(&json).unwrap();

        let before = registry.stats();
        let after = rebuilt.stats();
        assert_eq!(before.by_kind, after.by_kind);
        assert_eq!(before.by_domain, after.by_domain);
        assert_eq!(before.pure_operations, after.pure_operations);
        assert_eq!(before.relations, after.relations);
    }

    #[test]
    fn test_forward_references_survive_roundtrip() {
        let mut registry = SemanticRegistry::new();
        // 节点引用尚不存在的操作：注册合法，校验标记
        registry
            .register_node(NodeSpec::new("node.x", "X", "misc").with_ops(&["ghost.op"]))
            .unwrap();

        let json = registry.to_json().unwrap();
        let rebuilt = SemanticRegistry::from_json(&json).unwrap();
        assert_eq!(rebuilt.validate().len(), 1);
    }

    #[test]
    fn test_document_format_version() {
        let document = populated_registry().to_document();
        assert_eq!(document.format_version, FORMAT_VERSION);
    }
}
