//! 种子装载模块
//!
//! 启动时向注册中心注册固定的核心词汇：数据类型、单位、
//! 求解器与目标。注册顺序对引用友好（类型 → 单位 → 求解器 → 目标），
//! 但完整性仍只由 `validate()` 检查。

pub mod legacy_ops;

use serde_json::json;

use crate::error::Result;
use crate::models::datatype::{BaseRepr, CollectionShape, DataType};
use crate::models::goal::{Goal, GoalArity, GoalCategory, Solver};
use crate::models::operation::ArgSchema;
use crate::models::unit::Unit;
use crate::registry::SemanticRegistry;

/// 注册核心词汇
pub fn register_core_vocabulary(registry: &mut SemanticRegistry) -> Result<()> {
    register_datatypes(registry)?;
    register_units(registry)?;
    register_solvers(registry)?;
    register_goals(registry)?;
    Ok(())
}

fn register_datatypes(registry: &mut SemanticRegistry) -> Result<()> {
    let datatypes = vec![
        DataType::new("core.any", "Any", BaseRepr::Any),
        DataType::new("core.number", "Number", BaseRepr::Number)
            .with_shape(CollectionShape::Scalar),
        DataType::new("core.integer", "Integer", BaseRepr::Number)
            .with_parent("core.number")
            .with_shape(CollectionShape::Scalar),
        DataType::new("core.boolean", "Boolean", BaseRepr::Boolean)
            .with_shape(CollectionShape::Scalar),
        DataType::new("core.string", "String", BaseRepr::String)
            .with_shape(CollectionShape::Scalar),
        DataType::new("core.function", "Function", BaseRepr::Function),
        DataType::new("core.vector3", "Vector3", BaseRepr::Array)
            .with_shape(CollectionShape::Vector),
        DataType::new("core.point3", "Point3", BaseRepr::Array)
            .with_dimension("length")
            .with_shape(CollectionShape::Vector),
        DataType::new("core.plane", "Plane", BaseRepr::Object),
        DataType::new("core.interval", "Interval", BaseRepr::Object),
        DataType::new("core.curve", "Curve", BaseRepr::Object),
        DataType::new("core.surface", "Surface", BaseRepr::Object),
        DataType::new("core.mesh", "Mesh", BaseRepr::Object),
        DataType::new("core.brep", "Brep", BaseRepr::Object),
        DataType::new("core.color", "Color", BaseRepr::Array)
            .with_shape(CollectionShape::Vector),
        DataType::new("core.list", "List", BaseRepr::Array).with_shape(CollectionShape::List),
        DataType::new("core.tree", "Data Tree", BaseRepr::Object)
            .with_shape(CollectionShape::Tree),
        DataType::new("core.field", "Field", BaseRepr::Object)
            .with_shape(CollectionShape::Field),
    ];
    for datatype in datatypes {
        registry.register_datatype(datatype)?;
    }
    Ok(())
}

fn register_units(registry: &mut SemanticRegistry) -> Result<()> {
    let units = vec![
        Unit::new("unit.m", "Meter", "m", "length", 1.0),
        Unit::new("unit.mm", "Millimeter", "mm", "length", 0.001).with_si_unit("unit.m"),
        Unit::new("unit.cm", "Centimeter", "cm", "length", 0.01).with_si_unit("unit.m"),
        Unit::new("unit.rad", "Radian", "rad", "angle", 1.0),
        Unit::new("unit.deg", "Degree", "°", "angle", std::f64::consts::PI / 180.0)
            .with_si_unit("unit.rad"),
        Unit::new("unit.s", "Second", "s", "time", 1.0),
        Unit::new("unit.kg", "Kilogram", "kg", "mass", 1.0),
        Unit::new("unit.n", "Newton", "N", "force", 1.0),
    ];
    for unit in units {
        registry.register_unit(unit)?;
    }
    Ok(())
}

fn register_solvers(registry: &mut SemanticRegistry) -> Result<()> {
    let mut particle = Solver::new("solver.particle", "Particle Spring Solver", "physics")
        .with_goals(&[
            "goal.anchor",
            "goal.spring",
            "goal.load",
            "goal.collision",
            "goal.target_length",
        ]);
    particle.has_simulator = true;
    registry.register_solver(particle)?;

    let gradient = Solver::new("solver.gradient", "Gradient Descent Optimizer", "optimization")
        .with_goals(&["goal.min_strain"]);
    registry.register_solver(gradient)?;
    Ok(())
}

fn register_goals(registry: &mut SemanticRegistry) -> Result<()> {
    let mut anchor = Goal::new(
        "goal.anchor",
        "Anchor",
        "solver.particle",
        GoalCategory::Anchor,
        GoalArity::Unary,
    );
    anchor.params.push(ArgSchema::new("point", "core.point3"));
    registry.register_goal(anchor)?;

    let mut spring = Goal::new(
        "goal.spring",
        "Spring",
        "solver.particle",
        GoalCategory::Constraint,
        GoalArity::Binary,
    );
    spring.conserves.push("rest_length".to_string());
    spring
        .params
        .push(ArgSchema::new("stiffness", "core.number"));
    spring.params.push(
        ArgSchema::new("rest_length", "core.number")
            .optional(json!(0.0))
            .with_unit("unit.mm"),
    );
    registry.register_goal(spring)?;

    let mut load = Goal::new(
        "goal.load",
        "Point Load",
        "solver.particle",
        GoalCategory::Load,
        GoalArity::Unary,
    );
    load.params
        .push(ArgSchema::new("force", "core.vector3").with_unit("unit.n"));
    registry.register_goal(load)?;

    registry.register_goal(Goal::new(
        "goal.collision",
        "Collision",
        "solver.particle",
        GoalCategory::Constraint,
        GoalArity::Nary,
    ))?;

    let mut target_length = Goal::new(
        "goal.target_length",
        "Target Length",
        "solver.particle",
        GoalCategory::Constraint,
        GoalArity::Binary,
    );
    target_length
        .params
        .push(ArgSchema::new("length", "core.number").with_unit("unit.mm"));
    registry.register_goal(target_length)?;

    let mut min_strain = Goal::new(
        "goal.min_strain",
        "Minimize Strain",
        "solver.gradient",
        GoalCategory::Optimization,
        GoalArity::Nary,
    );
    min_strain.conserves.push("energy".to_string());
    registry.register_goal(min_strain)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_vocabulary_registers_and_validates() {
        let mut registry = SemanticRegistry::new();
        register_core_vocabulary(&mut registry).unwrap();

        assert!(registry.get_datatype("core.number").is_some());
        assert!(registry.get_unit("unit.mm").is_some());
        assert!(registry.get_solver("solver.particle").is_some());
        assert!(registry.get_goal("goal.spring").is_some());

        // 词汇自身引用完整
        assert!(registry.is_valid());
    }

    #[test]
    fn test_seeding_twice_fails_on_duplicates() {
        let mut registry = SemanticRegistry::new();
        register_core_vocabulary(&mut registry).unwrap();
        assert!(register_core_vocabulary(&mut registry).is_err());
    }

    #[test]
    fn test_integer_parent_chain() {
        let mut registry = SemanticRegistry::new();
        register_core_vocabulary(&mut registry).unwrap();
        let integer = registry.get_datatype("core.integer").unwrap();
        assert_eq!(integer.parent.as_deref(), Some("core.number"));
    }
}
