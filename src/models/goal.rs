//! 求解目标与求解器模型
//!
//! 目标归属于某个求解器；求解器声明其兼容的目标集合。
//! 两侧的引用都只在 `validate()` 时检查。

use serde::{Deserialize, Serialize};

use super::entity::EntityCore;
use super::operation::ArgSchema;

/// 目标分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalCategory {
    /// 几何约束
    #[serde(rename = "constraint")]
    Constraint,

    /// 载荷
    #[serde(rename = "load")]
    Load,

    /// 锚点
    #[serde(rename = "anchor")]
    Anchor,

    /// 材料属性
    #[serde(rename = "material")]
    Material,

    /// 优化目标
    #[serde(rename = "optimization")]
    Optimization,
}

impl std::fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoalCategory::Constraint => write!(f, "constraint"),
            GoalCategory::Load => write!(f, "load"),
            GoalCategory::Anchor => write!(f, "anchor"),
            GoalCategory::Material => write!(f, "material"),
            GoalCategory::Optimization => write!(f, "optimization"),
        }
    }
}

/// 目标元数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalArity {
    /// 作用于单个几何元素
    #[serde(rename = "unary")]
    Unary,

    /// 作用于一对几何元素
    #[serde(rename = "binary")]
    Binary,

    /// 作用于任意多个几何元素
    #[serde(rename = "nary")]
    Nary,
}

/// 求解目标实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    /// 公共字段
    #[serde(flatten)]
    pub core: EntityCore,

    /// 所属求解器 id
    pub solver: String,

    /// 目标分类
    pub category: GoalCategory,

    /// 目标元数
    pub arity: GoalArity,

    /// 守恒量描述（如能量、长度）
    #[serde(default)]
    pub conserves: Vec<String>,

    /// 目标参数 schema
    #[serde(default)]
    pub params: Vec<ArgSchema>,
}

impl Goal {
    /// 创建目标
    pub fn new(id: &str, name: &str, solver: &str, category: GoalCategory, arity: GoalArity) -> Self {
        Self {
            core: EntityCore::new(id, name),
            solver: solver.to_string(),
            category,
            arity,
            conserves: Vec::new(),
            params: Vec::new(),
        }
    }
}

/// 求解器实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solver {
    /// 公共字段
    #[serde(flatten)]
    pub core: EntityCore,

    /// 求解器类型（physics / optimization …）
    pub solver_type: String,

    /// 兼容的目标 id 列表
    #[serde(default)]
    pub goals: Vec<String>,

    /// 是否内置交互模拟器
    #[serde(default)]
    pub has_simulator: bool,
}

impl Solver {
    /// 创建求解器
    pub fn new(id: &str, name: &str, solver_type: &str) -> Self {
        Self {
            core: EntityCore::new(id, name),
            solver_type: solver_type.to_string(),
            goals: Vec::new(),
            has_simulator: false,
        }
    }

    /// 附加兼容目标
    pub fn with_goals(mut self, goals: &[&str]) -> Self {
        self.goals = goals.iter().map(|s| s.to_string()).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_creation() {
        let goal = Goal::new(
            "goal.anchor",
            "Anchor",
            "solver.particle",
            GoalCategory::Anchor,
            GoalArity::Unary,
        );
        assert_eq!(goal.solver, "solver.particle");
        assert_eq!(goal.category, GoalCategory::Anchor);
    }

    #[test]
    fn test_solver_goals() {
        let solver = Solver::new("solver.particle", "Particle Solver", "physics")
            .with_goals(&["goal.anchor", "goal.spring"]);
        assert_eq!(solver.goals.len(), 2);
        assert!(!solver.has_simulator);
    }
}
