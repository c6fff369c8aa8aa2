//! 核心数据模型模块
//!
//! 定义注册中心的七类实体：DataType, Unit, Operation, NodeSpec,
//! CommandSpec, Goal, Solver，以及关系与溯源模型。

pub mod datatype;
pub mod entity;
pub mod goal;
pub mod node;
pub mod operation;
pub mod relation;
pub mod trace;
pub mod unit;

pub use datatype::*;
pub use entity::*;
pub use goal::*;
pub use node::*;
pub use operation::*;
pub use relation::*;
pub use trace::*;
pub use unit::*;
