//! Catalog Export Module
//!
//! Derives external views of the registry: a function-call style
//! capability catalog for AI agents and a DOT graph for visualization.

pub mod agent;
pub mod dot;

pub use agent::{AgentCapability, AgentCatalog};
