//! Agent Capability Catalog
//!
//! Projects every registered operation into a function-call style
//! capability record that agent runtimes can consume directly:
//! a JSON-schema shaped parameter object, a required-field list,
//! examples, safety notes and two reverse lookup indexes
//! (tag -> operation ids, lowercased synonym -> operation ids).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::models::datatype::BaseRepr;
use crate::models::operation::{OpExample, Operation, SafetyClass};
use crate::registry::SemanticRegistry;

/// Coarse external schema label for a base representation tag.
///
/// Exhaustive by construction: adding a `BaseRepr` variant forces an
/// update here.
pub fn schema_label(repr: BaseRepr) -> &'static str {
    match repr {
        BaseRepr::Number => "number",
        BaseRepr::String => "string",
        BaseRepr::Boolean => "boolean",
        BaseRepr::Array => "array",
        BaseRepr::Object => "object",
        BaseRepr::Function => "function",
        BaseRepr::Any => "any",
    }
}

/// One callable capability derived from an operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentCapability {
    /// Operation id, used as the function name.
    pub name: String,

    /// Human readable description.
    pub description: String,

    /// JSON-schema shaped parameter object.
    pub parameters: Value,

    /// Names of required parameters.
    pub required: Vec<String>,

    /// Safety class gating autonomous invocation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety: Option<SafetyClass>,

    /// Usage examples.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<OpExample>,

    /// Related operation ids (declared dependencies).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<String>,

    /// Canonical prompt for intent matching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_prompt: Option<String>,
}

/// Full capability catalog with reverse indexes.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AgentCatalog {
    /// Capabilities sorted by operation id.
    pub capabilities: Vec<AgentCapability>,

    /// Tag -> operation ids.
    pub tag_index: BTreeMap<String, Vec<String>>,

    /// Lowercased synonym -> operation ids.
    pub intent_index: BTreeMap<String, Vec<String>>,
}

impl SemanticRegistry {
    /// Build the agent capability catalog from every registered operation.
    pub fn to_agent_catalog(&self) -> AgentCatalog {
        let mut catalog = AgentCatalog::default();

        for op in self.list_operations() {
            catalog.capabilities.push(self.capability_for(op));

            for tag in &op.tags {
                catalog
                    .tag_index
                    .entry(tag.clone())
                    .or_default()
                    .push(op.core.id.clone());
            }
            for synonym in &op.synonyms {
                catalog
                    .intent_index
                    .entry(synonym.to_lowercase())
                    .or_default()
                    .push(op.core.id.clone());
            }
        }

        catalog
    }

    fn capability_for(&self, op: &Operation) -> AgentCapability {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for arg in &op.inputs {
            // Resolve the referenced datatype to its coarse external label;
            // unresolved type ids fall back to "any".
            let label = self
                .get_datatype(&arg.type_id)
                .map(|dt| schema_label(dt.repr))
                .unwrap_or("any");

            let mut schema = Map::new();
            schema.insert("type".to_string(), json!(label));
            if let Some(unit) = &arg.unit {
                schema.insert("unit".to_string(), json!(unit));
            }
            if let Some(default) = &arg.default {
                schema.insert("default".to_string(), default.clone());
            }
            if let Some(constraints) = &arg.constraints {
                schema.insert("constraints".to_string(), constraints.clone());
            }
            properties.insert(arg.name.clone(), Value::Object(schema));

            if arg.required {
                required.push(arg.name.clone());
            }
        }

        AgentCapability {
            name: op.core.id.clone(),
            description: op
                .core
                .description
                .clone()
                .unwrap_or_else(|| op.core.name.clone()),
            parameters: json!({
                "type": "object",
                "properties": Value::Object(properties),
            }),
            required,
            safety: op.safety,
            examples: op.examples.clone(),
            related: op.dependencies.clone(),
            canonical_prompt: op.canonical_prompt.clone(),
        }
    }
}
