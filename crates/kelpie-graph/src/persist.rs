//! Persisted graph wire shape.
//!
//! This is exactly what the automations API stores and returns:
//!
//! ```json
//! { "nodes": [ { "id", "type", "label", "config", "x", "y" } ],
//!   "edges": [ { "from", "to", "condition" } ] }
//! ```
//!
//! Loading tolerates graphs persisted before positions existed (missing
//! `x`/`y`), a missing `edges` array, and blank labels. Saving emits only the
//! wire fields; UI scratch state never reaches this layer.

use crate::error::{Error, Result};
use crate::model::{CONDITION_ALWAYS, Edge, Node, NodeKind, Position, WorkflowGraph};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Grid the loader spreads position-less nodes onto.
const LOAD_BASE: f64 = 80.0;
const LOAD_COLUMN_SPACING: f64 = 200.0;
const LOAD_ROW_SPACING: f64 = 140.0;
const LOAD_COLUMNS: usize = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub config: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedEdge {
    pub from: String,
    pub to: String,
    #[serde(default = "default_condition")]
    pub condition: String,
}

fn default_condition() -> String {
    CONDITION_ALWAYS.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedGraph {
    #[serde(default)]
    pub nodes: Vec<PersistedNode>,
    #[serde(default)]
    pub edges: Vec<PersistedEdge>,
}

impl PersistedGraph {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| Error::MalformedGraphJson {
            message: err.to_string(),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|err| Error::MalformedGraphJson {
            message: err.to_string(),
        })
    }
}

fn default_load_position(index: usize) -> Position {
    Position {
        x: LOAD_BASE + ((index % LOAD_COLUMNS) as f64) * LOAD_COLUMN_SPACING,
        y: LOAD_BASE + ((index / LOAD_COLUMNS) as f64) * LOAD_ROW_SPACING,
    }
}

impl WorkflowGraph {
    /// Builds a graph from its persisted form, assigning deterministic
    /// defaults for anything the wire shape allows to be absent.
    pub fn from_persisted(persisted: PersistedGraph) -> Self {
        let nodes = persisted
            .nodes
            .into_iter()
            .enumerate()
            .map(|(index, node)| {
                let fallback = default_load_position(index);
                let label = if node.label.trim().is_empty() {
                    node.kind.as_str().to_string()
                } else {
                    node.label
                };
                Node {
                    id: node.id,
                    kind: node.kind,
                    label,
                    config: node.config,
                    position: Position {
                        x: node.x.unwrap_or(fallback.x),
                        y: node.y.unwrap_or(fallback.y),
                    },
                }
            })
            .collect();

        let edges = persisted
            .edges
            .into_iter()
            .map(|edge| Edge {
                from: edge.from,
                to: edge.to,
                condition: edge.condition,
            })
            .collect();

        Self::from_parts(nodes, edges)
    }

    pub fn to_persisted(&self) -> PersistedGraph {
        PersistedGraph {
            nodes: self
                .nodes()
                .iter()
                .map(|node| PersistedNode {
                    id: node.id.clone(),
                    kind: node.kind,
                    label: node.label.clone(),
                    config: node.config.clone(),
                    x: Some(node.position.x),
                    y: Some(node.position.y),
                })
                .collect(),
            edges: self
                .edges()
                .iter()
                .map(|edge| PersistedEdge {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    condition: edge.condition.clone(),
                })
                .collect(),
        }
    }
}
