//! Node/edge model and snapshot mutation operations.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Id of the single entry node every runnable workflow must contain.
pub const START_NODE_ID: &str = "start";

/// Edge condition accepted without any predicate prefix.
pub const CONDITION_ALWAYS: &str = "always";

/// Default position for nodes created without explicit coordinates.
pub const DEFAULT_NODE_POSITION: Position = Position { x: 80.0, y: 80.0 };

/// The closed set of workflow step kinds the automation backend executes.
///
/// The editor never interprets a kind beyond displaying it; execution
/// semantics live on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Start,
    Condition,
    Switch,
    SetVar,
    QueueScan,
    PivotCrtsh,
    PivotDomainsdb,
    PivotBlockcypher,
    PivotHolehe,
    Spider,
    Normalize,
    Dedupe,
    FilterRegex,
    SelectIndicators,
    ExtractDomains,
    SaveIocs,
    Webhook,
}

impl NodeKind {
    /// Every kind, in the order the dashboard's node-type picker lists them.
    pub const ALL: [NodeKind; 17] = [
        NodeKind::Start,
        NodeKind::Condition,
        NodeKind::Switch,
        NodeKind::SetVar,
        NodeKind::QueueScan,
        NodeKind::PivotCrtsh,
        NodeKind::PivotDomainsdb,
        NodeKind::PivotBlockcypher,
        NodeKind::PivotHolehe,
        NodeKind::Spider,
        NodeKind::Normalize,
        NodeKind::Dedupe,
        NodeKind::FilterRegex,
        NodeKind::SelectIndicators,
        NodeKind::ExtractDomains,
        NodeKind::SaveIocs,
        NodeKind::Webhook,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Start => "start",
            NodeKind::Condition => "condition",
            NodeKind::Switch => "switch",
            NodeKind::SetVar => "set_var",
            NodeKind::QueueScan => "queue_scan",
            NodeKind::PivotCrtsh => "pivot_crtsh",
            NodeKind::PivotDomainsdb => "pivot_domainsdb",
            NodeKind::PivotBlockcypher => "pivot_blockcypher",
            NodeKind::PivotHolehe => "pivot_holehe",
            NodeKind::Spider => "spider",
            NodeKind::Normalize => "normalize",
            NodeKind::Dedupe => "dedupe",
            NodeKind::FilterRegex => "filter_regex",
            NodeKind::SelectIndicators => "select_indicators",
            NodeKind::ExtractDomains => "extract_domains",
            NodeKind::SaveIocs => "save_iocs",
            NodeKind::Webhook => "webhook",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        NodeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownNodeKind {
                kind: s.to_string(),
            })
    }
}

/// Classification of an edge condition string.
///
/// Conditions are opaque to the editor; this exists so a UI can offer
/// completion and styling for the recognized predicate prefixes. Nothing here
/// evaluates a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    Always,
    BoolLiteral,
    Equals,
    Contains,
    Regex,
    Gte,
    Lte,
    Custom,
}

impl ConditionKind {
    pub fn classify(condition: &str) -> Self {
        match condition {
            CONDITION_ALWAYS => return ConditionKind::Always,
            "true" | "false" => return ConditionKind::BoolLiteral,
            _ => {}
        }
        if condition.starts_with("equals:") {
            ConditionKind::Equals
        } else if condition.starts_with("contains:") {
            ConditionKind::Contains
        } else if condition.starts_with("regex:") {
            ConditionKind::Regex
        } else if condition.starts_with("gte:") {
            ConditionKind::Gte
        } else if condition.starts_with("lte:") {
            ConditionKind::Lte
        } else {
            ConditionKind::Custom
        }
    }
}

/// A point in canvas units. Positions are always defined; nodes created
/// without coordinates get a deterministic default before entering the graph.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A typed step in an automation workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    /// Opaque structured configuration owned by the node kind.
    pub config: Map<String, Value>,
    pub position: Position,
}

/// A directed, conditionally-labeled connection between two nodes.
///
/// Endpoints are ids, not indices; they are allowed to dangle transiently
/// while the user is still typing, and the validator flags them.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub condition: String,
}

impl Edge {
    pub fn condition_kind(&self) -> ConditionKind {
        ConditionKind::classify(&self.condition)
    }
}

/// Shallow patch applied to a node by [`WorkflowGraph::with_node_patched`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub label: Option<String>,
    pub kind: Option<NodeKind>,
    pub config: Option<Map<String, Value>>,
}

/// The workflow graph. Node order is storage order and carries no semantics.
///
/// All mutation operations return a new snapshot and leave `self` untouched,
/// so a rendering layer can keep earlier snapshots alive without observing
/// later edits.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Default for WorkflowGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowGraph {
    /// A fresh graph: a single `start` node, no edges.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                id: START_NODE_ID.to_string(),
                kind: NodeKind::Start,
                label: "Start".to_string(),
                config: Map::new(),
                position: DEFAULT_NODE_POSITION,
            }],
            edges: Vec::new(),
        }
    }

    pub(crate) fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Adds a node. A blank or absent label falls back to the kind's wire
    /// name; an absent id gets the first free `node_N`. An explicit id that
    /// collides is an error, never silently renamed.
    pub fn with_node(
        &self,
        kind: NodeKind,
        label: Option<&str>,
        id: Option<&str>,
    ) -> Result<Self> {
        let id = match id.map(str::trim).filter(|s| !s.is_empty()) {
            Some(explicit) => {
                if self.has_node(explicit) {
                    return Err(Error::DuplicateNodeId {
                        id: explicit.to_string(),
                    });
                }
                explicit.to_string()
            }
            None => self.unique_node_id(),
        };

        let label = match label.map(str::trim).filter(|s| !s.is_empty()) {
            Some(label) => label.to_string(),
            None => kind.as_str().to_string(),
        };

        let mut next = self.clone();
        next.nodes.push(Node {
            id,
            kind,
            label,
            config: Map::new(),
            position: DEFAULT_NODE_POSITION,
        });
        Ok(next)
    }

    /// Removes a node and every edge incident to it.
    pub fn with_node_removed(&self, id: &str) -> Self {
        let mut next = self.clone();
        next.nodes.retain(|n| n.id != id);
        next.edges.retain(|e| e.from != id && e.to != id);
        next
    }

    /// Appends an edge. Endpoints are not required to resolve yet.
    pub fn with_edge(&self, from: &str, to: &str, condition: &str) -> Self {
        let mut next = self.clone();
        next.edges.push(Edge {
            from: from.trim().to_string(),
            to: to.trim().to_string(),
            condition: condition.to_string(),
        });
        next
    }

    /// Removes the edge at `index`; out-of-range indices are a no-op.
    pub fn with_edge_removed(&self, index: usize) -> Self {
        let mut next = self.clone();
        if index < next.edges.len() {
            next.edges.remove(index);
        }
        next
    }

    /// Shallow-merges `patch` into the node matching `id`; no-op when the id
    /// does not resolve.
    pub fn with_node_patched(&self, id: &str, patch: NodePatch) -> Self {
        let mut next = self.clone();
        if let Some(node) = next.nodes.iter_mut().find(|n| n.id == id) {
            if let Some(label) = patch.label {
                node.label = label;
            }
            if let Some(kind) = patch.kind {
                node.kind = kind;
            }
            if let Some(config) = patch.config {
                node.config = config;
            }
        }
        next
    }

    /// Bulk position update used by dragging and auto-layout. Ids that do not
    /// resolve are ignored.
    pub fn with_positions<'a, I>(&self, positions: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Position)>,
    {
        let mut next = self.clone();
        for (id, position) in positions {
            if let Some(node) = next.nodes.iter_mut().find(|n| n.id == id) {
                node.position = position;
            }
        }
        next
    }

    fn unique_node_id(&self) -> String {
        for i in 1usize.. {
            let candidate = format!("node_{i}");
            if !self.has_node(&candidate) {
                return candidate;
            }
        }
        unreachable!()
    }
}
