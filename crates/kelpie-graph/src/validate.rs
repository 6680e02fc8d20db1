//! Structural validation.
//!
//! Warnings are advisory: they never stop editing, and the editor facade
//! decides whether to block persistence on a non-empty list.

use crate::model::{START_NODE_ID, WorkflowGraph};
use rustc_hash::FxHashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationWarning {
    DuplicateNodeIds,
    MissingStartNode,
    DanglingEdge,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ValidationWarning::DuplicateNodeIds => "Duplicate node IDs detected.",
            ValidationWarning::MissingStartNode => "Missing start node.",
            ValidationWarning::DanglingEdge => "Edge references missing node.",
        };
        f.write_str(message)
    }
}

/// Checks the graph invariants, in precedence order: duplicate ids, missing
/// `start` node, dangling edges. Each rule contributes at most one warning no
/// matter how many instances exist, and the dangling-edge scan stops at the
/// first offender.
pub fn validate(graph: &WorkflowGraph) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut ids: FxHashSet<&str> = FxHashSet::default();
    let mut duplicates = false;
    for node in graph.nodes() {
        if !ids.insert(node.id.as_str()) {
            duplicates = true;
        }
    }
    if duplicates {
        warnings.push(ValidationWarning::DuplicateNodeIds);
    }

    if !ids.contains(START_NODE_ID) {
        warnings.push(ValidationWarning::MissingStartNode);
    }

    for edge in graph.edges() {
        if !ids.contains(edge.from.as_str()) || !ids.contains(edge.to.as_str()) {
            warnings.push(ValidationWarning::DanglingEdge);
            break;
        }
    }

    warnings
}
