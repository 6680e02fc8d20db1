#![forbid(unsafe_code)]

//! Workflow graph container (headless).
//!
//! Holds the node/edge model an automation workflow editor mutates, plus the
//! structural validation rules and the persisted JSON wire shape. Mutations
//! follow a functional update discipline: every operation returns a new graph
//! snapshot, so callers holding an older snapshot never observe a change.

pub mod error;
pub mod model;
pub mod persist;
pub mod validate;

pub use error::{Error, Result};
pub use model::{
    CONDITION_ALWAYS, ConditionKind, Edge, Node, NodeKind, NodePatch, Position, START_NODE_ID,
    WorkflowGraph,
};
pub use persist::{PersistedEdge, PersistedGraph, PersistedNode};
pub use validate::{ValidationWarning, validate};
