#![forbid(unsafe_code)]

//! Deterministic level-based auto-layout for workflow graphs.
//!
//! Nodes are placed left-to-right by topological depth (longest path from any
//! root) and top-to-bottom by storage order within a depth. The layering is a
//! Kahn-style pass: a node's level is only final once every ancestor on every
//! path has been processed, so a child is never drawn left of a parent.
//!
//! Cycles degrade gracefully: nodes inside a cycle never reach in-degree zero,
//! are never dequeued, and are reported as unplaced instead of positioned.
//! Callers keep their previous coordinates for those nodes.

use kelpie_graph::{Position, WorkflowGraph};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub base_x: f64,
    pub base_y: f64,
    pub spacing_x: f64,
    pub spacing_y: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            base_x: 80.0,
            base_y: 80.0,
            spacing_x: 220.0,
            spacing_y: 140.0,
        }
    }
}

/// Topological depth assignment for the placeable subset of a graph.
#[derive(Debug, Clone, Default)]
pub struct Leveling {
    levels: FxHashMap<String, usize>,
    unplaced: Vec<String>,
}

impl Leveling {
    /// Longest-path layering over the graph's edges.
    ///
    /// Seeds are all nodes with in-degree zero, enqueued in storage order;
    /// visiting `n` raises every child to at least `level(n) + 1` and enqueues
    /// it once its remaining in-degree hits zero. Edges whose endpoints do not
    /// resolve contribute nothing to the child lists but still inflate the
    /// in-degree of an existing target, which keeps that target unplaced until
    /// the dangling edge is fixed (the validator flags it separately).
    pub fn compute(graph: &WorkflowGraph) -> Self {
        let mut incoming: FxHashMap<&str, usize> = FxHashMap::default();
        let mut outgoing: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
        for node in graph.nodes() {
            incoming.insert(&node.id, 0);
            outgoing.insert(&node.id, Vec::new());
        }
        for edge in graph.edges() {
            if let Some(children) = outgoing.get_mut(edge.from.as_str()) {
                children.push(&edge.to);
            }
            if let Some(count) = incoming.get_mut(edge.to.as_str()) {
                *count += 1;
            }
        }

        let mut queue: VecDeque<&str> = graph
            .nodes()
            .iter()
            .filter(|node| incoming.get(node.id.as_str()) == Some(&0))
            .map(|node| node.id.as_str())
            .collect();

        let mut levels: FxHashMap<&str, usize> = FxHashMap::default();
        let mut placed: FxHashSet<&str> = FxHashSet::default();
        while let Some(id) = queue.pop_front() {
            placed.insert(id);
            let level = levels.get(id).copied().unwrap_or(0);
            let children = outgoing.get(id).cloned().unwrap_or_default();
            for child in children {
                if !outgoing.contains_key(child) {
                    continue;
                }
                let entry = levels.entry(child).or_insert(0);
                *entry = (*entry).max(level + 1);
                if let Some(count) = incoming.get_mut(child) {
                    if *count > 0 {
                        *count -= 1;
                        if *count == 0 {
                            queue.push_back(child);
                        }
                    }
                }
            }
        }

        let mut out = Leveling::default();
        for node in graph.nodes() {
            let id = node.id.as_str();
            if placed.contains(id) {
                out.levels
                    .insert(id.to_string(), levels.get(id).copied().unwrap_or(0));
            } else {
                out.unplaced.push(id.to_string());
            }
        }
        out
    }

    /// Depth of a placed node; `None` for cycle members.
    pub fn level(&self, id: &str) -> Option<usize> {
        self.levels.get(id).copied()
    }

    /// Ids that could not be leveled (nodes on a cycle, or downstream of a
    /// dangling in-edge), in storage order.
    pub fn unplaced(&self) -> &[String] {
        &self.unplaced
    }

    /// Position assignment: `x` from the level, `y` from the node's position
    /// within its level, counted in storage order. Unplaced nodes get no
    /// entry.
    pub fn positions(
        &self,
        graph: &WorkflowGraph,
        options: &LayoutOptions,
    ) -> FxHashMap<String, Position> {
        let mut next_index: FxHashMap<usize, usize> = FxHashMap::default();
        let mut positions = FxHashMap::default();
        for node in graph.nodes() {
            let Some(level) = self.level(&node.id) else {
                continue;
            };
            let index = next_index.entry(level).or_insert(0);
            positions.insert(
                node.id.clone(),
                Position {
                    x: options.base_x + (level as f64) * options.spacing_x,
                    y: options.base_y + (*index as f64) * options.spacing_y,
                },
            );
            *index += 1;
        }
        positions
    }
}

#[derive(Debug, Clone, Default)]
pub struct LayoutResult {
    pub positions: FxHashMap<String, Position>,
    pub unplaced: Vec<String>,
}

/// Levels the graph and assigns positions in one call.
pub fn auto_layout(graph: &WorkflowGraph, options: &LayoutOptions) -> LayoutResult {
    let leveling = Leveling::compute(graph);
    let positions = leveling.positions(graph, options);
    LayoutResult {
        positions,
        unplaced: leveling.unplaced,
    }
}
