//! Selection set, grid snapping, and lasso hit-testing.

use crate::geom::{CanvasPoint, canvas_point};
use kelpie_graph::{Position, WorkflowGraph};

/// Fixed node card size used for lasso intersection tests. Rendering uses the
/// same constants, so the canvas rectangle and the hit test agree.
pub const NODE_WIDTH: f64 = 180.0;
pub const NODE_HEIGHT: f64 = 64.0;

/// Smallest effective grid step; tighter settings snap to this instead.
pub const MIN_SNAP_STEP: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapSettings {
    pub enabled: bool,
    pub step: f64,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            step: 20.0,
        }
    }
}

impl SnapSettings {
    /// Rounds one axis to the nearest multiple of `max(MIN_SNAP_STEP, step)`.
    pub fn snap_axis(&self, value: f64) -> f64 {
        if !self.enabled {
            return value;
        }
        let step = self.step.max(MIN_SNAP_STEP);
        (value / step).round() * step
    }

    pub fn snap_position(&self, position: Position) -> Position {
        Position {
            x: self.snap_axis(position.x),
            y: self.snap_axis(position.y),
        }
    }
}

/// Ordered set of selected node ids. The first entry is the primary
/// selection, the node an inspector panel shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    ids: Vec<String>,
}

impl Selection {
    pub fn from_ids(ids: impl IntoIterator<Item = String>) -> Self {
        let mut selection = Selection::default();
        selection.merge(ids);
        selection
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn primary(&self) -> Option<&str> {
        self.ids.first().map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Collapses the selection to a single node.
    pub fn replace_with(&mut self, id: &str) {
        self.ids.clear();
        self.ids.push(id.to_string());
    }

    /// Adds the id if absent, removes it if present.
    pub fn toggle(&mut self, id: &str) {
        if let Some(index) = self.ids.iter().position(|s| s == id) {
            self.ids.remove(index);
        } else {
            self.ids.push(id.to_string());
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.ids.retain(|s| s != id);
    }

    /// Appends ids not already present, preserving insertion order.
    pub fn merge(&mut self, ids: impl IntoIterator<Item = String>) {
        for id in ids {
            if !self.contains(&id) {
                self.ids.push(id);
            }
        }
    }
}

/// Inclusive AABB overlap between a node's fixed-size box and a rectangle
/// spanning `min..=max`.
fn node_intersects(position: Position, min: CanvasPoint, max: CanvasPoint) -> bool {
    position.x + NODE_WIDTH >= min.x
        && position.x <= max.x
        && position.y + NODE_HEIGHT >= min.y
        && position.y <= max.y
}

/// Every node whose bounding box intersects the rectangle spanned by two
/// opposite corners (in any orientation), in storage order.
pub fn nodes_in_box(graph: &WorkflowGraph, a: CanvasPoint, b: CanvasPoint) -> Vec<String> {
    let min = canvas_point(a.x.min(b.x), a.y.min(b.y));
    let max = canvas_point(a.x.max(b.x), a.y.max(b.y));
    graph
        .nodes()
        .iter()
        .filter(|node| node_intersects(node.position, min, max))
        .map(|node| node.id.clone())
        .collect()
}
