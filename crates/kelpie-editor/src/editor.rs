//! The editor facade a rendering shell drives.

use crate::error::{Error, Result};
use crate::geom::{CanvasBox, ScreenPoint, screen_point};
use crate::selection::{Selection, SnapSettings, nodes_in_box};
use crate::session::PointerSession;
use crate::viewport::Viewport;
use kelpie_graph::{
    NodeKind, NodePatch, PersistedGraph, Position, ValidationWarning, WorkflowGraph, validate,
};
use kelpie_layout::{LayoutOptions, auto_layout};
use rustc_hash::FxHashMap;
use serde_json::Value;
use tracing::debug;

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Whether a lasso started with these modifiers merges into the current
    /// selection instead of replacing it.
    pub fn lasso_merge(self) -> bool {
        self.alt || self.ctrl || self.meta
    }
}

/// Result of a successful save: the wire-shape graph plus any node configs
/// whose draft text failed to parse and fell back to the last good value.
#[derive(Debug)]
pub struct SaveOutcome {
    pub graph: PersistedGraph,
    pub config_errors: Vec<Error>,
}

/// Composes the graph, viewport, selection and pointer session behind the
/// operations a rendering shell calls per event.
///
/// Everything is synchronous and single-threaded; a session is scoped between
/// pointer-down and pointer-up (or pointer-leave, which also terminates it, so
/// a drag can never get stuck when the cursor exits the surface).
#[derive(Debug, Clone)]
pub struct GraphEditor {
    graph: WorkflowGraph,
    viewport: Viewport,
    selection: Selection,
    session: PointerSession,
    snap: SnapSettings,
    layout: LayoutOptions,
    /// Editor surface top-left in screen coordinates.
    origin: ScreenPoint,
    /// Unparsed per-node config text, reconciled into `config` only on an
    /// explicit commit. Never serialized.
    drafts: FxHashMap<String, String>,
    warnings: Vec<ValidationWarning>,
}

impl Default for GraphEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphEditor {
    /// An editor over a fresh graph (single `start` node).
    pub fn new() -> Self {
        Self::with_graph(WorkflowGraph::new())
    }

    /// Replaces all editor state with a freshly loaded graph. Nothing from a
    /// previously open graph survives.
    pub fn from_persisted(persisted: PersistedGraph) -> Self {
        Self::with_graph(WorkflowGraph::from_persisted(persisted))
    }

    fn with_graph(graph: WorkflowGraph) -> Self {
        let warnings = validate(&graph);
        Self {
            graph,
            viewport: Viewport::new(),
            selection: Selection::default(),
            session: PointerSession::Idle,
            snap: SnapSettings::default(),
            layout: LayoutOptions::default(),
            origin: screen_point(0.0, 0.0),
            drafts: FxHashMap::default(),
            warnings,
        }
    }

    pub fn graph(&self) -> &WorkflowGraph {
        &self.graph
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn session(&self) -> &PointerSession {
        &self.session
    }

    pub fn snap(&self) -> SnapSettings {
        self.snap
    }

    pub fn set_snap(&mut self, snap: SnapSettings) {
        self.snap = snap;
    }

    pub fn layout_options(&self) -> LayoutOptions {
        self.layout
    }

    pub fn set_layout_options(&mut self, layout: LayoutOptions) {
        self.layout = layout;
    }

    /// Tells the editor where its surface sits on screen, so pointer events
    /// (which arrive in page coordinates) can be mapped onto the canvas.
    pub fn set_origin(&mut self, origin: ScreenPoint) {
        self.origin = origin;
    }

    /// Warnings from the last structural validation. Refreshed after every
    /// graph mutation.
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    fn refresh_warnings(&mut self) {
        self.warnings = validate(&self.graph);
    }

    // --- graph mutations -------------------------------------------------

    pub fn add_node(
        &mut self,
        kind: NodeKind,
        label: Option<&str>,
        id: Option<&str>,
    ) -> Result<()> {
        self.graph = self.graph.with_node(kind, label, id)?;
        self.refresh_warnings();
        Ok(())
    }

    /// Removes the node, its incident edges, its draft text, and its
    /// membership in the selection.
    pub fn remove_node(&mut self, id: &str) {
        self.graph = self.graph.with_node_removed(id);
        self.selection.remove(id);
        self.drafts.remove(id);
        self.refresh_warnings();
    }

    pub fn add_edge(&mut self, from: &str, to: &str, condition: &str) {
        self.graph = self.graph.with_edge(from, to, condition);
        self.refresh_warnings();
    }

    pub fn remove_edge(&mut self, index: usize) {
        self.graph = self.graph.with_edge_removed(index);
        self.refresh_warnings();
    }

    pub fn patch_node(&mut self, id: &str, patch: NodePatch) {
        self.graph = self.graph.with_node_patched(id, patch);
        self.refresh_warnings();
    }

    /// Levels the graph and applies the computed positions. Nodes on a cycle
    /// cannot be leveled and keep their previous coordinates; their ids are
    /// returned so a shell can point them out.
    pub fn run_auto_layout(&mut self) -> Vec<String> {
        let result = auto_layout(&self.graph, &self.layout);
        self.graph = self
            .graph
            .with_positions(result.positions.iter().map(|(id, p)| (id.as_str(), *p)));
        debug!(
            placed = result.positions.len(),
            unplaced = result.unplaced.len(),
            "auto layout applied"
        );
        result.unplaced
    }

    // --- config drafts ---------------------------------------------------

    /// Stores unparsed config text for a node. The structured `config` is
    /// untouched until [`commit_drafts`](Self::commit_drafts).
    pub fn set_node_draft(&mut self, id: &str, text: impl Into<String>) {
        if self.graph.has_node(id) {
            self.drafts.insert(id.to_string(), text.into());
        }
    }

    pub fn node_draft(&self, id: &str) -> Option<&str> {
        self.drafts.get(id).map(String::as_str)
    }

    pub fn clear_node_draft(&mut self, id: &str) {
        self.drafts.remove(id);
    }

    /// Parses every draft back into structured config. A draft that parses as
    /// a JSON object replaces the node's config and is dropped; one that does
    /// not leaves the last-good config and the draft text in place and is
    /// reported, so nothing is ever discarded silently.
    pub fn commit_drafts(&mut self) -> Vec<Error> {
        let mut errors = Vec::new();
        let ids: Vec<String> = self.drafts.keys().cloned().collect();
        for id in ids {
            if !self.graph.has_node(&id) {
                self.drafts.remove(&id);
                continue;
            }
            let text = self.drafts.get(&id).cloned().unwrap_or_default();
            match serde_json::from_str::<Value>(&text) {
                Ok(Value::Object(config)) => {
                    self.graph = self.graph.with_node_patched(
                        &id,
                        NodePatch {
                            config: Some(config),
                            ..Default::default()
                        },
                    );
                    self.drafts.remove(&id);
                }
                Ok(_) => errors.push(Error::ConfigNotObject { node_id: id }),
                Err(err) => errors.push(Error::InvalidConfigJson {
                    node_id: id,
                    message: err.to_string(),
                }),
            }
        }
        errors
    }

    // --- persistence -----------------------------------------------------

    /// The wire-shape graph, with drafts committed first. UI-only state
    /// (draft text, selection, viewport) never reaches the output.
    pub fn to_persistable(&mut self) -> (PersistedGraph, Vec<Error>) {
        let config_errors = self.commit_drafts();
        (self.graph.to_persisted(), config_errors)
    }

    /// Commits drafts, re-validates, and returns the persistable graph.
    /// Refuses while structural warnings are outstanding.
    pub fn save(&mut self) -> Result<SaveOutcome> {
        let config_errors = self.commit_drafts();
        self.refresh_warnings();
        if !self.warnings.is_empty() {
            return Err(Error::ValidationFailed {
                warnings: self.warnings.clone(),
            });
        }
        debug!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "graph saved"
        );
        Ok(SaveOutcome {
            graph: self.graph.to_persisted(),
            config_errors,
        })
    }

    // --- pointer handling ------------------------------------------------

    /// `hit` is the id of the node under the pointer, resolved by the
    /// rendering layer; `None` means the press landed on empty canvas.
    pub fn on_pointer_down(&mut self, screen: ScreenPoint, hit: Option<&str>, mods: Modifiers) {
        match hit {
            Some(id) if self.graph.has_node(id) => self.begin_drag(screen, id, mods),
            Some(_) => {}
            None => {
                if mods.shift {
                    let point = self.viewport.to_canvas(screen, self.origin);
                    self.session = PointerSession::Lassoing {
                        anchor: point,
                        current: point,
                        merge: mods.lasso_merge(),
                    };
                } else {
                    self.session = PointerSession::Panning {
                        start_screen: screen,
                        origin_pan: self.viewport.pan,
                    };
                    self.selection.clear();
                }
            }
        }
    }

    fn begin_drag(&mut self, screen: ScreenPoint, id: &str, mods: Modifiers) {
        if mods.shift {
            self.selection.toggle(id);
        } else if !self.selection.contains(id) {
            // A plain press collapses to the pressed node; pressing a node
            // that is already selected keeps the set intact for a group drag.
            self.selection.replace_with(id);
        }

        let start_positions: FxHashMap<String, Position> = self
            .graph
            .nodes()
            .iter()
            .filter(|node| self.selection.contains(&node.id))
            .map(|node| (node.id.clone(), node.position))
            .collect();

        self.session = PointerSession::Dragging {
            anchor: self.viewport.to_canvas(screen, self.origin),
            start_positions,
        };
    }

    pub fn on_pointer_move(&mut self, screen: ScreenPoint) {
        match &mut self.session {
            PointerSession::Idle => {}
            PointerSession::Lassoing { current, .. } => {
                *current = self.viewport.to_canvas(screen, self.origin);
            }
            PointerSession::Panning {
                start_screen,
                origin_pan,
            } => {
                self.viewport.pan = *origin_pan + (screen - *start_screen);
            }
            PointerSession::Dragging {
                anchor,
                start_positions,
            } => {
                let point = self.viewport.to_canvas(screen, self.origin);
                let dx = point.x - anchor.x;
                let dy = point.y - anchor.y;
                let snap = self.snap;
                let moved: Vec<(String, Position)> = start_positions
                    .iter()
                    .map(|(id, start)| {
                        (
                            id.clone(),
                            Position {
                                x: snap.snap_axis(start.x + dx).max(0.0),
                                y: snap.snap_axis(start.y + dy).max(0.0),
                            },
                        )
                    })
                    .collect();
                self.graph = self
                    .graph
                    .with_positions(moved.iter().map(|(id, p)| (id.as_str(), *p)));
            }
        }
    }

    pub fn on_pointer_up(&mut self) {
        self.finish_session();
    }

    /// The pointer left the surface; treat it like a release so no session
    /// outlives its press.
    pub fn on_pointer_leave(&mut self) {
        self.finish_session();
    }

    fn finish_session(&mut self) {
        if let PointerSession::Lassoing {
            anchor,
            current,
            merge,
        } = std::mem::take(&mut self.session)
        {
            let picked = nodes_in_box(&self.graph, anchor, current);
            if merge {
                self.selection.merge(picked);
            } else {
                self.selection = Selection::from_ids(picked);
            }
        }
    }

    /// Aborts an in-flight drag, restoring every node to its position at
    /// drag start. No-op for pans and lassos.
    pub fn cancel_drag(&mut self) {
        if matches!(self.session, PointerSession::Dragging { .. }) {
            if let PointerSession::Dragging {
                start_positions, ..
            } = std::mem::take(&mut self.session)
            {
                self.graph = self
                    .graph
                    .with_positions(start_positions.iter().map(|(id, p)| (id.as_str(), *p)));
            }
        }
    }

    pub fn on_wheel(&mut self, delta_y: f64, screen: ScreenPoint) {
        let cursor = screen_point(screen.x - self.origin.x, screen.y - self.origin.y);
        self.viewport.zoom_by_wheel(delta_y, cursor);
    }

    /// Toolbar zoom (no cursor anchor).
    pub fn set_zoom(&mut self, zoom: f64) {
        self.viewport.set_zoom(zoom);
    }

    /// The lasso rectangle to render, while one is being drawn.
    pub fn lasso_rect(&self) -> Option<CanvasBox> {
        match &self.session {
            PointerSession::Lassoing {
                anchor, current, ..
            } => Some(CanvasBox::from_points([*anchor, *current])),
            _ => None,
        }
    }
}
