//! Pointer interaction state machine.

use crate::geom::{CanvasPoint, ScreenPoint, ScreenVector};
use kelpie_graph::Position;
use rustc_hash::FxHashMap;

/// What the current pointer press is doing.
///
/// A session starts on pointer-down and ends on pointer-up or pointer-leave.
/// Modeling it as one tagged enum makes impossible combinations (a drag and a
/// pan at the same time) unrepresentable.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PointerSession {
    #[default]
    Idle,
    /// Moving the current selection. `start_positions` is a snapshot taken at
    /// drag start; every move event recomputes from it, so intermediate events
    /// never accumulate rounding error.
    Dragging {
        anchor: CanvasPoint,
        start_positions: FxHashMap<String, Position>,
    },
    /// Translating the viewport by the screen-space delta since press.
    Panning {
        start_screen: ScreenPoint,
        origin_pan: ScreenVector,
    },
    /// Drawing a rubber-band rectangle in canvas space.
    Lassoing {
        anchor: CanvasPoint,
        current: CanvasPoint,
        merge: bool,
    },
}

impl PointerSession {
    pub fn is_idle(&self) -> bool {
        matches!(self, PointerSession::Idle)
    }
}
