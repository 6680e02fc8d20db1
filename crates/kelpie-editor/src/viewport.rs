//! Pan/zoom state and the screen ↔ canvas transform.

use crate::geom::{CanvasPoint, ScreenPoint, ScreenVector, canvas_point};

pub const ZOOM_MIN: f64 = 0.4;
pub const ZOOM_MAX: f64 = 2.5;

/// Zoom change per wheel delta unit.
pub const WHEEL_SENSITIVITY: f64 = 0.0015;

/// The canvas-to-screen mapping: `screen = canvas * zoom + pan + origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub pan: ScreenVector,
    zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan: ScreenVector::zero(),
            zoom: 1.0,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom factor, clamped to `[ZOOM_MIN, ZOOM_MAX]`. Out-of-range
    /// input is clamped, never rejected.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// Converts a pointer position to canvas coordinates. `origin` is the
    /// editor surface's top-left corner in the same screen space as `screen`.
    pub fn to_canvas(&self, screen: ScreenPoint, origin: ScreenPoint) -> CanvasPoint {
        canvas_point(
            (screen.x - origin.x - self.pan.x) / self.zoom,
            (screen.y - origin.y - self.pan.y) / self.zoom,
        )
    }

    /// Changes zoom while keeping the canvas point under `cursor` fixed on
    /// screen. `cursor` is relative to the surface origin.
    ///
    /// With `scale = z1 / z0`, the fixed-point condition gives
    /// `pan' = cursor - scale * (cursor - pan)`.
    pub fn zoom_to(&mut self, cursor: ScreenPoint, next_zoom: f64) {
        let next = next_zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        let scale = next / self.zoom;
        self.pan = ScreenVector::new(
            cursor.x - scale * (cursor.x - self.pan.x),
            cursor.y - scale * (cursor.y - self.pan.y),
        );
        self.zoom = next;
    }

    /// Wheel zoom, anchored at the cursor.
    pub fn zoom_by_wheel(&mut self, delta_y: f64, cursor: ScreenPoint) {
        self.zoom_to(cursor, self.zoom - delta_y * WHEEL_SENSITIVITY);
    }

    pub fn pan_by(&mut self, delta: ScreenVector) {
        self.pan += delta;
    }
}
