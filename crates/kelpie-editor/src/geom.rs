//! Typed screen/canvas geometry.
//!
//! Pointer events arrive in screen coordinates; the graph lives in canvas
//! coordinates. Tagging the two with distinct `euclid` units turns a missed
//! conversion into a type error instead of a subtly wrong drag.

/// Pixel coordinates relative to the page.
pub enum Screen {}

/// Graph coordinates, unaffected by pan/zoom.
pub enum Canvas {}

pub type ScreenPoint = euclid::Point2D<f64, Screen>;
pub type ScreenVector = euclid::Vector2D<f64, Screen>;
pub type CanvasPoint = euclid::Point2D<f64, Canvas>;
pub type CanvasVector = euclid::Vector2D<f64, Canvas>;
pub type CanvasBox = euclid::Box2D<f64, Canvas>;

pub fn screen_point(x: f64, y: f64) -> ScreenPoint {
    euclid::point2(x, y)
}

pub fn screen_vector(x: f64, y: f64) -> ScreenVector {
    euclid::vec2(x, y)
}

pub fn canvas_point(x: f64, y: f64) -> CanvasPoint {
    euclid::point2(x, y)
}
