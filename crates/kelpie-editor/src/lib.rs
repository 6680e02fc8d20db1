#![forbid(unsafe_code)]

//! Interactive workflow graph editor core (headless).
//!
//! Everything here runs synchronously inside a UI event handler: pointer and
//! wheel events come in, a new render snapshot comes out. The rendering layer
//! owns hit-testing against its own DOM/scene and passes the id of the node
//! under the pointer; this crate owns the rest of the interaction model:
//! viewport math, selection, drag/pan/lasso sessions, validation gating, and
//! the persistable form of the graph.

pub mod editor;
pub mod error;
pub mod geom;
pub mod selection;
pub mod session;
pub mod viewport;

pub use editor::{GraphEditor, Modifiers, SaveOutcome};
pub use error::{Error, Result};
pub use selection::{NODE_HEIGHT, NODE_WIDTH, Selection, SnapSettings};
pub use session::PointerSession;
pub use viewport::{Viewport, ZOOM_MAX, ZOOM_MIN};
