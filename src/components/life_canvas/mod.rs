//! Infinite node canvas with pan, zoom, node dragging and selection.
//!
//! The controller ([`CanvasState`]) is plain Rust and runs headless; the
//! [`LifeCanvas`] component wires it to an HTML canvas element.
//!
//! # Usage
//!
//! ```ignore
//! use life_canvas::{LifeCanvas, Node};
//!
//! let nodes: Vec<Node> = load_nodes();
//! view! { <LifeCanvas data=Signal::derive(move || nodes.clone()) fullscreen=true /> }
//! ```

mod component;
pub mod config;
mod drag;
mod interaction;
mod render;
pub mod scale;
mod scene;
mod selection;
mod state;
pub mod theme;
mod types;
mod viewport;

pub use component::LifeCanvas;
pub use config::{CanvasConfig, InteractionConfig, ViewportConfig, ZoomAnchor};
pub use drag::DragState;
pub use interaction::{CursorHint, InteractionController, InteractionMode, PointerButton};
pub use scale::ScaleConfig;
pub use scene::{ConnectorView, NodeView, Scene};
pub use selection::{Emphasis, SelectionState};
pub use state::{CanvasEvent, CanvasState, ControlAction, PointerTarget};
pub use theme::Theme;
pub use types::{Node, NodeId, NodeKind, Point, Vec2, sample_nodes};
pub use viewport::{Viewport, ViewportState};
