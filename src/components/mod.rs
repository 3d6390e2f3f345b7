//! UI components.

pub mod life_canvas;
