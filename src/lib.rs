//! life-canvas: interactive infinite canvas for life-record nodes.
//!
//! This crate provides a WASM canvas component that lays out moment, idea,
//! project and experience cards on an unbounded plane, with pan, zoom, node
//! dragging and a selection/focus model. The controller behind it is plain
//! Rust and can be driven headless.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::life_canvas::{
	CanvasConfig, CanvasEvent, CanvasState, ControlAction, CursorHint, DragState, Emphasis,
	InteractionConfig, InteractionController, InteractionMode, LifeCanvas, Node, NodeId, NodeKind,
	Point, PointerButton, PointerTarget, ScaleConfig, Scene, SelectionState, Theme, Vec2, Viewport,
	ViewportConfig, ViewportState, ZoomAnchor, sample_nodes,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("life-canvas: logging initialized");
}

/// Parse the JSON body of a `<script id=...>` element.
///
/// A missing element yields `None` quietly; malformed JSON is logged.
fn load_json<T: DeserializeOwned>(element_id: &str) -> Option<T> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(element_id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<T>(&json_text) {
		Ok(value) => {
			info!("life-canvas: loaded #{}", element_id);
			Some(value)
		}
		Err(e) => {
			warn!("life-canvas: failed to parse #{}: {}", element_id, e);
			None
		}
	}
}

/// Main application component.
/// Loads nodes and settings from the DOM and renders the canvas.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let nodes = load_json::<Vec<Node>>("canvas-nodes").unwrap_or_else(|| {
		info!("life-canvas: no node data, showing sample nodes");
		sample_nodes()
	});
	let config = load_json::<CanvasConfig>("canvas-config").unwrap_or_default();
	let node_signal = Signal::derive(move || nodes.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Life Canvas" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-canvas">
			<LifeCanvas data=node_signal config=config fullscreen=true />
			<div class="canvas-overlay">
				<h1>"Life Canvas"</h1>
				<p class="subtitle">
					"Drag cards to move them. Scroll or use the controls to zoom. Switch on the hand tool to pan."
				</p>
			</div>
		</div>
	}
}
