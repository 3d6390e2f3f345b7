//! Leptos component hosting the canvas controller.
//!
//! The component creates an HTML canvas element, translates DOM mouse/wheel
//! events into [`CanvasEvent`]s for the [`CanvasState`], and redraws from a
//! fresh [`Scene`] on the next animation frame after any change. The zoom and
//! pan-tool controls are plain buttons overlaid on the canvas.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::config::CanvasConfig;
use super::interaction::{CursorHint, PointerButton};
use super::render;
use super::scale::ScaleConfig;
use super::scene::Scene;
use super::state::{CanvasEvent, CanvasState, ControlAction, PointerTarget};
use super::theme::Theme;
use super::types::{Node, Point};

/// Bundles the controller with visual configuration and the drawing surface size.
struct CanvasContext {
	state: CanvasState,
	scale: ScaleConfig,
	theme: Theme,
	width: f64,
	height: f64,
	dirty: bool,
}

type SharedContext = Rc<RefCell<Option<CanvasContext>>>;

/// Values the overlay controls display.
#[derive(Clone, Debug, PartialEq)]
struct ControlsReadout {
	percent: u32,
	can_zoom_in: bool,
	can_zoom_out: bool,
	pan_tool: bool,
	cursor: CursorHint,
}

impl ControlsReadout {
	fn from_state(state: &CanvasState) -> Self {
		let viewport = state.viewport();
		Self {
			percent: viewport.zoom_percent(),
			can_zoom_in: viewport.can_zoom_in(),
			can_zoom_out: viewport.can_zoom_out(),
			pan_tool: state.interaction().pan_tool_active(),
			cursor: state.cursor_hint(),
		}
	}
}

impl Default for ControlsReadout {
	fn default() -> Self {
		Self {
			percent: 100,
			can_zoom_in: true,
			can_zoom_out: true,
			pan_tool: false,
			cursor: CursorHint::Default,
		}
	}
}

/// Feeds one event to the controller and refreshes the readout if it changed.
fn dispatch(context: &SharedContext, readout: WriteSignal<ControlsReadout>, event: CanvasEvent) {
	let next = {
		let mut guard = context.borrow_mut();
		let Some(c) = guard.as_mut() else {
			return;
		};
		if !c.state.handle(event) {
			return;
		}
		c.dirty = true;
		ControlsReadout::from_state(&c.state)
	};
	readout.set(next);
}

/// Pointer position relative to the canvas element.
fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<Point> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some(Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn target_at(context: &SharedContext, point: Point) -> PointerTarget {
	context
		.borrow()
		.as_ref()
		.and_then(|c| c.state.node_at(point, &c.scale))
		.map(|node| PointerTarget::Node(node.id.clone()))
		.unwrap_or(PointerTarget::Background)
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Renders the interactive node canvas.
///
/// Pass the node source's records via `data`; later changes to the signal
/// replace the nodes while keeping the view. The component sizes itself to
/// its parent container by default; set `fullscreen = true` to fill the
/// window and follow its size. Explicit `width`/`height` override automatic
/// sizing.
#[component]
pub fn LifeCanvas(
	#[prop(into)] data: Signal<Vec<Node>>,
	#[prop(optional)] config: CanvasConfig,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = false)] dark: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (readout, set_readout) = signal(ControlsReadout::default());
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("life-canvas: 2d context unavailable");
			return;
		};

		let mut state = CanvasState::new(data.get_untracked(), &config);
		state.handle(CanvasEvent::Resize {
			width: w,
			height: h,
		});
		set_readout.set(ControlsReadout::from_state(&state));
		*context_init.borrow_mut() = Some(CanvasContext {
			state,
			scale: ScaleConfig::default(),
			theme: if dark { Theme::midnight() } else { Theme::paper() },
			width: w,
			height: h,
			dirty: true,
		});
		info!("life-canvas: mounted at {}x{}", w, h);

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.handle(CanvasEvent::Resize {
						width: nw,
						height: nh,
					});
					c.width = nw;
					c.height = nh;
					c.dirty = true;
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				if c.dirty {
					let scene = Scene::build(&c.state, &c.scale);
					render::render(&scene, &ctx, &c.scale, &c.theme, c.width, c.height);
					c.dirty = false;
				}
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Later changes to `data` refresh the nodes in place.
	let context_data = context.clone();
	Effect::new(move |_| {
		let nodes = data.get();
		let next = {
			let mut guard = context_data.borrow_mut();
			let Some(c) = guard.as_mut() else {
				return;
			};
			if !c.state.set_nodes(nodes) {
				return;
			}
			c.dirty = true;
			ControlsReadout::from_state(&c.state)
		};
		set_readout.set(next);
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(position) = local_point(canvas_ref, &ev) else {
			return;
		};
		let target = target_at(&context_md, position);
		dispatch(
			&context_md,
			set_readout,
			CanvasEvent::PointerDown {
				target,
				position,
				button: PointerButton::from_dom(ev.button()),
			},
		);
		if readout.get_untracked().cursor == CursorHint::Grabbing {
			ev.prevent_default();
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some(position) = local_point(canvas_ref, &ev) {
			dispatch(&context_mm, set_readout, CanvasEvent::PointerMove { position });
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		dispatch(&context_mu, set_readout, CanvasEvent::PointerUp);
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		dispatch(&context_ml, set_readout, CanvasEvent::PointerLeave);
	};

	let context_click = context.clone();
	let on_click = move |ev: MouseEvent| {
		if let Some(position) = local_point(canvas_ref, &ev) {
			let target = target_at(&context_click, position);
			dispatch(&context_click, set_readout, CanvasEvent::Click { target });
		}
	};

	let context_dbl = context.clone();
	let on_dblclick = move |ev: MouseEvent| {
		if let Some(position) = local_point(canvas_ref, &ev) {
			let target = target_at(&context_dbl, position);
			dispatch(&context_dbl, set_readout, CanvasEvent::DoubleClick { target });
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(position) = local_point(canvas_ref, &ev) {
			dispatch(
				&context_wh,
				set_readout,
				CanvasEvent::Wheel {
					delta_y: ev.delta_y(),
					position,
				},
			);
		}
	};

	let control = |action: ControlAction| {
		let context = context.clone();
		move |_: MouseEvent| dispatch(&context, set_readout, CanvasEvent::Control(action))
	};

	view! {
		<div class="life-canvas">
			<canvas
				node_ref=canvas_ref
				class="life-canvas-surface"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:click=on_click
				on:dblclick=on_dblclick
				on:wheel=on_wheel
				style=move || format!("display: block; cursor: {};", readout.get().cursor.as_css())
			/>
			<div class="canvas-controls">
				<button
					title="Zoom in"
					disabled=move || !readout.get().can_zoom_in
					on:click=control(ControlAction::ZoomIn)
				>
					"+"
				</button>
				<div class="zoom-level">{move || format!("{}%", readout.get().percent)}</div>
				<button
					title="Zoom out"
					disabled=move || !readout.get().can_zoom_out
					on:click=control(ControlAction::ZoomOut)
				>
					"\u{2212}"
				</button>
				<button title="Reset view" on:click=control(ControlAction::ResetView)>
					"\u{2922}"
				</button>
				<button
					title="Pan tool"
					class=move || if readout.get().pan_tool { "pan-tool active" } else { "pan-tool" }
					on:click=control(ControlAction::TogglePanTool)
				>
					"\u{270b}"
				</button>
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::life_canvas::types::sample_nodes;

	#[test]
	fn readout_tracks_controller() {
		let mut state = CanvasState::new(sample_nodes(), &CanvasConfig::default());
		assert_eq!(ControlsReadout::from_state(&state), ControlsReadout::default());

		for _ in 0..4 {
			state.control(ControlAction::ZoomIn);
		}
		state.control(ControlAction::TogglePanTool);
		let readout = ControlsReadout::from_state(&state);
		assert_eq!(readout.percent, 200);
		assert!(!readout.can_zoom_in);
		assert!(readout.can_zoom_out);
		assert!(readout.pan_tool);
		assert_eq!(readout.cursor, CursorHint::Grab);
	}
}
