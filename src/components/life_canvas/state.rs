//! Top-level canvas controller.
//!
//! [`CanvasState`] owns the nodes, the viewport, the interaction mode and the
//! selection/focus pair. Hosts feed it [`CanvasEvent`]s (or call the matching
//! methods directly) and redraw when a call reports a change. Nothing here
//! touches the DOM, so the whole controller runs headless in tests.

use std::collections::HashSet;

use log::{debug, info, warn};

use super::config::{CanvasConfig, InteractionConfig};
use super::drag::DragState;
use super::interaction::{CursorHint, InteractionController, PointerButton};
use super::scale::{ScaleConfig, card_display_scale};
use super::selection::{Emphasis, SelectionState};
use super::types::{Node, NodeId, Point};
use super::viewport::Viewport;

/// What the pointer was over when an event fired.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PointerTarget {
	/// A node card.
	Node(NodeId),
	/// Empty canvas.
	Background,
}

/// Actions exposed by the on-screen control surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlAction {
	/// Scale up by one zoom step.
	ZoomIn,
	/// Scale down by one zoom step.
	ZoomOut,
	/// Back to scale 1 and zero offset.
	ResetView,
	/// Arm or disarm the pan tool.
	TogglePanTool,
}

/// Input delivered to the controller. Positions are screen-space, relative
/// to the canvas element.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasEvent {
	/// Button pressed over `target`.
	PointerDown {
		/// What the pointer is over.
		target: PointerTarget,
		/// Pointer location.
		position: Point,
		/// Which button went down.
		button: PointerButton,
	},
	/// Pointer moved.
	PointerMove {
		/// New pointer location.
		position: Point,
	},
	/// Button released.
	PointerUp,
	/// Pointer left the canvas element.
	PointerLeave,
	/// Click delivered after pointer-up.
	Click {
		/// What was clicked.
		target: PointerTarget,
	},
	/// Double click.
	DoubleClick {
		/// What was double-clicked.
		target: PointerTarget,
	},
	/// Wheel scroll.
	Wheel {
		/// DOM `deltaY`; negative zooms in.
		delta_y: f64,
		/// Pointer location, used as the zoom anchor.
		position: Point,
	},
	/// On-screen control pressed.
	Control(ControlAction),
	/// Canvas element resized.
	Resize {
		/// New width in pixels.
		width: f64,
		/// New height in pixels.
		height: f64,
	},
}

/// Owned canvas state with event-driven transitions.
#[derive(Clone, Debug)]
pub struct CanvasState {
	nodes: Vec<Node>,
	viewport: Viewport,
	interaction: InteractionController,
	selection: SelectionState,
	config: InteractionConfig,
	/// Furthest screen distance the current drag has moved from its origin.
	drag_travel: f64,
	/// Set when a drag ended beyond the click slop; eats the click that follows.
	swallow_click: bool,
}

impl CanvasState {
	/// Builds the controller from the node source's records.
	///
	/// Nodes with an id already seen are dropped, and each node's connections
	/// are de-duplicated.
	pub fn new(nodes: Vec<Node>, config: &CanvasConfig) -> Self {
		let nodes = normalize_nodes(nodes);
		info!("life-canvas: canvas ready with {} nodes", nodes.len());

		Self {
			nodes,
			viewport: Viewport::new(&config.viewport),
			interaction: InteractionController::default(),
			selection: SelectionState::default(),
			config: config.interaction.clone(),
			drag_travel: 0.0,
			swallow_click: false,
		}
	}

	/// All nodes in source order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Looks up a node by id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|node| node.id == id)
	}

	/// The pan/zoom transform.
	pub fn viewport(&self) -> &Viewport {
		&self.viewport
	}

	/// Pan tool and active gesture.
	pub fn interaction(&self) -> &InteractionController {
		&self.interaction
	}

	/// Selection and focus.
	pub fn selection(&self) -> &SelectionState {
		&self.selection
	}

	/// Cursor the host should show.
	pub fn cursor_hint(&self) -> CursorHint {
		self.interaction.cursor_hint()
	}

	/// Applies one event. Returns whether anything observable changed.
	pub fn handle(&mut self, event: CanvasEvent) -> bool {
		match event {
			CanvasEvent::PointerDown {
				target,
				position,
				button,
			} => self.pointer_down(&target, position, button),
			CanvasEvent::PointerMove { position } => self.pointer_move(position),
			CanvasEvent::PointerUp => self.pointer_up(),
			CanvasEvent::PointerLeave => self.pointer_leave(),
			CanvasEvent::Click { target } => self.click(&target),
			CanvasEvent::DoubleClick { target } => self.double_click(&target),
			CanvasEvent::Wheel { delta_y, position } => self.wheel(delta_y, position),
			CanvasEvent::Control(action) => self.control(action),
			CanvasEvent::Resize { width, height } => self.viewport.resize(width, height),
		}
	}

	/// Consuming form of [`handle`](Self::handle): `next = state.transition(event)`.
	#[must_use]
	pub fn transition(mut self, event: CanvasEvent) -> Self {
		self.handle(event);
		self
	}

	/// Starts a drag over a node or a pan over the background.
	pub fn pointer_down(&mut self, target: &PointerTarget, position: Point, button: PointerButton) -> bool {
		self.swallow_click = false;
		self.drag_travel = 0.0;
		if !position.is_finite() {
			return false;
		}
		match target {
			PointerTarget::Node(id) => self.begin_drag(id, position),
			PointerTarget::Background => self.interaction.begin_pan(position, button),
		}
	}

	/// Continues the active gesture. A pan is evaluated first and, while it
	/// runs, no drag update happens.
	pub fn pointer_move(&mut self, position: Point) -> bool {
		if self.interaction.continue_pan(position, &mut self.viewport) {
			return true;
		}
		if self.interaction.is_panning() {
			return false;
		}
		self.drag_to(position)
	}

	/// Ends the active gesture. The dragged node keeps its last live position.
	pub fn pointer_up(&mut self) -> bool {
		let was_idle = self.interaction.is_idle();
		if self.interaction.end_gesture().is_some() && self.drag_travel > self.config.click_slop {
			self.swallow_click = true;
		}
		!was_idle
	}

	/// Pointer left the canvas: same as pointer-up, but no click will follow.
	pub fn pointer_leave(&mut self) -> bool {
		let changed = self.pointer_up();
		self.swallow_click = false;
		changed
	}

	/// Resolves a click on a node or the background.
	pub fn click(&mut self, target: &PointerTarget) -> bool {
		if std::mem::take(&mut self.swallow_click) {
			debug!("life-canvas: click after drag ignored");
			return false;
		}
		match target {
			PointerTarget::Node(id) => self.click_node(id),
			PointerTarget::Background => self.click_background(),
		}
	}

	/// Resolves a double click; only nodes react.
	pub fn double_click(&mut self, target: &PointerTarget) -> bool {
		match target {
			PointerTarget::Node(id) => self.double_click_node(id),
			PointerTarget::Background => false,
		}
	}

	/// Toggles selection of a node. Ignored while the pan tool is active or a
	/// pan is running.
	pub fn click_node(&mut self, id: &str) -> bool {
		if self.interaction.pan_tool_active() || self.interaction.is_panning() {
			return false;
		}
		if self.node(id).is_none() {
			warn!("life-canvas: click on unknown node {id}");
			return false;
		}
		self.selection.toggle_select(id);
		true
	}

	/// Focuses a node without touching the selection.
	pub fn double_click_node(&mut self, id: &str) -> bool {
		if self.node(id).is_none() {
			warn!("life-canvas: double-click on unknown node {id}");
			return false;
		}
		self.selection.focus(id)
	}

	/// Clears selection and focus, unless the click belongs to a pan gesture.
	pub fn click_background(&mut self) -> bool {
		if self.interaction.pan_tool_active() || self.interaction.is_panning() {
			return false;
		}
		self.selection.clear()
	}

	/// Zooms by the wheel delta, anchored at the pointer.
	pub fn wheel(&mut self, delta_y: f64, position: Point) -> bool {
		self.viewport
			.zoom(-delta_y * self.config.wheel_sensitivity, Some(position))
	}

	/// Applies an on-screen control.
	pub fn control(&mut self, action: ControlAction) -> bool {
		match action {
			ControlAction::ZoomIn => self.viewport.zoom(self.config.zoom_step, None),
			ControlAction::ZoomOut => self.viewport.zoom(-self.config.zoom_step, None),
			ControlAction::ResetView => {
				let before = self.viewport.state();
				self.viewport.reset();
				self.viewport.state() != before
			}
			ControlAction::TogglePanTool => {
				self.interaction.toggle_pan_tool();
				true
			}
		}
	}

	/// Replaces the node set with a fresh copy from the node source.
	///
	/// The view transform and any running gesture are kept. Selection or focus
	/// on an id that is gone is cleared, and a drag of a vanished node no
	/// longer moves anything.
	pub fn set_nodes(&mut self, nodes: Vec<Node>) -> bool {
		let nodes = normalize_nodes(nodes);
		if nodes == self.nodes {
			return false;
		}
		self.nodes = nodes;
		let stale: Vec<NodeId> = [self.selection.selected(), self.selection.focused()]
			.into_iter()
			.flatten()
			.filter(|id| self.node(id).is_none())
			.map(str::to_owned)
			.collect();
		for id in stale {
			self.selection.forget(&id);
		}
		info!("life-canvas: node set refreshed, {} nodes", self.nodes.len());
		true
	}

	/// Removes a node on behalf of an external actor.
	///
	/// Selection and focus referencing it are cleared. Connections pointing at
	/// it are left in place and skipped when drawing. A drag of the node stays
	/// active but no longer moves anything.
	pub fn remove_node(&mut self, id: &str) -> Option<Node> {
		let index = self.nodes.iter().position(|node| node.id == id)?;
		self.selection.forget(id);
		Some(self.nodes.remove(index))
	}

	/// Nodes in paint order: plain cards first, emphasized cards on top.
	pub fn draw_order(&self) -> impl Iterator<Item = &Node> {
		let plain = self
			.nodes
			.iter()
			.filter(|node| self.selection.emphasis(&node.id) == Emphasis::None);
		let emphasized = self
			.nodes
			.iter()
			.filter(|node| self.selection.emphasis(&node.id) != Emphasis::None);
		plain.chain(emphasized)
	}

	/// Topmost node whose card lies under a screen point.
	pub fn node_at(&self, screen: Point, config: &ScaleConfig) -> Option<&Node> {
		if !screen.is_finite() {
			return None;
		}
		let k = self.viewport.scale();
		let p = self.viewport.screen_to_canvas(screen);
		let ordered: Vec<&Node> = self.draw_order().collect();
		ordered.into_iter().rev().find(|node| {
			let display = card_display_scale(config, self.selection.emphasis(&node.id), k);
			let half_w = config.card.width * display / 2.0;
			let half_h = config.card.height * display / 2.0;
			(p.x - node.position.x).abs() <= half_w && (p.y - node.position.y).abs() <= half_h
		})
	}

	fn begin_drag(&mut self, id: &str, position: Point) -> bool {
		if self.interaction.pan_tool_active() {
			return false;
		}
		let Some(node) = self.node(id) else {
			warn!("life-canvas: drag start on unknown node {id}");
			return false;
		};
		let drag = DragState::new(id, position, node.position);
		self.interaction.begin_drag(drag)
	}

	fn drag_to(&mut self, position: Point) -> bool {
		let Some(drag) = self.interaction.drag() else {
			return false;
		};
		let Some(live) = drag.live_position(position, self.viewport.scale()) else {
			return false;
		};
		self.drag_travel = self.drag_travel.max(drag.travel(position));
		let Some(node) = self.nodes.iter_mut().find(|node| node.id == drag.node_id()) else {
			return false;
		};
		if node.position == live {
			return false;
		}
		node.position = live;
		true
	}
}

/// Drops nodes whose id was already seen and de-duplicates connections.
fn normalize_nodes(nodes: Vec<Node>) -> Vec<Node> {
	let mut seen = HashSet::new();
	nodes
		.into_iter()
		.filter_map(|mut node| {
			if !seen.insert(node.id.clone()) {
				warn!("life-canvas: dropping duplicate node id {}", node.id);
				return None;
			}
			node.dedup_connections();
			Some(node)
		})
		.collect()
}
