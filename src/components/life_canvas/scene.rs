//! Render snapshot derived from [`CanvasState`].
//!
//! The renderer only ever sees a [`Scene`]: the viewport transform, the
//! connectors to stroke (dangling targets already dropped) and the node cards
//! in paint order with their emphasis flags resolved.

use std::collections::HashMap;

use super::interaction::CursorHint;
use super::scale::{ScaleConfig, ScaledValues, card_display_scale};
use super::selection::Emphasis;
use super::state::CanvasState;
use super::types::{Node, Point};
use super::viewport::ViewportState;

/// A straight connector between two node centers, in canvas space.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectorView {
	/// Center of the source card.
	pub source: Point,
	/// Center of the target card.
	pub target: Point,
	/// The source node is selected.
	pub highlighted: bool,
}

/// A node card ready to draw.
#[derive(Clone, Debug)]
pub struct NodeView<'a> {
	/// The node to draw.
	pub node: &'a Node,
	/// The node is selected.
	pub selected: bool,
	/// The node is focused.
	pub focused: bool,
	/// Some other node is selected.
	pub dimmed: bool,
	/// Factor applied on top of the viewport transform: emphasis multiplier
	/// divided by the viewport scale.
	pub display_scale: f64,
}

impl NodeView<'_> {
	/// Selected or focused; such cards get a ring and a deeper shadow.
	pub fn emphasized(&self) -> bool {
		self.selected || self.focused
	}
}

/// Everything needed to draw one frame.
#[derive(Clone, Debug)]
pub struct Scene<'a> {
	/// Viewport transform applied before drawing canvas-space content.
	pub transform: ViewportState,
	/// Stroke widths for this zoom level.
	pub scaled: ScaledValues,
	/// Connectors whose both ends exist.
	pub connectors: Vec<ConnectorView>,
	/// Cards in paint order.
	pub nodes: Vec<NodeView<'a>>,
	/// Cursor to show over the canvas.
	pub cursor: CursorHint,
}

impl<'a> Scene<'a> {
	/// Snapshots `state` for drawing.
	pub fn build(state: &'a CanvasState, config: &ScaleConfig) -> Self {
		let transform = state.viewport().state();
		let selection = state.selection();
		let by_id: HashMap<&str, &Node> = state
			.nodes()
			.iter()
			.map(|node| (node.id.as_str(), node))
			.collect();
		let by_id = &by_id;

		let connectors = state
			.nodes()
			.iter()
			.flat_map(|source| {
				let highlighted = selection.is_selected(&source.id);
				source.connections.iter().filter_map(move |target_id| {
					by_id.get(target_id.as_str()).map(|target| ConnectorView {
						source: source.position,
						target: target.position,
						highlighted,
					})
				})
			})
			.collect();

		let nodes = state
			.draw_order()
			.map(|node| {
				let emphasis = selection.emphasis(&node.id);
				NodeView {
					node,
					selected: selection.is_selected(&node.id),
					focused: emphasis == Emphasis::Focused,
					dimmed: selection.is_dimmed(&node.id),
					display_scale: card_display_scale(config, emphasis, transform.scale),
				}
			})
			.collect();

		Self {
			transform,
			scaled: ScaledValues::new(config, transform.scale),
			connectors,
			nodes,
			cursor: state.cursor_hint(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::life_canvas::config::CanvasConfig;
	use crate::components::life_canvas::state::ControlAction;
	use crate::components::life_canvas::types::sample_nodes;

	fn state() -> CanvasState {
		CanvasState::new(sample_nodes(), &CanvasConfig::default())
	}

	#[test]
	fn dangling_connectors_are_skipped() {
		let mut nodes = sample_nodes();
		nodes[0].connections.push("missing".into());
		let state = CanvasState::new(nodes, &CanvasConfig::default());
		let scene = Scene::build(&state, &ScaleConfig::default());

		assert_eq!(scene.connectors.len(), 2);
	}

	#[test]
	fn removed_target_drops_its_connectors() {
		let mut state = state();
		state.remove_node("2");
		let scene = Scene::build(&state, &ScaleConfig::default());
		assert!(scene.connectors.is_empty());
		assert_eq!(scene.nodes.len(), 1);
	}

	#[test]
	fn selected_node_paints_last_and_dims_others() {
		let mut state = state();
		state.click_node("1");
		let scene = Scene::build(&state, &ScaleConfig::default());

		let order: Vec<&str> = scene.nodes.iter().map(|v| v.node.id.as_str()).collect();
		assert_eq!(order, ["2", "1"]);
		assert!(scene.nodes[0].dimmed);
		assert!(!scene.nodes[1].dimmed);
		assert!(scene.nodes[1].selected);
		assert_eq!(scene.nodes[1].display_scale, 1.05);

		let highlighted: Vec<bool> = scene.connectors.iter().map(|c| c.highlighted).collect();
		assert_eq!(highlighted, [true, false]);
	}

	#[test]
	fn focused_card_is_twice_size_over_zoom() {
		let mut state = state();
		state.double_click_node("2");
		for _ in 0..4 {
			state.control(ControlAction::ZoomIn);
		}
		let scene = Scene::build(&state, &ScaleConfig::default());

		let focused = scene.nodes.iter().find(|v| v.focused).unwrap();
		assert_eq!(focused.node.id, "2");
		assert!(!focused.dimmed);
		assert_eq!(scene.transform.scale, 2.0);
		assert_eq!(focused.display_scale, 1.0);
	}
}
