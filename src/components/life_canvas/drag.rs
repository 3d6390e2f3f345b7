//! Node reposition gesture.
//!
//! A [`DragState`] is a fixed anchor captured at pointer-down: which node, where
//! the pointer was on screen, and where the node was on the canvas. The live
//! position is derived from it on every move and never stored here; the owner
//! of the node data commits it.

use super::types::{NodeId, Point, Vec2};

/// Anchor of an in-progress node drag.
#[derive(Clone, Debug, PartialEq)]
pub struct DragState {
	/// Node being moved.
	node_id: NodeId,
	/// Screen-space pointer position at drag start.
	pointer_origin: Point,
	/// Canvas-space node position at drag start.
	node_origin: Point,
}

impl DragState {
	/// Captures the anchor for a drag of `node_id`.
	pub fn new(node_id: impl Into<NodeId>, pointer_origin: Point, node_origin: Point) -> Self {
		Self {
			node_id: node_id.into(),
			pointer_origin,
			node_origin,
		}
	}

	/// Id of the dragged node.
	pub fn node_id(&self) -> &str {
		&self.node_id
	}

	/// Screen position where the drag began.
	pub fn pointer_origin(&self) -> Point {
		self.pointer_origin
	}

	/// Canvas position of the node when the drag began.
	pub fn node_origin(&self) -> Point {
		self.node_origin
	}

	/// Canvas position of the dragged node for the current pointer position.
	///
	/// The screen displacement is divided by `scale` so the node follows the
	/// pointer at any zoom level. Returns `None` for non-finite input or a
	/// non-positive scale.
	pub fn live_position(&self, pointer: Point, scale: f64) -> Option<Point> {
		if !pointer.is_finite() || !scale.is_finite() || scale <= 0.0 {
			return None;
		}
		Some(self.node_origin + self.displacement(pointer) / scale)
	}

	/// Screen-space displacement of `pointer` from the drag origin.
	pub fn displacement(&self, pointer: Point) -> Vec2 {
		pointer - self.pointer_origin
	}

	/// Screen distance between the drag origin and `pointer`.
	pub fn travel(&self, pointer: Point) -> f64 {
		self.displacement(pointer).hypot()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn drag() -> DragState {
		DragState::new("1", Point::new(100.0, 100.0), Point::new(400.0, 300.0))
	}

	#[test]
	fn live_position_at_unit_scale() {
		assert_eq!(
			drag().live_position(Point::new(120.0, 110.0), 1.0),
			Some(Point::new(420.0, 310.0))
		);
	}

	#[test]
	fn live_position_divides_by_scale() {
		assert_eq!(
			drag().live_position(Point::new(120.0, 110.0), 2.0),
			Some(Point::new(410.0, 305.0))
		);
		assert_eq!(
			drag().live_position(Point::new(120.0, 110.0), 0.5),
			Some(Point::new(440.0, 320.0))
		);
	}

	#[test]
	fn live_position_is_relative_to_origin_not_last_move() {
		let d = drag();
		d.live_position(Point::new(500.0, 500.0), 1.0);
		assert_eq!(
			d.live_position(Point::new(100.0, 100.0), 1.0),
			Some(Point::new(400.0, 300.0))
		);
	}

	#[test]
	fn rejects_degenerate_input() {
		let d = drag();
		assert_eq!(d.live_position(Point::new(f64::NAN, 0.0), 1.0), None);
		assert_eq!(d.live_position(Point::new(0.0, 0.0), 0.0), None);
		assert_eq!(d.live_position(Point::new(0.0, 0.0), f64::INFINITY), None);
	}

	#[test]
	fn travel_measures_screen_distance() {
		assert_eq!(drag().travel(Point::new(103.0, 104.0)), 5.0);
		assert_eq!(
			drag().displacement(Point::new(120.0, 90.0)),
			Vec2::new(20.0, -10.0)
		);
	}
}
