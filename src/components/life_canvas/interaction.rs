//! Interaction mode state machine.
//!
//! Panning and node dragging are mutually exclusive gestures, so they are
//! variants of one [`InteractionMode`] rather than independent flags:
//!
//! ```text
//! Idle -> Panning    (primary button down on background, pan tool active)
//! Idle -> Dragging   (button down on a node, pan tool inactive)
//! Any  -> Idle       (pointer up or pointer leave)
//! ```
//!
//! A gesture can only begin from `Idle`. The pan tool itself is a sticky
//! toggle independent of any gesture; its pointer cursor is exposed as a
//! [`CursorHint`] for the host to apply.

use log::debug;

use super::drag::DragState;
use super::types::{Point, Vec2};
use super::viewport::Viewport;

/// Mouse button that started a gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
	/// Usually the left button.
	Primary,
	/// Usually the wheel button.
	Auxiliary,
	/// Usually the right button.
	Secondary,
	/// Any other DOM button code.
	Other(i16),
}

impl PointerButton {
	/// Maps the DOM `MouseEvent.button` code.
	pub fn from_dom(button: i16) -> Self {
		match button {
			0 => PointerButton::Primary,
			1 => PointerButton::Auxiliary,
			2 => PointerButton::Secondary,
			other => PointerButton::Other(other),
		}
	}
}

/// Pointer cursor the host should display over the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorHint {
	/// Plain arrow.
	#[default]
	Default,
	/// Pan tool armed.
	Grab,
	/// Pan in progress.
	Grabbing,
}

impl CursorHint {
	/// CSS `cursor` value.
	pub fn as_css(self) -> &'static str {
		match self {
			CursorHint::Default => "default",
			CursorHint::Grab => "grab",
			CursorHint::Grabbing => "grabbing",
		}
	}
}

/// The single active gesture, if any.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum InteractionMode {
	/// No gesture.
	#[default]
	Idle,
	/// Panning the view.
	Panning {
		/// Most recently sampled screen point.
		last: Point,
	},
	/// Repositioning a node.
	Dragging(DragState),
}

/// Tracks the pan tool toggle and the active gesture.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
	pan_tool_active: bool,
	mode: InteractionMode,
}

impl InteractionController {
	/// Whether the pan tool is armed.
	pub fn pan_tool_active(&self) -> bool {
		self.pan_tool_active
	}

	/// The active gesture.
	pub fn mode(&self) -> &InteractionMode {
		&self.mode
	}

	/// No gesture is running.
	pub fn is_idle(&self) -> bool {
		matches!(self.mode, InteractionMode::Idle)
	}

	/// A pan is running.
	pub fn is_panning(&self) -> bool {
		matches!(self.mode, InteractionMode::Panning { .. })
	}

	/// The running drag, if any.
	pub fn drag(&self) -> Option<&DragState> {
		match &self.mode {
			InteractionMode::Dragging(drag) => Some(drag),
			_ => None,
		}
	}

	/// Cursor for the current tool and gesture.
	pub fn cursor_hint(&self) -> CursorHint {
		match (self.pan_tool_active, self.is_panning()) {
			(_, true) => CursorHint::Grabbing,
			(true, false) => CursorHint::Grab,
			(false, false) => CursorHint::Default,
		}
	}

	/// Flips the pan tool and returns the resulting cursor hint.
	///
	/// An in-flight gesture is left alone; the toggle only affects which
	/// gestures may begin next.
	pub fn toggle_pan_tool(&mut self) -> CursorHint {
		self.pan_tool_active = !self.pan_tool_active;
		debug!("life-canvas: pan tool {}", if self.pan_tool_active { "on" } else { "off" });
		self.cursor_hint()
	}

	/// Starts a pan anchored at `point`.
	///
	/// Requires the pan tool, the primary button and no active gesture.
	pub fn begin_pan(&mut self, point: Point, button: PointerButton) -> bool {
		if !self.pan_tool_active || button != PointerButton::Primary || !self.is_idle() {
			return false;
		}
		if !point.is_finite() {
			return false;
		}
		self.transition_to(InteractionMode::Panning { last: point });
		true
	}

	/// Applies the movement since the last sample to the viewport, then
	/// re-anchors at `point` so successive deltas are incremental.
	pub fn continue_pan(&mut self, point: Point, viewport: &mut Viewport) -> bool {
		let InteractionMode::Panning { last } = &mut self.mode else {
			return false;
		};
		if !point.is_finite() {
			return false;
		}
		let delta: Vec2 = point - *last;
		*last = point;
		viewport.pan_by(delta)
	}

	/// Starts a node drag. Rejected while the pan tool is active or another
	/// gesture is running.
	pub fn begin_drag(&mut self, drag: DragState) -> bool {
		if self.pan_tool_active || !self.is_idle() {
			return false;
		}
		self.transition_to(InteractionMode::Dragging(drag));
		true
	}

	/// Ends whatever gesture is active and returns to `Idle`.
	///
	/// Returns the finished drag so the caller can inspect it.
	pub fn end_gesture(&mut self) -> Option<DragState> {
		match std::mem::take(&mut self.mode) {
			InteractionMode::Idle => None,
			InteractionMode::Panning { .. } => {
				debug!("life-canvas: pan ended");
				None
			}
			InteractionMode::Dragging(drag) => {
				debug!("life-canvas: drag of node {} ended", drag.node_id());
				Some(drag)
			}
		}
	}

	fn transition_to(&mut self, mode: InteractionMode) {
		debug!("life-canvas: interaction {:?} -> {:?}", self.mode, mode);
		self.mode = mode;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn drag() -> DragState {
		DragState::new("1", Point::new(0.0, 0.0), Point::new(400.0, 300.0))
	}

	#[test]
	fn default_is_idle_without_pan_tool() {
		let ic = InteractionController::default();
		assert!(ic.is_idle());
		assert!(!ic.pan_tool_active());
		assert_eq!(ic.cursor_hint(), CursorHint::Default);
	}

	#[test]
	fn toggle_reports_cursor_hint() {
		let mut ic = InteractionController::default();
		assert_eq!(ic.toggle_pan_tool(), CursorHint::Grab);
		assert_eq!(ic.toggle_pan_tool(), CursorHint::Default);
	}

	#[test]
	fn pan_requires_tool_and_primary_button() {
		let mut ic = InteractionController::default();
		assert!(!ic.begin_pan(Point::new(5.0, 5.0), PointerButton::Primary));

		ic.toggle_pan_tool();
		assert!(!ic.begin_pan(Point::new(5.0, 5.0), PointerButton::Secondary));
		assert!(!ic.begin_pan(Point::new(5.0, 5.0), PointerButton::Auxiliary));
		assert!(ic.begin_pan(Point::new(5.0, 5.0), PointerButton::Primary));
		assert!(ic.is_panning());
		assert_eq!(ic.cursor_hint(), CursorHint::Grabbing);
	}

	#[test]
	fn pan_deltas_are_incremental() {
		let mut ic = InteractionController::default();
		let mut vp = Viewport::default();
		ic.toggle_pan_tool();
		ic.begin_pan(Point::new(10.0, 10.0), PointerButton::Primary);

		assert!(ic.continue_pan(Point::new(15.0, 20.0), &mut vp));
		assert!(ic.continue_pan(Point::new(18.0, 20.0), &mut vp));
		assert_eq!(vp.state().offset(), Vec2::new(8.0, 10.0));
		assert_eq!(
			ic.mode(),
			&InteractionMode::Panning {
				last: Point::new(18.0, 20.0)
			}
		);
	}

	#[test]
	fn continue_without_pan_is_noop() {
		let mut ic = InteractionController::default();
		let mut vp = Viewport::default();
		assert!(!ic.continue_pan(Point::new(50.0, 50.0), &mut vp));
		assert_eq!(vp.state().offset(), Vec2::ZERO);
	}

	#[test]
	fn drag_rejected_with_pan_tool() {
		let mut ic = InteractionController::default();
		ic.toggle_pan_tool();
		assert!(!ic.begin_drag(drag()));
		assert!(ic.is_idle());
	}

	#[test]
	fn gestures_are_exclusive() {
		let mut ic = InteractionController::default();
		assert!(ic.begin_drag(drag()));
		// Turning the pan tool on mid-drag does not let a pan start.
		ic.toggle_pan_tool();
		assert!(!ic.begin_pan(Point::new(1.0, 1.0), PointerButton::Primary));
		assert!(ic.drag().is_some());

		let ended = ic.end_gesture();
		assert_eq!(ended.as_ref().map(DragState::node_id), Some("1"));
		assert!(ic.is_idle());
		assert!(ic.begin_pan(Point::new(1.0, 1.0), PointerButton::Primary));
		assert!(!ic.begin_drag(drag()));
	}

	#[test]
	fn end_gesture_when_idle_is_noop() {
		let mut ic = InteractionController::default();
		assert_eq!(ic.end_gesture(), None);
		assert!(ic.is_idle());
	}

	#[test]
	fn maps_dom_buttons() {
		assert_eq!(PointerButton::from_dom(0), PointerButton::Primary);
		assert_eq!(PointerButton::from_dom(2), PointerButton::Secondary);
		assert_eq!(PointerButton::from_dom(4), PointerButton::Other(4));
	}
}
