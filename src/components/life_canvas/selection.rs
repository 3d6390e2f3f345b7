//! Selection and focus bookkeeping.
//!
//! At most one node is selected and at most one is focused; the two are
//! independent. This is view state owned by the canvas controller: nodes never
//! carry their own selection flags.

use log::debug;

use super::types::NodeId;

/// How a node should be emphasized when drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Emphasis {
	/// Drawn plainly.
	#[default]
	None,
	/// The selected node.
	Selected,
	/// The focused node; wins over selection.
	Focused,
}

/// Exclusive selection plus exclusive focus.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
	selected: Option<NodeId>,
	focused: Option<NodeId>,
}

impl SelectionState {
	/// Id of the selected node.
	pub fn selected(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	/// Id of the focused node.
	pub fn focused(&self) -> Option<&str> {
		self.focused.as_deref()
	}

	/// Whether `id` is the selected node.
	pub fn is_selected(&self, id: &str) -> bool {
		self.selected() == Some(id)
	}

	/// Whether `id` is the focused node.
	pub fn is_focused(&self, id: &str) -> bool {
		self.focused() == Some(id)
	}

	/// Another node is selected, so this one is drawn de-emphasized.
	pub fn is_dimmed(&self, id: &str) -> bool {
		self.selected().is_some_and(|selected| selected != id)
	}

	/// Focus wins over selection.
	pub fn emphasis(&self, id: &str) -> Emphasis {
		if self.is_focused(id) {
			Emphasis::Focused
		} else if self.is_selected(id) {
			Emphasis::Selected
		} else {
			Emphasis::None
		}
	}

	/// Selects `id`, or clears the selection if `id` was already selected.
	pub fn toggle_select(&mut self, id: &str) {
		if self.is_selected(id) {
			self.selected = None;
			debug!("life-canvas: deselected node {id}");
		} else {
			self.selected = Some(id.to_owned());
			debug!("life-canvas: selected node {id}");
		}
	}

	/// Focuses `id`, replacing any previous focus. Selection is untouched.
	pub fn focus(&mut self, id: &str) -> bool {
		if self.is_focused(id) {
			return false;
		}
		self.focused = Some(id.to_owned());
		debug!("life-canvas: focused node {id}");
		true
	}

	/// Clears both selection and focus.
	pub fn clear(&mut self) -> bool {
		if self.selected.is_none() && self.focused.is_none() {
			return false;
		}
		self.selected = None;
		self.focused = None;
		debug!("life-canvas: selection and focus cleared");
		true
	}

	/// Drops any reference to a node that no longer exists.
	pub fn forget(&mut self, id: &str) -> bool {
		let mut changed = false;
		if self.is_selected(id) {
			self.selected = None;
			changed = true;
		}
		if self.is_focused(id) {
			self.focused = None;
			changed = true;
		}
		changed
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn toggle_selects_then_deselects() {
		let mut sel = SelectionState::default();
		sel.toggle_select("a");
		assert_eq!(sel.selected(), Some("a"));
		sel.toggle_select("a");
		assert_eq!(sel.selected(), None);
	}

	#[test]
	fn selection_is_exclusive() {
		let mut sel = SelectionState::default();
		sel.toggle_select("a");
		sel.toggle_select("b");
		assert!(!sel.is_selected("a"));
		assert!(sel.is_selected("b"));
		assert!(sel.is_dimmed("a"));
		assert!(!sel.is_dimmed("b"));
	}

	#[test]
	fn nothing_dimmed_without_selection() {
		let mut sel = SelectionState::default();
		sel.focus("a");
		assert!(!sel.is_dimmed("a"));
		assert!(!sel.is_dimmed("b"));
	}

	#[test]
	fn focus_leaves_selection_alone() {
		let mut sel = SelectionState::default();
		sel.toggle_select("a");
		assert!(sel.focus("b"));
		assert!(!sel.focus("b"));
		assert_eq!(sel.selected(), Some("a"));
		assert_eq!(sel.focused(), Some("b"));
		assert_eq!(sel.emphasis("a"), Emphasis::Selected);
		assert_eq!(sel.emphasis("b"), Emphasis::Focused);
		assert_eq!(sel.emphasis("c"), Emphasis::None);
	}

	#[test]
	fn focus_outranks_selection() {
		let mut sel = SelectionState::default();
		sel.toggle_select("a");
		sel.focus("a");
		assert_eq!(sel.emphasis("a"), Emphasis::Focused);
	}

	#[test]
	fn clear_reports_change_once() {
		let mut sel = SelectionState::default();
		assert!(!sel.clear());
		sel.toggle_select("a");
		sel.focus("b");
		assert!(sel.clear());
		assert_eq!(sel, SelectionState::default());
		assert!(!sel.clear());
	}

	#[test]
	fn forget_drops_stale_references() {
		let mut sel = SelectionState::default();
		sel.toggle_select("a");
		sel.focus("a");
		assert!(sel.forget("a"));
		assert_eq!(sel, SelectionState::default());
		assert!(!sel.forget("a"));
	}
}
