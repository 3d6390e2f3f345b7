//! Behavioral configuration for the canvas controller.
//!
//! Every field has a default, so a page may supply partial JSON such as
//! `{ "viewport": { "max_scale": 4.0 } }` and keep the rest.

use serde::Deserialize;

/// Where a zoom that carries a pointer position is anchored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomAnchor {
	/// Offset shifts by the pointer's distance from the view center, scaled by
	/// the relative scale change. Kept as the default for compatibility with
	/// existing boards. Zooming in and back out at the same off-center pointer
	/// restores the scale but leaves the offset shifted.
	#[default]
	ViewCenter,
	/// The canvas point under the pointer stays under the pointer.
	Cursor,
}

/// Scale limits and zoom anchoring.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
	/// Smallest allowed scale.
	pub min_scale: f64,
	/// Largest allowed scale.
	pub max_scale: f64,
	/// Anchoring used by wheel zoom.
	pub zoom_anchor: ZoomAnchor,
}

impl Default for ViewportConfig {
	fn default() -> Self {
		Self {
			min_scale: 0.25,
			max_scale: 2.0,
			zoom_anchor: ZoomAnchor::ViewCenter,
		}
	}
}

/// Input mapping constants.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
	/// Scale delta applied by the zoom-in and zoom-out controls.
	pub zoom_step: f64,
	/// Scale delta per unit of wheel `deltaY` (sign inverted: scrolling up zooms in).
	pub wheel_sensitivity: f64,
	/// Screen pixels a node drag may travel and still count as a click.
	pub click_slop: f64,
}

impl Default for InteractionConfig {
	fn default() -> Self {
		Self {
			zoom_step: 0.25,
			wheel_sensitivity: 0.001,
			click_slop: 3.0,
		}
	}
}

/// Complete controller configuration.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
	/// Scale limits and anchoring.
	pub viewport: ViewportConfig,
	/// Input mapping.
	pub interaction: InteractionConfig,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_json_yields_defaults() {
		let config: CanvasConfig = serde_json::from_str("{}").unwrap();
		assert_eq!(config, CanvasConfig::default());
	}

	#[test]
	fn partial_json_overrides_only_named_fields() {
		let config: CanvasConfig = serde_json::from_str(
			r#"{ "viewport": { "max_scale": 4.0, "zoom_anchor": "cursor" }, "interaction": { "click_slop": 0 } }"#,
		)
		.unwrap();

		assert_eq!(config.viewport.min_scale, 0.25);
		assert_eq!(config.viewport.max_scale, 4.0);
		assert_eq!(config.viewport.zoom_anchor, ZoomAnchor::Cursor);
		assert_eq!(config.interaction.zoom_step, 0.25);
		assert_eq!(config.interaction.click_slop, 0.0);
	}
}
