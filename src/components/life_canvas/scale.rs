//! Zoom-dependent sizing for canvas visuals.
//!
//! # Coordinate Spaces
//!
//! - **Canvas-space**: where node positions live. Drawing happens after the
//!   viewport transform is applied, so canvas-space sizes grow when zooming in.
//! - **Screen-space**: pixels. Node cards and connector strokes keep a constant
//!   on-screen size, which in canvas units means dividing by the scale `k`.

use super::selection::Emphasis;

/// Defines how a visual size reacts to the zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant canvas-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size. Divides by `k` to counteract the transform.
	Screen,
	/// Canvas-space size, clamped to min/max screen-space bounds.
	Clamped {
		/// Smallest on-screen size.
		min_screen: f64,
		/// Largest on-screen size.
		max_screen: f64,
	},
}

impl ScaleBehavior {
	/// Canvas-space value for a base size at zoom level `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Node card geometry, in screen pixels at emphasis multiplier 1.
#[derive(Clone, Debug)]
pub struct CardScaleConfig {
	/// Card width; also the hit-test footprint.
	pub width: f64,
	/// Card height; also the hit-test footprint.
	pub height: f64,
	/// Outline corner radius.
	pub corner_radius: f64,
	/// Inner margin around text.
	pub padding: f64,
	/// Title font size.
	pub title_size: f64,
	/// Content excerpt font size.
	pub body_size: f64,
	/// Date and badge font size.
	pub meta_size: f64,
	/// How the card reacts to zoom.
	pub behavior: ScaleBehavior,
}

/// Connector line geometry.
#[derive(Clone, Debug)]
pub struct ConnectorScaleConfig {
	/// Line width in screen pixels.
	pub line_width: f64,
	/// How the stroke reacts to zoom.
	pub behavior: ScaleBehavior,
}

/// Size multipliers and opacity for emphasized and dimmed cards.
#[derive(Clone, Debug)]
pub struct EmphasisConfig {
	/// Size multiplier of the focused card.
	pub focused: f64,
	/// Size multiplier of the selected card.
	pub selected: f64,
	/// Opacity of cards dimmed by another selection.
	pub dimmed_alpha: f64,
	/// Selection ring width in screen pixels.
	pub ring_width: f64,
}

impl EmphasisConfig {
	/// Size multiplier for an emphasis level.
	pub fn multiplier(&self, emphasis: Emphasis) -> f64 {
		match emphasis {
			Emphasis::Focused => self.focused,
			Emphasis::Selected => self.selected,
			Emphasis::None => 1.0,
		}
	}
}

/// Complete visual scale configuration.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Card geometry.
	pub card: CardScaleConfig,
	/// Connector stroke.
	pub connector: ConnectorScaleConfig,
	/// Emphasis sizes and dimming.
	pub emphasis: EmphasisConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			card: CardScaleConfig {
				width: 256.0,
				height: 124.0,
				corner_radius: 12.0,
				padding: 16.0,
				title_size: 16.0,
				body_size: 14.0,
				meta_size: 12.0,
				behavior: ScaleBehavior::Screen,
			},
			connector: ConnectorScaleConfig {
				line_width: 2.0,
				behavior: ScaleBehavior::Screen,
			},
			emphasis: EmphasisConfig {
				focused: 2.0,
				selected: 1.05,
				dimmed_alpha: 0.6,
				ring_width: 2.0,
			},
		}
	}
}

/// Card display factor relative to the canvas transform: the emphasis
/// multiplier divided by `k`, so the on-screen size ignores zoom.
pub fn card_display_scale(config: &ScaleConfig, emphasis: Emphasis, k: f64) -> f64 {
	config
		.card
		.behavior
		.apply(config.emphasis.multiplier(emphasis), k)
}

/// Pre-computed canvas-space sizes for one zoom level.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Zoom level these values were computed for.
	pub k: f64,
	/// Connector stroke width in canvas units.
	pub connector_width: f64,
	/// Selection ring width in canvas units.
	pub ring_width: f64,
}

impl ScaledValues {
	/// Computes the sizes for zoom level `k`.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		Self {
			k,
			connector_width: config
				.connector
				.behavior
				.apply(config.connector.line_width, k),
			ring_width: config.emphasis.ring_width / k,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn behaviors() {
		assert_eq!(ScaleBehavior::World.apply(4.0, 2.0), 4.0);
		assert_eq!(ScaleBehavior::Screen.apply(4.0, 2.0), 2.0);
		let clamped = ScaleBehavior::Clamped {
			min_screen: 2.0,
			max_screen: 10.0,
		};
		assert_eq!(clamped.apply(4.0, 0.25), 8.0);
		assert_eq!(clamped.apply(4.0, 1.0), 4.0);
		assert_eq!(clamped.apply(40.0, 1.0), 10.0);
	}

	#[test]
	fn display_scale_follows_emphasis_and_zoom() {
		let config = ScaleConfig::default();
		assert_eq!(card_display_scale(&config, Emphasis::Focused, 1.0), 2.0);
		assert_eq!(card_display_scale(&config, Emphasis::Selected, 1.0), 1.05);
		assert_eq!(card_display_scale(&config, Emphasis::None, 2.0), 0.5);
		assert_eq!(card_display_scale(&config, Emphasis::Focused, 0.5), 4.0);
	}

	#[test]
	fn connector_width_stays_two_screen_pixels() {
		let scaled = ScaledValues::new(&ScaleConfig::default(), 0.25);
		assert_eq!(scaled.connector_width, 8.0);
		assert_eq!(scaled.connector_width * scaled.k, 2.0);
	}
}
