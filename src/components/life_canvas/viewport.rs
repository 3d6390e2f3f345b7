//! Pan/zoom transform of the canvas.
//!
//! The render transform is `screen = canvas * scale + offset`, applied as a
//! translate by `(x, y)` followed by a uniform scale. Scale is kept inside the
//! configured limits after every operation, and calls carrying non-finite
//! input are ignored so the transform never becomes NaN.

use kurbo::Affine;
use log::warn;

use super::config::{ViewportConfig, ZoomAnchor};
use super::types::{Point, Vec2};

/// Scale and screen-space offset mapping canvas space to screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
	/// Uniform zoom factor.
	pub scale: f64,
	/// Horizontal screen offset of the canvas origin.
	pub x: f64,
	/// Vertical screen offset of the canvas origin.
	pub y: f64,
}

impl ViewportState {
	/// Scale 1, no offset.
	pub const INITIAL: ViewportState = ViewportState {
		scale: 1.0,
		x: 0.0,
		y: 0.0,
	};

	/// Screen-space translation of the canvas origin.
	pub fn offset(&self) -> Vec2 {
		Vec2::new(self.x, self.y)
	}

	/// The canvas-to-screen mapping as an affine transform.
	pub fn affine(&self) -> Affine {
		Affine::translate(self.offset()) * Affine::scale(self.scale)
	}
}

impl Default for ViewportState {
	fn default() -> Self {
		Self::INITIAL
	}
}

/// The viewport model: current transform, scale limits and the size of the
/// view it is displayed in.
#[derive(Clone, Debug)]
pub struct Viewport {
	state: ViewportState,
	min_scale: f64,
	max_scale: f64,
	anchor: ZoomAnchor,
	width: f64,
	height: f64,
}

impl Viewport {
	/// Creates a viewport at scale 1 with zero offset.
	///
	/// Limits are normalized so that `min_scale <= max_scale`; invalid limits
	/// fall back to the defaults.
	pub fn new(config: &ViewportConfig) -> Self {
		let (mut min_scale, mut max_scale) = if config.min_scale <= config.max_scale {
			(config.min_scale, config.max_scale)
		} else {
			(config.max_scale, config.min_scale)
		};
		if !(min_scale.is_finite() && max_scale.is_finite() && min_scale > 0.0) {
			warn!(
				"life-canvas: invalid scale limits [{}, {}], using defaults",
				config.min_scale, config.max_scale
			);
			let defaults = ViewportConfig::default();
			min_scale = defaults.min_scale;
			max_scale = defaults.max_scale;
		}

		let mut vp = Self {
			state: ViewportState::INITIAL,
			min_scale,
			max_scale,
			anchor: config.zoom_anchor,
			width: 0.0,
			height: 0.0,
		};
		vp.reset();
		vp
	}

	/// Current transform.
	pub fn state(&self) -> ViewportState {
		self.state
	}

	/// Current zoom factor.
	pub fn scale(&self) -> f64 {
		self.state.scale
	}

	/// Lower zoom limit.
	pub fn min_scale(&self) -> f64 {
		self.min_scale
	}

	/// Upper zoom limit.
	pub fn max_scale(&self) -> f64 {
		self.max_scale
	}

	/// Scale as a rounded percentage, for the zoom readout.
	pub fn zoom_percent(&self) -> u32 {
		(self.state.scale * 100.0).round() as u32
	}

	/// Whether the scale is below the upper limit.
	pub fn can_zoom_in(&self) -> bool {
		self.state.scale < self.max_scale
	}

	/// Whether the scale is above the lower limit.
	pub fn can_zoom_out(&self) -> bool {
		self.state.scale > self.min_scale
	}

	/// Updates the view size used to locate the view center.
	pub fn resize(&mut self, width: f64, height: f64) -> bool {
		if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
			warn!("life-canvas: ignoring view size {}x{}", width, height);
			return false;
		}
		if self.width == width && self.height == height {
			return false;
		}
		self.width = width;
		self.height = height;
		true
	}

	/// Center of the view in screen space.
	pub fn view_center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}

	/// Adjusts scale by `delta`, clamped to the limits.
	///
	/// With an `anchor` (screen space), the offset is shifted according to the
	/// configured [`ZoomAnchor`]. Without one only the scale changes. Returns
	/// whether the transform changed.
	pub fn zoom(&mut self, delta: f64, anchor: Option<Point>) -> bool {
		if !delta.is_finite() || anchor.is_some_and(|a| !a.is_finite()) {
			warn!("life-canvas: ignoring non-finite zoom ({delta}, {anchor:?})");
			return false;
		}

		let old_scale = self.state.scale;
		let new_scale = (old_scale + delta).clamp(self.min_scale, self.max_scale);
		let mut next = ViewportState {
			scale: new_scale,
			..self.state
		};

		if let Some(anchor) = anchor {
			match self.anchor {
				ZoomAnchor::ViewCenter => {
					let from_center = anchor - self.view_center();
					let shift = from_center * ((new_scale - old_scale) / old_scale);
					next.x -= shift.x;
					next.y -= shift.y;
				}
				ZoomAnchor::Cursor => {
					let ratio = new_scale / old_scale;
					next.x = anchor.x - (anchor.x - self.state.x) * ratio;
					next.y = anchor.y - (anchor.y - self.state.y) * ratio;
				}
			}
		}

		if next == self.state {
			return false;
		}
		self.state = next;
		true
	}

	/// Translates the view by a screen-space delta.
	pub fn pan_by(&mut self, delta: Vec2) -> bool {
		if !delta.is_finite() || delta == Vec2::ZERO {
			return false;
		}
		self.state.x += delta.x;
		self.state.y += delta.y;
		true
	}

	/// Returns to scale 1 with zero offset.
	pub fn reset(&mut self) {
		self.state = ViewportState {
			scale: ViewportState::INITIAL.scale.clamp(self.min_scale, self.max_scale),
			..ViewportState::INITIAL
		};
	}

	/// Maps a screen point (relative to the canvas element) into canvas space.
	pub fn screen_to_canvas(&self, screen: Point) -> Point {
		((screen.to_vec2() - self.state.offset()) / self.state.scale).to_point()
	}

	/// Maps a canvas point to screen space.
	pub fn canvas_to_screen(&self, canvas: Point) -> Point {
		self.state.affine() * canvas
	}

	/// Converts a screen-space displacement into canvas units.
	pub fn screen_delta_to_canvas(&self, delta: Vec2) -> Vec2 {
		delta / self.state.scale
	}
}

impl Default for Viewport {
	fn default() -> Self {
		Self::new(&ViewportConfig::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const EPS: f64 = 1e-9;

	fn sized() -> Viewport {
		let mut vp = Viewport::default();
		vp.resize(800.0, 600.0);
		vp
	}

	#[test]
	fn starts_at_identity() {
		assert_eq!(Viewport::default().state(), ViewportState::INITIAL);
	}

	#[test]
	fn zoom_clamps_to_limits() {
		let mut vp = sized();
		for _ in 0..10 {
			vp.zoom(0.25, None);
		}
		assert_eq!(vp.scale(), 2.0);
		assert!(!vp.can_zoom_in());
		assert!(!vp.zoom(0.25, None));

		for _ in 0..20 {
			vp.zoom(-0.25, Some(Point::new(10.0, 590.0)));
		}
		assert_eq!(vp.scale(), 0.25);
		assert!(!vp.can_zoom_out());
	}

	#[test]
	fn zoom_at_view_center_keeps_offset() {
		let mut vp = sized();
		assert!(vp.zoom(0.25, Some(Point::new(400.0, 300.0))));
		assert_eq!(
			vp.state(),
			ViewportState {
				scale: 1.25,
				x: 0.0,
				y: 0.0
			}
		);
	}

	#[test]
	fn zoom_off_center_shifts_by_center_distance() {
		let mut vp = sized();
		vp.zoom(0.5, Some(Point::new(500.0, 200.0)));
		// from center (100, -100), relative change 0.5
		assert!((vp.state().x - -50.0).abs() < EPS);
		assert!((vp.state().y - 50.0).abs() < EPS);
	}

	#[test]
	fn zoom_without_anchor_only_scales() {
		let mut vp = sized();
		vp.pan_by(Vec2::new(30.0, -12.0));
		vp.zoom(-0.5, None);
		assert_eq!(vp.state().offset(), Vec2::new(30.0, -12.0));
		assert_eq!(vp.scale(), 0.5);
	}

	#[test]
	fn cursor_anchor_keeps_canvas_point_fixed() {
		let mut vp = Viewport::new(&ViewportConfig {
			zoom_anchor: ZoomAnchor::Cursor,
			..ViewportConfig::default()
		});
		vp.resize(800.0, 600.0);
		vp.pan_by(Vec2::new(40.0, 25.0));
		let anchor = Point::new(620.0, 130.0);
		let before = vp.screen_to_canvas(anchor);

		vp.zoom(0.75, Some(anchor));

		let after = vp.canvas_to_screen(before);
		assert!((after.x - anchor.x).abs() < EPS);
		assert!((after.y - anchor.y).abs() < EPS);
	}

	#[test]
	fn non_finite_input_is_ignored() {
		let mut vp = sized();
		assert!(!vp.zoom(f64::NAN, None));
		assert!(!vp.zoom(f64::INFINITY, Some(Point::new(1.0, 1.0))));
		assert!(!vp.zoom(0.25, Some(Point::new(f64::NAN, 1.0))));
		assert!(!vp.pan_by(Vec2::new(f64::NEG_INFINITY, 0.0)));
		assert_eq!(vp.state(), ViewportState::INITIAL);
	}

	#[test]
	fn reset_restores_identity() {
		let mut vp = sized();
		vp.zoom(0.7, Some(Point::new(3.0, 9.0)));
		vp.pan_by(Vec2::new(-100.0, 42.0));
		vp.reset();
		assert_eq!(vp.state(), ViewportState::INITIAL);
	}

	#[test]
	fn coordinate_conversions_invert() {
		let mut vp = sized();
		vp.zoom(0.5, Some(Point::new(123.0, 456.0)));
		vp.pan_by(Vec2::new(17.0, -3.0));
		let screen = Point::new(250.0, 75.0);
		let back = vp.canvas_to_screen(vp.screen_to_canvas(screen));
		assert!((back - screen).hypot() < EPS);
		assert_eq!(
			vp.screen_delta_to_canvas(Vec2::new(30.0, 15.0)),
			Vec2::new(20.0, 10.0)
		);
	}

	#[test]
	fn swapped_limits_are_normalized() {
		let vp = Viewport::new(&ViewportConfig {
			min_scale: 3.0,
			max_scale: 0.5,
			..ViewportConfig::default()
		});
		assert_eq!(vp.min_scale(), 0.5);
		assert_eq!(vp.max_scale(), 3.0);
	}

	#[test]
	fn zoom_percent_rounds() {
		let mut vp = sized();
		vp.zoom(-0.254, None);
		assert_eq!(vp.zoom_percent(), 75);
	}
}
