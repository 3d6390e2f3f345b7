//! Visual theming for the canvas.
//!
//! Provides colors for the background, connectors, node cards and the
//! per-kind accents.

use super::types::NodeKind;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity from 0.0 to 1.0.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color at a different opacity.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// CSS color string: hex when opaque, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Accent color per node kind, used for the badge and the card's top stripe.
#[derive(Clone, Debug)]
pub struct KindPalette {
	/// Accent for moments.
	pub moment: Color,
	/// Accent for ideas.
	pub idea: Color,
	/// Accent for projects.
	pub project: Color,
	/// Accent for experiences.
	pub experience: Color,
}

impl KindPalette {
	/// Accent color for `kind`.
	pub fn accent(&self, kind: NodeKind) -> Color {
		match kind {
			NodeKind::Moment => self.moment,
			NodeKind::Idea => self.idea,
			NodeKind::Project => self.project,
			NodeKind::Experience => self.experience,
		}
	}
}

/// Background fill and dot grid.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Fill behind everything.
	pub color: Color,
	/// Grid dot color.
	pub dot_color: Color,
	/// Grid spacing in canvas units (0 disables the grid).
	pub dot_spacing: f64,
}

/// Connector line colors.
#[derive(Clone, Debug)]
pub struct ConnectorStyle {
	/// Default line color.
	pub color: Color,
	/// Color when the source node is selected.
	pub selected_color: Color,
}

/// Node card colors.
#[derive(Clone, Debug)]
pub struct CardStyle {
	/// Card body.
	pub fill: Color,
	/// Title text.
	pub title: Color,
	/// Content excerpt text.
	pub body: Color,
	/// Date, lock and badge text.
	pub meta: Color,
	/// Kind badge background.
	pub badge_fill: Color,
	/// Selection/focus ring.
	pub ring: Color,
	/// Drop shadow.
	pub shadow: Color,
	/// Dashed outline drawn around private nodes.
	pub private_outline: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Theme identifier.
	pub name: &'static str,
	/// Background and grid.
	pub background: BackgroundStyle,
	/// Connector lines.
	pub connector: ConnectorStyle,
	/// Node cards.
	pub card: CardStyle,
	/// Per-kind accents.
	pub kinds: KindPalette,
}

impl Theme {
	/// Light paper theme (default).
	pub fn paper() -> Self {
		Self {
			name: "paper",
			background: BackgroundStyle {
				color: Color::rgb(249, 250, 251),
				dot_color: Color::rgba(148, 163, 184, 0.35),
				dot_spacing: 40.0,
			},
			connector: ConnectorStyle {
				color: Color::rgb(203, 213, 225),
				selected_color: Color::rgb(96, 165, 250),
			},
			card: CardStyle {
				fill: Color::rgb(255, 255, 255),
				title: Color::rgb(31, 41, 55),
				body: Color::rgb(75, 85, 99),
				meta: Color::rgb(107, 114, 128),
				badge_fill: Color::rgb(243, 244, 246),
				ring: Color::rgb(59, 130, 246),
				shadow: Color::rgba(15, 23, 42, 0.15),
				private_outline: Color::rgb(156, 163, 175),
			},
			kinds: KindPalette {
				moment: Color::rgb(245, 158, 11),
				idea: Color::rgb(139, 92, 246),
				project: Color::rgb(16, 185, 129),
				experience: Color::rgb(59, 130, 246),
			},
		}
	}

	/// Dark theme for dimly lit rooms.
	pub fn midnight() -> Self {
		let paper = Self::paper();
		Self {
			name: "midnight",
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				dot_color: Color::rgba(140, 160, 180, 0.18),
				dot_spacing: 40.0,
			},
			connector: ConnectorStyle {
				color: Color::rgba(140, 160, 180, 0.5),
				selected_color: Color::rgb(96, 165, 250),
			},
			card: CardStyle {
				fill: Color::rgb(30, 35, 42),
				title: Color::rgb(229, 231, 235),
				body: Color::rgb(156, 163, 175),
				meta: Color::rgb(120, 130, 145),
				badge_fill: Color::rgb(45, 52, 62),
				ring: Color::rgb(96, 165, 250),
				shadow: Color::rgba(0, 0, 0, 0.45),
				private_outline: Color::rgb(100, 110, 125),
			},
			kinds: KindPalette {
				moment: paper.kinds.moment.lighten(0.1),
				idea: paper.kinds.idea.lighten(0.15),
				project: paper.kinds.project.lighten(0.1),
				experience: paper.kinds.experience.lighten(0.15),
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::paper()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(59, 130, 246).to_css(), "#3b82f6");
		assert_eq!(
			Color::rgb(0, 0, 0).with_alpha(0.5).to_css(),
			"rgba(0, 0, 0, 0.5)"
		);
	}

	#[test]
	fn lighten_moves_toward_white() {
		assert_eq!(Color::rgb(0, 100, 255).lighten(1.0), Color::rgb(255, 255, 255));
		assert_eq!(Color::rgb(0, 100, 255).lighten(0.0), Color::rgb(0, 100, 255));
	}

	#[test]
	fn every_kind_has_an_accent() {
		let theme = Theme::default();
		let kinds = [NodeKind::Moment, NodeKind::Idea, NodeKind::Project, NodeKind::Experience];
		for (i, a) in kinds.iter().enumerate() {
			for b in &kinds[i + 1..] {
				assert_ne!(theme.kinds.accent(*a), theme.kinds.accent(*b));
			}
		}
	}
}
