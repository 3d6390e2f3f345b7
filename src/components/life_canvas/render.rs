//! Canvas rendering for a [`Scene`].
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background fill (screen space) and dot grid (canvas space)
//! 2. Connectors, so cards sit on top of their own lines
//! 3. Cards in the scene's paint order (emphasized cards last)

use std::borrow::Cow;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scale::ScaleConfig;
use super::scene::{NodeView, Scene};
use super::theme::Theme;

/// Renders the complete scene to the canvas.
pub fn render(
	scene: &Scene<'_>,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
	width: f64,
	height: f64,
) {
	ctx.set_fill_style_str(&theme.background.color.to_css());
	ctx.fill_rect(0.0, 0.0, width, height);

	ctx.save();
	let _ = ctx.translate(scene.transform.x, scene.transform.y);
	let _ = ctx.scale(scene.transform.scale, scene.transform.scale);

	draw_grid(scene, ctx, theme, width, height);
	draw_connectors(scene, ctx, theme);
	for view in &scene.nodes {
		draw_card(ctx, view, config, theme);
	}

	ctx.restore();
}

fn draw_grid(scene: &Scene<'_>, ctx: &CanvasRenderingContext2d, theme: &Theme, width: f64, height: f64) {
	let spacing = theme.background.dot_spacing;
	let k = scene.transform.scale;
	if spacing <= 0.0 || spacing * k < 8.0 {
		return;
	}

	let (left, top) = (-scene.transform.x / k, -scene.transform.y / k);
	let (right, bottom) = (left + width / k, top + height / k);
	let dot = 1.5 / k;

	ctx.set_fill_style_str(&theme.background.dot_color.to_css());
	let mut x = (left / spacing).floor() * spacing;
	while x <= right {
		let mut y = (top / spacing).floor() * spacing;
		while y <= bottom {
			ctx.fill_rect(x - dot / 2.0, y - dot / 2.0, dot, dot);
			y += spacing;
		}
		x += spacing;
	}
}

fn draw_connectors(scene: &Scene<'_>, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	ctx.set_line_width(scene.scaled.connector_width);
	ctx.set_line_cap("round");
	for connector in &scene.connectors {
		let color = if connector.highlighted {
			theme.connector.selected_color
		} else {
			theme.connector.color
		};
		ctx.set_stroke_style_str(&color.to_css());
		ctx.begin_path();
		ctx.move_to(connector.source.x, connector.source.y);
		ctx.line_to(connector.target.x, connector.target.y);
		ctx.stroke();
	}
}

/// Draws one card centered on its node position. Card geometry is expressed
/// in screen pixels and mapped through `display_scale`.
fn draw_card(ctx: &CanvasRenderingContext2d, view: &NodeView<'_>, config: &ScaleConfig, theme: &Theme) {
	let card = &config.card;
	let node = view.node;
	let (w, h) = (card.width, card.height);
	let (x, y) = (-w / 2.0, -h / 2.0);
	let pad = card.padding;
	let accent = theme.kinds.accent(node.kind);

	ctx.save();
	let _ = ctx.translate(node.position.x, node.position.y);
	let _ = ctx.scale(view.display_scale, view.display_scale);
	if view.dimmed {
		ctx.set_global_alpha(config.emphasis.dimmed_alpha);
	}

	// Body with drop shadow.
	ctx.set_shadow_color(&theme.card.shadow.to_css());
	ctx.set_shadow_blur(if view.emphasized() { 24.0 } else { 12.0 });
	ctx.set_shadow_offset_y(4.0);
	rounded_rect(ctx, x, y, w, h, card.corner_radius);
	ctx.set_fill_style_str(&theme.card.fill.to_css());
	ctx.fill();
	ctx.set_shadow_color("transparent");
	ctx.set_shadow_blur(0.0);
	ctx.set_shadow_offset_y(0.0);

	// Kind stripe along the top edge.
	ctx.save();
	rounded_rect(ctx, x, y, w, h, card.corner_radius);
	ctx.clip();
	ctx.set_fill_style_str(&accent.to_css());
	ctx.fill_rect(x, y, w, 4.0);
	ctx.restore();

	if view.emphasized() {
		rounded_rect(ctx, x, y, w, h, card.corner_radius);
		ctx.set_stroke_style_str(&theme.card.ring.to_css());
		ctx.set_line_width(config.emphasis.ring_width);
		ctx.stroke();
	} else if node.is_private {
		let dash = js_sys::Array::of2(&JsValue::from_f64(6.0), &JsValue::from_f64(4.0));
		let _ = ctx.set_line_dash(&dash);
		rounded_rect(ctx, x, y, w, h, card.corner_radius);
		ctx.set_stroke_style_str(&theme.card.private_outline.to_css());
		ctx.set_line_width(1.0);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	}

	// Title row with privacy marker.
	let mut line_y = y + pad + card.title_size;
	ctx.set_font(&format!("600 {}px sans-serif", card.title_size));
	ctx.set_fill_style_str(&theme.card.title.to_css());
	let _ = ctx.fill_text(&ellipsize(&node.title, 24), x + pad, line_y);
	ctx.set_font(&format!("{}px sans-serif", card.meta_size));
	ctx.set_fill_style_str(&theme.card.meta.to_css());
	let lock = if node.is_private { "\u{1f512}" } else { "\u{1f513}" };
	let _ = ctx.fill_text(lock, x + w - pad - card.meta_size, line_y);

	// Content excerpt, two lines at most.
	ctx.set_font(&format!("{}px sans-serif", card.body_size));
	ctx.set_fill_style_str(&theme.card.body.to_css());
	for line in wrap_lines(&node.content, 32, 2) {
		line_y += card.body_size * 1.4;
		let _ = ctx.fill_text(&line, x + pad, line_y);
	}

	// Footer: date, media marker, kind badge.
	let footer_y = y + h - pad;
	ctx.set_font(&format!("{}px sans-serif", card.meta_size));
	ctx.set_fill_style_str(&theme.card.meta.to_css());
	let _ = ctx.fill_text(&node.created_at, x + pad, footer_y);
	if node.has_media() {
		ctx.set_fill_style_str(&accent.to_css());
		let _ = ctx.fill_text("\u{1f5bc} \u{1f39e} \u{1f517}", x + pad + 88.0, footer_y);
	}

	let label = node.kind.label();
	let badge_w = label.len() as f64 * card.meta_size * 0.6 + 16.0;
	let badge_h = card.meta_size + 8.0;
	let badge_x = x + w - pad - badge_w;
	let badge_y = footer_y - card.meta_size - 2.0;
	rounded_rect(ctx, badge_x, badge_y, badge_w, badge_h, badge_h / 2.0);
	ctx.set_fill_style_str(&theme.card.badge_fill.to_css());
	ctx.fill();
	ctx.set_fill_style_str(&theme.card.meta.to_css());
	let _ = ctx.fill_text(label, badge_x + 8.0, footer_y);

	ctx.restore();
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

/// Shortens `text` to `max_chars` characters, ending in an ellipsis.
fn ellipsize(text: &str, max_chars: usize) -> Cow<'_, str> {
	if text.chars().count() <= max_chars {
		return Cow::Borrowed(text);
	}
	let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
	Cow::Owned(format!("{}\u{2026}", kept.trim_end()))
}

/// Greedy word wrap into at most `max_lines` lines; the last line is
/// ellipsized when text remains.
fn wrap_lines(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
	let mut lines: Vec<String> = Vec::new();
	let mut current = String::new();
	for word in text.split_whitespace() {
		let needed = if current.is_empty() {
			word.chars().count()
		} else {
			current.chars().count() + 1 + word.chars().count()
		};
		if needed > max_chars && !current.is_empty() {
			if lines.len() + 1 == max_lines {
				current.push(' ');
				current.push_str(word);
				lines.push(ellipsize(&current, max_chars).into_owned());
				return lines;
			}
			lines.push(std::mem::take(&mut current));
		}
		if !current.is_empty() {
			current.push(' ');
		}
		current.push_str(word);
	}
	if !current.is_empty() && lines.len() < max_lines {
		lines.push(ellipsize(&current, max_chars).into_owned());
	}
	lines
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ellipsize_short_text_is_borrowed() {
		assert!(matches!(ellipsize("Idea", 10), Cow::Borrowed("Idea")));
	}

	#[test]
	fn ellipsize_long_text() {
		assert_eq!(ellipsize("Started Programming", 8), "Started\u{2026}");
	}

	#[test]
	fn wraps_into_lines() {
		assert_eq!(
			wrap_lines("Landed my dream position as a software developer", 20, 3),
			vec!["Landed my dream", "position as a", "software developer"]
		);
	}

	#[test]
	fn wrap_truncates_overflow() {
		let lines = wrap_lines("one two three four five six seven", 9, 2);
		assert_eq!(lines.len(), 2);
		assert_eq!(lines[0], "one two");
		assert!(lines[1].ends_with('\u{2026}'));
	}

	#[test]
	fn wrap_empty_text() {
		assert!(wrap_lines("", 10, 2).is_empty());
	}
}
