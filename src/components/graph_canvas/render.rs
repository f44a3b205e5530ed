//! Canvas rendering for the graph view.
//!
//! Maps the interaction core's visual states to concrete drawing: dashed
//! default edges and solid highlighted ones with arrowheads, node disks
//! filled per (state, root flag), ellipsized labels, and, while a menu is
//! open, its annular wedges, icon glyphs, and tooltip. All scene drawing
//! happens under the viewport transform, so pan and zoom move the menu with
//! the graph.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::menu::{TooltipPlacement, TooltipRequest};
use super::state::GraphState;
use super::theme::Theme;
use super::types::VisualState;

/// Renders the complete view to the canvas.
pub fn render(state: &GraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	draw_background(state, ctx, theme);

	ctx.save();
	let t = state.transform();
	let _ = ctx.translate(t.x, t.y);
	let _ = ctx.scale(t.k, t.k);

	draw_edges(state, ctx, theme);
	draw_nodes(state, ctx, theme);
	draw_menu(state, ctx, theme);

	ctx.restore();
}

fn draw_background(state: &GraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	if theme.background.use_gradient {
		let gradient = ctx
			.create_radial_gradient(
				state.width() / 2.0,
				state.height() / 2.0,
				0.0,
				state.width() / 2.0,
				state.height() / 2.0,
				state.width().max(state.height()) * 0.8,
			)
			.unwrap();

		gradient
			.add_color_stop(0.0, &theme.background.color.to_css())
			.unwrap();
		gradient
			.add_color_stop(1.0, &theme.background.color_secondary.to_css())
			.unwrap();

		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
	} else {
		ctx.set_fill_style_str(&theme.background.color.to_css());
	}

	ctx.fill_rect(0.0, 0.0, state.width(), state.height());
}

fn draw_edges(state: &GraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	for (i, line) in state.edge_lines().iter().enumerate() {
		let highlighted = state.edge_visual(i) == VisualState::Highlighted;

		if highlighted {
			ctx.set_stroke_style_str(&theme.edge.highlight_color.to_css());
			ctx.set_line_width(theme.edge.highlight_width);
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		} else {
			ctx.set_stroke_style_str(&theme.edge.color.to_css());
			ctx.set_line_width(theme.edge.width);
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(theme.edge.dash.0),
				&JsValue::from_f64(theme.edge.dash.1),
			));
		}

		ctx.begin_path();
		ctx.move_to(line.x1, line.y1);
		ctx.line_to(line.x2, line.y2);
		ctx.stroke();

		if highlighted {
			draw_arrowhead(ctx, theme, line.x1, line.y1, line.x2, line.y2);
		}
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

/// Arrowhead at the target end of a highlighted edge, pointing along it.
fn draw_arrowhead(
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	x1: f64,
	y1: f64,
	x2: f64,
	y2: f64,
) {
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = (dx / dist, dy / dist);
	let size = theme.edge.arrow_size;

	let (back_x, back_y) = (x2 - ux * size, y2 - uy * size);
	let (px, py) = (-uy * size * 0.5, ux * size * 0.5);

	ctx.set_fill_style_str(&theme.edge.highlight_color.to_css());
	ctx.begin_path();
	ctx.move_to(x2, y2);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_nodes(state: &GraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let radius = state.node_config().radius;
	let max_chars = state.node_config().label_max_chars;

	for idx in 0..state.node_count() {
		let meta = state.node_meta(idx);
		let visual = state.node_visual(idx);
		let p = state.node_position(idx);

		let fills = if meta.root {
			&theme.node.root
		} else {
			&theme.node.plain
		};
		let fill = fills.fill(visual);

		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, radius, 0.0, 2.0 * PI);

		if theme.node.use_gradient {
			let gradient = ctx
				.create_radial_gradient(
					p.x - radius * 0.3,
					p.y - radius * 0.3,
					0.0,
					p.x,
					p.y,
					radius,
				)
				.unwrap();
			gradient
				.add_color_stop(0.0, &fill.lighten(0.15).to_css())
				.unwrap();
			gradient.add_color_stop(0.7, &fill.to_css()).unwrap();
			gradient
				.add_color_stop(1.0, &fill.darken(0.08).to_css())
				.unwrap();
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		} else {
			ctx.set_fill_style_str(&fill.to_css());
		}
		ctx.fill();

		if visual == VisualState::Hovered {
			ctx.set_stroke_style_str(&theme.node.hover_stroke.to_css());
			ctx.set_line_width(theme.node.hover_stroke_width);
		} else {
			ctx.set_stroke_style_str(&theme.node.stroke.to_css());
			ctx.set_line_width(theme.node.stroke_width);
		}
		ctx.stroke();

		let label_color = if meta.root {
			theme.node.label_root
		} else {
			theme.node.label_plain
		};
		ctx.set_fill_style_str(&label_color.to_css());
		ctx.set_font(theme.node.label_font);
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text(&truncate_label(&meta.label, max_chars), p.x, p.y);
	}
}

fn draw_menu(state: &GraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let Some(anchor) = state.menu_anchor_position() else {
		return;
	};
	let menu = state.menu();
	let inner = menu.config().inner_radius;
	let outer = menu.config().outer_radius;
	let hovered = menu.hovered_wedge();

	ctx.save();
	let _ = ctx.translate(anchor.x, anchor.y);

	for i in 0..menu.wedge_count() {
		let wedge = menu.wedge(i);
		let is_hovered = hovered == Some(i);

		let fill = if is_hovered {
			theme.menu.wedge_hover_fill
		} else {
			theme.menu.wedge_fill
		};

		ctx.begin_path();
		let _ = ctx.arc(0.0, 0.0, outer, wedge.start, wedge.end);
		let _ = ctx.arc_with_anticlockwise(0.0, 0.0, inner, wedge.end, wedge.start, true);
		ctx.close_path();
		ctx.set_fill_style_str(&fill.to_css());
		ctx.fill();
		ctx.set_stroke_style_str(&theme.menu.wedge_stroke.to_css());
		ctx.set_line_width(1.0);
		ctx.stroke();

		if let Some(entry) = menu.entry(i) {
			let c = menu.wedge_centroid(i);
			let icon = if is_hovered {
				theme.menu.icon_hover
			} else {
				theme.menu.icon
			};
			ctx.set_fill_style_str(&icon.to_css());
			ctx.set_font(theme.menu.icon_font);
			ctx.set_text_align("center");
			ctx.set_text_baseline("middle");
			let _ = ctx.fill_text(&entry.glyph.to_string(), c.x, c.y);
		}
	}

	if let Some(tooltip) = state.tooltip() {
		draw_tooltip(ctx, theme, &tooltip);
	}

	ctx.restore();
}

/// Tooltip bubble beside the hovered wedge, still in anchor-relative
/// coordinates.
fn draw_tooltip(ctx: &CanvasRenderingContext2d, theme: &Theme, tooltip: &TooltipRequest) {
	ctx.set_font(theme.menu.tooltip_font);
	let text_width = ctx
		.measure_text(&tooltip.text)
		.map(|m| m.width())
		.unwrap_or(tooltip.text.len() as f64 * 7.0);

	let pad = 6.0;
	let width = text_width + pad * 2.0;
	let height = 20.0;
	let offset = theme.menu.tooltip_offset;

	let (bx, by) = match tooltip.placement {
		TooltipPlacement::Right => (tooltip.x + offset, tooltip.y - height / 2.0),
		TooltipPlacement::Left => (tooltip.x - offset - width, tooltip.y - height / 2.0),
		TooltipPlacement::Bottom => (tooltip.x - width / 2.0, tooltip.y + offset),
		TooltipPlacement::Top => (tooltip.x - width / 2.0, tooltip.y - offset - height),
	};

	ctx.set_fill_style_str(&theme.menu.tooltip_fill.to_css());
	ctx.fill_rect(bx, by, width, height);

	ctx.set_fill_style_str(&theme.menu.tooltip_text.to_css());
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(&tooltip.text, bx + width / 2.0, by + height / 2.0);
}

/// Cut overlong labels to a short prefix plus an ellipsis.
fn truncate_label(label: &str, max_chars: usize) -> String {
	if label.chars().count() <= max_chars {
		label.to_string()
	} else {
		let prefix: String = label.chars().take(5).collect();
		format!("{prefix}…")
	}
}

#[cfg(test)]
mod tests {
	use super::truncate_label;

	#[test]
	fn short_labels_pass_through() {
		assert_eq!(truncate_label("Node 7", 8), "Node 7");
	}

	#[test]
	fn overlong_labels_are_ellipsized() {
		assert_eq!(truncate_label("Node 1xxxxxxxxxxxxx", 8), "Node …");
	}

	#[test]
	fn truncation_counts_characters_not_bytes() {
		assert_eq!(truncate_label("éééééééé", 8), "éééééééé");
	}
}
