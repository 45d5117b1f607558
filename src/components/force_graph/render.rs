//! Canvas rendering for the co-authorship graph.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Links, then author circles, then the selection ring (world space)
//! 3. Country legend (screen space, unaffected by pan/zoom)

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::GraphSession;
use super::theme::Theme;

/// Renders the complete graph to the canvas.
pub fn render(session: &GraphSession, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	draw_background(session, ctx, theme);

	ctx.save();
	let _ = ctx.translate(session.transform.x, session.transform.y);
	let _ = ctx.scale(session.transform.k, session.transform.k);

	draw_edges(session, ctx, theme);
	draw_nodes(session, ctx, theme);
	draw_selection(session, ctx, theme);

	ctx.restore();

	draw_legend(session, ctx, theme);
}

fn draw_background(session: &GraphSession, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	ctx.set_fill_style_str(&theme.background.color.to_css());
	ctx.fill_rect(0.0, 0.0, session.width, session.height);
}

fn draw_edges(session: &GraphSession, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	ctx.set_stroke_style_str(&theme.edge.color.to_css());
	ctx.set_line_width(theme.edge.width / session.transform.k);

	// One path for all links: a single stroke call per frame.
	ctx.begin_path();
	session.layout().graph().visit_edges(|n1, n2, _| {
		ctx.move_to(n1.x() as f64, n1.y() as f64);
		ctx.line_to(n2.x() as f64, n2.y() as f64);
	});
	ctx.stroke();
}

fn draw_nodes(session: &GraphSession, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let k = session.transform.k;
	session.layout().graph().visit_nodes(|node| {
		let author = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);

		ctx.begin_path();
		let _ = ctx.arc(x, y, author.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&author.color.to_css());
		ctx.fill();

		if theme.node.border_width > 0.0 {
			ctx.set_stroke_style_str(&author.color.darken(theme.node.border_darken).to_css());
			ctx.set_line_width(theme.node.border_width / k);
			ctx.stroke();
		}
	});
}

fn draw_selection(session: &GraphSession, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let Some(selection) = session.selection() else {
		return;
	};
	let alpha = selection.opacity();
	if alpha < 0.01 {
		return;
	}
	let k = session.transform.k;
	let color = theme.node.selection_color;

	session.layout().graph().visit_nodes(|node| {
		if node.index() != selection.node {
			return;
		}
		let (x, y) = (node.x() as f64, node.y() as f64);
		ctx.begin_path();
		let _ = ctx.arc(x, y, node.data.user_data.radius + 2.0 / k, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(&color.with_alpha(color.a * alpha).to_css());
		ctx.set_line_width(1.5 / k);
		ctx.stroke();
	});
}

fn draw_legend(session: &GraphSession, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let legend = &theme.legend;
	let (ox, oy) = legend.origin;
	let (sw, sh) = legend.swatch_size;

	ctx.set_font(legend.font);
	for (i, (country, color)) in session.buckets().entries().iter().enumerate() {
		let y = oy + i as f64 * legend.row_height;
		ctx.set_fill_style_str(&color.to_css());
		ctx.fill_rect(ox, y, sw, sh);

		ctx.set_fill_style_str(&legend.text_color.to_css());
		// Baseline sits just below the swatch.
		let _ = ctx.fill_text(country, ox + legend.row_height, y + sh + 2.0);
	}
}
