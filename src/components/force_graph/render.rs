//! Canvas rendering for the relation graph.
//!
//! Draws each frame in fixed z-order: background, link label badges, link
//! lines with arrowheads, then nodes topmost. Links are straight lines; the
//! arrowhead sits at the target end, outside the node circle.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::{ForceGraphState, LinkInfo, NodeBody};
use super::theme::Theme;

/// Renders the complete graph to the canvas.
pub fn render(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.transform.k);

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	if scale.draw_labels {
		state.graph.visit_edges(|n1, n2, edge| {
			draw_link_label(ctx, &scale, theme, n1, n2, edge);
		});
	}

	state.graph.visit_edges(|n1, n2, _| {
		draw_link(ctx, &scale, theme, n1, n2);
	});

	state.graph.visit_nodes(|node| {
		draw_node(ctx, &scale, theme, node);
	});

	ctx.restore();
}

fn draw_background(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	if theme.background.use_gradient {
		let gradient = ctx
			.create_radial_gradient(
				state.width / 2.0,
				state.height / 2.0,
				0.0,
				state.width / 2.0,
				state.height / 2.0,
				state.width.max(state.height) * 0.8,
			)
			.ok();

		if let Some(gradient) = gradient {
			let _ = gradient.add_color_stop(0.0, &theme.background.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.background.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		} else {
			ctx.set_fill_style_str(&theme.background.color.to_css());
		}
	} else {
		ctx.set_fill_style_str(&theme.background.color.to_css());
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_link(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	n1: &force_graph::Node<NodeBody>,
	n2: &force_graph::Node<NodeBody>,
) {
	let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = (dx / dist, dy / dist);

	// Line stops short of both circles, leaving room for the arrowhead.
	ctx.set_stroke_style_str(&theme.edge.color.to_css());
	ctx.set_line_width(scale.edge_line_width);
	ctx.begin_path();
	ctx.move_to(x1 + ux * scale.node_radius, y1 + uy * scale.node_radius);
	ctx.line_to(
		x2 - ux * (scale.node_radius + scale.arrow_size),
		y2 - uy * (scale.node_radius + scale.arrow_size),
	);
	ctx.stroke();

	// Arrowhead triangle pointing at the target circle.
	let (tip_x, tip_y) = (x2 - ux * scale.node_radius, y2 - uy * scale.node_radius);
	let (back_x, back_y) = (tip_x - ux * scale.arrow_size, tip_y - uy * scale.arrow_size);
	let (px, py) = (-uy * scale.arrow_size * 0.5, ux * scale.arrow_size * 0.5);

	ctx.set_fill_style_str(&theme.edge.arrow_color.to_css());
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_link_label(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	n1: &force_graph::Node<NodeBody>,
	n2: &force_graph::Node<NodeBody>,
	edge: &force_graph::EdgeData<LinkInfo>,
) {
	let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}

	let (text, color) = theme.link_label.display(edge.user_data.label.as_deref());

	// Badge sits at the midpoint, nudged off the line so the link does not
	// strike through the text.
	let (ux, uy) = (dx / dist, dy / dist);
	let offset = scale.label_height * 0.9;
	let (cx, cy) = (
		(x1 + x2) / 2.0 - uy * offset,
		(y1 + y2) / 2.0 + ux * offset,
	);

	// measure_text needs a web-sys feature the crate does not pull in; a
	// character estimate is close enough for a badge.
	let text_width = scale.label_font_size * 0.6 * text.chars().count() as f64;
	let w = text_width + scale.label_padding_x * 2.0;
	let h = scale.label_height;

	ctx.set_fill_style_str(&theme.link_label.fill.to_css());
	ctx.fill_rect(cx - w / 2.0, cy - h / 2.0, w, h);
	ctx.set_stroke_style_str(&theme.link_label.stroke.to_css());
	ctx.set_line_width(scale.edge_line_width * 0.75);
	ctx.stroke_rect(cx - w / 2.0, cy - h / 2.0, w, h);

	ctx.set_fill_style_str(&color.to_css());
	ctx.set_font(&scale.label_font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(text, cx, cy);
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	node: &force_graph::Node<NodeBody>,
) {
	let (x, y) = (node.x() as f64, node.y() as f64);
	let radius = scale.node_radius;

	if theme.node.use_gradient {
		let gradient = ctx
			.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
			.ok();

		if let Some(gradient) = gradient {
			let base = theme.node.fill;
			let _ = gradient.add_color_stop(0.0, &base.lighten(0.4).to_css());
			let _ = gradient.add_color_stop(0.7, &base.to_css());
			let _ = gradient.add_color_stop(1.0, &base.darken(0.2).to_css());

			ctx.begin_path();
			let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
			ctx.fill();
		}
	} else {
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&theme.node.fill.to_css());
		ctx.fill();
	}

	if theme.node.border_width > 0.0 {
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(&theme.node.border_color.to_css());
		ctx.set_line_width(theme.node.border_width / scale.k);
		ctx.stroke();
	}

	// The id doubles as the node's label, drawn below the circle.
	ctx.set_fill_style_str(&theme.node.label_color.to_css());
	ctx.set_font(&scale.node_font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("top");
	let _ = ctx.fill_text(&node.data.user_data.id, x, y + radius + 3.0);
}
