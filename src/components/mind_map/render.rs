//! Drawing the map.
//!
//! Rendering is a pure function of the model, layout, viewport and theme,
//! expressed as calls on a [`Painter`]. Passes, back to front:
//! 1. Background (screen space)
//! 2. Edges with arrowheads (logical space)
//! 3. Node boxes and labels, so boxes hide edge endpoints

use std::f64::consts::PI;

use super::layout::Layout;
use super::model::GraphModel;
use super::theme::{Color, Stroke, Theme};
use super::types::{Point, Rect, Size};
use super::viewport::Viewport;

/// Angle between an arrowhead stroke and its edge.
const ARROW_SPREAD: f64 = PI / 6.0;

/// Minimal 2D drawing surface.
pub trait Painter {
	/// Fills the whole surface, ignoring any transform.
	fn fill_background(&mut self, size: Size, color: Color);
	/// Pushes the current transform.
	fn save(&mut self);
	/// Pops the transform pushed by the matching [`Painter::save`].
	fn restore(&mut self);
	/// Uniform scale.
	fn scale(&mut self, k: f64);
	/// Translation in the current units.
	fn translate(&mut self, dx: f64, dy: f64);
	/// Straight line.
	fn line(&mut self, from: Point, to: Point, stroke: Stroke);
	/// Filled, outlined box with rounded corners.
	fn rounded_rect(&mut self, rect: Rect, radius: f64, fill: Color, border: Stroke);
	/// Draws one line of text centered on `at`.
	fn text(&mut self, text: &str, at: Point, color: Color, font: &str);
}

/// Renders the complete map onto a `canvas`-sized surface.
pub fn render(
	painter: &mut impl Painter,
	model: &GraphModel,
	layout: &Layout,
	viewport: &Viewport,
	canvas: Size,
	theme: &Theme,
) {
	painter.fill_background(canvas, theme.background);

	painter.save();
	painter.scale(viewport.zoom);
	painter.translate(viewport.pan.x, viewport.pan.y);

	draw_edges(painter, model, layout, theme);
	draw_nodes(painter, model, layout, theme);

	painter.restore();
}

fn draw_edges(painter: &mut impl Painter, model: &GraphModel, layout: &Layout, theme: &Theme) {
	let stroke = theme.edge.stroke;
	for (source, target) in model.edges() {
		let (Some(from), Some(to)) = (layout.get(source), layout.get(target)) else {
			continue;
		};
		let (start, end) = (from.center, to.center);
		painter.line(start, end, stroke);
		for barb in arrowhead(start, end, theme.edge.arrow_size) {
			painter.line(end, barb, stroke);
		}
	}
}

/// Outer ends of the two arrowhead strokes drawn back from `end`.
pub fn arrowhead(start: Point, end: Point, size: f64) -> [Point; 2] {
	let angle = (end.y - start.y).atan2(end.x - start.x);
	[angle - ARROW_SPREAD, angle + ARROW_SPREAD]
		.map(|a| Point::new(end.x - size * a.cos(), end.y - size * a.sin()))
}

fn draw_nodes(painter: &mut impl Painter, model: &GraphModel, layout: &Layout, theme: &Theme) {
	let focus = model.focus();
	let style = &theme.node;
	for node in layout.nodes() {
		let fill = theme.node_fill(node.level, focus == Some(node.id.as_str()));
		painter.rounded_rect(node.rect(), style.corner_radius, fill, style.border);

		let lines: Vec<&str> = node.label.split('\n').collect();
		let first = node.center.y - (lines.len() - 1) as f64 * style.line_height / 2.0;
		for (i, line) in lines.iter().enumerate() {
			let at = Point::new(node.center.x, first + i as f64 * style.line_height);
			painter.text(line, at, style.label_color, &style.font);
		}
	}
}
