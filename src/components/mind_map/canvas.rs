//! [`Painter`] backed by an HTML canvas 2D context.

use web_sys::CanvasRenderingContext2d;

use super::render::Painter;
use super::theme::{Color, Stroke};
use super::types::{Point, Rect, Size};

impl Painter for CanvasRenderingContext2d {
	fn fill_background(&mut self, size: Size, color: Color) {
		let _ = self.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
		self.set_fill_style_str(&color.to_css());
		self.fill_rect(0.0, 0.0, size.width, size.height);
	}

	fn save(&mut self) {
		CanvasRenderingContext2d::save(self);
	}

	fn restore(&mut self) {
		CanvasRenderingContext2d::restore(self);
	}

	fn scale(&mut self, k: f64) {
		let _ = CanvasRenderingContext2d::scale(self, k, k);
	}

	fn translate(&mut self, dx: f64, dy: f64) {
		let _ = CanvasRenderingContext2d::translate(self, dx, dy);
	}

	fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
		self.set_stroke_style_str(&stroke.color.to_css());
		self.set_line_width(stroke.width);
		self.begin_path();
		self.move_to(from.x, from.y);
		self.line_to(to.x, to.y);
		self.stroke();
	}

	fn rounded_rect(&mut self, rect: Rect, radius: f64, fill: Color, border: Stroke) {
		let r = radius.min(rect.width / 2.0).min(rect.height / 2.0);
		let (left, top, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());

		self.begin_path();
		self.move_to(left + r, top);
		let _ = self.arc_to(right, top, right, bottom, r);
		let _ = self.arc_to(right, bottom, left, bottom, r);
		let _ = self.arc_to(left, bottom, left, top, r);
		let _ = self.arc_to(left, top, right, top, r);
		self.close_path();

		self.set_fill_style_str(&fill.to_css());
		self.fill();
		if border.width > 0.0 {
			self.set_stroke_style_str(&border.color.to_css());
			self.set_line_width(border.width);
			self.stroke();
		}
	}

	fn text(&mut self, text: &str, at: Point, color: Color, font: &str) {
		self.set_font(font);
		self.set_text_align("center");
		self.set_text_baseline("middle");
		self.set_fill_style_str(&color.to_css());
		let _ = self.fill_text(text, at.x, at.y);
	}
}
