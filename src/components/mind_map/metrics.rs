//! Label measurement used to size node boxes.
//!
//! Font rendering belongs to the host, so layout only sees the [`TextMeasure`]
//! trait. [`CanvasTextMetrics`] asks the browser canvas; [`ApproxTextMetrics`]
//! uses a fixed average glyph advance and is what native code and tests use.

use web_sys::CanvasRenderingContext2d;

use super::types::Size;

/// Pure, synchronous measurement of a label's unpadded text extent.
pub trait TextMeasure {
	/// Width of the widest line and total height of all lines.
	fn measure(&self, label: &str) -> Size;
}

impl<F: Fn(&str) -> Size> TextMeasure for F {
	fn measure(&self, label: &str) -> Size {
		self(label)
	}
}

/// Monospace-style approximation: every char advances by `char_width`.
#[derive(Clone, Debug)]
pub struct ApproxTextMetrics {
	/// Advance per char.
	pub char_width: f64,
	/// Height per line.
	pub line_height: f64,
}

impl Default for ApproxTextMetrics {
	fn default() -> Self {
		// Roughly a 10pt sans-serif face.
		Self {
			char_width: 7.0,
			line_height: 16.0,
		}
	}
}

impl TextMeasure for ApproxTextMetrics {
	fn measure(&self, label: &str) -> Size {
		measure_lines(label, self.line_height, |line| {
			line.chars().count() as f64 * self.char_width
		})
	}
}

/// Measures with the canvas' own font engine.
pub struct CanvasTextMetrics {
	ctx: CanvasRenderingContext2d,
	font: String,
	line_height: f64,
}

impl CanvasTextMetrics {
	/// Measures with `font`, a CSS font shorthand.
	pub fn new(ctx: CanvasRenderingContext2d, font: impl Into<String>, line_height: f64) -> Self {
		Self {
			ctx,
			font: font.into(),
			line_height,
		}
	}
}

impl TextMeasure for CanvasTextMetrics {
	fn measure(&self, label: &str) -> Size {
		// The renderer may have left another font on the shared context.
		self.ctx.set_font(&self.font);
		measure_lines(label, self.line_height, |line| {
			self.ctx
				.measure_text(line)
				.map(|m| m.width())
				.unwrap_or(0.0)
		})
	}
}

/// Widest line by line count. An empty label still occupies one line.
fn measure_lines(label: &str, line_height: f64, width_of: impl Fn(&str) -> f64) -> Size {
	let mut width: f64 = 0.0;
	let mut lines = 0usize;
	for line in label.split('\n') {
		width = width.max(width_of(line));
		lines += 1;
	}
	Size::new(width, lines.max(1) as f64 * line_height)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn approx_metrics_scale_with_char_count() {
		let m = ApproxTextMetrics::default();
		assert_eq!(m.measure("abcd"), Size::new(28.0, 16.0));
		assert_eq!(m.measure(""), Size::new(0.0, 16.0));
	}

	#[test]
	fn multi_line_labels_use_widest_line() {
		let m = ApproxTextMetrics {
			char_width: 10.0,
			line_height: 12.0,
		};
		assert_eq!(m.measure("ab\nabcde\nc"), Size::new(50.0, 36.0));
	}

	#[test]
	fn closures_measure_too() {
		let m = |label: &str| Size::new(label.len() as f64, 1.0);
		assert_eq!(m.measure("xyz"), Size::new(3.0, 1.0));
	}
}
