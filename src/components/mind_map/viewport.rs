//! Zoom and pan applied to the whole map.
//!
//! # Coordinate Spaces
//!
//! - **Logical space**: where the layout places nodes. Independent of zoom/pan.
//! - **Screen space**: canvas pixels, as reported by pointer events.
//!
//! Painting applies `scale(zoom)` and then `translate(pan)`, so a logical point
//! `l` lands on screen at `(l + pan) * zoom` and the inverse is
//! `screen / zoom - pan`. Pan is therefore measured in logical units.

use super::config::ViewportConfig;
use super::types::{Point, Rect, Size};

/// Which way a wheel step zooms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
	/// Magnify.
	In,
	/// Shrink.
	Out,
}

impl ZoomDirection {
	/// Browsers report a negative `deltaY` when scrolling up, towards the user.
	pub fn from_wheel_delta(delta_y: f64) -> Self {
		if delta_y < 0.0 { Self::In } else { Self::Out }
	}
}

/// Current zoom factor and pan offset.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
	/// Zoom factor (1.0 = 100%), kept within the configured limits.
	pub zoom: f64,
	/// Offset in logical units, applied after scaling.
	pub pan: Point,
	config: ViewportConfig,
}

impl Default for Viewport {
	fn default() -> Self {
		Self::new(ViewportConfig::default())
	}
}

impl Viewport {
	/// Identity view with the given limits.
	pub fn new(config: ViewportConfig) -> Self {
		Self {
			zoom: 1.0,
			pan: Point::default(),
			config,
		}
	}

	/// Zoom limits and step factors.
	pub fn config(&self) -> &ViewportConfig {
		&self.config
	}

	/// Zoom 1, no pan.
	pub fn reset(&mut self) {
		self.zoom = 1.0;
		self.pan = Point::default();
	}

	/// Canvas pixel to layout coordinates.
	pub fn screen_to_logical(&self, screen: Point) -> Point {
		Point::new(
			screen.x / self.zoom - self.pan.x,
			screen.y / self.zoom - self.pan.y,
		)
	}

	/// Layout coordinates to canvas pixel.
	pub fn logical_to_screen(&self, logical: Point) -> Point {
		Point::new(
			(logical.x + self.pan.x) * self.zoom,
			(logical.y + self.pan.y) * self.zoom,
		)
	}

	fn clamp_zoom(&self, zoom: f64) -> f64 {
		zoom.clamp(self.config.min_zoom, self.config.max_zoom)
	}

	/// Zooms one step while keeping the logical point under `screen` fixed.
	pub fn zoom_at(&mut self, screen: Point, direction: ZoomDirection) {
		let factor = match direction {
			ZoomDirection::In => self.config.zoom_in_factor,
			ZoomDirection::Out => self.config.zoom_out_factor,
		};
		let old = self.zoom;
		let new = self.clamp_zoom(old * factor);
		self.zoom = new;
		self.pan.x = screen.x / new - screen.x / old + self.pan.x;
		self.pan.y = screen.y / new - screen.y / old + self.pan.y;
	}

	/// Moves the view by a screen-space drag distance.
	pub fn pan_by(&mut self, screen_delta: Point) {
		self.pan.x += screen_delta.x / self.zoom;
		self.pan.y += screen_delta.y / self.zoom;
	}

	/// Zooms and pans so `bounds` fills the viewport, less the fit margin, and
	/// sits in its middle. Degenerate bounds or viewports leave the view alone.
	pub fn fit_to_content(&mut self, bounds: Option<Rect>, viewport: Size) {
		let Some(bounds) = bounds else {
			return;
		};
		if bounds.width <= 0.0 || bounds.height <= 0.0 || viewport.is_empty() {
			return;
		}
		let zoom = (viewport.width / bounds.width).min(viewport.height / bounds.height)
			* self.config.fit_margin;
		self.zoom = self.clamp_zoom(zoom);
		let center = bounds.center();
		self.pan = Point::new(
			viewport.width / (2.0 * self.zoom) - center.x,
			viewport.height / (2.0 * self.zoom) - center.y,
		);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn close(a: Point, b: Point) -> bool {
		(a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
	}

	#[test]
	fn screen_and_logical_round_trip() {
		let mut vp = Viewport::default();
		vp.zoom = 2.0;
		vp.pan = Point::new(-30.0, 12.5);
		let p = Point::new(123.0, 45.0);
		assert!(close(vp.logical_to_screen(vp.screen_to_logical(p)), p));
		assert!(close(vp.screen_to_logical(p), Point::new(91.5, 10.0)));
	}

	#[test]
	fn zoom_keeps_anchor_fixed() {
		let mut vp = Viewport::default();
		vp.pan = Point::new(17.0, -4.0);
		let anchor = Point::new(310.0, 220.0);
		let before = vp.screen_to_logical(anchor);

		vp.zoom_at(anchor, ZoomDirection::In);
		assert!((vp.zoom - 1.1).abs() < 1e-12);
		assert!(close(vp.screen_to_logical(anchor), before));

		vp.zoom_at(anchor, ZoomDirection::Out);
		assert!(close(vp.screen_to_logical(anchor), before));
	}

	#[test]
	fn zoom_is_clamped_and_still_anchored() {
		let mut vp = Viewport::default();
		let anchor = Point::new(50.0, 80.0);
		let before = vp.screen_to_logical(anchor);
		for _ in 0..100 {
			vp.zoom_at(anchor, ZoomDirection::In);
		}
		assert_eq!(vp.zoom, 5.0);
		assert!(close(vp.screen_to_logical(anchor), before));
		for _ in 0..200 {
			vp.zoom_at(anchor, ZoomDirection::Out);
		}
		assert_eq!(vp.zoom, 0.1);
		assert!(close(vp.screen_to_logical(anchor), before));
	}

	#[test]
	fn pan_is_scaled_by_zoom() {
		let mut vp = Viewport::default();
		vp.zoom = 2.0;
		vp.pan_by(Point::new(10.0, -20.0));
		assert_eq!(vp.pan, Point::new(5.0, -10.0));
	}

	#[test]
	fn fit_centers_content() {
		let mut vp = Viewport::default();
		let bounds = Rect {
			x: 100.0,
			y: 50.0,
			width: 400.0,
			height: 100.0,
		};
		let view = Size::new(800.0, 600.0);
		vp.fit_to_content(Some(bounds), view);
		assert!((vp.zoom - 1.8).abs() < 1e-12);
		let center = vp.logical_to_screen(bounds.center());
		assert!(close(center, Point::new(400.0, 300.0)));
	}

	#[test]
	fn fit_ignores_degenerate_input() {
		let mut vp = Viewport::default();
		vp.fit_to_content(None, Size::new(800.0, 600.0));
		vp.fit_to_content(
			Some(Rect {
				x: 5.0,
				y: 5.0,
				width: 0.0,
				height: 10.0,
			}),
			Size::new(800.0, 600.0),
		);
		assert_eq!(vp, Viewport::default());
	}

	#[test]
	fn wheel_direction() {
		assert_eq!(ZoomDirection::from_wheel_delta(-3.0), ZoomDirection::In);
		assert_eq!(ZoomDirection::from_wheel_delta(3.0), ZoomDirection::Out);
	}
}
