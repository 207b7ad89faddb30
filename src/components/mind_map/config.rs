//! Tunable layout and viewport parameters.
//!
//! All structs deserialize with per-field defaults, so a page can override a
//! single value (e.g. `{"layout": {"node_margin": 60}}`) and keep the rest.

use serde::Deserialize;

/// Node sizing and spacing, in logical units.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
	/// Node boxes are never smaller than twice this in either dimension.
	pub base_radius: f64,
	/// Space between label text and box border.
	pub padding: f64,
	/// Gap between boxes on a level, and between consecutive levels.
	pub node_margin: f64,
	/// Horizontal gap between boxes on the levels holding unreached nodes.
	pub isolated_margin: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			base_radius: 10.0,
			padding: 5.0,
			node_margin: 40.0,
			isolated_margin: 120.0,
		}
	}
}

/// Zoom limits and gesture factors.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
	/// Smallest zoom factor.
	pub min_zoom: f64,
	/// Largest zoom factor.
	pub max_zoom: f64,
	/// Multiplier applied per wheel step towards the user.
	pub zoom_in_factor: f64,
	/// Multiplier applied per wheel step away from the user.
	pub zoom_out_factor: f64,
	/// Fraction of the viewport the content fills after fit-to-content.
	pub fit_margin: f64,
}

impl Default for ViewportConfig {
	fn default() -> Self {
		Self {
			min_zoom: 0.1,
			max_zoom: 5.0,
			zoom_in_factor: 1.1,
			zoom_out_factor: 0.9,
			fit_margin: 0.9,
		}
	}
}

/// Complete engine configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct MindMapConfig {
	/// Node sizing and spacing.
	pub layout: LayoutConfig,
	/// Zoom limits and gestures.
	pub viewport: ViewportConfig,
	/// Quiet period after the last resize before the layout is recomputed.
	pub resize_debounce_ms: u32,
	/// Fit all nodes into view after every layout.
	pub auto_fit: bool,
}

impl Default for MindMapConfig {
	fn default() -> Self {
		Self {
			layout: LayoutConfig::default(),
			viewport: ViewportConfig::default(),
			resize_debounce_ms: 100,
			auto_fit: false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_keeps_defaults() {
		let config: MindMapConfig =
			serde_json::from_str(r#"{"layout": {"node_margin": 60}, "auto_fit": true}"#).unwrap();
		assert_eq!(config.layout.node_margin, 60.0);
		assert_eq!(config.layout.isolated_margin, 120.0);
		assert_eq!(config.viewport, ViewportConfig::default());
		assert_eq!(config.resize_debounce_ms, 100);
		assert!(config.auto_fit);
	}
}
