//! Visual theming for the mind map.
//!
//! Provides the per-level color palette and edge/node/label styles.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha, 0.0 to 1.0.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
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

	/// CSS color string, hex when opaque.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Fill colors cycled through by node level.
#[derive(Clone, Debug)]
pub struct LevelPalette {
	/// Colors in level order.
	pub colors: Vec<Color>,
}

impl LevelPalette {
	const FALLBACK: Color = Color::rgb(128, 128, 128);

	/// Saturated, clearly distinct hues so adjacent levels never blend.
	pub fn vivid() -> Self {
		Self {
			colors: vec![
				Color::rgb(255, 99, 71),   // Tomato
				Color::rgb(60, 179, 113),  // Medium sea green
				Color::rgb(65, 105, 225),  // Royal blue
				Color::rgb(255, 165, 0),   // Orange
				Color::rgb(147, 112, 219), // Medium purple
				Color::rgb(0, 191, 255),   // Deep sky blue
				Color::rgb(255, 20, 147),  // Deep pink
				Color::rgb(0, 128, 128),   // Teal
				Color::rgb(218, 165, 32),  // Goldenrod
				Color::rgb(127, 255, 0),   // Chartreuse
			],
		}
	}

	/// Fill for `level`, wrapping around the palette. An empty palette yields gray.
	pub fn get(&self, level: usize) -> Color {
		level
			.checked_rem(self.colors.len())
			.map_or(Self::FALLBACK, |i| self.colors[i])
	}
}

/// A stroke: color plus width in logical units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
	/// Line color.
	pub color: Color,
	/// Line width.
	pub width: f64,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Line and arrowhead stroke.
	pub stroke: Stroke,
	/// Length of each arrowhead stroke.
	pub arrow_size: f64,
}

/// Node box and label style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Box outline.
	pub border: Stroke,
	/// Box corner radius.
	pub corner_radius: f64,
	/// How much the focused node's fill is lightened (0.0 = unchanged, 1.0 = white)
	pub focus_lighten: f64,
	/// Label text color.
	pub label_color: Color,
	/// CSS font shorthand used both to measure and to draw labels.
	pub font: String,
	/// Distance between label baselines for multi-line labels.
	pub line_height: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Canvas fill behind everything.
	pub background: Color,
	/// Edge style.
	pub edge: EdgeStyle,
	/// Node box and label style.
	pub node: NodeStyle,
	/// Fills by level.
	pub palette: LevelPalette,
}

impl Theme {
	/// Light background, vivid level colors (default)
	pub fn light() -> Self {
		Self {
			background: Color::rgb(250, 250, 250),
			edge: EdgeStyle {
				stroke: Stroke {
					color: Color::rgb(150, 150, 150),
					width: 1.0,
				},
				arrow_size: 8.0,
			},
			node: NodeStyle {
				border: Stroke {
					color: Color::rgb(0, 0, 0),
					width: 3.0,
				},
				corner_radius: 10.0,
				focus_lighten: 0.5,
				label_color: Color::rgb(0, 0, 0),
				font: "13px Arial, sans-serif".into(),
				line_height: 16.0,
			},
			palette: LevelPalette::vivid(),
		}
	}

	/// Fill for a node on `level`, lighter when it is the focus.
	pub fn node_fill(&self, level: usize, focused: bool) -> Color {
		let base = self.palette.get(level);
		if focused {
			base.lighten(self.node.focus_lighten)
		} else {
			base
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}
