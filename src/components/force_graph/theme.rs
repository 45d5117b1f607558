//! Visual theming for the co-authorship graph.
//!
//! Provides the color type, the categorical palette used for country buckets,
//! and the background/edge/node/legend style configuration.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Fill for authors whose country is outside the top buckets (`#A9A9A9`).
pub const OTHER_COLOR: Color = Color::rgb(169, 169, 169);

impl Default for Color {
	fn default() -> Self {
		OTHER_COLOR
	}
}

/// Ordered categorical palette. Bucket `i` takes color `i`.
#[derive(Clone, Debug)]
pub struct CategoryPalette {
	colors: Vec<Color>,
}

impl CategoryPalette {
	pub fn new(colors: Vec<Color>) -> Self {
		Self { colors }
	}

	/// The ten-color categorical scheme (d3 `schemeCategory10`).
	pub fn category10() -> Self {
		Self {
			colors: vec![
				Color::rgb(31, 119, 180),  // Blue
				Color::rgb(255, 127, 14),  // Orange
				Color::rgb(44, 160, 44),   // Green
				Color::rgb(214, 39, 40),   // Red
				Color::rgb(148, 103, 189), // Purple
				Color::rgb(140, 86, 75),   // Brown
				Color::rgb(227, 119, 194), // Pink
				Color::rgb(127, 127, 127), // Gray
				Color::rgb(188, 189, 34),  // Olive
				Color::rgb(23, 190, 207),  // Cyan
			],
		}
	}

	/// Color for a bucket rank. Ranks past the palette length wrap around;
	/// an empty palette yields [`OTHER_COLOR`].
	pub fn get(&self, index: usize) -> Color {
		index
			.checked_rem(self.colors.len())
			.and_then(|i| self.colors.get(i))
			.copied()
			.unwrap_or(OTHER_COLOR)
	}
}

impl Default for CategoryPalette {
	fn default() -> Self {
		Self::category10()
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	pub color: Color,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub color: Color,
	/// Line width in screen pixels.
	pub width: f64,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Border/stroke width in screen pixels (0 = no border)
	pub border_width: f64,
	/// How much darker than the fill the border is drawn.
	pub border_darken: f64,
	/// Ring drawn around the selected node.
	pub selection_color: Color,
}

/// Country legend style.
#[derive(Clone, Debug)]
pub struct LegendStyle {
	/// Top-left corner of the legend in screen pixels.
	pub origin: (f64, f64),
	pub swatch_size: (f64, f64),
	pub row_height: f64,
	pub text_color: Color,
	pub font: &'static str,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: BackgroundStyle,
	pub edge: EdgeStyle,
	pub node: NodeStyle,
	pub legend: LegendStyle,
	pub palette: CategoryPalette,
}

impl Theme {
	/// White page, black links (default)
	pub fn light() -> Self {
		Self {
			background: BackgroundStyle {
				color: Color::rgb(255, 255, 255),
			},
			edge: EdgeStyle {
				color: Color::rgb(0, 0, 0),
				width: 1.0,
			},
			node: NodeStyle {
				border_width: 0.0,
				border_darken: 0.0,
				selection_color: Color::rgba(0, 0, 0, 0.8),
			},
			legend: LegendStyle {
				origin: (20.0, 20.0),
				swatch_size: (15.0, 10.0),
				row_height: 20.0,
				text_color: Color::rgb(0, 0, 0),
				font: "12px sans-serif",
			},
			palette: CategoryPalette::category10(),
		}
	}

	/// Dark background with softened links and bordered nodes
	pub fn dark() -> Self {
		Self {
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
			},
			edge: EdgeStyle {
				color: Color::rgba(140, 160, 180, 0.5),
				width: 1.0,
			},
			node: NodeStyle {
				border_width: 1.0,
				border_darken: 0.3,
				selection_color: Color::rgba(255, 255, 255, 0.8),
			},
			legend: LegendStyle {
				origin: (20.0, 20.0),
				swatch_size: (15.0, 10.0),
				row_height: 20.0,
				text_color: Color::rgb(220, 225, 230),
				font: "12px sans-serif",
			},
			palette: CategoryPalette::category10(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn other_color_is_dark_gray() {
		assert_eq!(OTHER_COLOR.to_css(), "#a9a9a9");
		assert_eq!(OTHER_COLOR, Color::rgb(0xA9, 0xA9, 0xA9));
	}

	#[test]
	fn palette_wraps_past_its_length() {
		let palette = CategoryPalette::category10();
		assert_eq!(palette.get(0), palette.get(10));
		assert_eq!(palette.get(0).to_css(), "#1f77b4");
	}

	#[test]
	fn translucent_colors_render_as_rgba() {
		assert_eq!(
			Color::rgb(10, 20, 30).with_alpha(0.5).to_css(),
			"rgba(10, 20, 30, 0.5)"
		);
	}

	#[test]
	fn empty_palette_falls_back_to_other_color() {
		let palette = CategoryPalette::new(Vec::new());
		assert_eq!(palette.get(0), OTHER_COLOR);
		assert_eq!(palette.get(7), OTHER_COLOR);
	}
}
