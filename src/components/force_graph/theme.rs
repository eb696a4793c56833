//! Visual theming for the relation graph.
//!
//! Colors and style configuration for nodes, links, and link label badges.

/// Text rendered on a link badge when the relation has no label.
pub const MISSING_LABEL: &str = "missing";

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

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use a radial gradient
	pub use_gradient: bool,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Circle fill color
	pub fill: Color,
	/// Circle border color
	pub border_color: Color,
	/// Border width in world units (0 = no border)
	pub border_width: f64,
	/// Whether the fill gets a subtle inner gradient
	pub use_gradient: bool,
	/// Id label text color
	pub label_color: Color,
}

/// Link line and arrowhead style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Line color
	pub color: Color,
	/// Arrowhead fill color
	pub arrow_color: Color,
}

/// Link label badge style.
#[derive(Clone, Debug)]
pub struct LinkLabelStyle {
	/// Badge background fill
	pub fill: Color,
	/// Badge border color
	pub stroke: Color,
	/// Text color for supplied labels
	pub text_color: Color,
	/// Warning text color for the missing-label placeholder
	pub missing_color: Color,
}

impl LinkLabelStyle {
	/// Resolve the display text and color for a link label. Absent labels
	/// get the placeholder text in the warning color.
	pub fn display<'a>(&self, label: Option<&'a str>) -> (&'a str, Color) {
		match label {
			Some(text) => (text, self.text_color),
			None => (MISSING_LABEL, self.missing_color),
		}
	}
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub node: NodeStyle,
	pub edge: EdgeStyle,
	pub link_label: LinkLabelStyle,
}

impl Theme {
	/// Dark slate theme (default).
	pub fn slate() -> Self {
		Self {
			name: "slate",
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				color_secondary: Color::rgb(30, 35, 42),
				use_gradient: true,
			},
			node: NodeStyle {
				fill: Color::rgb(94, 129, 172),
				border_color: Color::rgb(60, 70, 85),
				border_width: 1.5,
				use_gradient: true,
				label_color: Color::rgb(210, 215, 222),
			},
			edge: EdgeStyle {
				color: Color::rgba(140, 160, 180, 0.55),
				arrow_color: Color::rgba(160, 175, 190, 0.9),
			},
			link_label: LinkLabelStyle {
				fill: Color::rgb(35, 42, 52),
				stroke: Color::rgb(80, 90, 105),
				text_color: Color::rgb(200, 206, 214),
				missing_color: Color::rgb(224, 80, 80),
			},
		}
	}

	/// Light theme echoing the classic yellow-node look.
	pub fn paper() -> Self {
		Self {
			name: "paper",
			background: BackgroundStyle {
				color: Color::rgb(250, 250, 248),
				color_secondary: Color::rgb(240, 240, 236),
				use_gradient: false,
			},
			node: NodeStyle {
				fill: Color::rgb(255, 246, 102),
				border_color: Color::rgb(102, 102, 102),
				border_width: 2.0,
				use_gradient: false,
				label_color: Color::rgb(102, 102, 102),
			},
			edge: EdgeStyle {
				color: Color::rgb(194, 194, 194),
				arrow_color: Color::rgb(102, 102, 102),
			},
			link_label: LinkLabelStyle {
				fill: Color::rgb(255, 255, 255),
				stroke: Color::rgb(102, 102, 102),
				text_color: Color::rgb(51, 51, 51),
				missing_color: Color::rgb(255, 0, 0),
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::slate()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn supplied_label_renders_in_normal_styling() {
		let style = Theme::default().link_label;
		let (text, color) = style.display(Some("owns"));
		assert_eq!(text, "owns");
		assert_eq!(color, style.text_color);
	}

	#[test]
	fn missing_label_renders_placeholder_in_warning_color() {
		let style = Theme::default().link_label;
		let (text, color) = style.display(None);
		assert_eq!(text, MISSING_LABEL);
		assert_eq!(color, style.missing_color);
		assert_ne!(color, style.text_color);
	}

	#[test]
	fn opaque_colors_format_as_hex() {
		assert_eq!(Color::rgb(255, 246, 102).to_css(), "#fff666");
		assert_eq!(
			Color::rgba(140, 160, 180, 0.55).to_css(),
			"rgba(140, 160, 180, 0.55)"
		);
	}

	#[test]
	fn lighten_and_darken_move_toward_extremes() {
		let c = Color::rgb(100, 100, 100);
		assert_eq!(c.lighten(1.0).r, 255);
		assert_eq!(c.darken(1.0).r, 0);
		assert_eq!(c.lighten(0.0), c);
	}
}
