//! Visual theming for the graph canvas.
//!
//! Maps visual states to concrete fills and strokes, keeping presentation
//! out of the interaction controllers.

use super::types::VisualState;

/// RGBA color representation.
#[derive(Clone, Copy, Debug)]
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

/// Node fills across visual states for one root-flag variant.
#[derive(Clone, Copy, Debug)]
pub struct NodeFills {
	pub default_state: Color,
	pub hovered: Color,
	pub highlighted: Color,
	pub menu_anchor: Color,
}

impl NodeFills {
	/// Fill for a visual state.
	pub fn fill(&self, state: VisualState) -> Color {
		match state {
			VisualState::Default => self.default_state,
			VisualState::Hovered => self.hovered,
			VisualState::Highlighted => self.highlighted,
			VisualState::MenuAnchor => self.menu_anchor,
		}
	}
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Fills for plain nodes.
	pub plain: NodeFills,
	/// Fills for root-flagged nodes.
	pub root: NodeFills,
	/// Disk border color.
	pub stroke: Color,
	/// Disk border width in world units.
	pub stroke_width: f64,
	/// Border while hovered.
	pub hover_stroke: Color,
	/// Border width while hovered.
	pub hover_stroke_width: f64,
	/// Whether disks get a subtle inner gradient.
	pub use_gradient: bool,
	/// Label color on plain nodes.
	pub label_plain: Color,
	/// Label color on root nodes.
	pub label_root: Color,
	/// Label font in canvas shorthand.
	pub label_font: &'static str,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Line color for default edges.
	pub color: Color,
	/// Line color for highlighted edges.
	pub highlight_color: Color,
	/// Line width in world units.
	pub width: f64,
	/// Line width for highlighted edges.
	pub highlight_width: f64,
	/// Dash pattern (dash, gap) for default edges; highlighted edges draw
	/// solid.
	pub dash: (f64, f64),
	/// Arrowhead length on highlighted edges, in world units.
	pub arrow_size: f64,
}

/// Radial menu visual style.
#[derive(Clone, Debug)]
pub struct MenuStyle {
	/// Wedge fill.
	pub wedge_fill: Color,
	/// Wedge fill while hovered.
	pub wedge_hover_fill: Color,
	/// Stroke between wedges.
	pub wedge_stroke: Color,
	/// Icon glyph color.
	pub icon: Color,
	/// Icon glyph color on a hovered wedge.
	pub icon_hover: Color,
	/// Icon font in canvas shorthand.
	pub icon_font: &'static str,
	/// Tooltip background.
	pub tooltip_fill: Color,
	/// Tooltip text color.
	pub tooltip_text: Color,
	/// Tooltip font in canvas shorthand.
	pub tooltip_font: &'static str,
	/// Gap between a wedge and its tooltip, in world units.
	pub tooltip_offset: f64,
}

/// Background style.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color.
	pub color: Color,
	/// Secondary color for the radial gradient.
	pub color_secondary: Color,
	/// Whether to use the gradient.
	pub use_gradient: bool,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub node: NodeStyle,
	pub edge: EdgeStyle,
	pub menu: MenuStyle,
}

impl Theme {
	/// Light theme matching the reference palette (default).
	pub fn parchment() -> Self {
		Self {
			name: "parchment",
			background: BackgroundStyle {
				color: Color::rgb(250, 249, 252),
				color_secondary: Color::rgb(241, 238, 246),
				use_gradient: true,
			},
			node: NodeStyle {
				plain: NodeFills {
					default_state: Color::rgb(0xd1, 0xc2, 0xd3),
					hovered: Color::rgb(0xc8, 0xad, 0xc4),
					highlighted: Color::rgb(0xdd, 0xce, 0xde),
					menu_anchor: Color::rgb(0x80, 0x6d, 0x9e),
				},
				root: NodeFills {
					default_state: Color::rgb(0x52, 0x52, 0x88),
					hovered: Color::rgb(0x4e, 0x2a, 0x40),
					highlighted: Color::rgb(0x6a, 0x69, 0xa3),
					menu_anchor: Color::rgb(0x80, 0x6d, 0x9e),
				},
				stroke: Color::rgb(0x52, 0x52, 0x88),
				stroke_width: 0.5,
				hover_stroke: Color::rgb(0xd1, 0xc2, 0xd3),
				hover_stroke_width: 6.0,
				use_gradient: true,
				label_plain: Color::rgb(0x33, 0x33, 0x33),
				label_root: Color::rgb(0xff, 0xff, 0xff),
				label_font: "12px sans-serif",
			},
			edge: EdgeStyle {
				color: Color::rgb(0x80, 0x6d, 0x9e),
				highlight_color: Color::rgb(0x80, 0x6d, 0x9e),
				width: 1.5,
				highlight_width: 2.5,
				dash: (5.0, 5.0),
				arrow_size: 10.0,
			},
			menu: MenuStyle {
				wedge_fill: Color::rgb(0xd1, 0xc2, 0xd3),
				wedge_hover_fill: Color::rgb(0x52, 0x52, 0x88),
				wedge_stroke: Color::rgb(0xff, 0xff, 0xff),
				icon: Color::rgb(0x52, 0x52, 0x88),
				icon_hover: Color::rgb(0xff, 0xff, 0xff),
				icon_font: "14px sans-serif",
				tooltip_fill: Color::rgba(40, 36, 52, 0.9),
				tooltip_text: Color::rgb(0xff, 0xff, 0xff),
				tooltip_font: "11px sans-serif",
				tooltip_offset: 14.0,
			},
		}
	}

	/// Dark variant of the same palette.
	pub fn midnight() -> Self {
		let mut theme = Self::parchment();
		theme.name = "midnight";
		theme.background = BackgroundStyle {
			color: Color::rgb(24, 22, 32),
			color_secondary: Color::rgb(32, 29, 42),
			use_gradient: true,
		};
		theme.node.plain.highlighted = Color::rgb(0xe4, 0xd8, 0xe5);
		theme.node.label_plain = Color::rgb(0x22, 0x22, 0x22);
		theme.edge.color = Color::rgba(0xa0, 0x8f, 0xbd, 0.8);
		theme.edge.highlight_color = Color::rgb(0xb8, 0xa8, 0xd4);
		theme
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::parchment()
	}
}
