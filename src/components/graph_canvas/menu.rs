//! Radial (pie) context menu state machine.
//!
//! The menu is either closed or open on exactly one anchor node. Its entries
//! partition a full turn into equal annular wedges starting at 12 o'clock
//! and running clockwise; each wedge carries an icon glyph at its centroid
//! and a tooltip naming the action. Transitions always tear the previous
//! menu down before building the next, so rapid re-activation can never
//! leave two menus alive.

use std::f64::consts::{FRAC_PI_2, TAU};

use super::geometry::Point;
use super::simulation::NodeIdx;

/// One selectable action in the radial menu.
#[derive(Clone, Debug)]
pub struct MenuEntry {
	/// Stable identifier reported on selection.
	pub id: String,
	/// Action name shown in the wedge tooltip.
	pub label: String,
	/// Glyph drawn at the wedge centroid.
	pub glyph: char,
}

impl MenuEntry {
	/// Construct an entry.
	pub fn new(id: &str, label: &str, glyph: char) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
			glyph,
		}
	}
}

/// Radial menu geometry and policy.
#[derive(Clone, Debug)]
pub struct MenuConfig {
	/// Menu entries, one annular wedge each, clockwise from 12 o'clock.
	pub entries: Vec<MenuEntry>,
	/// Inner annulus radius in world units.
	pub inner_radius: f64,
	/// Outer annulus radius in world units.
	pub outer_radius: f64,
	/// Close the menu when a wedge is selected. The reference behavior
	/// leaves the menu open after selection, so this defaults to false;
	/// embedders that find that surprising can opt in to closing.
	pub close_on_select: bool,
}

impl Default for MenuConfig {
	fn default() -> Self {
		Self {
			entries: vec![
				MenuEntry::new("expand", "Expand", '+'),
				MenuEntry::new("inspect", "Inspect", 'i'),
				MenuEntry::new("hide", "Hide", '×'),
			],
			inner_radius: 40.0,
			outer_radius: 80.0,
			close_on_select: false,
		}
	}
}

/// An annular wedge of the open menu, in canvas angle convention (radians
/// from the +x axis, increasing toward +y).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wedge {
	pub start: f64,
	pub end: f64,
}

/// Which side of its wedge a tooltip should sit on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TooltipPlacement {
	/// To the right of the wedge.
	Right,
	/// Below the wedge.
	Bottom,
	/// To the left of the wedge.
	Left,
	/// Above the wedge.
	Top,
}

/// A request for the rendering collaborator to show a tooltip.
///
/// Coordinates are relative to the menu's anchor node, like the wedges
/// themselves.
#[derive(Clone, Debug)]
pub struct TooltipRequest {
	/// Action name to display.
	pub text: String,
	/// Anchor x relative to the menu anchor node.
	pub x: f64,
	/// Anchor y relative to the menu anchor node.
	pub y: f64,
	/// Side of the wedge to place the tooltip on.
	pub placement: TooltipPlacement,
}

/// Result of activating the menu on a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuTransition {
	/// The menu opened on the node.
	Opened,
	/// The menu was open on the same node and closed.
	Closed,
	/// The menu moved from `previous` to the node.
	Switched {
		/// Former anchor, already torn down.
		previous: NodeIdx,
	},
}

#[derive(Clone, Debug)]
struct OpenMenu {
	node: NodeIdx,
	hovered_wedge: Option<usize>,
}

/// The radial menu state machine.
#[derive(Clone, Debug)]
pub struct RadialMenu {
	config: MenuConfig,
	open: Option<OpenMenu>,
}

impl RadialMenu {
	/// Create a closed menu with the given configuration.
	pub fn new(config: MenuConfig) -> Self {
		Self { config, open: None }
	}

	/// Menu configuration.
	pub fn config(&self) -> &MenuConfig {
		&self.config
	}

	/// Whether a menu is currently open.
	pub fn is_open(&self) -> bool {
		self.open.is_some()
	}

	/// Node the menu is anchored to, if open.
	pub fn anchor(&self) -> Option<NodeIdx> {
		self.open.as_ref().map(|open| open.node)
	}

	/// Index of the hovered wedge, if any.
	pub fn hovered_wedge(&self) -> Option<usize> {
		self.open.as_ref().and_then(|open| open.hovered_wedge)
	}

	/// Activate the menu on `node`.
	///
	/// Open on the same node closes it; open on another node tears the old
	/// menu down and opens fresh; closed opens. Callers pin/unpin anchors
	/// according to the returned transition.
	pub fn toggle(&mut self, node: NodeIdx) -> MenuTransition {
		match self.open.take() {
			Some(open) if open.node == node => MenuTransition::Closed,
			Some(open) => {
				self.open = Some(OpenMenu {
					node,
					hovered_wedge: None,
				});
				MenuTransition::Switched {
					previous: open.node,
				}
			}
			None => {
				self.open = Some(OpenMenu {
					node,
					hovered_wedge: None,
				});
				MenuTransition::Opened
			}
		}
	}

	/// Close the menu if open, returning the former anchor.
	pub fn close(&mut self) -> Option<NodeIdx> {
		self.open.take().map(|open| open.node)
	}

	/// Number of wedges.
	pub fn wedge_count(&self) -> usize {
		self.config.entries.len()
	}

	/// Entry behind wedge `i`.
	pub fn entry(&self, i: usize) -> Option<&MenuEntry> {
		self.config.entries.get(i)
	}

	/// Arc of the `i`-th wedge.
	pub fn wedge(&self, i: usize) -> Wedge {
		let span = TAU / self.wedge_count().max(1) as f64;
		let start = -FRAC_PI_2 + span * i as f64;
		Wedge {
			start,
			end: start + span,
		}
	}

	/// Wedge centroid (mid-angle, mid-radius) relative to the anchor node.
	/// Icon glyphs and tooltips anchor here.
	pub fn wedge_centroid(&self, i: usize) -> Point {
		let wedge = self.wedge(i);
		let mid = (wedge.start + wedge.end) / 2.0;
		let radius = (self.config.inner_radius + self.config.outer_radius) / 2.0;
		Point::new(radius * mid.cos(), radius * mid.sin())
	}

	/// Hit-test a point in anchor-relative world coordinates against the
	/// open menu's wedges.
	pub fn hit_test(&self, dx: f64, dy: f64) -> Option<usize> {
		self.open.as_ref()?;
		let count = self.wedge_count();
		if count == 0 {
			return None;
		}

		let radius = (dx * dx + dy * dy).sqrt();
		if radius < self.config.inner_radius || radius > self.config.outer_radius {
			return None;
		}

		let rel = (dy.atan2(dx) + FRAC_PI_2).rem_euclid(TAU);
		let span = TAU / count as f64;
		Some(((rel / span) as usize).min(count - 1))
	}

	/// Update the hovered wedge; returns true when it changed.
	pub fn set_hovered_wedge(&mut self, wedge: Option<usize>) -> bool {
		match self.open.as_mut() {
			Some(open) if open.hovered_wedge != wedge => {
				open.hovered_wedge = wedge;
				true
			}
			_ => false,
		}
	}

	/// Tooltip request for the hovered wedge, anchored at its centroid.
	pub fn tooltip(&self) -> Option<TooltipRequest> {
		let open = self.open.as_ref()?;
		let i = open.hovered_wedge?;
		let entry = self.config.entries.get(i)?;
		let centroid = self.wedge_centroid(i);
		Some(TooltipRequest {
			text: entry.label.clone(),
			x: centroid.x,
			y: centroid.y,
			placement: Self::placement_for(centroid),
		})
	}

	/// Tooltip side from the centroid's dominant direction.
	fn placement_for(centroid: Point) -> TooltipPlacement {
		if centroid.x.abs() >= centroid.y.abs() {
			if centroid.x >= 0.0 {
				TooltipPlacement::Right
			} else {
				TooltipPlacement::Left
			}
		} else if centroid.y >= 0.0 {
			TooltipPlacement::Bottom
		} else {
			TooltipPlacement::Top
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn menu() -> RadialMenu {
		RadialMenu::new(MenuConfig::default())
	}

	#[test]
	fn wedges_partition_the_full_turn_equally() {
		let m = menu();
		let span = TAU / 3.0;
		for i in 0..3 {
			let w = m.wedge(i);
			assert!((w.end - w.start - span).abs() < 1e-9);
		}
		assert!((m.wedge(0).start - (-FRAC_PI_2)).abs() < 1e-9);
		assert!((m.wedge(2).end - (3.0 * FRAC_PI_2)).abs() < 1e-9);
	}

	#[test]
	fn toggle_transitions() {
		let mut m = menu();
		assert_eq!(m.toggle(4), MenuTransition::Opened);
		assert_eq!(m.anchor(), Some(4));

		assert_eq!(m.toggle(7), MenuTransition::Switched { previous: 4 });
		assert_eq!(m.anchor(), Some(7));

		assert_eq!(m.toggle(7), MenuTransition::Closed);
		assert!(!m.is_open());
	}

	#[test]
	fn rapid_double_activation_is_reentrancy_safe() {
		let mut m = menu();
		m.toggle(1);
		m.toggle(2);
		m.toggle(3);
		// Only ever one open menu, whatever the activation order was.
		assert_eq!(m.anchor(), Some(3));
	}

	#[test]
	fn hit_test_maps_angles_to_wedges() {
		let mut m = menu();
		m.toggle(0);

		// 12 o'clock, mid-annulus: first wedge.
		assert_eq!(m.hit_test(0.0, -60.0), Some(0));
		// Straight down: second wedge.
		assert_eq!(m.hit_test(0.0, 60.0), Some(1));
		// Straight left: third wedge.
		assert_eq!(m.hit_test(-60.0, 0.0), Some(2));
	}

	#[test]
	fn hit_test_respects_the_annulus() {
		let mut m = menu();
		m.toggle(0);

		assert_eq!(m.hit_test(0.0, -30.0), None, "inside the inner radius");
		assert_eq!(m.hit_test(0.0, -90.0), None, "outside the outer radius");
		assert_eq!(m.hit_test(0.0, -40.0), Some(0), "inner boundary counts");
	}

	#[test]
	fn hit_test_requires_an_open_menu() {
		let m = menu();
		assert_eq!(m.hit_test(0.0, -60.0), None);
	}

	#[test]
	fn default_tooltip_placements_match_the_wedge_sides() {
		let mut m = menu();
		m.toggle(0);

		m.set_hovered_wedge(Some(0));
		assert_eq!(m.tooltip().unwrap().placement, TooltipPlacement::Right);
		m.set_hovered_wedge(Some(1));
		assert_eq!(m.tooltip().unwrap().placement, TooltipPlacement::Bottom);
		m.set_hovered_wedge(Some(2));
		assert_eq!(m.tooltip().unwrap().placement, TooltipPlacement::Left);
	}

	#[test]
	fn tooltip_text_names_the_hovered_action() {
		let mut m = menu();
		m.toggle(0);
		m.set_hovered_wedge(Some(1));
		assert_eq!(m.tooltip().unwrap().text, "Inspect");
	}

	#[test]
	fn closing_discards_wedge_hover() {
		let mut m = menu();
		m.toggle(0);
		m.set_hovered_wedge(Some(2));
		assert_eq!(m.close(), Some(0));
		assert!(m.tooltip().is_none());
		assert_eq!(m.hovered_wedge(), None);
	}

	#[test]
	fn centroid_sits_at_mid_angle_mid_radius() {
		let m = menu();
		let c = m.wedge_centroid(1);
		// Second wedge of three spans 30°..150°; its mid-angle points
		// straight down.
		assert!(c.x.abs() < 1e-9);
		assert!((c.y - 60.0).abs() < 1e-9);
	}
}
