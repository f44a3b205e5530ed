//! Per-view interaction state and event routing.
//!
//! [`GraphState`] owns every controller for one canvas: the force
//! simulation, hover highlight, radial menu, viewport transform, and the
//! in-progress drag/pan gestures. It is constructed when the component
//! mounts, mutated only by the event handlers and the animation loop (all on
//! the one UI thread, each handler running to completion), and dropped on
//! unmount.
//!
//! Structural exclusion rules live here: an open menu suppresses hover
//! mutation and drag starts, clicks check menu wedges before nodes before
//! the background, and a drag that actually moved swallows the click fired
//! on release.

use log::{info, warn};

use super::config::{GraphConfig, NodeConfig};
use super::geometry::{Point, distance};
use super::highlight::Highlight;
use super::menu::{MenuTransition, RadialMenu, TooltipRequest};
use super::simulation::{EdgeLine, NodeIdx, Simulation};
use super::types::{GraphData, VisualState};
use super::viewport::{Gesture, Transform, Viewport};

/// Display metadata for one node, parallel to the simulation's node list.
#[derive(Clone, Debug)]
pub struct NodeMeta {
	/// Input identifier, reported with menu selections.
	pub id: String,
	/// Display label.
	pub label: String,
	/// Root nodes use the distinct fill variant.
	pub root: bool,
}

/// Tracks an in-progress node drag.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<NodeIdx>,
	/// Set once the pointer travels past the click-suppression threshold.
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
}

/// Tracks an in-progress canvas pan.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// A menu selection reported to the embedder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuSelection {
	/// Id of the node the menu is anchored to.
	pub node_id: String,
	/// Id of the selected menu entry.
	pub entry_id: String,
}

/// Pointer travel (screen pixels) past which a gesture counts as a drag and
/// swallows the click fired on release.
const DRAG_CLICK_THRESHOLD: f64 = 3.0;

/// Interaction state for one graph canvas.
pub struct GraphState {
	sim: Simulation,
	meta: Vec<NodeMeta>,
	highlight: Highlight,
	menu: RadialMenu,
	viewport: Viewport,
	drag: DragState,
	pan: PanState,
	node_config: NodeConfig,
	edge_lines: Vec<EdgeLine>,
	width: f64,
	height: f64,
	suppress_click: bool,
}

impl GraphState {
	/// Build the state for a freshly mounted canvas.
	pub fn new(data: &GraphData, config: GraphConfig, width: f64, height: f64) -> Self {
		let sim = Simulation::new(data, config.force);
		if sim.dropped_links() > 0 {
			warn!(
				"graph-canvas: skipped {} links referencing unknown node ids",
				sim.dropped_links()
			);
		}

		let meta = data
			.nodes
			.iter()
			.map(|node| NodeMeta {
				id: node.id.clone(),
				label: node.label.clone(),
				root: node.root,
			})
			.collect();

		let mut viewport = Viewport::new(config.zoom);
		viewport.apply(Gesture::Reset(Transform::centered(width, height)));

		let mut edge_lines = Vec::new();
		sim.edge_lines(config.node.radius, &mut edge_lines);

		Self {
			sim,
			meta,
			highlight: Highlight::default(),
			menu: RadialMenu::new(config.menu),
			viewport,
			drag: DragState::default(),
			pan: PanState::default(),
			node_config: config.node,
			edge_lines,
			width,
			height,
			suppress_click: false,
		}
	}

	// --- queries for the renderer ---

	/// Number of nodes.
	pub fn node_count(&self) -> usize {
		self.meta.len()
	}

	/// Display metadata of a node.
	pub fn node_meta(&self, idx: NodeIdx) -> &NodeMeta {
		&self.meta[idx]
	}

	/// Current world position of a node.
	pub fn node_position(&self, idx: NodeIdx) -> Point {
		self.sim.position(idx)
	}

	/// Trimmed edge endpoints, recomputed every tick.
	pub fn edge_lines(&self) -> &[EdgeLine] {
		&self.edge_lines
	}

	/// Resolved links as index pairs, parallel to [`GraphState::edge_lines`].
	pub fn links(&self) -> &[(NodeIdx, NodeIdx)] {
		self.sim.links()
	}

	/// Current viewport transform.
	pub fn transform(&self) -> Transform {
		self.viewport.transform()
	}

	/// The radial menu.
	pub fn menu(&self) -> &RadialMenu {
		&self.menu
	}

	/// World position of the open menu's anchor node.
	pub fn menu_anchor_position(&self) -> Option<Point> {
		self.menu.anchor().map(|idx| self.sim.position(idx))
	}

	/// Pending tooltip request from the menu, if a wedge is hovered.
	pub fn tooltip(&self) -> Option<TooltipRequest> {
		self.menu.tooltip()
	}

	/// Node rendering configuration.
	pub fn node_config(&self) -> &NodeConfig {
		&self.node_config
	}

	/// Canvas width in pixels.
	pub fn width(&self) -> f64 {
		self.width
	}

	/// Canvas height in pixels.
	pub fn height(&self) -> f64 {
		self.height
	}

	/// Visual state of a node. The menu anchor wins; hover emphasis is only
	/// ever present while no menu is open.
	pub fn node_visual(&self, idx: NodeIdx) -> VisualState {
		if self.menu.anchor() == Some(idx) {
			return VisualState::MenuAnchor;
		}
		self.highlight.node_state(idx, self.sim.links())
	}

	/// Visual state of the edge at `edge_idx`.
	pub fn edge_visual(&self, edge_idx: usize) -> VisualState {
		self.highlight.edge_state(self.sim.links()[edge_idx])
	}

	// --- animation ---

	/// Advance the simulation and relayout edges. Called once per animation
	/// frame; a settled simulation makes this a near-no-op.
	pub fn tick(&mut self, dt: f64) {
		self.sim.tick(dt);
		self.sim
			.edge_lines(self.node_config.radius, &mut self.edge_lines);
	}

	/// Record a new canvas size.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	// --- pointer events (screen coordinates) ---

	/// Topmost node under a screen point, if any.
	pub fn node_at(&self, sx: f64, sy: f64) -> Option<NodeIdx> {
		let world = self.viewport.screen_to_world(sx, sy);
		let mut found = None;
		for idx in 0..self.sim.node_count() {
			if distance(self.sim.position(idx), world) <= self.node_config.radius {
				found = Some(idx);
			}
		}
		found
	}

	/// Pointer pressed.
	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		if self.menu.is_open() {
			// No drag may start while a menu is open; presses over the
			// menu or a node wait for the click, anything else pans.
			if self.wedge_at(sx, sy).is_some() || self.node_at(sx, sy).is_some() {
				return;
			}
			self.begin_pan(sx, sy);
			return;
		}

		if let Some(idx) = self.node_at(sx, sy) {
			self.drag = DragState {
				active: true,
				node: Some(idx),
				moved: false,
				start_x: sx,
				start_y: sy,
			};
			let p = self.sim.position(idx);
			self.sim.pin(idx, p.x, p.y);
			self.sim.reheat();
		} else {
			self.begin_pan(sx, sy);
		}
	}

	/// Pointer moved.
	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if self.drag.active {
			if let Some(idx) = self.drag.node {
				if !self.drag.moved {
					let travel = (sx - self.drag.start_x).hypot(sy - self.drag.start_y);
					self.drag.moved = travel > DRAG_CLICK_THRESHOLD;
				}
				let world = self.viewport.screen_to_world(sx, sy);
				self.sim.pin(idx, world.x, world.y);
			}
			return;
		}

		if self.pan.active {
			if !self.pan.moved {
				let travel = (sx - self.pan.start_x).hypot(sy - self.pan.start_y);
				self.pan.moved = travel > DRAG_CLICK_THRESHOLD;
			}
			self.viewport.apply(Gesture::Pan {
				x: self.pan.transform_start_x + (sx - self.pan.start_x),
				y: self.pan.transform_start_y + (sy - self.pan.start_y),
			});
			return;
		}

		if self.menu.is_open() {
			// Node hover is suppressed wholesale; only wedges react.
			let wedge = self.wedge_at(sx, sy);
			self.menu.set_hovered_wedge(wedge);
			return;
		}

		self.highlight.set(self.node_at(sx, sy));
	}

	/// Pointer released.
	pub fn pointer_up(&mut self) {
		if self.drag.active {
			if let Some(idx) = self.drag.node {
				self.sim.unpin(idx);
			}
			self.sim.cool();
			self.suppress_click = self.drag.moved;
			self.drag = DragState::default();
		}
		if self.pan.active {
			self.suppress_click = self.suppress_click || self.pan.moved;
			self.pan = PanState::default();
		}
	}

	/// Pointer left the canvas: cancel gestures and clear hover. An open
	/// menu stays open.
	pub fn pointer_leave(&mut self) {
		if self.drag.active {
			if let Some(idx) = self.drag.node {
				self.sim.unpin(idx);
			}
			self.sim.cool();
		}
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.highlight.clear();
		self.menu.set_hovered_wedge(None);
	}

	/// Click. Checks menu wedges, then nodes, then the background, and
	/// returns a selection when a wedge was activated.
	pub fn click(&mut self, sx: f64, sy: f64) -> Option<MenuSelection> {
		if self.suppress_click {
			self.suppress_click = false;
			return None;
		}

		if self.menu.is_open() {
			if let Some(wedge) = self.wedge_at(sx, sy) {
				return self.select_wedge(wedge);
			}
		}

		if let Some(idx) = self.node_at(sx, sy) {
			self.activate_menu(idx);
			return None;
		}

		if self.menu.is_open() {
			self.close_menu();
		}
		None
	}

	/// Wheel gesture. Without the ctrl/cmd modifier this is a scroll, not a
	/// zoom request, and is deliberately ignored.
	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64, modifier: bool) {
		if !modifier {
			return;
		}
		let requested = self.viewport.wheel_zoom(sx, sy, delta_y);
		self.viewport.apply(Gesture::Zoom(requested));
	}

	// --- internals ---

	fn begin_pan(&mut self, sx: f64, sy: f64) {
		let t = self.viewport.transform();
		self.pan = PanState {
			active: true,
			moved: false,
			start_x: sx,
			start_y: sy,
			transform_start_x: t.x,
			transform_start_y: t.y,
		};
	}

	/// Wedge of the open menu under a screen point.
	fn wedge_at(&self, sx: f64, sy: f64) -> Option<usize> {
		let anchor = self.menu.anchor()?;
		let world = self.viewport.screen_to_world(sx, sy);
		let center = self.sim.position(anchor);
		self.menu.hit_test(world.x - center.x, world.y - center.y)
	}

	/// Apply the open/close/switch transition for an activation on `node`,
	/// tearing down the previous anchor first.
	fn activate_menu(&mut self, node: NodeIdx) {
		self.highlight.clear();
		match self.menu.toggle(node) {
			MenuTransition::Opened => self.pin_anchor(node),
			MenuTransition::Closed => self.sim.unpin(node),
			MenuTransition::Switched { previous } => {
				self.sim.unpin(previous);
				self.pin_anchor(node);
			}
		}
	}

	fn pin_anchor(&mut self, node: NodeIdx) {
		let p = self.sim.position(node);
		self.sim.pin(node, p.x, p.y);
	}

	fn close_menu(&mut self) {
		if let Some(previous) = self.menu.close() {
			self.sim.unpin(previous);
		}
	}

	fn select_wedge(&mut self, wedge: usize) -> Option<MenuSelection> {
		let anchor = self.menu.anchor()?;
		let selection = self.menu.entry(wedge).map(|entry| MenuSelection {
			node_id: self.meta[anchor].id.clone(),
			entry_id: entry.id.clone(),
		});
		if let Some(selection) = &selection {
			info!(
				"graph-canvas: menu entry '{}' selected on node '{}'",
				selection.entry_id, selection.node_id
			);
			if self.menu.config().close_on_select {
				self.close_menu();
			}
		}
		selection
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph_canvas::types::{GraphLink, GraphNode};

	const WIDTH: f64 = 800.0;
	const HEIGHT: f64 = 600.0;

	fn triangle() -> GraphData {
		GraphData {
			nodes: ["1", "2", "3"]
				.iter()
				.map(|id| GraphNode {
					id: (*id).into(),
					label: format!("Node {id}"),
					root: false,
				})
				.collect(),
			links: [("1", "2"), ("2", "3"), ("3", "1")]
				.iter()
				.map(|(s, t)| GraphLink {
					source: (*s).into(),
					target: (*t).into(),
				})
				.collect(),
		}
	}

	fn state() -> GraphState {
		GraphState::new(&triangle(), GraphConfig::default(), WIDTH, HEIGHT)
	}

	/// Screen coordinates of a node's center.
	fn screen_of(s: &GraphState, idx: NodeIdx) -> (f64, f64) {
		let t = s.transform();
		let p = s.node_position(idx);
		(p.x * t.k + t.x, p.y * t.k + t.y)
	}

	fn click_node(s: &mut GraphState, idx: NodeIdx) {
		let (sx, sy) = screen_of(s, idx);
		s.click(sx, sy);
	}

	/// Screen coordinates of a wedge centroid of the open menu.
	fn screen_of_wedge(s: &GraphState, wedge: usize) -> (f64, f64) {
		let t = s.transform();
		let anchor = s.menu_anchor_position().unwrap();
		let c = s.menu().wedge_centroid(wedge);
		(
			(anchor.x + c.x) * t.k + t.x,
			(anchor.y + c.y) * t.k + t.y,
		)
	}

	#[test]
	fn hovering_a_node_highlights_its_neighborhood_and_reverts() {
		let mut s = state();
		let (sx, sy) = screen_of(&s, 1);
		s.pointer_move(sx, sy);

		assert_eq!(s.node_visual(1), VisualState::Hovered);
		assert_eq!(s.node_visual(0), VisualState::Highlighted);
		assert_eq!(s.node_visual(2), VisualState::Highlighted);
		// Links are (0,1), (1,2), (2,0): the first two touch node 1.
		assert_eq!(s.edge_visual(0), VisualState::Highlighted);
		assert_eq!(s.edge_visual(1), VisualState::Highlighted);
		assert_eq!(s.edge_visual(2), VisualState::Default);

		// Move to empty canvas: every state reverts.
		s.pointer_move(5.0, 5.0);
		for idx in 0..3 {
			assert_eq!(s.node_visual(idx), VisualState::Default);
		}
		for edge in 0..3 {
			assert_eq!(s.edge_visual(edge), VisualState::Default);
		}
	}

	#[test]
	fn clicking_a_node_opens_the_menu_and_pins_it() {
		let mut s = state();
		click_node(&mut s, 0);

		assert_eq!(s.menu().anchor(), Some(0));
		assert_eq!(s.node_visual(0), VisualState::MenuAnchor);
		assert!(s.sim.is_pinned(0));
	}

	#[test]
	fn clicking_the_anchor_again_toggles_the_menu_closed() {
		let mut s = state();
		click_node(&mut s, 0);
		click_node(&mut s, 0);

		assert!(!s.menu().is_open());
		assert!(!s.sim.is_pinned(0));
		assert_eq!(s.node_visual(0), VisualState::Default);
	}

	#[test]
	fn switching_anchors_restores_the_previous_node_completely() {
		let mut s = state();
		click_node(&mut s, 0);
		click_node(&mut s, 1);

		assert_eq!(s.menu().anchor(), Some(1));
		assert!(!s.sim.is_pinned(0));
		assert!(s.sim.is_pinned(1));
		assert_eq!(s.node_visual(0), VisualState::Default);
		assert_eq!(s.node_visual(1), VisualState::MenuAnchor);
	}

	#[test]
	fn background_click_closes_the_menu_and_restores_the_anchor() {
		let mut s = state();
		click_node(&mut s, 0);
		s.click(5.0, 5.0);

		assert!(!s.menu().is_open());
		assert!(!s.sim.is_pinned(0));
		assert_eq!(s.node_visual(0), VisualState::Default);
	}

	#[test]
	fn hover_is_suppressed_while_a_menu_is_open() {
		let mut s = state();
		click_node(&mut s, 0);

		let (sx, sy) = screen_of(&s, 1);
		s.pointer_move(sx, sy);

		assert_eq!(s.node_visual(1), VisualState::Default);
		assert_eq!(s.edge_visual(0), VisualState::Default);
	}

	#[test]
	fn wedge_click_reports_a_selection_and_leaves_the_menu_open() {
		let mut s = state();
		click_node(&mut s, 0);

		let (sx, sy) = screen_of_wedge(&s, 0);
		let selection = s.click(sx, sy);

		assert_eq!(
			selection,
			Some(MenuSelection {
				node_id: "1".into(),
				entry_id: "expand".into(),
			})
		);
		assert!(s.menu().is_open(), "selection does not close by default");
	}

	#[test]
	fn close_on_select_policy_closes_and_unpins() {
		let mut config = GraphConfig::default();
		config.menu.close_on_select = true;
		let mut s = GraphState::new(&triangle(), config, WIDTH, HEIGHT);

		click_node(&mut s, 0);
		let (sx, sy) = screen_of_wedge(&s, 1);
		let selection = s.click(sx, sy);

		assert_eq!(selection.unwrap().entry_id, "inspect");
		assert!(!s.menu().is_open());
		assert!(!s.sim.is_pinned(0));
	}

	#[test]
	fn wedge_hover_raises_a_tooltip_request() {
		let mut s = state();
		click_node(&mut s, 0);
		assert!(s.tooltip().is_none());

		let (sx, sy) = screen_of_wedge(&s, 0);
		s.pointer_move(sx, sy);
		let tooltip = s.tooltip().expect("hovered wedge requests a tooltip");
		assert_eq!(tooltip.text, "Expand");

		s.pointer_move(5.0, 5.0);
		assert!(s.tooltip().is_none());
	}

	#[test]
	fn menu_anchor_stays_pinned_while_the_simulation_runs() {
		let mut s = state();
		click_node(&mut s, 0);
		let before = s.node_position(0);
		for _ in 0..100 {
			s.tick(0.016);
		}
		assert_eq!(s.node_position(0), before);
	}

	#[test]
	fn dragging_pins_the_node_to_the_pointer() {
		let mut s = state();
		let (sx, sy) = screen_of(&s, 0);

		s.pointer_down(sx, sy);
		assert!(s.sim.is_pinned(0));

		s.pointer_move(sx + 30.0, sy - 10.0);
		for _ in 0..10 {
			s.tick(0.016);
		}
		let p = s.node_position(0);
		let world = s.viewport.screen_to_world(sx + 30.0, sy - 10.0);
		assert_eq!(p, world);

		s.pointer_up();
		assert!(!s.sim.is_pinned(0));
		s.tick(0.016);
		assert_ne!(s.node_position(0), p, "forces resume after release");
	}

	#[test]
	fn a_real_drag_swallows_the_following_click() {
		let mut s = state();
		let (sx, sy) = screen_of(&s, 0);

		s.pointer_down(sx, sy);
		s.pointer_move(sx + 30.0, sy);
		s.pointer_up();
		let selection = s.click(sx + 30.0, sy);

		assert!(selection.is_none());
		assert!(!s.menu().is_open(), "drag release must not open a menu");
	}

	#[test]
	fn drag_cannot_start_while_a_menu_is_open() {
		let mut s = state();
		click_node(&mut s, 0);

		let (sx, sy) = screen_of(&s, 1);
		s.pointer_down(sx, sy);
		assert!(!s.drag.active);
		assert!(!s.sim.is_pinned(1));
	}

	#[test]
	fn panning_moves_the_translation_and_never_the_scale() {
		let mut s = state();
		let k_before = s.transform().k;
		let t_before = s.transform();

		s.pointer_down(5.0, 5.0);
		s.pointer_move(45.0, 25.0);
		s.pointer_up();

		let t = s.transform();
		assert_eq!(t.k, k_before);
		assert_eq!(t.x, t_before.x + 40.0);
		assert_eq!(t.y, t_before.y + 20.0);
	}

	#[test]
	fn plain_wheel_is_ignored_and_modifier_wheel_zooms_clamped() {
		let mut s = state();
		let before = s.transform();

		s.wheel(400.0, 300.0, -1.0, false);
		assert_eq!(s.transform(), before);

		for _ in 0..200 {
			s.wheel(400.0, 300.0, -1.0, true);
		}
		assert_eq!(s.transform().k, 10.0);
	}

	#[test]
	fn pointer_leave_cancels_gestures_but_keeps_the_menu() {
		let mut s = state();
		click_node(&mut s, 0);
		s.pointer_leave();

		assert!(s.menu().is_open());
		assert!(s.sim.is_pinned(0));
		assert!(!s.drag.active);
		assert!(!s.pan.active);
	}
}
