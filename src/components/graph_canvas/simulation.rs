//! Force-directed layout simulation.
//!
//! Integrates charge repulsion, link springs with a rest length, and a
//! centering pull over discrete time steps. A scalar energy level (`alpha`)
//! decays toward a target and scales every force, so the layout settles once
//! motion dies down and stops consuming work; interactions reheat it by
//! raising the target. Nodes can be pinned to an externally supplied
//! position, which excludes them from integration until released.

use std::collections::HashMap;
use std::f64::consts::TAU;

use super::config::ForceConfig;
use super::geometry::{Point, edge_point};
use super::types::GraphData;

/// Dense index of a node in the simulation.
pub type NodeIdx = usize;

/// Both endpoints of an edge line, trimmed to the node disk boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeLine {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
}

#[derive(Clone, Debug)]
struct SimNode {
	x: f64,
	y: f64,
	vx: f64,
	vy: f64,
	/// While set, integration holds the node exactly here.
	pin: Option<Point>,
}

/// Speed cap in world units per reference tick.
const MAX_SPEED: f64 = 25.0;

/// The force simulation over one graph.
pub struct Simulation {
	nodes: Vec<SimNode>,
	links: Vec<(NodeIdx, NodeIdx)>,
	alpha: f64,
	alpha_target: f64,
	dropped_links: usize,
	config: ForceConfig,
	forces: Vec<(f64, f64)>,
}

impl Simulation {
	/// Build a simulation from input data.
	///
	/// Nodes are seeded deterministically on a ring of radius
	/// `link_distance` around the world origin. Links referencing unknown
	/// node ids are skipped; the count is available via
	/// [`Simulation::dropped_links`].
	pub fn new(data: &GraphData, config: ForceConfig) -> Self {
		let count = data.nodes.len();
		let mut nodes = Vec::with_capacity(count);
		let mut id_to_idx = HashMap::new();

		for (i, node) in data.nodes.iter().enumerate() {
			let angle = i as f64 * TAU / count.max(1) as f64;
			nodes.push(SimNode {
				x: config.link_distance * angle.cos(),
				y: config.link_distance * angle.sin(),
				vx: 0.0,
				vy: 0.0,
				pin: None,
			});
			id_to_idx.insert(node.id.as_str(), i);
		}

		let mut links = Vec::with_capacity(data.links.len());
		let mut dropped_links = 0;
		for link in &data.links {
			match (
				id_to_idx.get(link.source.as_str()),
				id_to_idx.get(link.target.as_str()),
			) {
				(Some(&src), Some(&tgt)) => links.push((src, tgt)),
				_ => dropped_links += 1,
			}
		}

		Self {
			forces: vec![(0.0, 0.0); count],
			nodes,
			links,
			alpha: 1.0,
			alpha_target: 0.0,
			dropped_links,
			config,
		}
	}

	/// Number of simulated nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Resolved links as pairs of node indices, in input order.
	pub fn links(&self) -> &[(NodeIdx, NodeIdx)] {
		&self.links
	}

	/// Input links that referenced unknown node ids and were skipped.
	pub fn dropped_links(&self) -> usize {
		self.dropped_links
	}

	/// Current position of a node.
	pub fn position(&self, idx: NodeIdx) -> Point {
		let node = &self.nodes[idx];
		Point::new(node.x, node.y)
	}

	/// Pin a node to a position. Integration holds it exactly there and
	/// accumulates no velocity until [`Simulation::unpin`].
	pub fn pin(&mut self, idx: NodeIdx, x: f64, y: f64) {
		let node = &mut self.nodes[idx];
		node.pin = Some(Point::new(x, y));
		node.x = x;
		node.y = y;
		node.vx = 0.0;
		node.vy = 0.0;
	}

	/// Release a pinned node back to free integration.
	pub fn unpin(&mut self, idx: NodeIdx) {
		self.nodes[idx].pin = None;
	}

	/// Whether a node is currently pinned.
	pub fn is_pinned(&self, idx: NodeIdx) -> bool {
		self.nodes[idx].pin.is_some()
	}

	/// Current energy level.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Raise the energy target so integration resumes and keeps running
	/// while an interaction (drag) is in progress.
	pub fn reheat(&mut self) {
		self.alpha_target = self.config.reheat_target;
	}

	/// Let the energy decay back to zero.
	pub fn cool(&mut self) {
		self.alpha_target = 0.0;
	}

	/// True once energy has decayed below the floor with no target holding
	/// it up. A settled simulation skips integration entirely.
	pub fn settled(&self) -> bool {
		self.alpha < self.config.alpha_min && self.alpha_target == 0.0
	}

	/// Advance the simulation by `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		let approach = 1.0 - (-self.config.alpha_decay * dt).exp();
		self.alpha += (self.alpha_target - self.alpha) * approach;

		if self.settled() {
			return;
		}
		self.integrate(dt);
	}

	fn integrate(&mut self, dt: f64) {
		let ts = (dt * 60.0).clamp(0.25, 3.0);
		let damping = self.config.velocity_decay.powf(ts);

		self.forces.resize(self.nodes.len(), (0.0, 0.0));
		self.forces.fill((0.0, 0.0));

		// Pairwise charge. Graphs at this scale stay small enough that the
		// quadratic pass beats maintaining a spatial index.
		for i in 0..self.nodes.len() {
			for j in (i + 1)..self.nodes.len() {
				let (ux, uy, dist_sq) = Self::direction(&self.nodes, i, j);
				let repulsion =
					-self.config.charge_strength / (dist_sq + self.config.charge_softening);
				self.forces[i].0 += ux * repulsion;
				self.forces[i].1 += uy * repulsion;
				self.forces[j].0 -= ux * repulsion;
				self.forces[j].1 -= uy * repulsion;
			}
		}

		// Link springs toward the rest distance.
		for &(src, tgt) in &self.links {
			if src == tgt {
				continue;
			}
			let (ux, uy, dist_sq) = Self::direction(&self.nodes, src, tgt);
			let displacement = dist_sq.sqrt() - self.config.link_distance;
			let spring = displacement * self.config.link_strength;
			self.forces[src].0 -= ux * spring;
			self.forces[src].1 -= uy * spring;
			self.forces[tgt].0 += ux * spring;
			self.forces[tgt].1 += uy * spring;
		}

		// Centering pull toward the origin.
		for (i, node) in self.nodes.iter().enumerate() {
			self.forces[i].0 -= node.x * self.config.center_strength;
			self.forces[i].1 -= node.y * self.config.center_strength;
		}

		for (node, force) in self.nodes.iter_mut().zip(&self.forces) {
			if let Some(pin) = node.pin {
				node.x = pin.x;
				node.y = pin.y;
				node.vx = 0.0;
				node.vy = 0.0;
				continue;
			}

			node.vx = (node.vx + force.0 * self.alpha * ts) * damping;
			node.vy = (node.vy + force.1 * self.alpha * ts) * damping;

			let speed = (node.vx * node.vx + node.vy * node.vy).sqrt();
			if speed > MAX_SPEED {
				node.vx *= MAX_SPEED / speed;
				node.vy *= MAX_SPEED / speed;
			}

			node.x += node.vx * ts;
			node.y += node.vy * ts;
		}
	}

	/// Unit vector from node `i` toward node `j` plus the squared distance.
	/// Coincident nodes get a deterministic direction derived from their
	/// indices so force accumulation never divides by zero.
	fn direction(nodes: &[SimNode], i: NodeIdx, j: NodeIdx) -> (f64, f64, f64) {
		let (dx, dy) = (nodes[i].x - nodes[j].x, nodes[i].y - nodes[j].y);
		let dist_sq = dx * dx + dy * dy;
		if dist_sq > 1e-12 {
			let dist = dist_sq.sqrt();
			(dx / dist, dy / dist, dist_sq)
		} else {
			let angle = (i as f64 * 0.618_034 + j as f64 * 0.414_214) * TAU;
			(angle.cos(), angle.sin(), dist_sq)
		}
	}

	/// Recompute every edge's trimmed endpoints into `out`.
	pub fn edge_lines(&self, radius: f64, out: &mut Vec<EdgeLine>) {
		out.clear();
		out.reserve(self.links.len());
		for &(src, tgt) in &self.links {
			let a = edge_point(self.position(src), self.position(tgt), radius);
			let b = edge_point(self.position(tgt), self.position(src), radius);
			out.push(EdgeLine {
				x1: a.x,
				y1: a.y,
				x2: b.x,
				y2: b.y,
			});
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph_canvas::types::{GraphLink, GraphNode};

	fn data(ids: &[&str], links: &[(&str, &str)]) -> GraphData {
		GraphData {
			nodes: ids
				.iter()
				.map(|id| GraphNode {
					id: (*id).into(),
					label: format!("Node {id}"),
					root: false,
				})
				.collect(),
			links: links
				.iter()
				.map(|(s, t)| GraphLink {
					source: (*s).into(),
					target: (*t).into(),
				})
				.collect(),
		}
	}

	fn sim(ids: &[&str], links: &[(&str, &str)]) -> Simulation {
		Simulation::new(&data(ids, links), ForceConfig::default())
	}

	#[test]
	fn seeding_is_deterministic() {
		let a = sim(&["1", "2", "3"], &[("1", "2")]);
		let b = sim(&["1", "2", "3"], &[("1", "2")]);
		for i in 0..3 {
			assert_eq!(a.position(i), b.position(i));
		}
	}

	#[test]
	fn dangling_links_are_dropped() {
		let s = sim(&["1", "2"], &[("1", "2"), ("1", "ghost"), ("ghost", "2")]);
		assert_eq!(s.links(), &[(0, 1)]);
		assert_eq!(s.dropped_links(), 2);
	}

	#[test]
	fn stretched_link_pulls_endpoints_together() {
		let mut s = sim(&["1", "2"], &[("1", "2")]);
		s.pin(0, -100.0, 0.0);
		s.pin(1, 100.0, 0.0);
		s.unpin(0);
		s.unpin(1);
		let before = (s.position(1).x - s.position(0).x).abs();
		s.tick(0.016);
		let after = (s.position(1).x - s.position(0).x).abs();
		assert!(after < before, "expected {after} < {before}");
	}

	#[test]
	fn close_unlinked_nodes_repel() {
		let mut s = sim(&["1", "2"], &[]);
		s.pin(0, -1.0, 0.0);
		s.pin(1, 1.0, 0.0);
		s.unpin(0);
		s.unpin(1);
		let before = (s.position(1).x - s.position(0).x).abs();
		s.tick(0.016);
		let after = (s.position(1).x - s.position(0).x).abs();
		assert!(after > before, "expected {after} > {before}");
	}

	#[test]
	fn pinned_node_holds_exact_position_through_ticks() {
		let mut s = sim(&["1", "2", "3"], &[("1", "2"), ("2", "3")]);
		s.pin(1, 5.0, 5.0);
		s.reheat();
		for _ in 0..50 {
			s.tick(0.016);
		}
		assert_eq!(s.position(1), Point::new(5.0, 5.0));
		assert!(s.is_pinned(1));
	}

	#[test]
	fn released_node_resumes_free_movement() {
		let mut s = sim(&["1", "2"], &[("1", "2")]);
		s.pin(0, -200.0, 0.0);
		s.reheat();
		s.tick(0.016);
		assert_eq!(s.position(0), Point::new(-200.0, 0.0));

		s.unpin(0);
		s.tick(0.016);
		assert!(!s.is_pinned(0));
		assert_ne!(s.position(0), Point::new(-200.0, 0.0));
	}

	#[test]
	fn simulation_settles_and_reheats() {
		let mut s = sim(&["1", "2", "3"], &[("1", "2")]);
		for _ in 0..20_000 {
			s.tick(0.016);
		}
		assert!(s.settled());

		s.reheat();
		assert!(!s.settled());
		for _ in 0..50 {
			s.tick(0.016);
		}
		assert!(s.alpha() > ForceConfig::default().alpha_min);

		s.cool();
		for _ in 0..20_000 {
			s.tick(0.016);
		}
		assert!(s.settled());
	}

	#[test]
	fn coincident_nodes_stay_finite() {
		let mut s = sim(&["1", "2"], &[("1", "2")]);
		s.pin(0, 3.0, 3.0);
		s.pin(1, 3.0, 3.0);
		s.unpin(0);
		s.unpin(1);
		for _ in 0..10 {
			s.tick(0.016);
		}
		for i in 0..2 {
			let p = s.position(i);
			assert!(p.x.is_finite() && p.y.is_finite());
		}
	}

	#[test]
	fn edge_lines_stop_at_disk_boundaries() {
		let mut s = sim(&["1", "2"], &[("1", "2")]);
		s.pin(0, 0.0, 0.0);
		s.pin(1, 100.0, 0.0);
		let mut lines = Vec::new();
		s.edge_lines(40.0, &mut lines);
		assert_eq!(
			lines,
			vec![EdgeLine {
				x1: 40.0,
				y1: 0.0,
				x2: 60.0,
				y2: 0.0,
			}]
		);
	}
}
