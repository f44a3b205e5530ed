//! Hover highlight derivation.
//!
//! Only the focal (hovered) node is stored; node and edge emphasis is
//! derived per query from the resolved link list. Clearing the hover
//! therefore restores every element to its default state exactly, with
//! nothing to unwind.

use super::simulation::NodeIdx;
use super::types::VisualState;

/// Tracks the hovered node and derives visual emphasis for nodes and edges.
#[derive(Clone, Debug, Default)]
pub struct Highlight {
	hovered: Option<NodeIdx>,
}

impl Highlight {
	/// The node currently hovered, if any.
	pub fn hovered(&self) -> Option<NodeIdx> {
		self.hovered
	}

	/// Set or clear the hovered node. Callers suppress this entirely while
	/// a radial menu is open.
	pub fn set(&mut self, node: Option<NodeIdx>) {
		self.hovered = node;
	}

	/// Clear any hover.
	pub fn clear(&mut self) {
		self.hovered = None;
	}

	/// Visual state of a node: `Hovered` for the focal node, `Highlighted`
	/// for nodes sharing an edge with it, `Default` otherwise.
	pub fn node_state(&self, idx: NodeIdx, links: &[(NodeIdx, NodeIdx)]) -> VisualState {
		match self.hovered {
			None => VisualState::Default,
			Some(h) if h == idx => VisualState::Hovered,
			Some(h) => {
				let neighbor = links
					.iter()
					.any(|&(s, t)| (s == h && t == idx) || (t == h && s == idx));
				if neighbor {
					VisualState::Highlighted
				} else {
					VisualState::Default
				}
			}
		}
	}

	/// Visual state of an edge: `Highlighted` iff incident to the focal
	/// node.
	pub fn edge_state(&self, edge: (NodeIdx, NodeIdx)) -> VisualState {
		match self.hovered {
			Some(h) if edge.0 == h || edge.1 == h => VisualState::Highlighted,
			_ => VisualState::Default,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	// Triangle 0-1, 1-2, 2-0.
	const LINKS: &[(NodeIdx, NodeIdx)] = &[(0, 1), (1, 2), (2, 0)];

	#[test]
	fn hovering_a_node_highlights_exactly_its_neighborhood() {
		let mut h = Highlight::default();
		h.set(Some(1));

		assert_eq!(h.node_state(1, LINKS), VisualState::Hovered);
		assert_eq!(h.node_state(0, LINKS), VisualState::Highlighted);
		assert_eq!(h.node_state(2, LINKS), VisualState::Highlighted);

		assert_eq!(h.edge_state((0, 1)), VisualState::Highlighted);
		assert_eq!(h.edge_state((1, 2)), VisualState::Highlighted);
		assert_eq!(h.edge_state((2, 0)), VisualState::Default);
	}

	#[test]
	fn non_neighbors_keep_default_state() {
		let links = &[(0, 1)];
		let mut h = Highlight::default();
		h.set(Some(0));

		assert_eq!(h.node_state(2, links), VisualState::Default);
		assert_eq!(h.edge_state((1, 2)), VisualState::Default);
	}

	#[test]
	fn clearing_restores_every_state_to_default() {
		let mut h = Highlight::default();
		h.set(Some(1));
		h.clear();

		for idx in 0..3 {
			assert_eq!(h.node_state(idx, LINKS), VisualState::Default);
		}
		for &edge in LINKS {
			assert_eq!(h.edge_state(edge), VisualState::Default);
		}
	}

	#[test]
	fn hover_works_in_either_link_direction() {
		let links = &[(2, 0)];
		let mut h = Highlight::default();
		h.set(Some(0));
		assert_eq!(h.node_state(2, links), VisualState::Highlighted);
	}
}
