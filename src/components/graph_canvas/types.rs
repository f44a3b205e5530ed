//! Graph data structures for input to the graph canvas component.

use serde::Deserialize;

/// A node in the graph.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in links.
	pub id: String,
	/// Display label drawn on the node disk.
	pub label: String,
	/// Marks a root node. Root nodes use a distinct fill in every visual state.
	#[serde(default)]
	pub root: bool,
}

/// A directed edge between two nodes.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

/// Visual emphasis applied to a node or an edge.
///
/// Interaction controllers only ever assign these states; the renderer maps
/// them to concrete fills and strokes. Edges use `Default` and `Highlighted`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VisualState {
	/// No emphasis.
	#[default]
	Default,
	/// Directly under the pointer.
	Hovered,
	/// Neighbor of the hovered node, or edge incident to it.
	Highlighted,
	/// Node the radial menu is currently anchored to.
	MenuAnchor,
}
