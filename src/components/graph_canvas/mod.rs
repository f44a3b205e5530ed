//! Interactive force-directed graph canvas with radial node menus.
//!
//! Renders a node-link graph on an HTML canvas with:
//! - Physics-based layout that settles when idle and reheats while dragged
//! - Hover highlighting of a node's neighborhood
//! - A radial (pie) context menu anchored to a node, one at a time
//! - Pan and ctrl/cmd-wheel zoom composed into a single view transform
//!
//! The interaction core (`simulation`, `highlight`, `menu`, `viewport`,
//! `state`) is plain Rust with no browser dependency; only `render` and
//! `component` touch the DOM. Controllers assign [`types::VisualState`]
//! values and the renderer maps them to styles.
//!
//! # Example
//!
//! ```ignore
//! use halo_graph::{GraphCanvas, GraphData, GraphNode, GraphLink};
//!
//! let data = GraphData {
//!     nodes: vec![
//!         GraphNode { id: "a".into(), label: "Node A".into(), root: true },
//!         GraphNode { id: "b".into(), label: "Node B".into(), root: false },
//!     ],
//!     links: vec![
//!         GraphLink { source: "a".into(), target: "b".into() },
//!     ],
//! };
//!
//! view! { <GraphCanvas data=data.into() fullscreen=true /> }
//! ```

mod component;
pub mod config;
pub mod geometry;
pub mod highlight;
pub mod menu;
mod render;
pub mod simulation;
pub mod state;
pub mod theme;
pub mod types;
pub mod viewport;

pub use component::GraphCanvas;
pub use config::GraphConfig;
pub use menu::{MenuConfig, MenuEntry};
pub use state::MenuSelection;
pub use theme::Theme;
pub use types::{GraphData, GraphLink, GraphNode, VisualState};
