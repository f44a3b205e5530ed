//! halo-graph: interactive force-directed graph visualization with radial
//! node context menus.
//!
//! This crate provides a WASM-based graph component that renders node-link
//! data with physics-based layout, pan/zoom, hover highlighting, and a
//! per-node pie menu for actions.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::graph_canvas::{
	GraphCanvas, GraphConfig, GraphData, GraphLink, GraphNode, MenuSelection, Theme,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("halo-graph: logging initialized");
}

/// Load graph data from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [...], links: [...] }
fn load_graph_data() -> Option<GraphData> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("graph-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<GraphData>(&json_text) {
		Ok(data) => {
			info!(
				"halo-graph: loaded {} nodes, {} links",
				data.nodes.len(),
				data.links.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("halo-graph: failed to parse graph data: {}", e);
			None
		}
	}
}

/// Built-in demo graph: two small clusters bridged by a root node.
fn demo_data() -> GraphData {
	let node = |id: &str, label: &str, root: bool| GraphNode {
		id: id.into(),
		label: label.into(),
		root,
	};
	let link = |source: &str, target: &str| GraphLink {
		source: source.into(),
		target: target.into(),
	};

	GraphData {
		nodes: vec![
			node("1", "Node 1", false),
			node("2", "Node 2", false),
			node("3", "Node 3", false),
			node("4", "Node 4", false),
			node("5", "Node 5", false),
			node("6", "Node 6", false),
			node("7", "Node 7", true),
		],
		links: vec![
			link("1", "2"),
			link("2", "3"),
			link("3", "1"),
			link("4", "5"),
			link("5", "6"),
			link("5", "4"),
			link("6", "4"),
			link("1", "7"),
			link("7", "6"),
		],
	}
}

/// Main application component.
/// Loads graph data from the DOM, falling back to the built-in demo graph,
/// and renders the interactive visualization.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let graph_data = load_graph_data().unwrap_or_else(demo_data);
	let graph_signal = Signal::derive(move || graph_data.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="Graph Explorer" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<GraphCanvas data=graph_signal fullscreen=true />
			<div class="graph-overlay">
				<h1>"Graph Explorer"</h1>
				<p class="subtitle">
					"Drag nodes to reposition. Click a node for actions. Ctrl+scroll to zoom."
				</p>
			</div>
		</div>
	}
}
