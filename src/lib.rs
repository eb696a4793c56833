//! relation-graph: Interactive force-directed graph visualization with
//! labeled, directed relations.
//!
//! This crate provides a WASM-based graph view that renders node-link data
//! with physics-based layout, pan/zoom, node dragging, and click-driven
//! mutation routed through an event callback.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::force_graph::{
	GraphData, GraphEvent, GraphLink, GraphModel, GraphNode, RelationGraph, Theme,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("relation-graph: logging initialized");
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
				"relation-graph: loaded {} nodes, {} links",
				data.nodes.len(),
				data.links.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("relation-graph: failed to parse graph data: {}", e);
			None
		}
	}
}

/// Main application component.
///
/// Loads graph data from the DOM, owns it as a signal, and acts as the
/// mutation controller: a node click deletes the node and its incident
/// links, a link click is logged only.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let graph = RwSignal::new(load_graph_data().unwrap_or_default());

	let on_event = Callback::new(move |ev: GraphEvent| match ev {
		GraphEvent::NodeClicked(id) => {
			info!("relation-graph: node clicked: {}", id);
			graph.update(|data| {
				let mut model = GraphModel::new(std::mem::take(data));
				model.delete(&id);
				*data = model.into_data();
			});
		}
		GraphEvent::LinkClicked { source, target } => {
			info!("relation-graph: link clicked: {} -> {}", source, target);
		}
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Relation Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<RelationGraph data=graph fullscreen=true on_event=on_event />
			<div class="graph-overlay">
				<h1>"Relation Graph"</h1>
				<p class="subtitle">
					"Drag nodes to reposition. Scroll to zoom. Drag background to pan. Click a node to delete it."
				</p>
			</div>
		</div>
	}
}
