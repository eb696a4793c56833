//! Graph data structures and interaction events for the relation graph.

use serde::Deserialize;

/// A node in the graph. The id doubles as the display label.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct GraphNode {
	/// Unique identifier for this node. Links reference nodes by this id.
	pub id: String,
}

/// A directed relation between two nodes.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct GraphLink {
	/// Source node ID.
	pub source: String,
	/// Target node ID (arrowhead end).
	pub target: String,
	/// Optional relation label (e.g., "owns"). Rendered as a badge on the
	/// link; absent labels render a placeholder in the warning color.
	#[serde(default)]
	pub label: Option<String>,
}

/// Complete graph data: nodes and links.
///
/// Every link's source/target must name an existing node id; dangling
/// references are skipped at bind time with a warning.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

/// Interaction events emitted by the view.
///
/// The view never mutates the graph itself; a controller subscribes to these
/// and decides what a click means.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphEvent {
	/// A node was clicked (press and release without dragging).
	NodeClicked(String),
	/// A link line was clicked on the background.
	LinkClicked { source: String, target: String },
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_graph_json() {
		let json = r#"{
			"nodes": [{"id": "a"}, {"id": "b"}],
			"links": [{"source": "a", "target": "b", "label": "owns"}]
		}"#;
		let data: GraphData = serde_json::from_str(json).unwrap();
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.links[0].label.as_deref(), Some("owns"));
	}

	#[test]
	fn link_label_is_optional() {
		let json = r#"{"nodes": [], "links": [{"source": "a", "target": "b"}]}"#;
		let data: GraphData = serde_json::from_str(json).unwrap();
		assert_eq!(data.links[0].label, None);
	}
}
