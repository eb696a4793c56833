//! Mutable graph collections and the mutation operations on them.
//!
//! `GraphModel` owns the node and link lists independently of the simulation
//! and the canvas, so mutation semantics can be tested natively. The view
//! rebuilds its simulation bodies from the model after each mutation.

use super::types::{GraphData, GraphLink, GraphNode};

/// Ordered node and link collections with append/delete semantics.
///
/// No input validation: duplicate ids and dangling link references are caller
/// errors, surfaced (if at all) at bind time, not here.
#[derive(Clone, Debug, Default)]
pub struct GraphModel {
	nodes: Vec<GraphNode>,
	links: Vec<GraphLink>,
}

impl GraphModel {
	/// Take ownership of the given collections.
	pub fn new(data: GraphData) -> Self {
		Self {
			nodes: data.nodes,
			links: data.links,
		}
	}

	/// Current node collection, in insertion order.
	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	/// Current link collection, in insertion order.
	pub fn links(&self) -> &[GraphLink] {
		&self.links
	}

	/// Snapshot the current collections as `GraphData`.
	pub fn data(&self) -> GraphData {
		GraphData {
			nodes: self.nodes.clone(),
			links: self.links.clone(),
		}
	}

	/// Consume the model, yielding its collections.
	pub fn into_data(self) -> GraphData {
		GraphData {
			nodes: self.nodes,
			links: self.links,
		}
	}

	/// Concatenate nodes and links onto the existing collections, preserving
	/// insertion order.
	pub fn append(&mut self, nodes: Vec<GraphNode>, links: Vec<GraphLink>) {
		self.nodes.extend(nodes);
		self.links.extend(links);
	}

	/// Remove the node with the given id and every link whose source or
	/// target is that id. Deleting an unknown id is a silent no-op.
	pub fn delete(&mut self, id: &str) {
		self.nodes.retain(|n| n.id != id);
		self.links.retain(|l| l.source != id && l.target != id);
	}

	/// Reserved for in-place relabeling of nodes and links; currently a
	/// no-op extension point.
	pub fn edit(&mut self) {}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str) -> GraphNode {
		GraphNode { id: id.to_string() }
	}

	fn link(source: &str, target: &str) -> GraphLink {
		GraphLink {
			source: source.to_string(),
			target: target.to_string(),
			label: None,
		}
	}

	fn sample() -> GraphModel {
		GraphModel::new(GraphData {
			nodes: vec![node("a"), node("b"), node("c")],
			links: vec![link("a", "b"), link("b", "c"), link("c", "a")],
		})
	}

	#[test]
	fn delete_removes_node_and_incident_links() {
		let mut model = sample();
		model.delete("b");

		assert!(model.nodes().iter().all(|n| n.id != "b"));
		assert!(
			model
				.links()
				.iter()
				.all(|l| l.source != "b" && l.target != "b")
		);
		// The untouched link survives.
		assert_eq!(model.links(), &[link("c", "a")]);
	}

	#[test]
	fn delete_unknown_id_is_noop() {
		let mut model = sample();
		let before = model.data();
		model.delete("zebra");
		assert_eq!(model.data(), before);
	}

	#[test]
	fn append_concatenates_in_order() {
		let mut model = sample();
		model.append(vec![node("d"), node("e")], vec![link("d", "e")]);

		let ids: Vec<&str> = model.nodes().iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["a", "b", "c", "d", "e"]);
		assert_eq!(model.links().len(), 4);
		assert_eq!(model.links()[3], link("d", "e"));
	}

	#[test]
	fn append_with_no_links_keeps_existing() {
		let mut model = sample();
		model.append(vec![node("d")], vec![]);
		assert_eq!(model.links().len(), 3);
	}

	#[test]
	fn edit_is_a_noop() {
		let mut model = sample();
		let before = model.data();
		model.edit();
		assert_eq!(model.data(), before);
	}
}
