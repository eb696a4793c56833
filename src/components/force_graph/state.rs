//! Simulation state and interaction tracking for the relation graph.
//!
//! Wraps the `force_graph` physics simulation behind an explicit energy
//! envelope (the d3 alpha protocol: restart to energize, decay to settle),
//! and carries the view transform, drag/pan tracking, and hit-testing used
//! by the component's event handlers. Everything here is plain Rust and
//! natively testable; canvas drawing lives in `render`.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::warn;

use super::scale::{ScaleConfig, ScaledValues};
use super::types::GraphData;

/// Per-body metadata attached to each simulation node.
#[derive(Clone, Debug, Default)]
pub struct NodeBody {
	pub id: String,
}

/// Per-edge metadata attached to each simulation edge.
#[derive(Clone, Debug, Default)]
pub struct LinkInfo {
	pub label: Option<String>,
}

/// Simulation force tuning.
///
/// `link_distance` follows the d3 convention: smaller values pull connected
/// nodes closer together. It is mapped onto the spring constant of the
/// underlying simulation.
#[derive(Clone, Debug)]
pub struct SimulationTuning {
	pub link_distance: f32,
}

impl Default for SimulationTuning {
	fn default() -> Self {
		Self {
			link_distance: 180.0,
		}
	}
}

impl SimulationTuning {
	/// Spring constant at the default link distance, scaled inversely so a
	/// shorter requested distance means a stiffer spring.
	const SPRING_SCALE: f32 = 9.0;

	pub fn parameters(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: 150.0,
			force_spring: Self::SPRING_SCALE / self.link_distance.max(1.0),
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		}
	}
}

/// Simulation energy envelope, d3-style.
///
/// `alpha` decays exponentially toward `target`; the physics timestep is
/// scaled by it each tick, so the layout settles once alpha reaches zero.
/// Dragging raises the target to keep the layout live, and `restart`
/// re-energizes after a rebind.
#[derive(Clone, Debug)]
pub struct AlphaEnvelope {
	alpha: f64,
	target: f64,
}

/// Below this, alpha snaps to zero and the simulation is considered settled.
const ALPHA_MIN: f64 = 0.001;
/// Exponential decay rate per second (~2s from full energy to settled).
const ALPHA_DECAY_RATE: f64 = 2.3;

impl Default for AlphaEnvelope {
	fn default() -> Self {
		Self {
			alpha: 1.0,
			target: 0.0,
		}
	}
}

impl AlphaEnvelope {
	pub fn value(&self) -> f64 {
		self.alpha
	}

	/// Whether an interaction is currently holding the envelope above rest.
	pub fn is_hot(&self) -> bool {
		self.target > 0.0
	}

	pub fn set_target(&mut self, target: f64) {
		self.target = target;
	}

	/// Re-energize to full alpha.
	pub fn restart(&mut self) {
		self.alpha = 1.0;
	}

	/// Freeze immediately.
	pub fn stop(&mut self) {
		self.alpha = 0.0;
		self.target = 0.0;
	}

	/// Advance the envelope by `dt` seconds, returning the new alpha.
	pub fn step(&mut self, dt: f64) -> f64 {
		let blend = 1.0 - (-ALPHA_DECAY_RATE * dt).exp();
		self.alpha += (self.target - self.alpha) * blend;
		if self.target < ALPHA_MIN && self.alpha < ALPHA_MIN {
			self.alpha = 0.0;
		}
		self.alpha
	}
}

/// Pan and zoom transform applied to the entire graph view.
///
/// World origin maps to screen `(x, y)`; `k` is the zoom factor.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0 by the wheel handler).
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Core graph state: physics bodies, energy envelope, view transform, and
/// interaction tracking.
///
/// Created once when the component mounts; `rebind` replaces the simulation
/// bodies after a model mutation (a full restart energy-wise, but surviving
/// nodes keep their last position so the relayout starts from where they
/// were).
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeBody, LinkInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub alpha: AlphaEnvelope,
	pub width: f64,
	pub height: f64,
	tuning: SimulationTuning,
	id_to_idx: HashMap<String, DefaultNodeIdx>,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let tuning = SimulationTuning::default();
		let (graph, id_to_idx) = build_graph(data, &tuning, &HashMap::new());
		Self {
			graph,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			alpha: AlphaEnvelope::default(),
			width,
			height,
			tuning,
			id_to_idx,
		}
	}

	/// Replace the simulation bodies with the given collections and restart
	/// the energy envelope. Any in-flight drag is dropped.
	pub fn rebind(&mut self, data: &GraphData) {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.data.user_data.id.clone(), (node.x(), node.y()));
		});

		let (graph, id_to_idx) = build_graph(data, &self.tuning, &positions);
		self.graph = graph;
		self.id_to_idx = id_to_idx;
		self.drag = DragState::default();
		self.alpha = AlphaEnvelope::default();
	}

	/// Advance physics by `dt` seconds, scaled by the energy envelope.
	pub fn tick(&mut self, dt: f32) {
		let energy = self.alpha.step(dt as f64);
		if energy > 0.0 {
			self.graph.update(dt * energy as f32);
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// The world-space rectangle currently visible: `[x, y, w, h]`.
	/// At construction this is centered on the origin, e.g. a 200x100 view
	/// reports `[-100, -50, 200, 100]`.
	pub fn view_box(&self) -> [f64; 4] {
		[
			-self.transform.x / self.transform.k,
			-self.transform.y / self.transform.k,
			self.width / self.transform.k,
			self.height / self.transform.k,
		]
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Simulation index for a node id, if the id is bound.
	pub fn index_of(&self, id: &str) -> Option<DefaultNodeIdx> {
		self.id_to_idx.get(id).copied()
	}

	/// Reverse lookup: node id for a simulation index.
	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		self.id_to_idx
			.iter()
			.find(|&(_, &i)| i == idx)
			.map(|(id, _)| id.clone())
	}

	pub fn node_position(&self, idx: DefaultNodeIdx) -> Option<(f32, f32)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((node.x(), node.y()));
			}
		});
		found
	}

	/// Topmost node under the given screen position, if any.
	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		config: &ScaleConfig,
	) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < scale.hit_radius {
				found = Some(node.index());
			}
		});
		found
	}

	/// Link whose line passes within `tolerance` world units of the given
	/// screen position. Returns `(source_id, target_id)`.
	pub fn link_at_position(&self, sx: f64, sy: f64, tolerance: f64) -> Option<(String, String)> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_edges(|n1, n2, _| {
			let dist = segment_distance(
				gx,
				gy,
				n1.x() as f64,
				n1.y() as f64,
				n2.x() as f64,
				n2.y() as f64,
			);
			if dist < tolerance {
				found = Some((
					n1.data.user_data.id.clone(),
					n2.data.user_data.id.clone(),
				));
			}
		});
		found
	}

	/// Start dragging a node: energize the layout if it is at rest, pin the
	/// body, and remember where it started.
	pub fn begin_drag(&mut self, idx: DefaultNodeIdx, sx: f64, sy: f64) {
		if !self.alpha.is_hot() {
			self.alpha.set_target(0.3);
			self.alpha.restart();
		}

		self.drag.active = true;
		self.drag.node_idx = Some(idx);
		self.drag.start_x = sx;
		self.drag.start_y = sy;
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				self.drag.node_start_x = node.x();
				self.drag.node_start_y = node.y();
				node.data.is_anchor = true;
			}
		});
	}

	/// Move the dragged node to track the pointer at the given screen
	/// position. No-op when no drag is in flight.
	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		let Some(idx) = self.drag.node_idx.filter(|_| self.drag.active) else {
			return;
		};
		let (dx, dy) = (
			(sx - self.drag.start_x) / self.transform.k,
			(sy - self.drag.start_y) / self.transform.k,
		);
		let (nx, ny) = (
			self.drag.node_start_x + dx as f32,
			self.drag.node_start_y + dy as f32,
		);
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = nx;
				node.data.y = ny;
				node.data.is_anchor = true;
			}
		});
	}

	/// Finish a drag: relax the envelope back to rest and unpin the node so
	/// simulation forces resume control of it.
	pub fn end_drag(&mut self) {
		if let Some(idx) = self.drag.node_idx.take() {
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.is_anchor = false;
				}
			});
		}
		self.drag.active = false;
		self.alpha.set_target(0.0);
	}
}

/// Build a fresh simulation from the collections. Nodes found in
/// `positions` keep their coordinates; new nodes are seeded on a circle
/// around the origin. Links referencing unknown ids are skipped.
fn build_graph(
	data: &GraphData,
	tuning: &SimulationTuning,
	positions: &HashMap<String, (f32, f32)>,
) -> (
	ForceGraph<NodeBody, LinkInfo>,
	HashMap<String, DefaultNodeIdx>,
) {
	let mut graph = ForceGraph::new(tuning.parameters());
	let mut id_to_idx = HashMap::new();

	for (i, node) in data.nodes.iter().enumerate() {
		let (x, y) = positions.get(&node.id).copied().unwrap_or_else(|| {
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			(
				(100.0 * angle.cos()) as f32,
				(100.0 * angle.sin()) as f32,
			)
		});
		let idx = graph.add_node(NodeData {
			x,
			y,
			mass: 10.0,
			is_anchor: false,
			user_data: NodeBody {
				id: node.id.clone(),
			},
		});
		id_to_idx.insert(node.id.clone(), idx);
	}

	for link in &data.links {
		match (id_to_idx.get(&link.source), id_to_idx.get(&link.target)) {
			(Some(&src), Some(&tgt)) => {
				graph.add_edge(
					src,
					tgt,
					EdgeData {
						user_data: LinkInfo {
							label: link.label.clone(),
						},
					},
				);
			}
			_ => {
				warn!(
					"relation-graph: skipping link with unknown endpoint: {} -> {}",
					link.source, link.target
				);
			}
		}
	}

	(graph, id_to_idx)
}

/// Distance from point `(px, py)` to the segment `(x1, y1)-(x2, y2)`.
fn segment_distance(px: f64, py: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
	let (dx, dy) = (x2 - x1, y2 - y1);
	let len_sq = dx * dx + dy * dy;
	let t = if len_sq > 0.0 {
		(((px - x1) * dx + (py - y1) * dy) / len_sq).clamp(0.0, 1.0)
	} else {
		0.0
	};
	let (cx, cy) = (x1 + t * dx, y1 + t * dy);
	((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphLink, GraphNode};

	fn data(nodes: &[&str], links: &[(&str, &str)]) -> GraphData {
		GraphData {
			nodes: nodes
				.iter()
				.map(|id| GraphNode { id: id.to_string() })
				.collect(),
			links: links
				.iter()
				.map(|(s, t)| GraphLink {
					source: s.to_string(),
					target: t.to_string(),
					label: None,
				})
				.collect(),
		}
	}

	#[test]
	fn view_box_is_centered_on_origin_at_construction() {
		let state = ForceGraphState::new(&data(&[], &[]), 200.0, 100.0);
		assert_eq!(state.view_box(), [-100.0, -50.0, 200.0, 100.0]);
	}

	#[test]
	fn screen_to_graph_round_trips_through_the_transform() {
		let mut state = ForceGraphState::new(&data(&[], &[]), 200.0, 100.0);
		state.transform.k = 2.0;
		let (gx, gy) = state.screen_to_graph(100.0, 50.0);
		assert_eq!((gx, gy), (0.0, 0.0));
	}

	#[test]
	fn drag_pins_tracks_and_releases() {
		let mut state = ForceGraphState::new(&data(&["a", "b"], &[("a", "b")]), 400.0, 400.0);
		let idx = state.index_of("a").unwrap();
		let (x0, y0) = state.node_position(idx).unwrap();

		state.begin_drag(idx, 10.0, 10.0);
		assert!(state.drag.active);
		assert!(state.alpha.is_hot());

		// Each move event repositions the pinned body by the pointer delta.
		state.drag_to(15.0, 18.0);
		let (x1, y1) = state.node_position(idx).unwrap();
		assert_eq!((x1, y1), (x0 + 5.0, y0 + 8.0));

		let mut anchored = false;
		state.graph.visit_nodes(|node| {
			if node.index() == idx {
				anchored = node.data.is_anchor;
			}
		});
		assert!(anchored);

		state.end_drag();
		assert!(!state.drag.active);
		assert!(!state.alpha.is_hot());
		state.graph.visit_nodes(|node| {
			if node.index() == idx {
				anchored = node.data.is_anchor;
			}
		});
		assert!(!anchored);
	}

	#[test]
	fn drag_respects_zoom_level() {
		let mut state = ForceGraphState::new(&data(&["a"], &[]), 400.0, 400.0);
		state.transform.k = 2.0;
		let idx = state.index_of("a").unwrap();
		let (x0, _) = state.node_position(idx).unwrap();

		state.begin_drag(idx, 0.0, 0.0);
		state.drag_to(10.0, 0.0);
		let (x1, _) = state.node_position(idx).unwrap();
		assert_eq!(x1, x0 + 5.0);
	}

	#[test]
	fn rebind_keeps_surviving_positions_and_restarts_energy() {
		let mut state = ForceGraphState::new(&data(&["a", "b"], &[("a", "b")]), 400.0, 400.0);
		let idx = state.index_of("a").unwrap();
		state.begin_drag(idx, 0.0, 0.0);
		state.drag_to(30.0, 40.0);
		state.end_drag();
		let moved = state.node_position(idx).unwrap();

		// Settle, then rebind with one node removed.
		state.alpha.stop();
		state.rebind(&data(&["a"], &[]));
		assert!(!state.drag.active);
		assert!(state.alpha.value() > 0.9);

		let idx = state.index_of("a").unwrap();
		assert_eq!(state.node_position(idx).unwrap(), moved);
		assert!(state.index_of("b").is_none());
	}

	#[test]
	fn rebind_skips_dangling_links() {
		let mut state = ForceGraphState::new(&data(&["a"], &[]), 400.0, 400.0);
		state.rebind(&data(&["a", "b"], &[("a", "b"), ("a", "ghost")]));

		let mut edge_count = 0;
		state.graph.visit_edges(|_, _, _| edge_count += 1);
		assert_eq!(edge_count, 1);
	}

	#[test]
	fn alpha_decays_to_rest_and_holds_target() {
		let mut env = AlphaEnvelope::default();
		for _ in 0..600 {
			env.step(0.016);
		}
		assert_eq!(env.value(), 0.0);

		env.set_target(0.3);
		env.restart();
		for _ in 0..600 {
			env.step(0.016);
		}
		assert!((env.value() - 0.3).abs() < 0.01);

		env.set_target(0.0);
		for _ in 0..600 {
			env.step(0.016);
		}
		assert_eq!(env.value(), 0.0);
	}

	#[test]
	fn shorter_link_distance_means_stiffer_spring() {
		let near = SimulationTuning {
			link_distance: 90.0,
		};
		let far = SimulationTuning::default();
		assert!(near.parameters().force_spring > far.parameters().force_spring);
	}

	#[test]
	fn node_hit_testing_accounts_for_the_transform() {
		let state = ForceGraphState::new(&data(&["a"], &[]), 200.0, 200.0);
		let idx = state.index_of("a").unwrap();
		let (x, y) = state.node_position(idx).unwrap();

		let config = ScaleConfig::default();
		let (sx, sy) = (
			x as f64 * state.transform.k + state.transform.x,
			y as f64 * state.transform.k + state.transform.y,
		);
		assert_eq!(state.node_at_position(sx, sy, &config), Some(idx));
		assert_eq!(state.node_at_position(sx + 500.0, sy, &config), None);
	}

	#[test]
	fn link_hit_testing_finds_the_segment_midpoint() {
		let state = ForceGraphState::new(&data(&["a", "b"], &[("a", "b")]), 200.0, 200.0);
		let ia = state.index_of("a").unwrap();
		let ib = state.index_of("b").unwrap();
		let (ax, ay) = state.node_position(ia).unwrap();
		let (bx, by) = state.node_position(ib).unwrap();

		let (mx, my) = (
			(ax + bx) as f64 / 2.0 * state.transform.k + state.transform.x,
			(ay + by) as f64 / 2.0 * state.transform.k + state.transform.y,
		);
		let hit = state.link_at_position(mx, my, 5.0);
		assert_eq!(hit, Some(("a".to_string(), "b".to_string())));
		assert_eq!(state.link_at_position(mx + 500.0, my, 5.0), None);
	}

	#[test]
	fn segment_distance_handles_degenerate_segments() {
		assert_eq!(segment_distance(3.0, 4.0, 0.0, 0.0, 0.0, 0.0), 5.0);
		assert_eq!(segment_distance(5.0, 0.0, 0.0, 0.0, 10.0, 0.0), 0.0);
		// Beyond the endpoint, distance is to the endpoint itself.
		assert_eq!(segment_distance(13.0, 4.0, 0.0, 0.0, 10.0, 0.0), 5.0);
	}
}
