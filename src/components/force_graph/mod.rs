//! Interactive force-directed relation graph component.
//!
//! Renders a node-link graph with labeled, directed edges on an HTML canvas:
//! - Physics-based node positioning via a force simulation with an explicit
//!   energy envelope (drag energizes, release settles)
//! - Pan, zoom, and node dragging interactions
//! - Click events surfaced to a controller, which decides mutations
//! - Link label badges, with a warning placeholder for unlabeled relations
//!
//! # Example
//!
//! ```ignore
//! use relation_graph::{RelationGraph, GraphData, GraphEvent};
//!
//! let graph = RwSignal::new(data);
//! let on_event = Callback::new(move |ev| {
//!     if let GraphEvent::NodeClicked(id) = ev {
//!         graph.update(|g| g.nodes.retain(|n| n.id != id));
//!     }
//! });
//!
//! view! { <RelationGraph data=graph fullscreen=true on_event=on_event /> }
//! ```

mod component;
mod model;
mod render;
pub mod scale;
mod state;
pub mod theme;
mod types;

pub use component::RelationGraph;
pub use model::GraphModel;
pub use theme::Theme;
pub use types::{GraphData, GraphEvent, GraphLink, GraphNode};
