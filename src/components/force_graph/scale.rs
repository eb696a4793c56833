//! Zoom-dependent scaling configuration for graph visuals.
//!
//! Centralizes how sizes behave as the zoom level `k` changes. Two
//! coordinate spaces are in play: world-space values scale with zoom
//! (drawn after the canvas transform), screen-space values stay a constant
//! pixel size regardless of zoom.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	/// Use `f64::INFINITY` for an unbounded maximum.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// Compute the world-space value for a given base value and zoom level.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => {
				// screen_size = world_size * k, so clamp in world units
				base.clamp(min_screen / k, max_screen / k)
			}
		}
	}
}

/// Configuration for node visual scaling.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Node circle radius in world units.
	pub radius: f64,
	/// How the node radius scales with zoom.
	pub radius_behavior: ScaleBehavior,
	/// Hit detection radius in world units.
	pub hit_radius: f64,
	/// How hit radius scales with zoom.
	pub hit_behavior: ScaleBehavior,
	/// Id label font size in screen pixels.
	pub label_size: f64,
	/// Minimum zoom level for label font scaling.
	pub label_min_k: f64,
}

/// Configuration for edge visual scaling.
#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	/// Base line width in screen pixels.
	pub line_width: f64,
	/// Arrowhead size in world units.
	pub arrow_size: f64,
	/// How arrowhead size scales with zoom.
	pub arrow_behavior: ScaleBehavior,
	/// Click tolerance around the line, in screen pixels.
	pub hit_width: f64,
}

/// Configuration for link label badges.
#[derive(Clone, Debug)]
pub struct LabelScaleConfig {
	/// Badge text font size in screen pixels.
	pub font_size: f64,
	/// Horizontal padding inside the badge, in world units at k=1.
	pub padding_x: f64,
	/// Badge height in world units at k=1.
	pub height: f64,
	/// Hide badges below this zoom level; they would be unreadable.
	pub min_k: f64,
}

/// Complete scale configuration for all graph elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	pub node: NodeScaleConfig,
	pub edge: EdgeScaleConfig,
	pub label: LabelScaleConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				radius: 8.5,
				radius_behavior: ScaleBehavior::Clamped {
					min_screen: 5.0,
					max_screen: f64::INFINITY,
				},
				hit_radius: 12.0,
				hit_behavior: ScaleBehavior::Clamped {
					min_screen: 6.0,
					max_screen: f64::INFINITY,
				},
				label_size: 11.0,
				label_min_k: 0.5,
			},
			edge: EdgeScaleConfig {
				line_width: 2.0,
				arrow_size: 8.0,
				arrow_behavior: ScaleBehavior::Clamped {
					min_screen: 4.0,
					max_screen: 20.0,
				},
				hit_width: 6.0,
			},
			label: LabelScaleConfig {
				font_size: 9.0,
				padding_x: 4.0,
				height: 13.0,
				min_k: 0.35,
			},
		}
	}
}

/// Pre-computed scale values for a specific zoom level.
///
/// Created once per frame; all sizes are world-space, ready to use after the
/// canvas transform has been applied.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Current zoom level.
	pub k: f64,
	/// Node radius in world-space.
	pub node_radius: f64,
	/// Hit detection radius in world-space.
	pub hit_radius: f64,
	/// Id label font (e.g., "11px sans-serif").
	pub node_font: String,
	/// Edge line width in world-space.
	pub edge_line_width: f64,
	/// Arrowhead size in world-space.
	pub arrow_size: f64,
	/// Link click tolerance in world-space.
	pub link_hit_width: f64,
	/// Badge font for link labels.
	pub label_font: String,
	/// Badge font size in world-space (used for text measurement fallback).
	pub label_font_size: f64,
	/// Badge horizontal padding in world-space.
	pub label_padding_x: f64,
	/// Badge height in world-space.
	pub label_height: f64,
	/// Whether link label badges should be drawn at this zoom level.
	pub draw_labels: bool,
}

impl ScaledValues {
	/// Compute scaled values from configuration and current zoom level.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let node_font_size = config.node.label_size / k.max(config.node.label_min_k);
		let label_font_size = config.label.font_size / k.max(config.node.label_min_k);

		Self {
			k,
			node_radius: config.node.radius_behavior.apply(config.node.radius, k),
			hit_radius: config.node.hit_behavior.apply(config.node.hit_radius, k),
			node_font: format!("{}px sans-serif", node_font_size),
			edge_line_width: config.edge.line_width / k,
			arrow_size: config.edge.arrow_behavior.apply(config.edge.arrow_size, k),
			link_hit_width: config.edge.hit_width / k,
			label_font: format!("{}px sans-serif", label_font_size),
			label_font_size,
			label_padding_x: config.label.padding_x / k.max(config.node.label_min_k),
			label_height: config.label.height / k.max(config.node.label_min_k),
			draw_labels: k >= config.label.min_k,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn world_behavior_ignores_zoom() {
		assert_eq!(ScaleBehavior::World.apply(10.0, 0.25), 10.0);
	}

	#[test]
	fn screen_behavior_counteracts_zoom() {
		// 10 screen px at k=2 is 5 world units
		assert_eq!(ScaleBehavior::Screen.apply(10.0, 2.0), 5.0);
	}

	#[test]
	fn clamped_behavior_enforces_minimum_screen_size() {
		let b = ScaleBehavior::Clamped {
			min_screen: 5.0,
			max_screen: f64::INFINITY,
		};
		// Zoomed out to k=0.1: 8.5 world units would be 0.85 px, clamp to 5 px.
		assert_eq!(b.apply(8.5, 0.1), 50.0);
		// At k=1 the base value is within bounds.
		assert_eq!(b.apply(8.5, 1.0), 8.5);
	}

	#[test]
	fn badges_are_culled_when_zoomed_far_out() {
		let config = ScaleConfig::default();
		assert!(ScaledValues::new(&config, 1.0).draw_labels);
		assert!(!ScaledValues::new(&config, 0.1).draw_labels);
	}

	#[test]
	fn edge_width_is_constant_in_screen_space() {
		let config = ScaleConfig::default();
		let zoomed = ScaledValues::new(&config, 4.0);
		assert_eq!(zoomed.edge_line_width * 4.0, config.edge.line_width);
	}
}
