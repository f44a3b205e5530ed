//! Tunable parameters for the simulation, node visuals, menu, and zoom.
//!
//! Centralizes every constant an embedder might want to adjust. Defaults
//! reproduce the reference behavior: 40-unit node disks, 100-unit link
//! distance, zoom clamped to [0.1, 10], and a three-entry radial menu
//! spanning the 40..80 annulus.

use super::menu::MenuConfig;

/// Force simulation tuning.
#[derive(Clone, Debug)]
pub struct ForceConfig {
	/// Charge strength. Negative values repel; applied pairwise with an
	/// inverse-square falloff.
	pub charge_strength: f64,
	/// Softening added to squared distances so near-coincident pairs stay
	/// finite.
	pub charge_softening: f64,
	/// Rest length of link springs, in world units.
	pub link_distance: f64,
	/// Link spring stiffness.
	pub link_strength: f64,
	/// Pull toward the world origin.
	pub center_strength: f64,
	/// Per-tick velocity retention at the reference frame rate (0..1).
	pub velocity_decay: f64,
	/// Energy floor below which a cooling simulation settles.
	pub alpha_min: f64,
	/// Rate (per second) at which energy approaches its target.
	pub alpha_decay: f64,
	/// Energy target held while an interaction keeps the simulation hot.
	pub reheat_target: f64,
}

impl Default for ForceConfig {
	fn default() -> Self {
		Self {
			charge_strength: -300.0,
			charge_softening: 100.0,
			link_distance: 100.0,
			link_strength: 0.1,
			center_strength: 0.05,
			velocity_decay: 0.6,
			alpha_min: 0.001,
			alpha_decay: 1.2,
			reheat_target: 0.3,
		}
	}
}

/// Node rendering and hit-testing.
#[derive(Clone, Debug)]
pub struct NodeConfig {
	/// Node disk radius in world units. Edge lines are trimmed at this
	/// radius, and it doubles as the hit-test radius.
	pub radius: f64,
	/// Maximum label length in characters before ellipsis truncation.
	pub label_max_chars: usize,
}

impl Default for NodeConfig {
	fn default() -> Self {
		Self {
			radius: 40.0,
			label_max_chars: 8,
		}
	}
}

/// Zoom clamp range and wheel step.
#[derive(Clone, Debug)]
pub struct ZoomConfig {
	/// Smallest permitted scale.
	pub min_zoom: f64,
	/// Largest permitted scale.
	pub max_zoom: f64,
	/// Multiplicative scale step per wheel notch.
	pub wheel_step: f64,
}

impl Default for ZoomConfig {
	fn default() -> Self {
		Self {
			min_zoom: 0.1,
			max_zoom: 10.0,
			wheel_step: 1.1,
		}
	}
}

/// Complete configuration for a graph canvas.
#[derive(Clone, Debug, Default)]
pub struct GraphConfig {
	pub force: ForceConfig,
	pub node: NodeConfig,
	pub menu: MenuConfig,
	pub zoom: ZoomConfig,
}
