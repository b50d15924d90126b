//! Layout and loading parameters.

use serde::Deserialize;

/// Relative location of the graph document next to the documentation page.
pub const DEFAULT_DATA_URL: &str = "_static/js/mrfgraph.json";
/// Id of the element the graph mounts into.
pub const DEFAULT_CONTAINER_ID: &str = "chart";

/// Rendering and layout parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphConfig {
	/// Where the graph document is fetched from.
	pub data_url: String,
	/// Id of the hosting container element.
	pub container_id: String,
	/// Display radius of every node.
	pub node_radius: f64,
	/// Rest length of links.
	pub link_distance: f64,
	/// Node repulsion. Negative values repel.
	pub charge: f64,
	/// Pull toward the canvas centre.
	pub gravity: f64,
	/// Alpha the simulation starts (and re-heats) at.
	pub alpha: f64,
	/// Per tick alpha multiplier.
	pub alpha_decay: f64,
	/// The layout is considered settled below this alpha.
	pub alpha_min: f64,
	/// Engine time step per tick, in seconds.
	pub time_step: f32,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			data_url: DEFAULT_DATA_URL.into(),
			container_id: DEFAULT_CONTAINER_ID.into(),
			node_radius: 10.0,
			link_distance: 150.0,
			charge: -700.0,
			gravity: 0.1,
			alpha: 0.1,
			alpha_decay: 0.99,
			alpha_min: 0.005,
			time_step: 0.016,
		}
	}
}
