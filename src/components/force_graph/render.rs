//! Static scene construction and per-tick attribute computation.

use std::collections::HashMap;

use super::error::GraphError;
use super::geometry::{Point, calc_label_pos, link_arc, rotate_label, translate};
use super::types::GraphData;

pub const MARKER_VIEW_BOX: &str = "0 -5 10 10";
pub const MARKER_REF_X: f64 = 10.0;
pub const MARKER_REF_Y: f64 = -0.8;
pub const MARKER_SIZE: f64 = 7.5;
pub const MARKER_PATH: &str = "M0,-5L10,0L0,5 Z";

/// Offset of a node's id label from its centre.
pub const NODE_LABEL_DX: f64 = 5.0;
pub const NODE_LABEL_DY: f64 = 15.0;

/// A link path and its label.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkElement {
	pub id: String,
	pub class: String,
	pub marker_end: String,
	pub label: String,
	pub source: usize,
	pub target: usize,
}

/// A node group: circle, id label, and the text its tooltip shows.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeElement {
	pub id: String,
	pub class: String,
	pub tooltip: String,
}

/// The static part of the drawing, built once per document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	pub links: Vec<LinkElement>,
	pub nodes: Vec<NodeElement>,
	pub node_radius: f64,
}

impl Scene {
	/// Validates `data` and resolves link endpoints to node indices.
	pub fn build(data: &GraphData, node_radius: f64) -> Result<Self, GraphError> {
		data.validate()?;
		let index: HashMap<&str, usize> = data
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.as_str(), i))
			.collect();

		let mut links = Vec::with_capacity(data.links.len());
		for link in &data.links {
			let resolve = |id: &str| {
				index
					.get(id)
					.copied()
					.ok_or_else(|| GraphError::UnresolvedLink {
						link: link.element_id(),
						node: id.to_owned(),
					})
			};
			links.push(LinkElement {
				id: link.element_id(),
				class: link.class(),
				marker_end: link.marker()?.url(),
				label: link.label(),
				source: resolve(&link.source)?,
				target: resolve(&link.target)?,
			});
		}

		let nodes = data
			.nodes
			.iter()
			.map(|n| NodeElement {
				id: n.id.clone(),
				class: n.class().to_owned(),
				tooltip: n.tooltip_text().to_owned(),
			})
			.collect();

		Ok(Self {
			links,
			nodes,
			node_radius,
		})
	}
}

/// Per-tick attributes of one link and its label.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinkFrame {
	pub d: String,
	pub label_x: f64,
	pub label_y: f64,
	pub label_transform: String,
}

/// Every attribute that changes between ticks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
	pub links: Vec<LinkFrame>,
	pub nodes: Vec<String>,
}

/// Computes the attributes for `positions`, indexed like `scene.nodes`.
pub fn render(scene: &Scene, positions: &[Point]) -> Frame {
	let links = scene
		.links
		.iter()
		.map(|link| {
			let (s, t) = (positions[link.source], positions[link.target]);
			let pos = calc_label_pos(s, t);
			LinkFrame {
				d: link_arc(s, t, scene.node_radius),
				label_x: pos.x,
				label_y: pos.y,
				label_transform: rotate_label(s, t, pos),
			}
		})
		.collect();
	let nodes = positions.iter().copied().map(translate).collect();
	Frame { links, nodes }
}
