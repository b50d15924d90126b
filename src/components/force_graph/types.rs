//! Graph document structures as they appear in the JSON input.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::error::GraphError;

/// Visual class used for nodes that carry no `type` tag.
pub const DEFAULT_NODE_CLASS: &str = "graphcircle";

/// A node in the graph.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphNode {
	/// Unique identifier. Links reference nodes by this id.
	pub id: String,
	/// Optional visual class tag. See [`GraphNode::class`].
	#[serde(rename = "type", default)]
	pub kind: Option<String>,
	/// Optional tooltip text. Falls back to the id.
	#[serde(default)]
	pub text: Option<String>,
}

impl GraphNode {
	/// CSS class of the node circle.
	pub fn class(&self) -> &str {
		self.kind.as_deref().unwrap_or(DEFAULT_NODE_CLASS)
	}

	/// Text shown in the tooltip while hovering this node.
	pub fn tooltip_text(&self) -> &str {
		self.text.as_deref().unwrap_or(&self.id)
	}
}

/// A directed, styled edge between two nodes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphLink {
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Space separated class list; the last token names the arrowhead marker.
	#[serde(rename = "arcStyle")]
	pub arc_style: String,
	/// Label tokens, joined with `" / "` for display.
	#[serde(default)]
	pub value: Vec<String>,
}

impl GraphLink {
	/// Element id shared by the link path and its label.
	pub fn element_id(&self) -> String {
		format!("{}-{}", self.source, self.target)
	}

	/// CSS class of the link path.
	pub fn class(&self) -> String {
		format!("link {}", self.arc_style)
	}

	/// Label text.
	pub fn label(&self) -> String {
		self.value.join(" / ")
	}

	/// Arrowhead marker selected by the last `arcStyle` token.
	pub fn marker(&self) -> Result<MarkerColor, GraphError> {
		let token = self.arc_style.split(' ').next_back().unwrap_or_default();
		token.parse().map_err(|_| GraphError::UnknownMarker {
			link: self.element_id(),
			marker: token.to_owned(),
		})
	}
}

/// Complete graph document: nodes and links.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphData {
	/// All nodes, in document order.
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	/// All links, in document order.
	#[serde(default)]
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Parse a JSON document.
	pub fn from_json(text: &str) -> Result<Self, GraphError> {
		Ok(serde_json::from_str(text)?)
	}

	/// Check that node ids are unique and that every link resolves to known
	/// nodes and a defined marker.
	pub fn validate(&self) -> Result<(), GraphError> {
		let mut ids = HashSet::with_capacity(self.nodes.len());
		for node in &self.nodes {
			if !ids.insert(node.id.as_str()) {
				return Err(GraphError::DuplicateNode(node.id.clone()));
			}
		}
		for link in &self.links {
			for endpoint in [&link.source, &link.target] {
				if !ids.contains(endpoint.as_str()) {
					return Err(GraphError::UnresolvedLink {
						link: link.element_id(),
						node: endpoint.clone(),
					});
				}
			}
			link.marker()?;
		}
		Ok(())
	}
}

/// Arrowhead palette. Each colour is defined exactly once in `<defs>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerColor {
	/// `#red`
	Red,
	/// `#green`
	Green,
	/// `#black`
	Black,
	/// `#blue`
	Blue,
}

impl MarkerColor {
	/// Every marker, in definition order.
	pub const ALL: [MarkerColor; 4] = [Self::Red, Self::Green, Self::Black, Self::Blue];

	/// Element id of the marker definition.
	pub fn id(self) -> &'static str {
		match self {
			Self::Red => "red",
			Self::Green => "green",
			Self::Black => "black",
			Self::Blue => "blue",
		}
	}

	/// Value for a path's `marker-end` attribute.
	pub fn url(self) -> String {
		format!("url(#{})", self.id())
	}
}

impl fmt::Display for MarkerColor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.id())
	}
}

impl FromStr for MarkerColor {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL.into_iter().find(|m| m.id() == s).ok_or(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const DOC: &str = r#"{
		"nodes": [{ "id": "A" }, { "id": "B", "type": "evidence", "text": "bee" }],
		"links": [{ "source": "A", "target": "B", "arcStyle": "link red", "value": ["1", "2"] }]
	}"#;

	#[test]
	fn parses_document_shape() {
		let data = GraphData::from_json(DOC).unwrap();
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.nodes[1].kind.as_deref(), Some("evidence"));
		assert_eq!(data.links[0].arc_style, "link red");
		assert!(data.validate().is_ok());
	}

	#[test]
	fn untyped_node_gets_default_class() {
		let data = GraphData::from_json(DOC).unwrap();
		assert_eq!(data.nodes[0].class(), DEFAULT_NODE_CLASS);
		assert_eq!(data.nodes[1].class(), "evidence");
	}

	#[test]
	fn tooltip_falls_back_to_id() {
		let data = GraphData::from_json(DOC).unwrap();
		assert_eq!(data.nodes[0].tooltip_text(), "A");
		assert_eq!(data.nodes[1].tooltip_text(), "bee");
	}

	#[test]
	fn link_presentation() {
		let link = &GraphData::from_json(DOC).unwrap().links[0];
		assert_eq!(link.element_id(), "A-B");
		assert_eq!(link.class(), "link link red");
		assert_eq!(link.label(), "1 / 2");
		assert_eq!(link.marker().unwrap(), MarkerColor::Red);
		assert_eq!(link.marker().unwrap().url(), "url(#red)");
	}

	#[test]
	fn marker_palette_has_four_distinct_ids() {
		let ids: Vec<_> = MarkerColor::ALL.iter().map(|m| m.id()).collect();
		assert_eq!(ids, ["red", "green", "black", "blue"]);
		for m in MarkerColor::ALL {
			assert_eq!(m.id().parse::<MarkerColor>(), Ok(m));
		}
		assert!("purple".parse::<MarkerColor>().is_err());
	}

	#[test]
	fn marker_uses_last_token() {
		let link = GraphLink {
			source: "A".into(),
			target: "B".into(),
			arc_style: "dashed blue".into(),
			value: vec![],
		};
		assert_eq!(link.marker().unwrap(), MarkerColor::Blue);
	}

	#[test]
	fn malformed_json_is_a_parse_error() {
		assert!(matches!(
			GraphData::from_json("{\"nodes\": ["),
			Err(GraphError::Parse(_))
		));
	}

	#[test]
	fn unresolved_endpoint_is_rejected() {
		let mut data = GraphData::from_json(DOC).unwrap();
		data.links[0].target = "C".into();
		match data.validate() {
			Err(GraphError::UnresolvedLink { link, node }) => {
				assert_eq!(link, "A-C");
				assert_eq!(node, "C");
			}
			other => panic!("unexpected: {other:?}"),
		}
	}

	#[test]
	fn unknown_marker_is_rejected() {
		let mut data = GraphData::from_json(DOC).unwrap();
		data.links[0].arc_style = "link purple".into();
		assert!(matches!(
			data.validate(),
			Err(GraphError::UnknownMarker { marker, .. }) if marker == "purple"
		));
	}

	#[test]
	fn duplicate_node_is_rejected() {
		let mut data = GraphData::from_json(DOC).unwrap();
		data.nodes[1].id = "A".into();
		data.links.clear();
		assert!(matches!(data.validate(), Err(GraphError::DuplicateNode(id)) if id == "A"));
	}
}
