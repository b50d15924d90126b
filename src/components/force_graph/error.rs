/// Failures while loading or validating a graph document.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
	/// Network failure or non-success HTTP status.
	#[error("failed to fetch graph data: {0}")]
	Fetch(String),
	/// Malformed JSON.
	#[error("graph data JSON error: {0}")]
	Parse(#[from] serde_json::Error),
	/// Two nodes share an id.
	#[error("duplicate node id `{0}`")]
	DuplicateNode(String),
	/// A link endpoint names no node.
	#[error("link `{link}` references unknown node `{node}`")]
	UnresolvedLink {
		/// Element id of the offending link.
		link: String,
		/// The id that failed to resolve.
		node: String,
	},
	/// The last `arcStyle` token is not a defined marker.
	#[error("link `{link}` uses undefined marker `{marker}`")]
	UnknownMarker {
		/// Element id of the offending link.
		link: String,
		/// The token that named no marker.
		marker: String,
	},
}

impl From<gloo_net::Error> for GraphError {
	fn from(err: gloo_net::Error) -> Self {
		Self::Fetch(err.to_string())
	}
}
