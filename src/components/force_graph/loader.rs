use gloo_net::http::Request;
use log::info;

use super::error::GraphError;
use super::render::Scene;
use super::types::GraphData;

/// Fetches the graph document at `url` and parses it.
pub async fn fetch_graph(url: &str) -> Result<GraphData, GraphError> {
	let response = Request::get(url).send().await?;
	if !response.ok() {
		return Err(GraphError::Fetch(format!(
			"{url}: {} {}",
			response.status(),
			response.status_text()
		)));
	}
	let data = GraphData::from_json(&response.text().await?)?;
	info!(
		"loaded {} nodes, {} links from {url}",
		data.nodes.len(),
		data.links.len()
	);
	Ok(data)
}

/// Fetches, parses and validates the document, producing the scene to draw.
pub async fn load_scene(url: &str, node_radius: f64) -> Result<Scene, GraphError> {
	let data = fetch_graph(url).await?;
	Scene::build(&data, node_radius)
}
