use leptos::prelude::*;

use crate::components::force_graph::{DEFAULT_CONTAINER_ID, DEFAULT_DATA_URL, ForceGraphSvg};

/// Standalone preview of the documentation graph.
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<div class="graph-page">
			<h1>"Markov Random Field"</h1>
			<p class="subtitle">"Drag nodes to reposition. Hover a node for details."</p>
			<div id=DEFAULT_CONTAINER_ID class="chart">
				<ForceGraphSvg src=DEFAULT_DATA_URL />
			</div>
		</div>
	}
}
