use mrf_graph::{GraphConfig, init_logging, mount};

fn main() {
	init_logging();
	mount(GraphConfig::default());
}
