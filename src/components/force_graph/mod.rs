mod component;
mod config;
mod error;
mod geometry;
mod loader;
mod render;
mod state;
mod types;

pub use component::ForceGraphSvg;
pub use config::{DEFAULT_CONTAINER_ID, DEFAULT_DATA_URL, GraphConfig};
pub use error::GraphError;
pub use types::GraphData;
