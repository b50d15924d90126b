//! Leptos client-side app that draws an interactive SVG force layout of a
//! graph document, either embedded in a documentation page or standalone.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};
use wasm_bindgen::JsCast;

// Modules
mod components;
mod pages;

// Top-Level pages
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

pub use components::force_graph::{ForceGraphSvg, GraphConfig, GraphData, GraphError};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Mounts the graph into the page's container element, or the standalone app
/// on `<body>` when the page has no such container.
pub fn mount(config: GraphConfig) {
	let container = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.get_element_by_id(&config.container_id))
		.and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());

	match container {
		Some(container) => {
			info!("mounting graph into #{}", config.container_id);
			let src = config.data_url.clone();
			leptos::mount::mount_to(container, move || view! { <ForceGraphSvg src=src config=config /> })
				.forget();
		}
		None => {
			info!("no #{} container, mounting standalone app", config.container_id);
			leptos::mount::mount_to_body(App);
		}
	}
}

/// An app router which renders the homepage and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="MRF Graph" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
