//! coauthor-graph: Interactive force-directed visualization of co-authorship networks.
//!
//! This crate provides a WASM-based visualization of authors and their
//! collaborations, with degree-based sizing, top-country coloring,
//! physics-based layout, pan/zoom, click tooltips and live force tuning.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, error, info};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod error;

pub use components::force_graph::{
	ForceControls, ForceGraphCanvas, ForceSettings, GraphData, GraphLink, GraphNode,
	GraphSession, SessionConfig, SizeMetric,
};
pub use error::{ControlError, GraphError};

/// Id of the script element holding the dataset JSON.
const DATA_ELEMENT: &str = "graph-data";
/// Id of the optional script element holding [`SessionConfig`] JSON.
const CONFIG_ELEMENT: &str = "graph-config";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("coauthor-graph: logging initialized");
}

/// Text content of the script element with the given id.
fn script_text(id: &str) -> error::Result<String> {
	let missing = || GraphError::MissingElement(id.to_string());
	let window: Window = web_sys::window().ok_or_else(missing)?;
	let document = window.document().ok_or_else(missing)?;
	let element = document.get_element_by_id(id).ok_or_else(missing)?;
	let script: HtmlScriptElement = element
		.dyn_into()
		.map_err(|_| GraphError::NotAScript(id.to_string()))?;
	script.text().map_err(|_| GraphError::NotAScript(id.to_string()))
}

/// Load the dataset from `<script id="graph-data">`.
/// Expected format: JSON with { nodes: [...], links: [...] }
pub fn load_graph_data() -> error::Result<GraphData> {
	let data = GraphData::from_json(&script_text(DATA_ELEMENT)?)?;
	info!(
		"coauthor-graph: loaded {} authors, {} links",
		data.nodes.len(),
		data.links.len()
	);
	Ok(data)
}

/// Load session tuning from `<script id="graph-config">`, defaulting when absent.
pub fn load_session_config() -> error::Result<SessionConfig> {
	match script_text(CONFIG_ELEMENT) {
		Ok(text) => {
			let config: SessionConfig = serde_json::from_str(&text)?;
			config.validate()?;
			Ok(config)
		}
		Err(GraphError::MissingElement(_)) => Ok(SessionConfig::default()),
		Err(e) => Err(e),
	}
}

/// Main application component.
/// Loads the dataset from the DOM and renders the graph with its controls.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let graph_data = load_graph_data().unwrap_or_else(|e| {
		error!("coauthor-graph: failed to load graph data: {}", e);
		GraphData::default()
	});
	let config = load_session_config().unwrap_or_else(|e| {
		error!("coauthor-graph: ignoring invalid config: {}", e);
		SessionConfig::default()
	});
	let initial = ForceSettings::from_config(config.forces, SizeMetric::Degree);
	let graph_signal = Signal::derive(move || graph_data.clone());
	let (settings, set_settings) = signal(None::<ForceSettings>);

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Co-authorship Network" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="container fullscreen-graph">
			<ForceGraphCanvas data=graph_signal settings=settings config=config fullscreen=true />
			<div class="graph-overlay">
				<h1>"Co-authorship Network"</h1>
				<p class="subtitle">"Click an author for details. Scroll to zoom. Drag background to pan."</p>
				<ForceControls submit=set_settings initial=initial />
			</div>
		</div>
	}
}
