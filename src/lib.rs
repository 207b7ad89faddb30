//! mind-map: Interactive mind map of interlinked notes.
//!
//! This crate provides a WASM-based visualization component that lays out a
//! note graph in levels, renders it on a canvas and supports zoom, pan and
//! click-to-select.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

pub mod components;
pub mod error;

pub use components::mind_map::{
	GraphSnapshot, MindMapCanvas, MindMapConfig, MindMapEngine, NoteLink, NoteRecord,
};
pub use error::LoadError;

/// Element holding the snapshot JSON: `{ notes: [...], links: [...], focus? }`.
const DATA_ELEMENT: &str = "mind-map-data";
/// Optional element holding a partial [`MindMapConfig`] as JSON.
const CONFIG_ELEMENT: &str = "mind-map-config";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("mind-map: logging initialized");
}

/// Parse JSON from the text of the `<script>` element with the given id.
fn load_json<T: DeserializeOwned>(id: &str) -> error::Result<T> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or(LoadError::NoDocument)?;
	let element = document
		.get_element_by_id(id)
		.ok_or_else(|| LoadError::MissingElement { id: id.into() })?;
	let script: HtmlScriptElement =
		element
			.dyn_into()
			.map_err(|_| LoadError::WrongElement {
				id: id.into(),
				expected: "script element",
			})?;
	let json_text = script.text().unwrap_or_default();
	serde_json::from_str(&json_text).map_err(|source| LoadError::InvalidJson {
		id: id.into(),
		source,
	})
}

fn load_graph_data() -> GraphSnapshot {
	match load_json::<GraphSnapshot>(DATA_ELEMENT) {
		Ok(data) => {
			info!(
				"mind-map: loaded {} notes, {} links",
				data.notes.len(),
				data.links.len()
			);
			data
		}
		Err(e) => {
			warn!("mind-map: failed to load graph data: {}", e);
			GraphSnapshot::default()
		}
	}
}

fn load_config() -> MindMapConfig {
	match load_json::<MindMapConfig>(CONFIG_ELEMENT) {
		Ok(config) => config,
		// No config element is the common case.
		Err(LoadError::MissingElement { .. }) => MindMapConfig::default(),
		Err(e) => {
			warn!("mind-map: ignoring config: {}", e);
			MindMapConfig::default()
		}
	}
}

/// Main application component.
/// Loads the note graph from the DOM and renders the mind map.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let (graph, set_graph) = signal(load_graph_data());
	let config = load_config();

	// Selecting a note re-roots the map on it.
	let on_select = Callback::new(move |id: String| {
		info!("mind-map: note selected: {}", id);
		set_graph.update(|g| g.focus = Some(id));
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="Mind Map" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-map">
			<MindMapCanvas data=graph config=config fullscreen=true on_select=on_select />
			<div class="map-overlay">
				<h1>"Mind Map"</h1>
				<p class="subtitle">"Click a note to focus. Scroll to zoom. Right-drag to pan."</p>
				<p class="subtitle">"Double-click to fit, Shift+double-click to reset."</p>
			</div>
		</div>
	}
}
