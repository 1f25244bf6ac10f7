//! pattern-graph: interactive force-directed map of pattern relationships.
//!
//! This crate provides a WASM canvas component that lays out patterns and the
//! patterns they contain with an annealed force simulation, and lets readers
//! drag nodes around or click through to a pattern's page.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};

pub mod components;
pub mod data;

pub use components::force_graph::{
	GraphConfig, GraphSession, PageConfig, PatternDocument, PatternGraph, PatternId,
};
pub use data::LoadError;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("pattern-graph: logging initialized");
}

/// Main application component.
/// Loads the pattern document, then hands it to the graph once available.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let (document, set_document) = signal(None::<PatternDocument>);
	let page = web_sys::window()
		.map(|w| PageConfig::from_window(&w))
		.unwrap_or_default();

	wasm_bindgen_futures::spawn_local(async move {
		match data::load_document(&page.data_url).await {
			Ok(doc) => set_document.set(Some(doc)),
			Err(e) => warn!("pattern-graph: {e}"),
		}
	});

	view! {
		<Title text="Pattern Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="pattern-graph">
			<PatternGraph data=document />
			<p class="graph-hint">"Drag patterns to rearrange. Click a pattern to open it."</p>
		</div>
	}
}
