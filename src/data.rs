//! Loading the pattern document, either inline from the page or over fetch.

use gloo_net::http::Request;
use log::info;
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

use crate::components::force_graph::PatternDocument;

/// Id of the optional `<script type="application/json">` carrying the document.
pub const INLINE_DATA_ID: &str = "graph-data";

/// Why the pattern document could not be obtained.
#[derive(Error, Debug)]
pub enum LoadError {
	#[error("browser window is unavailable")]
	NoWindow,

	#[error("request for {url} failed: {reason}")]
	Fetch { url: String, reason: String },

	#[error("request for {url} returned HTTP {status}")]
	Status { url: String, status: u16 },

	#[error("could not read response body: {0}")]
	Body(String),

	#[error("invalid pattern document: {0}")]
	Parse(#[from] serde_json::Error),
}

impl LoadError {
	fn fetch(url: &str, err: gloo_net::Error) -> Self {
		Self::Fetch {
			url: url.to_string(),
			reason: err.to_string(),
		}
	}
}

/// Parses a pattern document from JSON text.
pub fn parse_document(json: &str) -> Result<PatternDocument, LoadError> {
	let doc: PatternDocument = serde_json::from_str(json)?;
	info!(
		"pattern-graph: loaded {} patterns across {} scales",
		doc.patterns.len(),
		doc.scales.len()
	);
	Ok(doc)
}

/// Reads the document embedded in the page, if the page embeds one.
pub fn load_inline(window: &Window) -> Option<Result<PatternDocument, LoadError>> {
	let element = window.document()?.get_element_by_id(INLINE_DATA_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let text = script.text().ok()?;
	Some(parse_document(&text))
}

/// Fetches and parses the document at `url`.
pub async fn fetch_document(url: &str) -> Result<PatternDocument, LoadError> {
	let response = Request::get(url)
		.send()
		.await
		.map_err(|e| LoadError::fetch(url, e))?;
	if !response.ok() {
		return Err(LoadError::Status {
			url: url.to_string(),
			status: response.status(),
		});
	}

	let text = response
		.text()
		.await
		.map_err(|e| LoadError::Body(e.to_string()))?;
	parse_document(&text)
}

/// Inline data wins; otherwise the document is fetched from `url`.
pub async fn load_document(url: &str) -> Result<PatternDocument, LoadError> {
	let window = web_sys::window().ok_or(LoadError::NoWindow)?;
	match load_inline(&window) {
		Some(result) => result,
		None => fetch_document(url).await,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_errors_are_typed() {
		let err = parse_document("{\"patterns\": 3}").unwrap_err();
		assert!(matches!(err, LoadError::Parse(_)));
		assert!(err.to_string().starts_with("invalid pattern document"));
	}

	#[test]
	fn parse_accepts_search_fields() {
		let doc = parse_document(
			r#"{
				"scales": [{"id": "towns"}],
				"patterns": [{"number": 1, "name": "A", "scale": "towns", "problem": "p", "tags": ["x"]}]
			}"#,
		)
		.unwrap();
		assert_eq!(doc.patterns.len(), 1);
	}

	#[test]
	fn status_error_names_url() {
		let err = LoadError::Status {
			url: "patterns.json".into(),
			status: 404,
		};
		assert_eq!(err.to_string(), "request for patterns.json returned HTTP 404");
	}

	#[test]
	fn transport_error_keeps_url_and_reason() {
		let err = LoadError::fetch(
			"data/patterns.json",
			gloo_net::Error::GlooError("network unreachable".into()),
		);
		assert!(matches!(err, LoadError::Fetch { ref url, .. } if url == "data/patterns.json"));
		assert_eq!(
			err.to_string(),
			"request for data/patterns.json failed: network unreachable"
		);
	}
}
