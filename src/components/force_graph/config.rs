//! Simulation and drawing constants for the pattern graph.
//!
//! Everything that tunes the layout lives here so the integrator, renderer and
//! interaction code share one source of truth. The defaults are tuned for a
//! few dozen nodes on a typical laptop viewport.
//!
//! # Annealing
//!
//! Every force is multiplied by a temperature that decays linearly from `1.0`
//! at frame zero to [`GraphConfig::min_temperature`] at
//! [`GraphConfig::total_frames`], after which it stays at the floor. Once the
//! frame budget is spent the animation loop stops unless a drag is active.

/// Physical and visual parameters of one graph instance.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphConfig {
	/// Node circle radius in CSS pixels. Also the hit-test radius and clamp margin.
	pub node_radius: f64,
	/// Inverse-square repulsion constant between every pair of nodes.
	pub repulsion: f64,
	/// Rest length of an edge spring.
	pub spring_length: f64,
	/// Spring stiffness.
	pub spring_k: f64,
	/// Pull toward the viewport centre, proportional to displacement.
	pub gravity: f64,
	/// Per-step velocity multiplier (< 1).
	pub damping: f64,
	/// Frame budget after which the simulation is considered settled.
	pub total_frames: u32,
	/// Lower bound of the annealing temperature.
	pub min_temperature: f64,
	/// Frames before the budget that a drag on a settled graph rewinds to.
	pub reheat_frames: u32,
	/// Length of the arrowhead sides.
	pub arrow_size: f64,
	/// Caption length (in characters) before truncation with an ellipsis.
	pub max_label_len: usize,
	/// Squared pointer displacement below which a press/release is a click.
	pub click_threshold_sq: f64,
	/// Edge stroke width.
	pub edge_width: f64,
	/// Font for the caption below each node.
	pub label_font: String,
	/// Font for the identifier drawn inside each node.
	pub id_font: String,
	/// Vertical distance from node centre to caption baseline, beyond the radius.
	pub label_offset: f64,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			node_radius: 18.0,
			repulsion: 8000.0,
			spring_length: 140.0,
			spring_k: 0.005,
			gravity: 0.02,
			damping: 0.85,
			total_frames: 350,
			min_temperature: 0.05,
			reheat_frames: 50,
			arrow_size: 8.0,
			max_label_len: 22,
			click_threshold_sq: 9.0,
			edge_width: 1.5,
			label_font: "12px sans-serif".to_string(),
			id_font: "bold 11px sans-serif".to_string(),
			label_offset: 14.0,
		}
	}
}

impl GraphConfig {
	/// Annealing temperature at `frame`: linear decay from 1.0, floored.
	pub fn temperature(&self, frame: u32) -> f64 {
		if self.total_frames == 0 {
			return self.min_temperature;
		}
		(1.0 - f64::from(frame) / f64::from(self.total_frames)).max(self.min_temperature)
	}

	/// Frame the clock rewinds to when a settled graph is disturbed.
	pub fn reheat_frame(&self) -> u32 {
		self.total_frames.saturating_sub(self.reheat_frames)
	}
}

/// Page-level settings supplied by the host document.
#[derive(Clone, Debug, PartialEq)]
pub struct PageConfig {
	/// Location of the pattern document.
	pub data_url: String,
	/// Prefix prepended to `pattern/<id>.html` when navigating.
	pub root_prefix: String,
}

impl Default for PageConfig {
	fn default() -> Self {
		Self {
			data_url: "patterns.json".to_string(),
			root_prefix: String::new(),
		}
	}
}

impl PageConfig {
	/// Reads `window.PATTERNS_JSON_URL` and `window.ROOT_PREFIX`, falling back
	/// to defaults for anything absent or not a string.
	pub fn from_window(window: &web_sys::Window) -> Self {
		let read = |key: &str| {
			js_sys::Reflect::get(window, &wasm_bindgen::JsValue::from_str(key))
				.ok()
				.and_then(|v| v.as_string())
		};
		let defaults = Self::default();
		Self {
			data_url: read("PATTERNS_JSON_URL").unwrap_or(defaults.data_url),
			root_prefix: read("ROOT_PREFIX").unwrap_or(defaults.root_prefix),
		}
	}

	/// Detail page URL for a pattern.
	pub fn pattern_url(&self, id: &str) -> String {
		format!("{}pattern/{}.html", self.root_prefix, id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn temperature_starts_hot_and_reaches_floor_by_budget() {
		let config = GraphConfig::default();
		assert_eq!(config.temperature(0), 1.0);

		let mut last = f64::INFINITY;
		for frame in 0..=config.total_frames + 100 {
			let t = config.temperature(frame);
			assert!(t <= last, "temperature rose at frame {frame}");
			assert!(t >= config.min_temperature);
			last = t;
		}
		assert_eq!(config.temperature(config.total_frames), config.min_temperature);
		assert_eq!(config.temperature(u32::MAX), config.min_temperature);
	}

	#[test]
	fn reheat_frame_sits_in_annealing_tail() {
		let config = GraphConfig::default();
		assert_eq!(config.reheat_frame(), 300);

		let short = GraphConfig {
			total_frames: 10,
			..GraphConfig::default()
		};
		assert_eq!(short.reheat_frame(), 0);
	}

	#[test]
	fn pattern_url_concatenates_prefix() {
		let page = PageConfig::default();
		assert_eq!(page.pattern_url("12"), "pattern/12.html");

		let nested = PageConfig {
			root_prefix: "../".to_string(),
			..PageConfig::default()
		};
		assert_eq!(nested.pattern_url("12"), "../pattern/12.html");
	}
}
