//! Category palette and text color resolution.
//!
//! Colors come from CSS custom properties on the document root
//! (`--color-scale-<i>` and `--color-text`). They are resolved once when the
//! graph loads and again on theme-change events, never per frame.

use web_sys::Window;

/// Fill used for a node whose category has no resolved color.
pub const FALLBACK_NODE_COLOR: &str = "#888";
/// Caption color when the host does not define `--color-text`.
pub const FALLBACK_TEXT_COLOR: &str = "#2c2c2c";
/// Stroke and arrowhead color for edges.
pub const EDGE_COLOR: &str = "#999";
/// Color of the identifier drawn inside each node.
pub const ID_COLOR: &str = "#fff";

/// Ordered category identifiers paired with their colors.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
	scale_ids: Vec<String>,
	colors: Vec<String>,
	pub text_color: String,
}

impl Palette {
	/// Palette with the fallback color for every category.
	pub fn new(scale_ids: Vec<String>) -> Self {
		let colors = vec![FALLBACK_NODE_COLOR.to_string(); scale_ids.len()];
		Self {
			scale_ids,
			colors,
			text_color: FALLBACK_TEXT_COLOR.to_string(),
		}
	}

	/// Resolves colors from the computed style of the document root.
	/// Empty or unreadable properties fall back to the defaults.
	pub fn resolve(window: &Window, scale_ids: Vec<String>) -> Self {
		let mut palette = Self::new(scale_ids);
		palette.refresh(window);
		palette
	}

	/// Re-reads colors from the host styling, keeping the category order.
	pub fn refresh(&mut self, window: &Window) {
		let Some(style) = window
			.document()
			.and_then(|d| d.document_element())
			.and_then(|root| window.get_computed_style(&root).ok().flatten())
		else {
			return;
		};
		let read = |name: &str| {
			style
				.get_property_value(name)
				.ok()
				.map(|v| v.trim().to_string())
				.filter(|v| !v.is_empty())
		};

		for (i, color) in self.colors.iter_mut().enumerate() {
			*color = read(&format!("--color-scale-{i}"))
				.unwrap_or_else(|| FALLBACK_NODE_COLOR.to_string());
		}
		self.text_color =
			read("--color-text").unwrap_or_else(|| FALLBACK_TEXT_COLOR.to_string());
	}

	/// Category index for a scale identifier; unknown identifiers map to 0.
	pub fn index_of(&self, scale: &str) -> usize {
		self.scale_ids.iter().position(|id| id == scale).unwrap_or(0)
	}

	/// Number of categories, at least one so band heights stay finite.
	pub fn band_count(&self) -> usize {
		self.scale_ids.len().max(1)
	}

	/// Fill color for a category index.
	pub fn color(&self, index: usize) -> &str {
		self.colors
			.get(index)
			.map(String::as_str)
			.unwrap_or(FALLBACK_NODE_COLOR)
	}
}

#[cfg(test)]
impl Palette {
	/// Palette with explicit colors. Missing entries use the fallback color,
	/// extra entries are ignored.
	pub fn with_colors(scale_ids: Vec<String>, colors: Vec<String>, text_color: String) -> Self {
		let mut palette = Self::new(scale_ids);
		for (slot, color) in palette.colors.iter_mut().zip(colors) {
			*slot = color;
		}
		palette.text_color = text_color;
		palette
	}
}
