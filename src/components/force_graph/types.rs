//! Pattern document structures consumed by the graph builder.

use std::fmt;

use serde::Deserialize;

/// Identity of a pattern. Source documents use either JSON numbers or strings;
/// both normalise to the same textual form so `7` and `"7"` refer to one entity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "RawPatternId")]
pub struct PatternId(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPatternId {
	Number(serde_json::Number),
	Text(String),
}

impl From<RawPatternId> for PatternId {
	fn from(raw: RawPatternId) -> Self {
		match raw {
			RawPatternId::Number(n) => Self(n.to_string()),
			RawPatternId::Text(s) => Self(s),
		}
	}
}

#[cfg(test)]
impl From<&str> for PatternId {
	fn from(s: &str) -> Self {
		Self(s.to_string())
	}
}

#[cfg(test)]
impl From<u32> for PatternId {
	fn from(n: u32) -> Self {
		Self(n.to_string())
	}
}

impl fmt::Display for PatternId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// A category band. Only the identifier matters for layout; its position in
/// the document fixes the category index.
#[derive(Clone, Debug, Deserialize)]
pub struct Scale {
	pub id: String,
}

/// A single pattern entity.
#[derive(Clone, Debug, Deserialize)]
pub struct Pattern {
	pub number: PatternId,
	pub name: String,
	/// Identifier of the scale this pattern belongs to.
	pub scale: String,
	/// Patterns this one contains (directed edges parent -> child).
	#[serde(default)]
	pub contains: Vec<PatternId>,
}

/// The whole input document: `{ scales: [...], patterns: [...] }`.
///
/// Fields used by the search collaborator (`problem`, `tags`) are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PatternDocument {
	#[serde(default)]
	pub scales: Vec<Scale>,
	#[serde(default)]
	pub patterns: Vec<Pattern>,
}

impl PatternDocument {
	/// Ordered category identifiers, defining the category index of each node.
	pub fn scale_ids(&self) -> Vec<String> {
		self.scales.iter().map(|s| s.id.clone()).collect()
	}
}
