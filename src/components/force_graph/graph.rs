//! Node and edge sets built from a pattern document.

use std::collections::HashMap;

use rand::Rng;

use super::theme::Palette;
use super::types::{PatternDocument, PatternId};

/// A positioned pattern in the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: PatternId,
	pub name: String,
	pub scale: String,
	/// Index into the palette, resolved once at build time.
	pub scale_idx: usize,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub contains: Vec<PatternId>,
}

impl Node {
	/// Squared distance from the node centre to a point.
	pub fn distance_sq(&self, x: f64, y: f64) -> f64 {
		let (dx, dy) = (x - self.x, y - self.y);
		dx * dx + dy * dy
	}
}

#[cfg(test)]
impl Node {
	/// Bare node at rest with a numeric identity.
	pub fn at(number: u32, x: f64, y: f64) -> Self {
		Self {
			id: PatternId::from(number),
			name: String::new(),
			scale: String::new(),
			scale_idx: 0,
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			contains: Vec::new(),
		}
	}
}

/// Directed containment edge, as indices into the node set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
	pub source: usize,
	pub target: usize,
}

/// The static node/edge topology of one graph instance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
}

impl Graph {
	/// Builds the graph, seeding each node inside the horizontal band of its
	/// category so the simulation starts with categories already separated.
	///
	/// Child references that do not resolve to a pattern in the document are
	/// dropped.
	pub fn build<R: Rng>(
		doc: &PatternDocument,
		palette: &Palette,
		width: f64,
		height: f64,
		rng: &mut R,
	) -> Self {
		let band_h = height / palette.band_count() as f64;

		let nodes: Vec<Node> = doc
			.patterns
			.iter()
			.map(|p| {
				let scale_idx = palette.index_of(&p.scale);
				Node {
					id: p.number.clone(),
					name: p.name.clone(),
					scale: p.scale.clone(),
					scale_idx,
					x: width * 0.2 + rng.random::<f64>() * width * 0.6,
					y: band_h * scale_idx as f64 + band_h * 0.2 + rng.random::<f64>() * band_h * 0.6,
					vx: 0.0,
					vy: 0.0,
					contains: p.contains.clone(),
				}
			})
			.collect();

		Self::link(nodes)
	}

	/// Resolves every node's `contains` list into edges.
	pub fn link(nodes: Vec<Node>) -> Self {
		let edges = {
			let by_id: HashMap<&PatternId, usize> =
				nodes.iter().enumerate().map(|(i, n)| (&n.id, i)).collect();

			nodes
				.iter()
				.enumerate()
				.flat_map(|(source, n)| {
					n.contains
						.iter()
						.filter_map(|child| by_id.get(child).map(|&target| Edge { source, target }))
						.collect::<Vec<_>>()
				})
				.collect()
		};

		Self { nodes, edges }
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	fn document() -> PatternDocument {
		serde_json::from_str(
			r#"{
				"scales": [{"id": "towns"}, {"id": "buildings"}, {"id": "construction"}],
				"patterns": [
					{"number": 1, "name": "Independent Regions", "scale": "towns", "contains": [2, 3, 99]},
					{"number": 2, "name": "Mosaic of Subcultures", "scale": "buildings", "contains": [3]},
					{"number": 3, "name": "Roof Garden", "scale": "construction"},
					{"number": 4, "name": "Unsorted", "scale": "unknown", "contains": [1]}
				]
			}"#,
		)
		.unwrap()
	}

	fn build(width: f64, height: f64, seed: u64) -> Graph {
		let doc = document();
		let palette = Palette::new(doc.scale_ids());
		Graph::build(&doc, &palette, width, height, &mut SmallRng::seed_from_u64(seed))
	}

	#[test]
	fn dangling_children_are_dropped() {
		let doc = document();
		let graph = build(800.0, 600.0, 1);

		let declared: usize = doc.patterns.iter().map(|p| p.contains.len()).sum();
		assert!(graph.edges.len() <= declared);
		assert_eq!(
			graph.edges,
			vec![
				Edge { source: 0, target: 1 },
				Edge { source: 0, target: 2 },
				Edge { source: 1, target: 2 },
				Edge { source: 3, target: 0 },
			]
		);
		assert!(
			graph
				.edges
				.iter()
				.all(|e| graph.nodes[e.target].id != PatternId::from(99u32))
		);
	}

	#[test]
	fn nodes_seeded_within_category_bands() {
		let (w, h) = (900.0, 600.0);
		let graph = build(w, h, 42);
		let band = h / 3.0;

		for node in &graph.nodes {
			assert!(node.x >= w * 0.2 && node.x <= w * 0.8, "x out of centre: {}", node.x);
			let lo = band * node.scale_idx as f64 + band * 0.2;
			assert!(node.y >= lo && node.y <= lo + band * 0.6, "y out of band: {}", node.y);
			assert_eq!((node.vx, node.vy), (0.0, 0.0));
		}
		assert_eq!(graph.nodes[3].scale_idx, 0);
		assert_eq!(graph.nodes[2].scale_idx, 2);
	}

	#[test]
	fn same_seed_gives_same_layout() {
		assert_eq!(build(640.0, 480.0, 7), build(640.0, 480.0, 7));
	}

	#[test]
	fn empty_document_builds_empty_graph() {
		let doc = PatternDocument::default();
		let palette = Palette::new(doc.scale_ids());
		let graph = Graph::build(&doc, &palette, 100.0, 100.0, &mut SmallRng::seed_from_u64(0));
		assert!(graph.nodes.is_empty());
		assert!(graph.edges.is_empty());
	}
}
