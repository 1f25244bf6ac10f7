//! Simulation session: all mutable state of one graph instance.
//!
//! Created once the pattern document is available, then shared between the
//! animation loop and the pointer handlers. Everything runs on the browser's
//! single event thread, so handlers and frames never overlap.

use rand::Rng;

use super::config::{GraphConfig, PageConfig};
use super::graph::Graph;
use super::theme::Palette;
use super::types::PatternDocument;

/// An in-progress drag: the grabbed node and where the pointer went down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState {
	pub node: usize,
	pub start_x: f64,
	pub start_y: f64,
}

/// Graph topology plus everything that changes while it is on screen.
#[derive(Clone, Debug)]
pub struct GraphSession {
	pub graph: Graph,
	pub palette: Palette,
	pub config: GraphConfig,
	pub page: PageConfig,
	/// Viewport size in CSS pixels.
	pub width: f64,
	pub height: f64,
	/// Frames simulated so far; drives the annealing temperature.
	pub frame: u32,
	pub drag: Option<DragState>,
}

impl GraphSession {
	/// Builds the graph from `doc` and seeds positions inside a
	/// `width` x `height` viewport.
	pub fn new<R: Rng>(
		doc: &PatternDocument,
		palette: Palette,
		config: GraphConfig,
		page: PageConfig,
		width: f64,
		height: f64,
		rng: &mut R,
	) -> Self {
		let graph = Graph::build(doc, &palette, width, height, rng);
		Self::from_graph(graph, palette, config, page, width, height)
	}

	/// Session over an already positioned graph, clock at zero.
	pub fn from_graph(
		graph: Graph,
		palette: Palette,
		config: GraphConfig,
		page: PageConfig,
		width: f64,
		height: f64,
	) -> Self {
		Self {
			graph,
			palette,
			config,
			page,
			width,
			height,
			frame: 0,
			drag: None,
		}
	}

	/// Topmost node whose disc contains the point. Later nodes are drawn on
	/// top, so they win overlaps.
	pub fn node_at_position(&self, x: f64, y: f64) -> Option<usize> {
		let r_sq = self.config.node_radius * self.config.node_radius;
		self.graph
			.nodes
			.iter()
			.rposition(|n| n.distance_sq(x, y) <= r_sq)
	}

	/// Current annealing temperature.
	pub fn temperature(&self) -> f64 {
		self.config.temperature(self.frame)
	}

	/// Whether the frame budget is spent.
	pub fn is_settled(&self) -> bool {
		self.frame >= self.config.total_frames
	}

	pub fn dragged_node(&self) -> Option<usize> {
		self.drag.map(|d| d.node)
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::super::graph::Node;
	use super::*;

	fn session(nodes: Vec<Node>) -> GraphSession {
		GraphSession::from_graph(
			Graph::link(nodes),
			Palette::new(Vec::new()),
			GraphConfig::default(),
			PageConfig::default(),
			400.0,
			300.0,
		)
	}

	#[test]
	fn hit_test_uses_radius() {
		let s = session(vec![Node::at(1, 50.0, 50.0)]);
		let r = s.config.node_radius;

		assert_eq!(s.node_at_position(50.0, 50.0), Some(0));
		assert_eq!(s.node_at_position(50.0 + r, 50.0), Some(0));
		assert_eq!(s.node_at_position(50.0 + r + 1.0, 50.0), None);
		assert_eq!(s.node_at_position(50.0, 50.0 - r - 1.0), None);
	}

	#[test]
	fn topmost_node_wins_overlap() {
		let s = session(vec![
			Node::at(1, 50.0, 50.0),
			Node::at(2, 60.0, 50.0),
			Node::at(3, 300.0, 50.0),
		]);
		assert_eq!(s.node_at_position(55.0, 50.0), Some(1));
		assert_eq!(s.node_at_position(40.0, 50.0), Some(0));
	}

	#[test]
	fn new_session_starts_hot_and_idle() {
		let doc: PatternDocument = serde_json::from_str(
			r#"{"scales": [{"id": "s"}], "patterns": [{"number": 1, "name": "One", "scale": "s"}]}"#,
		)
		.unwrap();
		let s = GraphSession::new(
			&doc,
			Palette::new(doc.scale_ids()),
			GraphConfig::default(),
			PageConfig::default(),
			400.0,
			300.0,
			&mut SmallRng::seed_from_u64(3),
		);
		assert_eq!(s.graph.nodes.len(), 1);
		assert_eq!(s.temperature(), 1.0);
		assert!(!s.is_settled());
		assert_eq!(s.dragged_node(), None);
	}
}
