//! Canvas rendering for the pattern graph.
//!
//! Every frame is a full redraw in two passes: edges first so arrowheads sit
//! under the node discs, then nodes with their identifier and caption.
//! Drawing goes through [`Surface`] so the geometry does not depend on a live
//! canvas.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::config::GraphConfig;
use super::graph::{Edge, Node};
use super::theme::{self, Palette};

/// The drawing primitives the renderer needs.
pub trait Surface {
	fn clear(&mut self, width: f64, height: f64);
	fn set_fill(&mut self, color: &str);
	fn set_stroke(&mut self, color: &str);
	fn set_line_width(&mut self, width: f64);
	fn set_font(&mut self, font: &str);
	/// Strokes a straight segment.
	fn line(&mut self, from: (f64, f64), to: (f64, f64));
	/// Fills a closed polygon.
	fn fill_polygon(&mut self, points: &[(f64, f64)]);
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64);
	/// Fills text centred horizontally and vertically on `(x, y)`.
	fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn set_fill(&mut self, color: &str) {
		self.set_fill_style_str(color);
	}

	fn set_stroke(&mut self, color: &str) {
		self.set_stroke_style_str(color);
	}

	fn set_line_width(&mut self, width: f64) {
		CanvasRenderingContext2d::set_line_width(self, width);
	}

	fn set_font(&mut self, font: &str) {
		CanvasRenderingContext2d::set_font(self, font);
	}

	fn line(&mut self, from: (f64, f64), to: (f64, f64)) {
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}

	fn fill_polygon(&mut self, points: &[(f64, f64)]) {
		let Some((&(x0, y0), rest)) = points.split_first() else {
			return;
		};
		self.begin_path();
		self.move_to(x0, y0);
		for &(x, y) in rest {
			self.line_to(x, y);
		}
		self.close_path();
		self.fill();
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.fill();
	}

	fn fill_text(&mut self, text: &str, x: f64, y: f64) {
		self.set_text_align("center");
		self.set_text_baseline("middle");
		let _ = CanvasRenderingContext2d::fill_text(self, text, x, y);
	}
}

/// Redraws the whole graph.
pub fn render<S: Surface + ?Sized>(
	surface: &mut S,
	nodes: &[Node],
	edges: &[Edge],
	width: f64,
	height: f64,
	palette: &Palette,
	config: &GraphConfig,
) {
	surface.clear(width, height);
	draw_edges(surface, nodes, edges, config);
	draw_nodes(surface, nodes, palette, config);
}

/// Segment between the two node boundaries, pointing from source to target.
pub fn trimmed_segment(source: &Node, target: &Node, radius: f64) -> ((f64, f64), (f64, f64)) {
	let (dx, dy) = (target.x - source.x, target.y - source.y);
	let dist = (dx * dx + dy * dy).sqrt().max(1.0);
	let (ux, uy) = (dx / dist, dy / dist);
	(
		(source.x + ux * radius, source.y + uy * radius),
		(target.x - ux * radius, target.y - uy * radius),
	)
}

/// Triangle with its tip at `to`, sides 30° either side of the segment.
fn arrowhead(from: (f64, f64), to: (f64, f64), size: f64) -> [(f64, f64); 3] {
	let angle = (to.1 - from.1).atan2(to.0 - from.0);
	let side = |offset: f64| {
		(
			to.0 - size * (angle + offset).cos(),
			to.1 - size * (angle + offset).sin(),
		)
	};
	[to, side(-PI / 6.0), side(PI / 6.0)]
}

fn draw_edges<S: Surface + ?Sized>(surface: &mut S, nodes: &[Node], edges: &[Edge], config: &GraphConfig) {
	if edges.is_empty() {
		return;
	}
	surface.set_line_width(config.edge_width);
	surface.set_stroke(theme::EDGE_COLOR);
	surface.set_fill(theme::EDGE_COLOR);

	for edge in edges {
		let (Some(source), Some(target)) = (nodes.get(edge.source), nodes.get(edge.target)) else {
			continue;
		};
		let (from, to) = trimmed_segment(source, target, config.node_radius);
		surface.line(from, to);
		surface.fill_polygon(&arrowhead(from, to, config.arrow_size));
	}
}

fn draw_nodes<S: Surface + ?Sized>(surface: &mut S, nodes: &[Node], palette: &Palette, config: &GraphConfig) {
	let r = config.node_radius;
	for node in nodes {
		surface.set_fill(palette.color(node.scale_idx));
		surface.fill_circle(node.x, node.y, r);

		surface.set_fill(theme::ID_COLOR);
		surface.set_font(&config.id_font);
		surface.fill_text(&node.id.0, node.x, node.y);

		surface.set_fill(&palette.text_color);
		surface.set_font(&config.label_font);
		surface.fill_text(
			&truncate_label(&node.name, config.max_label_len),
			node.x,
			node.y + r + config.label_offset,
		);
	}
}

/// Shortens `name` to `max` characters, the last being an ellipsis.
pub fn truncate_label(name: &str, max: usize) -> String {
	if name.chars().count() <= max {
		return name.to_string();
	}
	let mut out: String = name.chars().take(max.saturating_sub(1)).collect();
	out.push('\u{2026}');
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Debug, Clone, PartialEq)]
	enum Op {
		Clear,
		Line((f64, f64), (f64, f64)),
		Polygon(Vec<(f64, f64)>),
		Circle(f64, f64, f64, String),
		Text(String, f64, f64, String),
	}

	#[derive(Default)]
	struct Recorder {
		ops: Vec<Op>,
		fill: String,
	}

	impl Surface for Recorder {
		fn clear(&mut self, _width: f64, _height: f64) {
			self.ops.push(Op::Clear);
		}
		fn set_fill(&mut self, color: &str) {
			self.fill = color.to_string();
		}
		fn set_stroke(&mut self, _color: &str) {}
		fn set_line_width(&mut self, _width: f64) {}
		fn set_font(&mut self, _font: &str) {}
		fn line(&mut self, from: (f64, f64), to: (f64, f64)) {
			self.ops.push(Op::Line(from, to));
		}
		fn fill_polygon(&mut self, points: &[(f64, f64)]) {
			self.ops.push(Op::Polygon(points.to_vec()));
		}
		fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
			self.ops.push(Op::Circle(x, y, radius, self.fill.clone()));
		}
		fn fill_text(&mut self, text: &str, x: f64, y: f64) {
			self.ops.push(Op::Text(text.to_string(), x, y, self.fill.clone()));
		}
	}

	fn dist(a: (f64, f64), b: (f64, f64)) -> f64 {
		((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
	}

	#[test]
	fn edge_is_trimmed_to_node_boundaries() {
		let config = GraphConfig::default();
		let nodes = vec![Node::at(1, 100.0, 100.0), Node::at(2, 250.0, 180.0)];
		let edges = [Edge { source: 0, target: 1 }];
		let mut rec = Recorder::default();
		render(&mut rec, &nodes, &edges, 400.0, 400.0, &Palette::new(Vec::new()), &config);

		let (from, to) = rec
			.ops
			.iter()
			.find_map(|op| match op {
				Op::Line(a, b) => Some((*a, *b)),
				_ => None,
			})
			.unwrap();
		let r = config.node_radius;
		assert!((dist(from, (100.0, 100.0)) - r).abs() < 1e-9);
		assert!((dist(to, (250.0, 180.0)) - r).abs() < 1e-9);
	}

	#[test]
	fn arrowhead_tip_sits_on_target_boundary() {
		let config = GraphConfig::default();
		let nodes = vec![Node::at(1, 0.0, 50.0), Node::at(2, 100.0, 50.0)];
		let edges = [Edge { source: 0, target: 1 }];
		let mut rec = Recorder::default();
		render(&mut rec, &nodes, &edges, 200.0, 200.0, &Palette::new(Vec::new()), &config);

		let tri = rec
			.ops
			.iter()
			.find_map(|op| match op {
				Op::Polygon(p) => Some(p.clone()),
				_ => None,
			})
			.unwrap();
		assert_eq!(tri.len(), 3);
		assert!((tri[0].0 - 82.0).abs() < 1e-9 && (tri[0].1 - 50.0).abs() < 1e-9);
		for side in &tri[1..] {
			assert!((dist(tri[0], *side) - config.arrow_size).abs() < 1e-9);
			assert!(side.0 < tri[0].0);
		}
		assert!((tri[1].1 + tri[2].1 - 100.0).abs() < 1e-9);
	}

	#[test]
	fn nodes_drawn_with_palette_and_captions() {
		let config = GraphConfig::default();
		let palette = Palette::with_colors(
			vec!["towns".into(), "buildings".into()],
			vec!["#a00".into(), "#0a0".into()],
			"#222".into(),
		);
		let mut a = Node::at(12, 60.0, 70.0);
		a.name = "Main Gateways".into();
		a.scale_idx = 1;
		let mut b = Node::at(13, 160.0, 70.0);
		b.name = "A Very Long Pattern Name Indeed".into();
		b.scale_idx = 7;

		let mut rec = Recorder::default();
		render(&mut rec, &[a, b], &[], 300.0, 200.0, &palette, &config);

		assert_eq!(rec.ops[0], Op::Clear);
		assert!(rec.ops.contains(&Op::Circle(60.0, 70.0, 18.0, "#0a0".into())));
		assert!(rec.ops.contains(&Op::Circle(160.0, 70.0, 18.0, theme::FALLBACK_NODE_COLOR.into())));
		assert!(rec.ops.contains(&Op::Text("12".into(), 60.0, 70.0, theme::ID_COLOR.into())));
		assert!(rec.ops.contains(&Op::Text("Main Gateways".into(), 60.0, 102.0, "#222".into())));
		assert!(
			rec.ops
				.contains(&Op::Text("A Very Long Pattern N\u{2026}".into(), 160.0, 102.0, "#222".into()))
		);
	}

	#[test]
	fn empty_graph_only_clears() {
		let mut rec = Recorder::default();
		render(&mut rec, &[], &[], 10.0, 10.0, &Palette::new(Vec::new()), &GraphConfig::default());
		assert_eq!(rec.ops, vec![Op::Clear]);
	}

	#[test]
	fn truncation_counts_characters() {
		assert_eq!(truncate_label("Roof Garden", 22), "Roof Garden");
		assert_eq!(truncate_label("exactly-five", 12), "exactly-five");
		assert_eq!(truncate_label("Städte und Dörfer", 6), "Städt\u{2026}");
		assert_eq!(truncate_label("abc", 0), "\u{2026}");
	}
}
