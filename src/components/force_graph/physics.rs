//! One explicit-Euler step of the force layout.
//!
//! Phases run in a fixed order, each adding into the same velocity
//! accumulator: pairwise repulsion, edge springs, centre gravity, then
//! damping, integration and clamping. All forces are scaled by the annealing
//! temperature.

use super::config::GraphConfig;
use super::graph::{Edge, Node};

/// Advances every node by one step inside a `width` x `height` viewport.
///
/// `dragged` is held in place with zero velocity; its position belongs to the
/// pointer. Coincident nodes are handled by flooring the distance to 1.
pub fn step(
	nodes: &mut [Node],
	edges: &[Edge],
	width: f64,
	height: f64,
	temperature: f64,
	dragged: Option<usize>,
	config: &GraphConfig,
) {
	apply_repulsion(nodes, temperature, config);
	apply_springs(nodes, edges, temperature, config);
	apply_gravity(nodes, width, height, temperature, config);
	integrate(nodes, width, height, dragged, config);
}

fn distance(dx: f64, dy: f64) -> f64 {
	(dx * dx + dy * dy).sqrt().max(1.0)
}

fn apply_repulsion(nodes: &mut [Node], temperature: f64, config: &GraphConfig) {
	for i in 0..nodes.len() {
		let (head, tail) = nodes.split_at_mut(i + 1);
		let n1 = &mut head[i];
		for n2 in tail {
			let (dx, dy) = (n1.x - n2.x, n1.y - n2.y);
			let dist = distance(dx, dy);
			let force = config.repulsion / (dist * dist) * temperature;
			let (fx, fy) = (dx / dist * force, dy / dist * force);
			n1.vx += fx;
			n1.vy += fy;
			n2.vx -= fx;
			n2.vy -= fy;
		}
	}
}

fn apply_springs(nodes: &mut [Node], edges: &[Edge], temperature: f64, config: &GraphConfig) {
	for edge in edges {
		if edge.source == edge.target {
			continue;
		}
		let (s, t) = (&nodes[edge.source], &nodes[edge.target]);
		let (dx, dy) = (t.x - s.x, t.y - s.y);
		let dist = distance(dx, dy);
		let force = (dist - config.spring_length) * config.spring_k * temperature;
		let (fx, fy) = (dx / dist * force, dy / dist * force);

		nodes[edge.source].vx += fx;
		nodes[edge.source].vy += fy;
		nodes[edge.target].vx -= fx;
		nodes[edge.target].vy -= fy;
	}
}

fn apply_gravity(nodes: &mut [Node], width: f64, height: f64, temperature: f64, config: &GraphConfig) {
	let (cx, cy) = (width / 2.0, height / 2.0);
	for n in nodes {
		n.vx += (cx - n.x) * config.gravity * temperature;
		n.vy += (cy - n.y) * config.gravity * temperature;
	}
}

fn integrate(nodes: &mut [Node], width: f64, height: f64, dragged: Option<usize>, config: &GraphConfig) {
	let r = config.node_radius;
	for (i, n) in nodes.iter_mut().enumerate() {
		if dragged == Some(i) {
			n.vx = 0.0;
			n.vy = 0.0;
			continue;
		}
		n.vx *= config.damping;
		n.vy *= config.damping;
		n.x = clamp_axis(n.x + n.vx, r, width);
		n.y = clamp_axis(n.y + n.vy, r, height);
	}
}

/// Keeps a circle of radius `r` inside `[0, extent]`. A viewport narrower
/// than the circle pins it to the lower edge.
fn clamp_axis(v: f64, r: f64, extent: f64) -> f64 {
	v.min(extent - r).max(r)
}
