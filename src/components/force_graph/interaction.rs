//! Pointer handling: Idle -> Dragging -> Idle.
//!
//! A press on a node starts a drag. Releasing close to where the press began
//! counts as a click and yields the pattern's detail page; anything further is
//! a reposition. Leaving the canvas cancels the drag without navigating.

use log::debug;

use super::state::{DragState, GraphSession};

/// Result of a pointer press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerDown {
	/// Nothing under the pointer.
	Miss,
	/// A drag began. `resume` is set when the loop had gone idle and must be
	/// restarted.
	Grabbed { node: usize, resume: bool },
}

/// Result of a pointer move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerMove {
	/// The dragged node moved; redraw now.
	Dragged,
	/// No drag; `over_node` drives the cursor affordance.
	Hover { over_node: bool },
}

/// Result of a pointer release.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PointerUp {
	/// No drag was in progress.
	Ignored,
	/// The node was moved; no navigation.
	DragEnd,
	/// A click; navigate to `url`.
	Click { url: String },
}

impl GraphSession {
	/// Starts dragging the node under `(x, y)`, if any. A settled graph is
	/// rewound into the annealing tail so it visibly reacts.
	pub fn pointer_down(&mut self, x: f64, y: f64) -> PointerDown {
		let Some(node) = self.node_at_position(x, y) else {
			return PointerDown::Miss;
		};
		self.drag = Some(DragState {
			node,
			start_x: x,
			start_y: y,
		});

		let resume = self.is_settled();
		if resume {
			self.frame = self.config.reheat_frame();
		}
		debug!("pattern-graph: grabbed node {} (resume: {})", self.graph.nodes[node].id, resume);
		PointerDown::Grabbed { node, resume }
	}

	/// Moves the dragged node to the pointer. Clamping is left to the next
	/// integration step.
	pub fn pointer_move(&mut self, x: f64, y: f64) -> PointerMove {
		if let Some(drag) = self.drag {
			if let Some(node) = self.graph.nodes.get_mut(drag.node) {
				node.x = x;
				node.y = y;
			}
			return PointerMove::Dragged;
		}
		PointerMove::Hover {
			over_node: self.node_at_position(x, y).is_some(),
		}
	}

	/// Ends the drag, classifying it as a click or a reposition by how far
	/// the pointer travelled since the press.
	pub fn pointer_up(&mut self, x: f64, y: f64) -> PointerUp {
		let Some(drag) = self.drag.take() else {
			return PointerUp::Ignored;
		};
		let (dx, dy) = (x - drag.start_x, y - drag.start_y);
		if dx * dx + dy * dy >= self.config.click_threshold_sq {
			debug!("pattern-graph: drag ended");
			return PointerUp::DragEnd;
		}
		match self.graph.nodes.get(drag.node) {
			Some(node) => {
				let url = self.page.pattern_url(&node.id.0);
				debug!("pattern-graph: navigating to {url}");
				PointerUp::Click { url }
			}
			None => PointerUp::DragEnd,
		}
	}

	/// Cancels any drag without navigating.
	pub fn pointer_leave(&mut self) {
		if self.drag.take().is_some() {
			debug!("pattern-graph: drag cancelled");
		}
	}
}
