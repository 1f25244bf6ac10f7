//! Frame loop decisions for the simulation.
//!
//! The loop steps while the frame budget lasts, keeps going for as long as a
//! drag holds it open, and otherwise goes fully idle until the next drag.

use super::physics;
use super::render::{self, Surface};
use super::state::GraphSession;

/// What the frame loop is doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
	/// Settled and not dragged: no frames are scheduled.
	Idle,
	/// Annealing within the frame budget.
	Stepping,
	/// Past the budget but kept alive by an active drag.
	DragExtended,
}

impl LoopState {
	pub fn of(frame: u32, budget: u32, drag_active: bool) -> Self {
		if frame < budget {
			Self::Stepping
		} else if drag_active {
			Self::DragExtended
		} else {
			Self::Idle
		}
	}

	pub fn is_running(self) -> bool {
		self != Self::Idle
	}
}

/// Whether another frame should be requested.
pub fn should_continue(frame: u32, budget: u32, drag_active: bool) -> bool {
	LoopState::of(frame, budget, drag_active).is_running()
}

impl GraphSession {
	pub fn loop_state(&self) -> LoopState {
		LoopState::of(self.frame, self.config.total_frames, self.drag.is_some())
	}

	/// Runs one frame: integrate, draw, advance the clock. Returns the state
	/// the loop is in afterwards; [`LoopState::Idle`] means stop scheduling.
	pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> LoopState {
		self.step();
		self.redraw(surface);
		self.frame = self.frame.saturating_add(1);
		self.loop_state()
	}

	/// Integrates one step without drawing.
	pub fn step(&mut self) {
		let temperature = self.temperature();
		let dragged = self.dragged_node();
		physics::step(
			&mut self.graph.nodes,
			&self.graph.edges,
			self.width,
			self.height,
			temperature,
			dragged,
			&self.config,
		);
	}

	/// Draws the current positions without stepping.
	pub fn redraw<S: Surface + ?Sized>(&self, surface: &mut S) {
		render::render(
			surface,
			&self.graph.nodes,
			&self.graph.edges,
			self.width,
			self.height,
			&self.palette,
			&self.config,
		);
	}

	/// Adopts a new viewport size. Positions are kept as they are; only later
	/// clamping sees the new bounds.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

/// Bookkeeping for a `requestAnimationFrame` loop: at most one frame is ever
/// outstanding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameScheduler {
	pending: bool,
}

impl FrameScheduler {
	/// Claims the right to request a frame. Returns `false` if one is
	/// already pending.
	pub fn request(&mut self) -> bool {
		!std::mem::replace(&mut self.pending, true)
	}

	/// Marks the pending frame as delivered.
	pub fn delivered(&mut self) {
		self.pending = false;
	}
}
