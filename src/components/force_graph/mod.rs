//! Force-directed pattern relationship graph.
//!
//! Lays out patterns and their "contains" relationships on an HTML canvas:
//! - Patterns start in horizontal bands by scale, then settle under
//!   repulsion, edge springs and centre gravity with annealing
//! - Edges are drawn as arrows from container to contained pattern
//! - Nodes can be dragged; a click opens the pattern's page
//!
//! # Example
//!
//! ```ignore
//! use pattern_graph::{PatternDocument, PatternGraph};
//!
//! let (doc, set_doc) = signal(None::<PatternDocument>);
//! view! { <PatternGraph data=doc root_prefix="../" /> }
//! ```

mod component;
pub mod config;
mod driver;
pub mod graph;
mod interaction;
pub mod physics;
pub mod render;
mod state;
pub mod theme;
mod types;

pub use component::PatternGraph;
pub use config::{GraphConfig, PageConfig};
pub use driver::{FrameScheduler, LoopState, should_continue};
pub use interaction::{PointerDown, PointerMove, PointerUp};
pub use state::{DragState, GraphSession};
pub use theme::Palette;
pub use types::{Pattern, PatternDocument, PatternId, Scale};
