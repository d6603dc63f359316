//! Resource allocation graph storage and deadlock analysis.
//!
//! ## Pipeline
//!
//! ```text
//! caller registers nodes and edges
//!        ↓  rag::ResourceAllocationGraph::{add_node, add_edge}
//! ResourceAllocationGraph (validated, insertion-ordered)
//!        ↓  detect::detect()
//! Detection { has_cycle, cycle_path }
//!        ↓  deadlock::deadlocked_processes() / export::to_dot()
//! reports and diagrams
//! ```
//!
//! ## Submodules
//!
//! - [`rag`] — the graph store and its structural invariants.
//! - [`detect`] — three-color DFS cycle detection.
//! - [`deadlock`] — processes on any cycle (SCC based).
//! - [`export`] — `petgraph` and Graphviz views.
//! - [`shared`] — lock-guarded handle for snapshot-isolated detection.

pub mod deadlock;
pub mod detect;
pub mod export;
pub mod rag;
pub mod shared;

pub use deadlock::{cycles, deadlocked_processes};
pub use detect::{Detection, detect, has_cycle};
pub use export::{to_dot, to_petgraph};
pub use rag::ResourceAllocationGraph;
pub use shared::SharedRag;
