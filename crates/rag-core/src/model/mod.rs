//! Node and edge types of a resource allocation graph.
//!
//! ## Submodules
//!
//! - [`node`] — processes and resources.
//! - [`edge`] — assignment and request edges.

pub mod edge;
pub mod node;

pub use edge::{Edge, EdgeKind};
pub use node::{Node, NodeKind};
