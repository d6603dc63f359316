#![forbid(unsafe_code)]
//! rag-core library.
//!
//! Models a Resource Allocation Graph (RAG) of processes and resources and
//! decides whether its allocation/request state is deadlocked.
//!
//! # Conventions
//!
//! - **Errors**: Model construction returns [`error::RagError`]. Detection is
//!   total and never fails.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//!
//! # Usage
//!
//! ```rust
//! use rag_core::graph::ResourceAllocationGraph;
//!
//! let mut rag = ResourceAllocationGraph::new();
//! rag.add_process("P1")?;
//! rag.add_resource("R1")?;
//! rag.add_edge("R1", "P1")?;
//! rag.add_edge("P1", "R1")?;
//!
//! let detection = rag.detect();
//! assert!(detection.has_cycle);
//! assert_eq!(detection.to_string(), "P1 → R1 → P1");
//! # Ok::<(), rag_core::error::RagError>(())
//! ```

pub mod error;
pub mod graph;
pub mod model;

pub use error::{ErrorCode, RagError};
pub use graph::{Detection, ResourceAllocationGraph, SharedRag};
pub use model::{Edge, EdgeKind, Node, NodeKind};
