//! Lock-guarded graph handle for hosts that mutate between detection passes.
//!
//! A detection pass must not observe edges inserted while it runs. The
//! [`SharedRag`] handle enforces this: writers take the write lock through
//! [`SharedRag::update`], and [`SharedRag::detect`] holds the read lock for
//! the whole pass. [`SharedRag::snapshot`] clones a consistent copy for
//! callers that want to release the lock before doing further work.

#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

use std::sync::{Arc, RwLock};

use tracing::debug;

use super::detect::{Detection, detect};
use super::rag::ResourceAllocationGraph;
use crate::error::RagError;

/// Cheaply cloneable, thread-safe handle to a graph.
#[derive(Debug, Clone, Default)]
pub struct SharedRag {
    inner: Arc<RwLock<ResourceAllocationGraph>>,
}

impl SharedRag {
    pub fn new(graph: ResourceAllocationGraph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    /// Mutate the graph under the write lock.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or [`RagError::LockPoisoned`] if a
    /// previous writer panicked.
    pub fn update<T>(
        &self,
        f: impl FnOnce(&mut ResourceAllocationGraph) -> Result<T, RagError>,
    ) -> Result<T, RagError> {
        let mut guard = self.inner.write().map_err(|_| RagError::LockPoisoned)?;
        f(&mut *guard)
    }

    /// Run detection while holding the read lock.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::LockPoisoned`] if a writer panicked.
    pub fn detect(&self) -> Result<Detection, RagError> {
        let guard = self.inner.read().map_err(|_| RagError::LockPoisoned)?;
        Ok(detect(&*guard))
    }

    /// Clone a consistent copy of the graph.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::LockPoisoned`] if a writer panicked.
    pub fn snapshot(&self) -> Result<ResourceAllocationGraph, RagError> {
        let guard = self.inner.read().map_err(|_| RagError::LockPoisoned)?;
        debug!(
            nodes = guard.node_count(),
            edges = guard.edge_count(),
            "graph snapshot taken"
        );
        Ok(guard.clone())
    }
}

impl From<ResourceAllocationGraph> for SharedRag {
    fn from(graph: ResourceAllocationGraph) -> Self {
        Self::new(graph)
    }
}
