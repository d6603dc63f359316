//! The resource allocation graph store.
//!
//! # Overview
//!
//! [`ResourceAllocationGraph`] owns the registered processes and resources and
//! the directed edges between them. It validates the bipartite invariant at
//! insertion time and exposes the read access needed by the detector and by
//! presentation layers.
//!
//! # Ordering
//!
//! Nodes are kept in registration order and every node's adjacency in edge
//! insertion order. Traversals built on top of this store are therefore
//! reproducible: the same construction sequence always yields the same
//! reported cycle.
//!
//! # Multiplicity
//!
//! Duplicate edges are stored as given. A process may issue the same request
//! twice; both edges appear in [`ResourceAllocationGraph::edges`] and in
//! [`ResourceAllocationGraph::neighbors`].

#![allow(
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::missing_const_for_fn,
)]

use std::collections::HashMap;

use tracing::debug;

use crate::error::RagError;
use crate::model::{Edge, EdgeKind, Node, NodeKind};

// ---------------------------------------------------------------------------
// ResourceAllocationGraph
// ---------------------------------------------------------------------------

/// A bipartite directed graph of processes and resources.
///
/// Node ids are unique across both kinds, so an edge can be addressed by a
/// pair of ids without ambiguity.
#[derive(Debug, Clone, Default)]
pub struct ResourceAllocationGraph {
    /// Registered nodes in registration order.
    nodes: Vec<Node>,
    /// id → position in `nodes`.
    index: HashMap<String, usize>,
    /// Per-node ordered list of destination positions, parallel to `nodes`.
    adjacency: Vec<Vec<usize>>,
    /// Every edge in insertion order.
    edges: Vec<Edge>,
}

impl ResourceAllocationGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node.
    ///
    /// Registering an id again with the same kind is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::DuplicateNode`] if `id` is already registered
    /// under the other kind.
    pub fn add_node(&mut self, id: impl Into<String>, kind: NodeKind) -> Result<(), RagError> {
        let id = id.into();

        if let Some(&pos) = self.index.get(&id) {
            let existing = self.nodes[pos].kind;
            if existing == kind {
                debug!(node = %id, %kind, "node already registered");
                return Ok(());
            }
            return Err(RagError::DuplicateNode {
                id,
                existing,
                requested: kind,
            });
        }

        debug!(node = %id, %kind, "registering node");
        let pos = self.nodes.len();
        self.index.insert(id.clone(), pos);
        self.nodes.push(Node { id, kind });
        self.adjacency.push(Vec::new());
        Ok(())
    }

    /// Register a process node.
    ///
    /// # Errors
    ///
    /// See [`ResourceAllocationGraph::add_node`].
    pub fn add_process(&mut self, id: impl Into<String>) -> Result<(), RagError> {
        self.add_node(id, NodeKind::Process)
    }

    /// Register a resource node.
    ///
    /// # Errors
    ///
    /// See [`ResourceAllocationGraph::add_node`].
    pub fn add_resource(&mut self, id: impl Into<String>) -> Result<(), RagError> {
        self.add_node(id, NodeKind::Resource)
    }

    /// Register a directed edge `from → to` and return its category.
    ///
    /// Resource → Process is an assignment, Process → Resource a request.
    /// The graph is left untouched when an error is returned.
    ///
    /// # Errors
    ///
    /// - [`RagError::UnknownNode`] if either endpoint is not registered
    ///   (the source is checked first).
    /// - [`RagError::InvalidEdgeKind`] if both endpoints share a kind.
    pub fn add_edge(&mut self, from: &str, to: &str) -> Result<EdgeKind, RagError> {
        let from_pos = self.position(from)?;
        let to_pos = self.position(to)?;

        let from_kind = self.nodes[from_pos].kind;
        if from_kind == self.nodes[to_pos].kind {
            return Err(RagError::InvalidEdgeKind {
                from: from.to_string(),
                to: to.to_string(),
                kind: from_kind,
            });
        }

        let kind = EdgeKind::from_source(from_kind);
        debug!(from, to, %kind, "adding edge");
        self.adjacency[from_pos].push(to_pos);
        self.edges.push(Edge {
            from: from.to_string(),
            to: to.to_string(),
            kind,
        });
        Ok(kind)
    }

    /// Ordered adjacency targets of `id`.
    ///
    /// Returns an empty list if the node has no outgoing edges or is not
    /// known.
    pub fn neighbors(&self, id: &str) -> Vec<&str> {
        self.index
            .get(id)
            .map(|&pos| {
                self.adjacency[pos]
                    .iter()
                    .map(|&target| self.nodes[target].id.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Ids of every node of `kind`, in registration order.
    pub fn nodes_by_kind(&self, kind: NodeKind) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|node| node.kind == kind)
            .map(|node| node.id.as_str())
            .collect()
    }

    /// All nodes in registration order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&pos| &self.nodes[pos])
    }

    /// Return `true` if `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges, counting duplicates.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Return `true` if no node is registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // -- crate-internal positional access used by the detector --------------

    pub(crate) fn node_at(&self, pos: usize) -> &Node {
        &self.nodes[pos]
    }

    pub(crate) fn targets_of(&self, pos: usize) -> &[usize] {
        &self.adjacency[pos]
    }

    fn position(&self, id: &str) -> Result<usize, RagError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| RagError::UnknownNode { id: id.to_string() })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> ResourceAllocationGraph {
        let mut rag = ResourceAllocationGraph::new();
        for p in ["P1", "P2"] {
            rag.add_process(p).expect("add process");
        }
        for r in ["R1", "R2"] {
            rag.add_resource(r).expect("add resource");
        }
        rag
    }

    #[test]
    fn add_edge_classifies_by_source() {
        let mut rag = two_by_two();
        assert_eq!(rag.add_edge("R1", "P1"), Ok(EdgeKind::Assignment));
        assert_eq!(rag.add_edge("P1", "R2"), Ok(EdgeKind::Request));
        assert_eq!(rag.edge_count(), 2);
        assert_eq!(rag.edges()[0].kind, EdgeKind::Assignment);
        assert_eq!(rag.edges()[1].kind, EdgeKind::Request);
    }

    #[test]
    fn neighbors_keep_insertion_order() {
        let mut rag = two_by_two();
        rag.add_edge("P1", "R2").expect("edge");
        rag.add_edge("P1", "R1").expect("edge");
        assert_eq!(rag.neighbors("P1"), vec!["R2", "R1"]);
    }

    #[test]
    fn neighbors_empty_for_sink_and_unknown() {
        let rag = two_by_two();
        assert!(rag.neighbors("P2").is_empty());
        assert!(rag.neighbors("nope").is_empty());
    }

    #[test]
    fn duplicate_edges_are_kept() {
        let mut rag = two_by_two();
        rag.add_edge("P1", "R1").expect("edge");
        rag.add_edge("P1", "R1").expect("edge");
        assert_eq!(rag.neighbors("P1"), vec!["R1", "R1"]);
        assert_eq!(rag.edge_count(), 2);
    }

    #[test]
    fn same_kind_edge_rejected_and_graph_unchanged() {
        let mut rag = two_by_two();
        let err = rag.add_edge("P1", "P2").expect_err("process → process");
        assert_eq!(
            err,
            RagError::InvalidEdgeKind {
                from: "P1".to_string(),
                to: "P2".to_string(),
                kind: NodeKind::Process,
            }
        );
        let err = rag.add_edge("R1", "R2").expect_err("resource → resource");
        assert!(matches!(err, RagError::InvalidEdgeKind { kind: NodeKind::Resource, .. }));
        assert_eq!(rag.edge_count(), 0);
        assert!(rag.neighbors("P1").is_empty());
        assert!(rag.neighbors("R1").is_empty());
    }

    #[test]
    fn unknown_endpoint_rejected_and_graph_unchanged() {
        let mut rag = two_by_two();
        assert_eq!(
            rag.add_edge("P1", "R9"),
            Err(RagError::UnknownNode {
                id: "R9".to_string()
            })
        );
        assert_eq!(
            rag.add_edge("P9", "R1"),
            Err(RagError::UnknownNode {
                id: "P9".to_string()
            })
        );
        assert_eq!(rag.edge_count(), 0);
        assert!(rag.neighbors("P1").is_empty());
    }

    #[test]
    fn reregistering_same_kind_is_noop() {
        let mut rag = two_by_two();
        rag.add_process("P1").expect("idempotent");
        assert_eq!(rag.node_count(), 4);
    }

    #[test]
    fn registering_id_under_other_kind_fails() {
        let mut rag = two_by_two();
        let err = rag.add_resource("P1").expect_err("conflict");
        assert_eq!(
            err,
            RagError::DuplicateNode {
                id: "P1".to_string(),
                existing: NodeKind::Process,
                requested: NodeKind::Resource,
            }
        );
        assert_eq!(rag.node("P1").map(|n| n.kind), Some(NodeKind::Process));
        assert_eq!(rag.node_count(), 4);
    }

    #[test]
    fn nodes_by_kind_in_registration_order() {
        let mut rag = ResourceAllocationGraph::new();
        rag.add_resource("R2").expect("add");
        rag.add_process("P3").expect("add");
        rag.add_resource("R1").expect("add");
        rag.add_process("P1").expect("add");
        assert_eq!(rag.nodes_by_kind(NodeKind::Process), vec!["P3", "P1"]);
        assert_eq!(rag.nodes_by_kind(NodeKind::Resource), vec!["R2", "R1"]);
    }

    #[test]
    fn empty_graph_accessors() {
        let rag = ResourceAllocationGraph::new();
        assert!(rag.is_empty());
        assert_eq!(rag.node_count(), 0);
        assert_eq!(rag.edge_count(), 0);
        assert!(!rag.contains("P1"));
        assert!(rag.node("P1").is_none());
    }
}
