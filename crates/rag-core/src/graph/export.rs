//! Read-only views of the graph for presentation layers.
//!
//! - [`to_petgraph`] — a `petgraph` [`DiGraph`] whose node indices follow
//!   registration order and whose edges follow insertion order.
//! - [`to_dot`] — Graphviz DOT text. Processes are circles, resources boxes;
//!   assignment edges are blue and request edges red.

#![allow(clippy::must_use_candidate)]

use std::fmt::Write as FmtWrite;

use petgraph::graph::{DiGraph, NodeIndex};

use super::rag::ResourceAllocationGraph;
use crate::model::{EdgeKind, Node, NodeKind};

/// Convert to a `petgraph` graph. `NodeIndex::new(i)` is the `i`-th
/// registered node.
pub fn to_petgraph(graph: &ResourceAllocationGraph) -> DiGraph<Node, EdgeKind> {
    let mut pg = DiGraph::with_capacity(graph.node_count(), graph.edge_count());
    for node in graph.nodes() {
        pg.add_node(node.clone());
    }
    for pos in 0..graph.node_count() {
        let kind = EdgeKind::from_source(graph.node_at(pos).kind);
        for &target in graph.targets_of(pos) {
            pg.add_edge(NodeIndex::new(pos), NodeIndex::new(target), kind);
        }
    }
    pg
}

/// Render the graph as Graphviz DOT.
pub fn to_dot(graph: &ResourceAllocationGraph) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "digraph rag {{");
    for node in graph.nodes() {
        let (shape, fill) = match node.kind {
            NodeKind::Process => ("circle", "lightgray"),
            NodeKind::Resource => ("box", "yellow"),
        };
        let _ = writeln!(
            out,
            "    \"{}\" [shape={shape}, style=filled, fillcolor={fill}];",
            escape(&node.id)
        );
    }
    for edge in graph.edges() {
        let color = match edge.kind {
            EdgeKind::Assignment => "blue",
            EdgeKind::Request => "red",
        };
        let _ = writeln!(
            out,
            "    \"{}\" -> \"{}\" [color={color}];",
            escape(&edge.from),
            escape(&edge.to)
        );
    }
    let _ = writeln!(out, "}}");
    out
}

fn escape(id: &str) -> String {
    id.replace('\\', "\\\\").replace('"', "\\\"")
}
