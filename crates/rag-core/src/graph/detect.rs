//! Cycle detection over a resource allocation graph.
//!
//! # Overview
//!
//! With single-instance resources a resource allocation graph is deadlocked
//! exactly when it contains a directed cycle. This module decides that with a
//! three-color depth-first search and reports the first cycle it meets.
//!
//! # Design
//!
//! - **Three colors**: `White` (unvisited), `Gray` (on the current DFS path),
//!   `Black` (fully explored, no cycle through it). An edge into a Gray node
//!   closes a cycle.
//! - **Explicit stack**: frames hold a node and the position of the next
//!   neighbor to try, so very deep graphs cannot overflow the call stack.
//!   Visitation order is identical to the recursive formulation.
//! - **Deterministic**: roots are tried in node registration order and
//!   neighbors in edge insertion order.
//! - **O(V+E)**: every node is pushed at most once and every edge examined at
//!   most once.
//!
//! # Usage
//!
//! ```rust
//! use rag_core::graph::{ResourceAllocationGraph, detect};
//!
//! let mut rag = ResourceAllocationGraph::new();
//! rag.add_process("P1")?;
//! rag.add_resource("R1")?;
//! rag.add_edge("R1", "P1")?;
//!
//! let detection = detect(&rag);
//! assert!(!detection.has_cycle);
//! assert!(detection.cycle_path.is_empty());
//! # Ok::<(), rag_core::error::RagError>(())
//! ```

#![allow(
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
)]

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::rag::ResourceAllocationGraph;

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Outcome of a detection pass.
///
/// Transient: it is never written back into the graph.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Detection {
    /// `true` if the graph contains a directed cycle (a deadlock).
    pub has_cycle: bool,

    /// The cycle found, starting and ending at the same node.
    ///
    /// For cycle P1→R2→P2→R1→P1 the path is `["P1", "R2", "P2", "R1", "P1"]`.
    /// Empty when `has_cycle` is `false`.
    pub cycle_path: Vec<String>,
}

impl Detection {
    /// Number of distinct nodes on the cycle (path length minus the repeated
    /// start node).
    pub fn cycle_len(&self) -> usize {
        self.cycle_path.len().saturating_sub(1)
    }

    /// Alias for `has_cycle`: with single-instance resources a cycle is a
    /// deadlock.
    pub const fn is_deadlocked(&self) -> bool {
        self.has_cycle
    }
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_cycle {
            f.write_str(&self.cycle_path.join(" → "))
        } else {
            f.write_str("no cycle")
        }
    }
}

// ---------------------------------------------------------------------------
// Core detection
// ---------------------------------------------------------------------------

/// Search the graph for a directed cycle and report the first one found.
///
/// Never fails. An empty graph, or one without edges, has no cycle.
#[instrument(skip_all, fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn detect(graph: &ResourceAllocationGraph) -> Detection {
    let mut search = Search::new(graph);

    for root in 0..graph.node_count() {
        if search.color[root] != Color::White {
            continue;
        }
        if let Some(cycle) = search.run_from(root) {
            let cycle_path: Vec<String> = cycle
                .into_iter()
                .map(|pos| graph.node_at(pos).id.clone())
                .collect();
            debug!(cycle = %cycle_path.join(" → "), "cycle found");
            return Detection {
                has_cycle: true,
                cycle_path,
            };
        }
    }

    debug!("no cycle");
    Detection::default()
}

/// Check whether the graph has any cycle at all.
pub fn has_cycle(graph: &ResourceAllocationGraph) -> bool {
    detect(graph).has_cycle
}

impl ResourceAllocationGraph {
    /// Run cycle detection on this graph. See [`detect`].
    pub fn detect(&self) -> Detection {
        detect(self)
    }
}

// ---------------------------------------------------------------------------
// DFS internals
// ---------------------------------------------------------------------------

/// DFS colors for cycle detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Not yet visited.
    White,
    /// Currently on the DFS stack (in progress).
    Gray,
    /// Fully processed (all descendants visited).
    Black,
}

/// A node on the DFS path and the index of its next neighbor to examine.
#[derive(Debug, Clone, Copy)]
struct Frame {
    node: usize,
    next: usize,
}

struct Search<'g> {
    graph: &'g ResourceAllocationGraph,
    color: Vec<Color>,
    /// The current DFS path. Exactly the Gray nodes, root first.
    stack: Vec<Frame>,
}

impl<'g> Search<'g> {
    fn new(graph: &'g ResourceAllocationGraph) -> Self {
        Self {
            graph,
            color: vec![Color::White; graph.node_count()],
            stack: Vec::new(),
        }
    }

    /// Explore everything reachable from `root`. Returns the closed cycle
    /// path (positions) on the first back edge.
    fn run_from(&mut self, root: usize) -> Option<Vec<usize>> {
        self.enter(root);

        while let Some(frame) = self.stack.last_mut() {
            let current = frame.node;
            let targets = self.graph.targets_of(current);

            let Some(&neighbor) = targets.get(frame.next) else {
                // All neighbors explored without finding a cycle.
                self.stack.pop();
                self.color[current] = Color::Black;
                continue;
            };
            frame.next += 1;

            match self.color[neighbor] {
                Color::White => self.enter(neighbor),
                Color::Gray => return Some(self.close_cycle(neighbor)),
                Color::Black => {} // already proven cycle-free
            }
        }

        None
    }

    fn enter(&mut self, node: usize) {
        self.color[node] = Color::Gray;
        self.stack.push(Frame { node, next: 0 });
    }

    /// Build the path from `start` (a Gray node, so on the stack) down to the
    /// top of the stack, closed by repeating `start`.
    fn close_cycle(&self, start: usize) -> Vec<usize> {
        let from = self
            .stack
            .iter()
            .position(|frame| frame.node == start)
            .unwrap_or(0);

        let mut cycle: Vec<usize> = self.stack[from..].iter().map(|frame| frame.node).collect();
        cycle.push(start);
        cycle
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
