//! Proptest strategies for random resource allocation graphs.

#![allow(dead_code)]

use proptest::prelude::*;
use rag_core::graph::ResourceAllocationGraph;

/// A raw edge: `true` means process → resource (request).
pub type RawEdge = (bool, usize, usize);

/// Random bipartite graph: `(process count, resource count, edges)`.
pub fn arb_rag_parts() -> impl Strategy<Value = (usize, usize, Vec<RawEdge>)> {
    (1usize..8, 1usize..8).prop_flat_map(|(processes, resources)| {
        let edge = (any::<bool>(), 0..processes, 0..resources);
        (
            Just(processes),
            Just(resources),
            prop::collection::vec(edge, 0..24),
        )
    })
}

/// Build a graph, registering processes `P0..` then resources `R0..`.
pub fn build_rag(processes: usize, resources: usize, edges: &[RawEdge]) -> ResourceAllocationGraph {
    let mut rag = ResourceAllocationGraph::new();
    for p in 0..processes {
        rag.add_process(format!("P{p}")).expect("add process");
    }
    for r in 0..resources {
        rag.add_resource(format!("R{r}")).expect("add resource");
    }
    for &(request, p, r) in edges {
        let (from, to) = if request {
            (format!("P{p}"), format!("R{r}"))
        } else {
            (format!("R{r}"), format!("P{p}"))
        };
        rag.add_edge(&from, &to).expect("add edge");
    }
    rag
}

/// Build a single alternating cycle P0 → R0 → P1 → R1 → … → P0.
pub fn alternating_cycle(len: usize) -> ResourceAllocationGraph {
    let edges: Vec<RawEdge> = (0..len)
        .flat_map(|i| [(true, i, i), (false, (i + 1) % len, i)])
        .collect();
    build_rag(len, len, &edges)
}
