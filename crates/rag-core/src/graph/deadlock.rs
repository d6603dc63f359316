//! Deadlock membership: which processes sit on a cycle.
//!
//! [`detect`](super::detect::detect) stops at the first cycle. Reports often
//! want every process that is part of *some* cycle. Those are exactly the
//! processes in a strongly connected component with more than one node
//! (self-loops cannot exist in a bipartite graph).
//!
//! Components come from Tarjan's algorithm over the `petgraph` view of the
//! graph built by [`to_petgraph`].

#![allow(clippy::must_use_candidate)]

use petgraph::algo::tarjan_scc;
use petgraph::graph::NodeIndex;
use tracing::instrument;

use super::export::to_petgraph;
use super::rag::ResourceAllocationGraph;

/// Member ids of every cyclic strongly connected component.
///
/// Members of each component are listed in registration order, and the
/// components are ordered by their first member. Empty for acyclic graphs.
#[instrument(skip_all, fields(nodes = graph.node_count()))]
pub fn cycles(graph: &ResourceAllocationGraph) -> Vec<Vec<String>> {
    let mut components = cyclic_components(graph);
    components.sort_unstable_by_key(|component| component.first().map(|idx| idx.index()));

    components
        .into_iter()
        .map(|component| {
            component
                .into_iter()
                .map(|idx| graph.node_at(idx.index()).id.clone())
                .collect()
        })
        .collect()
}

/// Ids of all processes that lie on at least one cycle, in registration
/// order.
pub fn deadlocked_processes(graph: &ResourceAllocationGraph) -> Vec<String> {
    let mut on_cycle = vec![false; graph.node_count()];
    for component in cyclic_components(graph) {
        for idx in component {
            on_cycle[idx.index()] = true;
        }
    }

    graph
        .nodes()
        .iter()
        .zip(on_cycle)
        .filter(|(node, cyclic)| *cyclic && node.is_process())
        .map(|(node, _)| node.id.clone())
        .collect()
}

/// Tarjan components with more than one member, each sorted by index.
fn cyclic_components(graph: &ResourceAllocationGraph) -> Vec<Vec<NodeIndex>> {
    let pg = to_petgraph(graph);
    tarjan_scc(&pg)
        .into_iter()
        .filter(|component| component.len() > 1)
        .map(|mut component| {
            component.sort_unstable();
            component
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(processes: &[&str], resources: &[&str], edges: &[(&str, &str)]) -> ResourceAllocationGraph {
        let mut rag = ResourceAllocationGraph::new();
        for p in processes {
            rag.add_process(*p).expect("add process");
        }
        for r in resources {
            rag.add_resource(*r).expect("add resource");
        }
        for (from, to) in edges {
            rag.add_edge(from, to).expect("add edge");
        }
        rag
    }

    #[test]
    fn acyclic_graph_has_no_deadlocked_processes() {
        let rag = build(&["P1", "P2"], &["R1"], &[("R1", "P1"), ("P2", "R1")]);
        assert!(deadlocked_processes(&rag).is_empty());
        assert!(cycles(&rag).is_empty());
    }

    #[test]
    fn waiting_process_outside_cycle_is_not_listed() {
        // P1 ⇄ R1 cycle; P2 waits on R1 but is not on the cycle.
        let rag = build(
            &["P1", "P2"],
            &["R1", "R2"],
            &[("R1", "P1"), ("P1", "R1"), ("P2", "R1"), ("R2", "P2")],
        );
        assert_eq!(deadlocked_processes(&rag), vec!["P1"]);
        assert_eq!(cycles(&rag), vec![vec!["P1".to_string(), "R1".to_string()]]);
    }

    #[test]
    fn independent_cycles_are_listed_in_registration_order() {
        let rag = build(
            &["P1", "P2", "P3"],
            &["R1", "R2"],
            &[("P3", "R2"), ("R2", "P3"), ("P1", "R1"), ("R1", "P1")],
        );
        assert_eq!(deadlocked_processes(&rag), vec!["P1", "P3"]);
        assert_eq!(
            cycles(&rag),
            vec![
                vec!["P1".to_string(), "R1".to_string()],
                vec!["P3".to_string(), "R2".to_string()],
            ]
        );
    }
}
