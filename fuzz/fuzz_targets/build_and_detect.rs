#![no_main]

use libfuzzer_sys::fuzz_target;
use rag_core::ResourceAllocationGraph;
use rag_core::graph::{deadlocked_processes, to_petgraph};

// First byte: node count. Every following pair of bytes is an edge attempt.
// Even node indices are processes, odd ones resources.
fuzz_target!(|data: &[u8]| {
    let Some((&count, rest)) = data.split_first() else {
        return;
    };
    let count = usize::from(count % 32) + 1;

    let mut rag = ResourceAllocationGraph::new();
    for i in 0..count {
        let id = i.to_string();
        let _ = if i % 2 == 0 {
            rag.add_process(id)
        } else {
            rag.add_resource(id)
        };
    }

    for pair in rest.chunks_exact(2) {
        let from = (usize::from(pair[0]) % (count + 1)).to_string();
        let to = (usize::from(pair[1]) % (count + 1)).to_string();
        // Index `count` is never registered, so unknown ids get exercised too.
        let _ = rag.add_edge(&from, &to);
    }

    let detection = rag.detect();
    assert_eq!(
        detection.has_cycle,
        petgraph::algo::is_cyclic_directed(&to_petgraph(&rag))
    );
    if detection.has_cycle {
        assert_eq!(detection.cycle_path.first(), detection.cycle_path.last());
        assert!(!deadlocked_processes(&rag).is_empty());
    } else {
        assert!(detection.cycle_path.is_empty());
    }
});
