//! `rag graph` — node and edge enumeration, or Graphviz DOT.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use rag_core::graph::to_dot;
use rag_core::{Edge, Node, ResourceAllocationGraph};
use serde::Serialize;

use crate::output::{OutputMode, Report, emit};

/// Arguments for `rag graph`.
#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Scenario file (TOML, or JSON by `.json` extension).
    pub scenario: PathBuf,

    /// Emit Graphviz DOT instead of the edge list.
    #[arg(long)]
    pub dot: bool,
}

#[derive(Debug, Serialize)]
struct GraphOutput<'a> {
    nodes: &'a [Node],
    edges: &'a [Edge],
}

/// Execute `rag graph`.
pub fn run_graph(args: &GraphArgs, output: OutputMode) -> anyhow::Result<()> {
    let (_, rag) = super::load_graph(&args.scenario, output)?;

    if args.dot {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        out.write_all(to_dot(&rag).as_bytes())?;
        return Ok(());
    }

    emit(output, &graph_output(&rag))
}

fn graph_output(rag: &ResourceAllocationGraph) -> GraphOutput<'_> {
    GraphOutput {
        nodes: rag.nodes(),
        edges: rag.edges(),
    }
}

impl Report for GraphOutput<'_> {
    fn write_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        for node in self.nodes {
            writeln!(w, "node {} {}", node.id, node.kind)?;
        }
        for edge in self.edges {
            writeln!(w, "edge {} {} {}", edge.from, edge.to, edge.kind)?;
        }
        Ok(())
    }
}
