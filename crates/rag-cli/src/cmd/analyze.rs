//! `rag analyze` — deadlock analysis report for a scenario.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use rag_core::graph::{cycles, deadlocked_processes};
use rag_core::{Detection, Edge, NodeKind, ResourceAllocationGraph};
use serde::Serialize;
use tracing::info;

use crate::output::{OutputMode, Report, emit, pretty_kv, pretty_rule, pretty_section};

/// Exit code used by `--fail-on-deadlock` when a deadlock is found.
pub const DEADLOCK_EXIT_CODE: u8 = 2;

/// Arguments for `rag analyze`.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Scenario file (TOML, or JSON by `.json` extension).
    pub scenario: PathBuf,

    /// Exit with status 2 when a deadlock is found.
    #[arg(long)]
    pub fail_on_deadlock: bool,
}

#[derive(Debug, Serialize)]
struct AnalyzeReport {
    scenario: String,
    processes: Vec<String>,
    resources: Vec<String>,
    edges: Vec<Edge>,
    deadlock: bool,
    detection: Detection,
    deadlocked_processes: Vec<String>,
    cycles: Vec<Vec<String>>,
}

impl AnalyzeReport {
    fn new(scenario: &str, rag: &ResourceAllocationGraph) -> Self {
        let detection = rag.detect();
        Self {
            scenario: scenario.to_string(),
            processes: owned(rag.nodes_by_kind(NodeKind::Process)),
            resources: owned(rag.nodes_by_kind(NodeKind::Resource)),
            edges: rag.edges().to_vec(),
            deadlock: detection.has_cycle,
            detection,
            deadlocked_processes: deadlocked_processes(rag),
            cycles: cycles(rag),
        }
    }
}

fn owned(ids: Vec<&str>) -> Vec<String> {
    ids.into_iter().map(str::to_string).collect()
}

/// Execute `rag analyze`.
pub fn run_analyze(args: &AnalyzeArgs, output: OutputMode) -> anyhow::Result<ExitCode> {
    let (scenario, rag) = super::load_graph(&args.scenario, output)?;
    let report = AnalyzeReport::new(scenario.display_name(), &rag);

    info!(
        scenario = %report.scenario,
        deadlock = report.deadlock,
        "analysis complete"
    );

    emit(output, &report)?;

    if args.fail_on_deadlock && report.deadlock {
        return Ok(ExitCode::from(DEADLOCK_EXIT_CODE));
    }
    Ok(ExitCode::SUCCESS)
}

impl Report for AnalyzeReport {
    fn write_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "processes {}", self.processes.join(" "))?;
        writeln!(w, "resources {}", self.resources.join(" "))?;
        for edge in &self.edges {
            writeln!(w, "edge {} {} {}", edge.from, edge.to, edge.kind)?;
        }
        writeln!(w, "deadlock {}", if self.deadlock { "yes" } else { "no" })?;
        if self.deadlock {
            writeln!(w, "cycle {}", self.detection.cycle_path.join(" "))?;
            writeln!(w, "deadlocked {}", self.deadlocked_processes.join(" "))?;
        }
        Ok(())
    }

    fn write_pretty(&self, w: &mut dyn Write) -> std::io::Result<()> {
        pretty_section(w, &format!("Resource Allocation Graph: {}", self.scenario))?;
        pretty_kv(w, "Processes", self.processes.join(", "))?;
        pretty_kv(w, "Resources", self.resources.join(", "))?;
        writeln!(w)?;

        writeln!(w, "Edges ({})", self.edges.len())?;
        for edge in &self.edges {
            writeln!(w, "  {} → {} ({} edge)", edge.from, edge.to, edge.kind)?;
        }
        writeln!(w)?;

        if self.deadlock {
            pretty_kv(w, "Cycle", "found")?;
            pretty_kv(w, "Result", "DEADLOCK DETECTED")?;
            pretty_kv(w, "Path", self.detection.to_string())?;
            pretty_kv(w, "Deadlocked", self.deadlocked_processes.join(", "))?;
            if self.cycles.len() > 1 {
                writeln!(w, "\nIndependent cycles ({})", self.cycles.len())?;
                for (idx, members) in self.cycles.iter().enumerate() {
                    writeln!(w, "  {}. {}", idx + 1, members.join(", "))?;
                }
            }
        } else {
            pretty_kv(w, "Cycle", "none")?;
            pretty_kv(w, "Result", "NO DEADLOCK")?;
        }

        pretty_rule(w)
    }
}
