pub mod analyze;
pub mod completions;
pub mod draw;
pub mod graph;

use std::path::Path;

use rag_core::{ErrorCode, ResourceAllocationGraph};
use tracing::debug;

use crate::output::{CliError, OutputMode, Reported, report_error};
use crate::scenario::Scenario;

/// Load a scenario file and build its graph.
///
/// Failures are rendered in the requested output mode and come back as
/// [`Reported`].
pub fn load_graph(path: &Path, output: OutputMode) -> anyhow::Result<(Scenario, ResourceAllocationGraph)> {
    let scenario = match Scenario::load(path) {
        Ok(scenario) => scenario,
        Err(err) => {
            report_error(
                output,
                &CliError::from_code(ErrorCode::ScenarioParseError, format!("{err:#}")),
            )?;
            debug!(error = %format!("{err:#}"), "scenario rejected");
            return Err(Reported.into());
        }
    };

    match scenario.build() {
        Ok(rag) => Ok((scenario, rag)),
        Err(err) => {
            report_error(output, &CliError::from(&err))?;
            debug!(path = %path.display(), error = %err, "scenario graph rejected");
            Err(Reported.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_come_back_as_reported() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "processes = [\"P1\", \"P2\"]\nedges = [{ from = \"P1\", to = \"P2\" }]\n")
            .expect("write scenario");

        let err = load_graph(&path, OutputMode::Json).expect_err("same-kind edge");
        assert!(err.is::<Reported>());

        let err = load_graph(&dir.path().join("missing.toml"), OutputMode::Text)
            .expect_err("missing file");
        assert!(err.is::<Reported>());
    }
}
