//! Scenario files: the builder step that turns a declarative description
//! into a [`ResourceAllocationGraph`].
//!
//! A scenario lists processes, resources and an ordered list of edges. TOML
//! and JSON are accepted, chosen by file extension (anything other than
//! `.json` is read as TOML):
//!
//! ```toml
//! name = "circular wait"
//! processes = ["P1", "P2"]
//! resources = ["R1", "R2"]
//!
//! [[edges]]
//! from = "R1"
//! to = "P1"
//!
//! [[edges]]
//! from = "P1"
//! to = "R2"
//! ```
//!
//! Edge order in the file is preserved, so the reported cycle is stable for
//! a given file.

use std::path::Path;

use anyhow::{Context, Result};
use rag_core::{RagError, ResourceAllocationGraph};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub processes: Vec<String>,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
}

impl Scenario {
    /// Parse scenario text. `json` selects the JSON parser, otherwise TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid scenario document.
    pub fn parse(content: &str, json: bool) -> Result<Self> {
        if json {
            serde_json::from_str(content).context("invalid JSON scenario")
        } else {
            toml::from_str(content).context("invalid TOML scenario")
        }
    }

    /// Read and parse a scenario file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        Self::parse(&content, json).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Display name: the declared name, or a fallback.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed scenario")
    }

    /// Register processes, then resources, then edges, in file order.
    ///
    /// # Errors
    ///
    /// Returns the first [`RagError`] raised by the graph.
    pub fn build(&self) -> Result<ResourceAllocationGraph, RagError> {
        let mut rag = ResourceAllocationGraph::new();
        for process in &self.processes {
            rag.add_process(process.as_str())?;
        }
        for resource in &self.resources {
            rag.add_resource(resource.as_str())?;
        }
        for edge in &self.edges {
            rag.add_edge(&edge.from, &edge.to)?;
        }
        info!(
            scenario = self.display_name(),
            nodes = rag.node_count(),
            edges = rag.edge_count(),
            "scenario built"
        );
        Ok(rag)
    }
}
