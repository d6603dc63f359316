use std::fmt;

use crate::model::NodeKind;

/// Errors raised while building a resource allocation graph.
///
/// All of these are caller errors surfaced synchronously at construction
/// time. The detector itself never returns one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RagError {
    /// The id is already registered under the other node kind.
    #[error("node '{id}' is already registered as a {existing}, cannot register it as a {requested}")]
    DuplicateNode {
        id: String,
        existing: NodeKind,
        requested: NodeKind,
    },

    /// An edge endpoint has not been registered.
    #[error("unknown node '{id}'")]
    UnknownNode { id: String },

    /// Both edge endpoints have the same kind.
    #[error("invalid edge '{from}' → '{to}': both endpoints are {kind} nodes")]
    InvalidEdgeKind {
        from: String,
        to: String,
        kind: NodeKind,
    },

    /// A shared graph lock was poisoned by a panicking writer.
    #[error("shared graph lock poisoned")]
    LockPoisoned,
}

impl RagError {
    /// Machine-readable code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::DuplicateNode { .. } => ErrorCode::DuplicateNode,
            Self::UnknownNode { .. } => ErrorCode::UnknownNode,
            Self::InvalidEdgeKind { .. } => ErrorCode::InvalidEdgeKind,
            Self::LockPoisoned => ErrorCode::LockPoisoned,
        }
    }
}

/// Stable codes for every failure the CLI can report.
///
/// `E1xxx` are input file problems, `E2xxx` graph construction errors and
/// `E5xxx` concurrency failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ScenarioParseError,
    ConfigParseError,
    DuplicateNode,
    UnknownNode,
    InvalidEdgeKind,
    LockPoisoned,
}

impl ErrorCode {
    /// The `E####` identifier.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ScenarioParseError => "E1001",
            Self::ConfigParseError => "E1002",
            Self::DuplicateNode => "E2001",
            Self::UnknownNode => "E2002",
            Self::InvalidEdgeKind => "E2003",
            Self::LockPoisoned => "E5001",
        }
    }

    /// One-line summary.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ScenarioParseError => "Scenario file parse error",
            Self::ConfigParseError => "Config file parse error",
            Self::DuplicateNode => "Node registered under two kinds",
            Self::UnknownNode => "Edge references an unknown node",
            Self::InvalidEdgeKind => "Edge connects two nodes of the same kind",
            Self::LockPoisoned => "Shared graph lock poisoned",
        }
    }

    /// How to fix the input, where there is something to fix.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ScenarioParseError => {
                Some("Check the scenario's processes, resources and [[edges]] entries.")
            }
            Self::ConfigParseError => Some("Fix syntax in rag.toml and retry."),
            Self::DuplicateNode => Some("Give processes and resources distinct ids."),
            Self::UnknownNode => Some("Declare every edge endpoint as a process or resource first."),
            Self::InvalidEdgeKind => Some(
                "Edges must be resource → process (assignment) or process → resource (request).",
            ),
            Self::LockPoisoned => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
