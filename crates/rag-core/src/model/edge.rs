use serde::{Deserialize, Serialize};
use std::fmt;

use super::node::NodeKind;

/// Category of a directed edge, derived from the kind of its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Resource → Process: the resource is held by the process.
    Assignment,
    /// Process → Resource: the process is waiting for the resource.
    Request,
}

impl EdgeKind {
    /// Classify an edge by the kind of its source node.
    #[must_use]
    pub const fn from_source(source: NodeKind) -> Self {
        match source {
            NodeKind::Resource => Self::Assignment,
            NodeKind::Process => Self::Request,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assignment => "assignment",
            Self::Request => "request",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed edge between a process and a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {} ({})", self.from, self.to, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_source() {
        assert_eq!(EdgeKind::from_source(NodeKind::Resource), EdgeKind::Assignment);
        assert_eq!(EdgeKind::from_source(NodeKind::Process), EdgeKind::Request);
    }

    #[test]
    fn edge_display() {
        let edge = Edge {
            from: "P1".to_string(),
            to: "R2".to_string(),
            kind: EdgeKind::Request,
        };
        assert_eq!(edge.to_string(), "P1 → R2 (request)");
    }
}
