use serde::{Deserialize, Serialize};
use std::fmt;

/// The two node kinds of a resource allocation graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Process,
    Resource,
}

impl NodeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Process => "process",
            Self::Resource => "resource",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered process or resource. The kind never changes after
/// registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
}

impl Node {
    #[must_use]
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    #[must_use]
    pub const fn is_process(&self) -> bool {
        matches!(self.kind, NodeKind::Process)
    }

    #[must_use]
    pub const fn is_resource(&self) -> bool {
        matches!(self.kind, NodeKind::Resource)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&NodeKind::Resource).expect("serialize");
        assert_eq!(json, "\"resource\"");
        let back: NodeKind = serde_json::from_str("\"process\"").expect("deserialize");
        assert_eq!(back, NodeKind::Process);
    }

    #[test]
    fn node_predicates() {
        let p = Node::new("P1", NodeKind::Process);
        assert!(p.is_process());
        assert!(!p.is_resource());
        assert_eq!(p.to_string(), "P1");
    }
}
