use serde::Serialize;

use crate::domain::network::id::NodeId;

/// Role of a node in the topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Valid flow endpoint.
    Host,
    /// Transit only.
    Switch,
}

impl NodeKind {
    /// Naming convention used by generated topologies: `h1`, `h2`, ... are hosts, everything else is a switch.
    pub fn from_name(name: &str) -> Self {
        if name.starts_with('h') { NodeKind::Host } else { NodeKind::Switch }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self { id: NodeId::new(id), kind }
    }

    pub fn host(id: impl Into<String>) -> Self {
        Self::new(id, NodeKind::Host)
    }

    pub fn switch(id: impl Into<String>) -> Self {
        Self::new(id, NodeKind::Switch)
    }

    pub fn is_host(&self) -> bool {
        self.kind == NodeKind::Host
    }
}
