use serde::{Deserialize, Serialize};

/// Topology descriptor as supplied by an external topology source.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologyDto {
    pub nodes: Vec<NodeDto>,
    pub links: Vec<LinkDto>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDto {
    pub name: String,

    /// Falls back to the `h...` naming convention when absent.
    #[serde(default)]
    pub kind: Option<NodeKindDto>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKindDto {
    Host,
    Switch,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDto {
    pub source: String,
    pub target: String,
    pub capacity: f64,

    /// Also creates `target -> source` with the same capacity.
    #[serde(default)]
    pub bidirectional: bool,
}
