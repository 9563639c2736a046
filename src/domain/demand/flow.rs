use serde::Serialize;

use crate::domain::network::id::NodeId;
use crate::domain::network::topology::{Bandwidth, NetworkTopology};
use crate::error::ValidationError;

/// A single traffic demand between two hosts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Flow {
    pub src: NodeId,
    pub dst: NodeId,
    pub requested_bandwidth: Bandwidth,

    /// Starts at 1. Higher values raise the cost a path may have and still be admitted.
    pub priority: u32,
}

impl Flow {
    pub fn new(src: impl Into<String>, dst: impl Into<String>, requested_bandwidth: Bandwidth, priority: u32) -> Self {
        Self { src: NodeId::new(src), dst: NodeId::new(dst), requested_bandwidth, priority }
    }

    /// Checks the flow on its own. `index` is the arrival position used in error messages.
    pub fn validate(&self, index: usize) -> Result<(), ValidationError> {
        if self.src == self.dst {
            return Err(ValidationError::SelfLoopFlow { index, node: self.src.to_string() });
        }
        if !(self.requested_bandwidth > 0.0 && self.requested_bandwidth.is_finite()) {
            return Err(ValidationError::NonPositiveBandwidth { index, bandwidth: self.requested_bandwidth });
        }
        if self.priority == 0 {
            return Err(ValidationError::ZeroPriority { index });
        }
        Ok(())
    }

    /// Checks that both endpoints exist in `topology` and are hosts.
    pub fn validate_endpoints(&self, index: usize, topology: &NetworkTopology) -> Result<(), ValidationError> {
        for endpoint in [&self.src, &self.dst] {
            match topology.node(endpoint) {
                None => return Err(ValidationError::UnknownNode(endpoint.to_string())),
                Some(node) if !node.is_host() => {
                    return Err(ValidationError::EndpointNotHost { index, node: endpoint.to_string() });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}
