use serde::{Deserialize, Serialize};

/// Ordered list of traffic demands. Order is arrival order.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandDto {
    pub flows: Vec<FlowDto>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowDto {
    pub src: String,
    pub dst: String,
    pub bandwidth: f64,
    pub priority: u32,
}
