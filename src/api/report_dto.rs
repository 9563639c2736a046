use serde::Serialize;

/// One row of the per-flow decision log.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRowDto {
    pub index: usize,
    pub src: String,
    pub dst: String,
    pub bandwidth: f64,
    pub priority: u32,
    pub admitted: bool,

    /// Empty for admitted flows.
    pub reason: String,

    pub cost: Option<f64>,

    /// Hops joined with `->`, empty for suspended flows.
    pub path: String,
}
