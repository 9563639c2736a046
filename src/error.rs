use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON input: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to write decision log: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid simulation configuration: {0}")]
    InvalidConfiguration(String),
}

/// Rejections raised while building a topology or a demand. None of these ever reach the scheduling loop.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Link {from} -> {to} has non-positive capacity {capacity}")]
    NonPositiveCapacity { from: String, to: String, capacity: f64 },

    #[error("Node '{0}' is not part of the topology")]
    UnknownNode(String),

    #[error("Node '{0}' is declared more than once")]
    DuplicateNode(String),

    #[error("Flow #{index} has identical source and destination '{node}'")]
    SelfLoopFlow { index: usize, node: String },

    #[error("Flow #{index} requests non-positive bandwidth {bandwidth}")]
    NonPositiveBandwidth { index: usize, bandwidth: f64 },

    #[error("Flow #{index} has priority 0, priorities start at 1")]
    ZeroPriority { index: usize },

    #[error("Flow #{index} uses '{node}' as an endpoint, but it is not a host")]
    EndpointNotHost { index: usize, node: String },

    #[error("Range '{name}' is invalid: [{min}, {max}]")]
    InvalidRange { name: &'static str, min: u64, max: u64 },

    #[error("At least two hosts are required to draw flows, got {0}")]
    NotEnoughHosts(usize),

    #[error("Hosts must attach to a switch, but the topology has no switches")]
    NoSwitches,
}

pub type Result<T> = std::result::Result<T, Error>;
