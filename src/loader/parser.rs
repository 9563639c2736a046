use serde::de::DeserializeOwned;
use std::fs;

use crate::api::demand_dto::DemandDto;
use crate::api::topology_dto::TopologyDto;
use crate::domain::demand::demand::Demand;
use crate::domain::network::topology::NetworkTopology;
use crate::error::{Error, Result};

/// Parses a JSON file into a given type `T`.
///
/// Errors are converted into `crate::error::Error` variants:
/// - `Error::IoError` if the file cannot be read.
/// - `Error::DeserializationError` if the JSON is malformed.
pub fn parse_json_file<T: DeserializeOwned>(file_path: &str) -> Result<T> {
    let data = fs::read_to_string(file_path).map_err(Error::IoError)?;

    let parsed_data: T = serde_json::from_str(&data).map_err(Error::DeserializationError)?;

    Ok(parsed_data)
}

/// Loads and validates a topology descriptor.
pub fn load_topology(file_path: &str) -> Result<NetworkTopology> {
    log::info!("Loading topology from '{}'...", file_path);
    let dto: TopologyDto = parse_json_file(file_path)?;
    Ok(NetworkTopology::try_from(dto)?)
}

/// Loads a demand descriptor and validates every flow against `topology`.
pub fn load_demand(file_path: &str, topology: &NetworkTopology) -> Result<Demand> {
    log::info!("Loading demand from '{}'...", file_path);
    let dto: DemandDto = parse_json_file(file_path)?;
    Ok(Demand::try_from((dto, topology))?)
}
