use crate::domain::demand::demand::Demand;
use crate::domain::network::topology::NetworkTopology;
use crate::domain::scheduler::simulation::{self, SchedulingResult};
use crate::error::Result;
use crate::loader::parser::{load_demand, load_topology};

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;
pub mod report;

/// Loads a topology and a demand descriptor and schedules the demand.
pub fn schedule_from_files(topology_path: &str, demand_path: &str) -> Result<SchedulingResult> {
    let topology: NetworkTopology = load_topology(topology_path)?;
    let demand: Demand = load_demand(demand_path, &topology)?;
    log::info!("Descriptors loaded: {} flows, max priority {}.", demand.len(), demand.max_priority());

    Ok(simulation::run(&topology, &demand))
}
