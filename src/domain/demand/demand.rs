use crate::api::demand_dto::DemandDto;
use crate::domain::demand::flow::Flow;
use crate::domain::network::topology::{Bandwidth, NetworkTopology};
use crate::error::ValidationError;

/// An ordered, validated flow sequence together with its maximum priority.
///
/// `max_priority` is fixed at construction and consumed by the admission heuristic,
/// so it always matches the flows it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Demand {
    flows: Vec<Flow>,
    max_priority: u32,
}

impl TryFrom<(DemandDto, &NetworkTopology)> for Demand {
    type Error = ValidationError;

    fn try_from(args: (DemandDto, &NetworkTopology)) -> Result<Self, Self::Error> {
        let (dto, topology) = args;
        let flows = dto.flows.into_iter().map(|f| Flow::new(f.src, f.dst, f.bandwidth, f.priority)).collect();
        Demand::for_topology(flows, topology)
    }
}

impl Demand {
    /// Validates every flow and computes the maximum priority (0 for an empty demand).
    pub fn new(flows: Vec<Flow>) -> Result<Self, ValidationError> {
        for (index, flow) in flows.iter().enumerate() {
            flow.validate(index)?;
        }
        let max_priority = flows.iter().map(|f| f.priority).max().unwrap_or(0);

        Ok(Self { flows, max_priority })
    }

    /// Like [`Demand::new`], additionally requiring every endpoint to be a host of `topology`.
    pub fn for_topology(flows: Vec<Flow>, topology: &NetworkTopology) -> Result<Self, ValidationError> {
        let demand = Demand::new(flows)?;
        for (index, flow) in demand.flows.iter().enumerate() {
            flow.validate_endpoints(index, topology)?;
        }
        Ok(demand)
    }

    pub fn flows(&self) -> &[Flow] {
        &self.flows
    }

    pub fn max_priority(&self) -> u32 {
        self.max_priority
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    pub fn total_requested_bandwidth(&self) -> Bandwidth {
        self.flows.iter().map(|f| f.requested_bandwidth).sum()
    }
}
