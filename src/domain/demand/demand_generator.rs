use rand::Rng;

use crate::config::{SimulationConfig, UniformRange};
use crate::domain::demand::demand::Demand;
use crate::domain::demand::flow::Flow;
use crate::domain::network::id::NodeId;
use crate::error::ValidationError;

/// Draws independent random flows between hosts.
#[derive(Debug, Clone)]
pub struct DemandGenerator {
    pub flow_num: usize,
    pub bandwidth_range: UniformRange,
    pub priority_range: UniformRange,
}

impl From<&SimulationConfig> for DemandGenerator {
    fn from(config: &SimulationConfig) -> Self {
        Self { flow_num: config.flow_num, bandwidth_range: config.bandwidth_range, priority_range: config.priority_range }
    }
}

impl DemandGenerator {
    /// Samples `flow_num` flows: `src` uniform over `hosts`, `dst` uniform over the other hosts,
    /// bandwidth and priority uniform over their ranges.
    pub fn generate<R: Rng>(&self, hosts: &[NodeId], rng: &mut R) -> Result<Demand, ValidationError> {
        self.bandwidth_range.validate("bandwidthRange")?;
        self.priority_range.validate("priorityRange")?;
        if hosts.len() < 2 {
            return Err(ValidationError::NotEnoughHosts(hosts.len()));
        }

        let mut flows = Vec::with_capacity(self.flow_num);
        for _ in 0..self.flow_num {
            let src_index = rng.random_range(0..hosts.len());
            // Skip over the source so `dst` is uniform over the remaining hosts.
            let mut dst_index = rng.random_range(0..hosts.len() - 1);
            if dst_index >= src_index {
                dst_index += 1;
            }

            let requested_bandwidth = rng.random_range(self.bandwidth_range.min..=self.bandwidth_range.max) as f64;
            let priority = rng.random_range(self.priority_range.min..=self.priority_range.max) as u32;

            flows.push(Flow {
                src: hosts[src_index].clone(),
                dst: hosts[dst_index].clone(),
                requested_bandwidth,
                priority,
            });
        }

        let demand = Demand::new(flows)?;
        log::info!("Generated {} flows, total requested bandwidth {}, max priority {}.", demand.len(), demand.total_requested_bandwidth(), demand.max_priority());

        Ok(demand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn hosts(n: usize) -> Vec<NodeId> {
        (1..=n).map(|i| NodeId::new(format!("h{}", i))).collect()
    }

    fn generator(flow_num: usize) -> DemandGenerator {
        DemandGenerator { flow_num, bandwidth_range: UniformRange::new(1, 500), priority_range: UniformRange::new(1, 10) }
    }

    #[test]
    fn flows_respect_ranges_and_endpoints() {
        let hosts = hosts(5);
        let mut rng = StdRng::seed_from_u64(11);

        let demand = generator(500).generate(&hosts, &mut rng).unwrap();

        assert_eq!(demand.len(), 500);
        for flow in demand.flows() {
            assert_ne!(flow.src, flow.dst);
            assert!(hosts.contains(&flow.src) && hosts.contains(&flow.dst));
            assert!((1.0..=500.0).contains(&flow.requested_bandwidth));
            assert!((1..=10).contains(&flow.priority));
        }
        let observed_max = demand.flows().iter().map(|f| f.priority).max().unwrap();
        assert_eq!(demand.max_priority(), observed_max);
    }

    #[test]
    fn two_hosts_always_pair_up() {
        let hosts = hosts(2);
        let mut rng = StdRng::seed_from_u64(3);

        let demand = generator(50).generate(&hosts, &mut rng).unwrap();

        for flow in demand.flows() {
            assert_ne!(flow.src, flow.dst);
        }
    }

    #[test]
    fn same_seed_same_demand() {
        let hosts = hosts(8);
        let a = generator(100).generate(&hosts, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generator(100).generate(&hosts, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn needs_two_hosts() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(generator(1).generate(&hosts(1), &mut rng), Err(ValidationError::NotEnoughHosts(1)));
    }

    #[test]
    fn inverted_bandwidth_range_is_an_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let generator = DemandGenerator { bandwidth_range: UniformRange::new(500, 1), ..generator(5) };

        assert_eq!(
            generator.generate(&hosts(3), &mut rng),
            Err(ValidationError::InvalidRange { name: "bandwidthRange", min: 500, max: 1 })
        );
    }

    #[test]
    fn zero_priority_range_is_an_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let generator = DemandGenerator { priority_range: UniformRange::new(0, 3), ..generator(5) };

        assert!(matches!(generator.generate(&hosts(3), &mut rng), Err(ValidationError::InvalidRange { name: "priorityRange", .. })));
    }

    #[test]
    fn empty_demand_has_zero_max_priority() {
        let mut rng = StdRng::seed_from_u64(1);
        let demand = generator(0).generate(&hosts(3), &mut rng).unwrap();
        assert!(demand.is_empty());
        assert_eq!(demand.max_priority(), 0);
    }
}
