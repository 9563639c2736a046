use rand::Rng;

use crate::config::{SimulationConfig, UniformRange};
use crate::domain::network::id::NodeId;
use crate::domain::network::node::Node;
use crate::domain::network::topology::NetworkTopology;
use crate::error::ValidationError;

/// Builds random host/switch topologies.
///
/// Construction:
/// * every host hangs off one uniformly chosen switch,
/// * switch `i` (for all but the last switch) links to a uniformly chosen switch,
/// * `link_num - switch_num` further links join two uniformly chosen switches.
///
/// Every link is bidirectional with a capacity drawn from `capacity_range`. Self-loops
/// and repeated pairs are not filtered; a repeated pair overwrites the earlier capacity.
/// The result may therefore be disconnected.
#[derive(Debug, Clone)]
pub struct TopologyGenerator {
    pub host_num: usize,
    pub switch_num: usize,
    pub link_num: usize,
    pub capacity_range: UniformRange,
}

impl From<&SimulationConfig> for TopologyGenerator {
    fn from(config: &SimulationConfig) -> Self {
        Self { host_num: config.host_num, switch_num: config.switch_num, link_num: config.link_num(), capacity_range: config.capacity_range }
    }
}

impl TopologyGenerator {
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<NetworkTopology, ValidationError> {
        self.capacity_range.validate("capacityRange")?;
        if self.switch_num == 0 && self.host_num + self.link_num > 0 {
            return Err(ValidationError::NoSwitches);
        }

        let mut topology = NetworkTopology::new();
        let hosts: Vec<NodeId> = (1..=self.host_num).map(|i| NodeId::new(format!("h{}", i))).collect();
        let switches: Vec<NodeId> = (1..=self.switch_num).map(|i| NodeId::new(format!("s{}", i))).collect();

        for host in &hosts {
            topology.add_node(Node::host(host.as_str()))?;
        }
        for switch in &switches {
            topology.add_node(Node::switch(switch.as_str()))?;
        }

        for host in &hosts {
            let switch = &switches[rng.random_range(0..switches.len())];
            self.add_random_link(&mut topology, host, switch, rng)?;
        }

        for i in 0..self.switch_num.saturating_sub(1) {
            let other = &switches[rng.random_range(0..switches.len())];
            self.add_random_link(&mut topology, &switches[i], other, rng)?;
        }

        for _ in 0..self.link_num.saturating_sub(self.switch_num) {
            let a = &switches[rng.random_range(0..switches.len())];
            let b = &switches[rng.random_range(0..switches.len())];
            self.add_random_link(&mut topology, a, b, rng)?;
        }

        log::info!(
            "Generated topology: {} hosts, {} switches, {} directed links.",
            self.host_num,
            self.switch_num,
            topology.link_count()
        );

        Ok(topology)
    }

    fn add_random_link<R: Rng>(&self, topology: &mut NetworkTopology, a: &NodeId, b: &NodeId, rng: &mut R) -> Result<(), ValidationError> {
        let capacity = rng.random_range(self.capacity_range.min..=self.capacity_range.max) as f64;
        topology.add_bidirectional_link(a, b, capacity)
    }
}
