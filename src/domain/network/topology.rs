use std::collections::{BTreeMap, BTreeSet};

use crate::api::topology_dto::{NodeKindDto, TopologyDto};
use crate::domain::network::id::NodeId;
use crate::domain::network::node::{Node, NodeKind};
use crate::error::ValidationError;

/// Bandwidth in the abstract units of the input (the generator draws whole numbers).
pub type Bandwidth = f64;

/// Directed link key `(from, to)`.
pub type LinkKey = (NodeId, NodeId);

/// Models the capacitated network graph.
///
/// The topology is immutable once built. It holds:
/// * **Nodes**: hosts (flow endpoints) and switches (transit).
/// * **Connectivity**: ordered adjacency sets, so traversal order is reproducible.
/// * **Capacities**: the total bandwidth of every directed link.
///
/// Residual bandwidth is not stored here; it lives in the
/// [`BandwidthLedger`](crate::domain::scheduler::bandwidth_ledger::BandwidthLedger) built from this topology.
#[derive(Debug, Clone, Default)]
pub struct NetworkTopology {
    nodes: BTreeMap<NodeId, Node>,

    /// Maps a node to the targets of its outgoing links.
    adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,

    /// Total capacity per directed link. A repeated `(from, to)` overwrites the earlier capacity.
    capacities: BTreeMap<LinkKey, Bandwidth>,
}

impl TryFrom<TopologyDto> for NetworkTopology {
    type Error = ValidationError;

    fn try_from(dto: TopologyDto) -> Result<Self, Self::Error> {
        let mut topology = NetworkTopology::new();

        for node_dto in dto.nodes {
            let kind = match node_dto.kind {
                Some(NodeKindDto::Host) => NodeKind::Host,
                Some(NodeKindDto::Switch) => NodeKind::Switch,
                None => NodeKind::from_name(&node_dto.name),
            };
            topology.add_node(Node::new(node_dto.name, kind))?;
        }

        for link in dto.links {
            let from = NodeId::new(link.source);
            let to = NodeId::new(link.target);
            if link.bidirectional {
                topology.add_bidirectional_link(&from, &to, link.capacity)?;
            } else {
                topology.add_link(&from, &to, link.capacity)?;
            }
        }

        log::info!("Topology loaded: {} nodes ({} hosts), {} directed links.", topology.node_count(), topology.hosts().len(), topology.link_count());

        Ok(topology)
    }
}

impl NetworkTopology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: Node) -> Result<(), ValidationError> {
        if self.nodes.contains_key(&node.id) {
            return Err(ValidationError::DuplicateNode(node.id.to_string()));
        }
        self.adjacency.insert(node.id.clone(), BTreeSet::new());
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Adds the directed link `from -> to`. An existing link with the same key keeps its slot but takes the new capacity.
    pub fn add_link(&mut self, from: &NodeId, to: &NodeId, capacity: Bandwidth) -> Result<(), ValidationError> {
        if !(capacity > 0.0 && capacity.is_finite()) {
            return Err(ValidationError::NonPositiveCapacity { from: from.to_string(), to: to.to_string(), capacity });
        }
        for endpoint in [from, to] {
            if !self.nodes.contains_key(endpoint) {
                return Err(ValidationError::UnknownNode(endpoint.to_string()));
            }
        }

        self.adjacency.entry(from.clone()).or_default().insert(to.clone());
        self.capacities.insert((from.clone(), to.clone()), capacity);
        Ok(())
    }

    /// Adds both directions with equal capacity.
    pub fn add_bidirectional_link(&mut self, a: &NodeId, b: &NodeId, capacity: Bandwidth) -> Result<(), ValidationError> {
        self.add_link(a, b, capacity)?;
        self.add_link(b, a, capacity)
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.capacities.len()
    }

    pub fn hosts(&self) -> Vec<&NodeId> {
        self.nodes.values().filter(|n| n.is_host()).map(|n| &n.id).collect()
    }

    pub fn switches(&self) -> Vec<&NodeId> {
        self.nodes.values().filter(|n| !n.is_host()).map(|n| &n.id).collect()
    }

    /// Targets of all outgoing links of `id`, in id order.
    pub fn neighbours(&self, id: &NodeId) -> impl Iterator<Item = &NodeId> {
        self.adjacency.get(id).into_iter().flat_map(|targets| targets.iter())
    }

    pub fn capacity(&self, from: &NodeId, to: &NodeId) -> Option<Bandwidth> {
        self.capacities.get(&(from.clone(), to.clone())).copied()
    }

    pub fn links(&self) -> impl Iterator<Item = (&LinkKey, Bandwidth)> {
        self.capacities.iter().map(|(key, capacity)| (key, *capacity))
    }
}
