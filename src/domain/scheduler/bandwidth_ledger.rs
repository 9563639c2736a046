use std::collections::HashMap;

use slotmap::{SlotMap, new_key_type};

use crate::domain::network::id::NodeId;
use crate::domain::network::topology::{Bandwidth, NetworkTopology};

new_key_type! {
    pub struct LinkSlot;
}

/// Capacity and residual bandwidth of one directed link.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkState {
    pub from: NodeId,
    pub to: NodeId,

    /// Total bandwidth, snapshotted from the topology when the ledger was built.
    pub capacity: Bandwidth,

    /// Bandwidth not yet reserved.
    pub residual: Bandwidth,
}

impl LinkState {
    /// Fraction of the capacity that is reserved.
    pub fn load(&self) -> f64 {
        (self.capacity - self.residual) / self.capacity
    }
}

/// Owns the residual bandwidth of every directed link of a run.
///
/// Links live in an arena and are found through a `from -> to -> slot` index. The ledger has a
/// single writer, the admission step of the scheduler, and is never shared between runs.
#[derive(Debug, Clone)]
pub struct BandwidthLedger {
    links: SlotMap<LinkSlot, LinkState>,
    index: HashMap<NodeId, HashMap<NodeId, LinkSlot>>,
}

impl From<&NetworkTopology> for BandwidthLedger {
    fn from(topology: &NetworkTopology) -> Self {
        let mut links = SlotMap::with_capacity_and_key(topology.link_count());
        let mut index: HashMap<NodeId, HashMap<NodeId, LinkSlot>> = HashMap::new();

        for ((from, to), capacity) in topology.links() {
            let slot = links.insert(LinkState { from: from.clone(), to: to.clone(), capacity, residual: capacity });
            index.entry(from.clone()).or_default().insert(to.clone(), slot);
        }

        Self { links, index }
    }
}

impl BandwidthLedger {
    fn link(&self, from: &NodeId, to: &NodeId) -> Option<&LinkState> {
        let slot = self.index.get(from)?.get(to)?;
        self.links.get(*slot)
    }

    fn link_mut(&mut self, from: &NodeId, to: &NodeId) -> Option<&mut LinkState> {
        let slot = *self.index.get(from)?.get(to)?;
        self.links.get_mut(slot)
    }

    pub fn residual(&self, from: &NodeId, to: &NodeId) -> Option<Bandwidth> {
        self.link(from, to).map(|l| l.residual)
    }

    pub fn capacity(&self, from: &NodeId, to: &NodeId) -> Option<Bandwidth> {
        self.link(from, to).map(|l| l.capacity)
    }

    pub fn link_load(&self, from: &NodeId, to: &NodeId) -> Option<f64> {
        self.link(from, to).map(LinkState::load)
    }

    /// Smallest residual over every link of the network, `0.0` for a network without links.
    pub fn min_residual_across_network(&self) -> Bandwidth {
        self.links.values().map(|l| l.residual).reduce(f64::min).unwrap_or(0.0)
    }

    /// Reserves `amount` on every hop of `path`, on the hop's link and on its reverse link.
    ///
    /// The decrement is unconditional: the caller must have checked that `amount` fits.
    /// A link that ends up negative is reported as an invariant violation and left as is.
    pub fn commit(&mut self, path: &[NodeId], amount: Bandwidth) {
        for hop in path.windows(2) {
            let (a, b) = (&hop[0], &hop[1]);

            match self.link_mut(a, b) {
                Some(link) => link.residual -= amount,
                None => log::error!("Ledger commit on missing link {} -> {}", a, b),
            }
            // Both directions are charged even though only one carries the flow.
            if let Some(reverse) = self.link_mut(b, a) {
                reverse.residual -= amount;
            }

            for (from, to) in [(a, b), (b, a)] {
                if let Some(link) = self.link(from, to).filter(|l| l.residual < 0.0) {
                    log::error!(
                        "Ledger overdraft on {} -> {}: residual {} after reserving {} (capacity {})",
                        from,
                        to,
                        link.residual,
                        amount,
                        link.capacity
                    );
                }
            }
        }
    }

    /// Largest `(capacity - residual) / capacity` over all links.
    pub fn max_link_load(&self) -> f64 {
        self.links.values().map(LinkState::load).fold(0.0, f64::max)
    }

    /// The `k` most loaded links, highest load first.
    pub fn most_loaded_links(&self, k: usize) -> Vec<&LinkState> {
        let mut links: Vec<&LinkState> = self.links.values().collect();
        links.sort_by(|a, b| b.load().total_cmp(&a.load()).then_with(|| (&a.from, &a.to).cmp(&(&b.from, &b.to))));
        links.truncate(k);
        links
    }

    /// `true` while every link satisfies `0 <= residual <= capacity`.
    pub fn is_within_bounds(&self) -> bool {
        self.links.values().all(|l| l.residual >= 0.0 && l.residual <= l.capacity)
    }

    pub fn links(&self) -> impl Iterator<Item = &LinkState> {
        self.links.values()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
