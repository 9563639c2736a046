use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, HashMap};

use serde::Serialize;

use crate::domain::network::id::NodeId;
use crate::domain::network::topology::{Bandwidth, NetworkTopology};
use crate::domain::scheduler::bandwidth_ledger::BandwidthLedger;

/// A minimum-cost route together with its summed link cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluatedPath {
    pub nodes: Vec<NodeId>,
    pub cost: f64,
}

/// Cost of crossing a link with the given residual bandwidth. Links without residual bandwidth cannot be crossed.
pub fn link_cost(residual: Bandwidth) -> Option<f64> {
    (residual > 0.0).then(|| 1.0 / residual)
}

#[derive(Debug)]
struct QueueEntry<'a> {
    cost: f64,
    node: &'a NodeId,
}

impl PartialEq for QueueEntry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry<'_> {}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Reversed so the max-heap pops the cheapest entry; ties go to the smaller node id.
impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.total_cmp(&self.cost).then_with(|| other.node.cmp(self.node))
    }
}

/// Computes the cheapest route from `src` to `dst` on the current residual state.
///
/// Dijkstra over the topology's directed links where a link costs `1 / residual`.
/// Links whose residual has dropped to zero (or below) are skipped. The evaluator keeps
/// no state between calls, so the same ledger state always yields the same route.
///
/// `requested_bandwidth` does not prune links; it is only logged.
///
/// Returns `None` when `dst` cannot be reached.
pub fn evaluate_path(
    topology: &NetworkTopology,
    ledger: &BandwidthLedger,
    src: &NodeId,
    dst: &NodeId,
    requested_bandwidth: Bandwidth,
) -> Option<EvaluatedPath> {
    log::trace!("Evaluating path {} => {} for {}", src, dst, requested_bandwidth);

    if !topology.contains_node(src) || !topology.contains_node(dst) {
        return None;
    }

    let mut distances: BTreeMap<&NodeId, f64> = BTreeMap::new();
    let mut previous: HashMap<&NodeId, &NodeId> = HashMap::new();
    let mut queue = BinaryHeap::new();

    distances.insert(src, 0.0);
    queue.push(QueueEntry { cost: 0.0, node: src });

    while let Some(QueueEntry { cost, node }) = queue.pop() {
        if node == dst {
            break;
        }
        if distances.get(node).is_some_and(|best| cost > *best) {
            continue;
        }

        for next in topology.neighbours(node) {
            let Some(weight) = ledger.residual(node, next).and_then(link_cost) else {
                continue;
            };

            let candidate = cost + weight;
            if distances.get(next).is_none_or(|best| candidate < *best) {
                distances.insert(next, candidate);
                previous.insert(next, node);
                queue.push(QueueEntry { cost: candidate, node: next });
            }
        }
    }

    let total_cost = *distances.get(dst)?;

    let mut nodes = vec![dst.clone()];
    let mut current = dst;
    while let Some(prev) = previous.get(current) {
        nodes.push((*prev).clone());
        current = *prev;
    }
    nodes.reverse();

    Some(EvaluatedPath { nodes, cost: total_cost })
}
