use std::fmt;

use serde::Serialize;

use crate::domain::demand::flow::Flow;
use crate::domain::network::id::NodeId;
use crate::domain::network::topology::{Bandwidth, NetworkTopology};
use crate::domain::scheduler::bandwidth_ledger::BandwidthLedger;
use crate::domain::scheduler::path_evaluator::evaluate_path;

/// Why a flow was not admitted. Suspension is an outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SuspendReason {
    /// The network-wide feasibility gate failed; no path was computed.
    InsufficientBandwidth,
    NoPath,
    CostExceedsBenefit,
}

impl fmt::Display for SuspendReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SuspendReason::InsufficientBandwidth => "insufficient bandwidth",
            SuspendReason::NoPath => "no path",
            SuspendReason::CostExceedsBenefit => "cost exceeds benefit",
        };
        f.write_str(text)
    }
}

/// An admitted flow and the route its bandwidth was reserved on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledPath {
    #[serde(flatten)]
    pub flow: Flow,
    pub path: Vec<NodeId>,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdmissionDecision {
    Admitted(ScheduledPath),
    Suspended(SuspendReason),
}

impl AdmissionDecision {
    pub fn is_admitted(&self) -> bool {
        matches!(self, AdmissionDecision::Admitted(_))
    }
}

/// Decides, flow by flow, whether to reserve bandwidth.
///
/// A flow passes three gates in order:
/// 1. `min_residual / log2(2 * |nodes| * max_priority + 2) >= bandwidth`, where
///    `min_residual` is the tightest link anywhere in the network;
/// 2. a route exists on the residual graph;
/// 3. the route's cost does not exceed `|nodes| * priority`.
///
/// Gate 1 is global: it may reject flows because of congestion on unrelated links.
#[derive(Debug, Clone)]
pub struct AdmissionController<'a> {
    topology: &'a NetworkTopology,
    max_priority: u32,
}

impl<'a> AdmissionController<'a> {
    pub fn new(topology: &'a NetworkTopology, max_priority: u32) -> Self {
        Self { topology, max_priority }
    }

    pub fn topology(&self) -> &'a NetworkTopology {
        self.topology
    }

    fn node_count(&self) -> f64 {
        self.topology.node_count() as f64
    }

    /// Largest bandwidth the feasibility gate currently lets through.
    pub fn threshold(&self, ledger: &BandwidthLedger) -> Bandwidth {
        let divisor = (2.0 * self.node_count() * self.max_priority as f64 + 2.0).log2();
        ledger.min_residual_across_network() / divisor
    }

    pub fn benefit(&self, flow: &Flow) -> f64 {
        self.node_count() * flow.priority as f64
    }

    /// Runs the gates for `flow` and, on success, commits its bandwidth to `ledger`.
    pub fn admit(&self, ledger: &mut BandwidthLedger, flow: &Flow) -> AdmissionDecision {
        let threshold = self.threshold(ledger);
        if threshold < flow.requested_bandwidth {
            log::debug!("Flow {} => {} suspended: threshold {:.3} < requested {}", flow.src, flow.dst, threshold, flow.requested_bandwidth);
            return AdmissionDecision::Suspended(SuspendReason::InsufficientBandwidth);
        }

        let Some(route) = evaluate_path(self.topology, ledger, &flow.src, &flow.dst, flow.requested_bandwidth) else {
            log::debug!("Flow {} => {} suspended: no path", flow.src, flow.dst);
            return AdmissionDecision::Suspended(SuspendReason::NoPath);
        };

        let benefit = self.benefit(flow);
        if route.cost > benefit {
            log::debug!("Flow {} => {} suspended: cost {} exceeds benefit {}", flow.src, flow.dst, route.cost, benefit);
            return AdmissionDecision::Suspended(SuspendReason::CostExceedsBenefit);
        }

        ledger.commit(&route.nodes, flow.requested_bandwidth);
        log::debug!(
            "Flow {} => {} scheduled on [{}] with bandwidth {}",
            flow.src,
            flow.dst,
            route.nodes.iter().map(|n| n.as_str()).collect::<Vec<_>>().join(" -> "),
            flow.requested_bandwidth
        );

        AdmissionDecision::Admitted(ScheduledPath { flow: flow.clone(), path: route.nodes, cost: route.cost })
    }
}
