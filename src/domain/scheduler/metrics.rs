use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::demand::flow::Flow;
use crate::domain::network::id::NodeId;
use crate::domain::network::topology::Bandwidth;
use crate::domain::scheduler::admission_controller::{AdmissionDecision, SuspendReason};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspendedFlow {
    pub src: NodeId,
    pub dst: NodeId,
    pub reason: SuspendReason,
}

/// Run-level counters, updated after every decision.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunMetrics {
    pub total_requested_bandwidth: Bandwidth,
    pub total_accepted_bandwidth: Bandwidth,
    pub suspended_flows: Vec<SuspendedFlow>,

    /// Only set once the run has finished.
    pub max_link_load: f64,
}

impl RunMetrics {
    pub fn record(&mut self, flow: &Flow, decision: &AdmissionDecision) {
        self.total_requested_bandwidth += flow.requested_bandwidth;

        match decision {
            AdmissionDecision::Admitted(_) => self.total_accepted_bandwidth += flow.requested_bandwidth,
            AdmissionDecision::Suspended(reason) => {
                self.suspended_flows.push(SuspendedFlow { src: flow.src.clone(), dst: flow.dst.clone(), reason: *reason })
            }
        }
    }

    pub fn suspensions_by_reason(&self) -> BTreeMap<SuspendReason, usize> {
        let mut counts = BTreeMap::new();
        for suspended in &self.suspended_flows {
            *counts.entry(suspended.reason).or_insert(0) += 1;
        }
        counts
    }
}
