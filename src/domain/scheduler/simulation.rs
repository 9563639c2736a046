use std::num::NonZeroUsize;
use std::{panic, thread};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use uuid::Uuid;

use crate::config::SimulationConfig;
use crate::domain::demand::demand::Demand;
use crate::domain::demand::demand_generator::DemandGenerator;
use crate::domain::demand::flow::Flow;
use crate::domain::network::topology::NetworkTopology;
use crate::domain::network::topology_generator::TopologyGenerator;
use crate::domain::scheduler::admission_controller::{AdmissionController, AdmissionDecision, ScheduledPath};
use crate::domain::scheduler::bandwidth_ledger::BandwidthLedger;
use crate::domain::scheduler::metrics::RunMetrics;
use crate::error::{Error, Result};

/// Outcome of one flow, kept in arrival order for the decision log.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowDecision {
    pub index: usize,
    pub flow: Flow,
    pub decision: AdmissionDecision,
}

/// Everything a finished run hands to reporting. Read-only once built.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingResult {
    pub run_id: Uuid,

    /// Seed of a generated run, `None` for supplied topology and demand.
    pub seed: Option<u64>,

    pub node_count: usize,
    pub link_count: usize,
    pub flow_count: usize,

    #[serde(flatten)]
    pub metrics: RunMetrics,

    pub scheduled_paths: Vec<ScheduledPath>,

    #[serde(skip)]
    pub decisions: Vec<FlowDecision>,

    /// Residual state after the last flow.
    #[serde(skip)]
    pub ledger: BandwidthLedger,
}

impl SchedulingResult {
    pub fn accepted_flow_count(&self) -> usize {
        self.scheduled_paths.len()
    }
}

/// Drives admission for one run, one flow at a time.
pub struct FlowScheduler<'a> {
    controller: AdmissionController<'a>,
    ledger: BandwidthLedger,
    metrics: RunMetrics,
    scheduled_paths: Vec<ScheduledPath>,
    decisions: Vec<FlowDecision>,
}

impl<'a> FlowScheduler<'a> {
    /// Snapshots the capacities of `topology` into a fresh ledger.
    pub fn new(topology: &'a NetworkTopology, max_priority: u32) -> Self {
        Self {
            controller: AdmissionController::new(topology, max_priority),
            ledger: BandwidthLedger::from(topology),
            metrics: RunMetrics::default(),
            scheduled_paths: Vec::new(),
            decisions: Vec::new(),
        }
    }

    pub fn ledger(&self) -> &BandwidthLedger {
        &self.ledger
    }

    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    /// Decides `flow`. Each flow gets exactly one attempt.
    pub fn process(&mut self, flow: &Flow) -> &AdmissionDecision {
        let decision = self.controller.admit(&mut self.ledger, flow);
        self.metrics.record(flow, &decision);

        if let AdmissionDecision::Admitted(scheduled) = &decision {
            self.scheduled_paths.push(scheduled.clone());
        }

        let index = self.decisions.len();
        self.decisions.push(FlowDecision { index, flow: flow.clone(), decision });
        &self.decisions[index].decision
    }

    /// Computes the final link load and freezes the run.
    pub fn finish(mut self, seed: Option<u64>) -> SchedulingResult {
        self.metrics.max_link_load = self.ledger.max_link_load();
        let topology = self.controller.topology();

        SchedulingResult {
            run_id: Uuid::new_v4(),
            seed,
            node_count: topology.node_count(),
            link_count: topology.link_count(),
            flow_count: self.decisions.len(),
            metrics: self.metrics,
            scheduled_paths: self.scheduled_paths,
            decisions: self.decisions,
            ledger: self.ledger,
        }
    }
}

/// Schedules `demand` on `topology` in arrival order.
pub fn run(topology: &NetworkTopology, demand: &Demand) -> SchedulingResult {
    run_with_seed(topology, demand, None)
}

fn run_with_seed(topology: &NetworkTopology, demand: &Demand, seed: Option<u64>) -> SchedulingResult {
    let mut scheduler = FlowScheduler::new(topology, demand.max_priority());
    for flow in demand.flows() {
        scheduler.process(flow);
    }
    let result = scheduler.finish(seed);

    log::info!(
        "Run {} finished: {}/{} flows admitted, accepted bandwidth {} of {}, max link load {:.4}",
        result.run_id,
        result.accepted_flow_count(),
        result.flow_count,
        result.metrics.total_accepted_bandwidth,
        result.metrics.total_requested_bandwidth,
        result.metrics.max_link_load
    );

    result
}

/// Generates a topology and a demand from `config` and schedules them.
pub fn run_random(config: &SimulationConfig) -> Result<SchedulingResult> {
    config.validate()?;

    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!("Starting random simulation with seed {}.", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let topology = TopologyGenerator::from(config).generate(&mut rng)?;
    let hosts: Vec<_> = topology.hosts().into_iter().cloned().collect();
    let demand = DemandGenerator::from(config).generate(&hosts, &mut rng)?;

    Ok(run_with_seed(&topology, &demand, Some(seed)))
}

/// Runs `runs` independent simulations in parallel, with seeds `base, base + 1, ...`.
///
/// At most `available_parallelism()` runs are in flight at once. Every run owns its
/// topology and ledger. Results come back in seed order. A panicking run is re-raised.
pub fn run_batch(config: &SimulationConfig, runs: usize) -> Result<Vec<SchedulingResult>> {
    if runs == 0 {
        return Err(Error::InvalidConfiguration("a batch needs at least one run".to_string()));
    }
    config.validate()?;
    let base_seed = config.seed.unwrap_or_else(rand::random);
    let workers = thread::available_parallelism().map(NonZeroUsize::get).unwrap_or(1);
    log::info!("Running {} simulations on up to {} threads, base seed {}.", runs, workers, base_seed);

    let mut results = Vec::with_capacity(runs);
    for chunk_start in (0..runs).step_by(workers) {
        let chunk_end = (chunk_start + workers).min(runs);
        let chunk = thread::scope(|scope| {
            let handles: Vec<_> = (chunk_start..chunk_end)
                .map(|i| {
                    let run_config = SimulationConfig { seed: Some(base_seed.wrapping_add(i as u64)), ..config.clone() };
                    scope.spawn(move || run_random(&run_config))
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|payload| panic::resume_unwind(payload)))
                .collect::<Result<Vec<_>>>()
        })?;
        results.extend(chunk);
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UniformRange;

    fn small_config(seed: u64) -> SimulationConfig {
        SimulationConfig {
            host_num: 6,
            switch_num: 4,
            link_num: Some(8),
            flow_num: 60,
            capacity_range: UniformRange::new(5000, 10000),
            bandwidth_range: UniformRange::new(1, 500),
            priority_range: UniformRange::new(1, 10),
            seed: Some(seed),
        }
    }

    #[test]
    fn random_run_is_reproducible_from_seed() {
        let a = run_random(&small_config(9)).unwrap();
        let b = run_random(&small_config(9)).unwrap();

        assert_eq!(a.seed, Some(9));
        assert_eq!(a.metrics, b.metrics);
        assert_eq!(a.scheduled_paths, b.scheduled_paths);
        assert_ne!(a.run_id, b.run_id);
    }

    #[test]
    fn batch_runs_come_back_in_seed_order() {
        let results = run_batch(&small_config(100), 4).unwrap();

        let seeds: Vec<_> = results.iter().map(|r| r.seed).collect();
        assert_eq!(seeds, vec![Some(100), Some(101), Some(102), Some(103)]);
        for result in &results {
            assert_eq!(result.flow_count, 60);
            assert!(result.ledger.is_within_bounds());
        }
    }

    #[test]
    fn batch_larger_than_thread_pool_keeps_seed_order() {
        let workers = thread::available_parallelism().map(NonZeroUsize::get).unwrap_or(1);
        let runs = 2 * workers + 1;

        let results = run_batch(&SimulationConfig { flow_num: 10, ..small_config(500) }, runs).unwrap();

        assert_eq!(results.len(), runs);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.seed, Some(500 + i as u64));
        }
    }

    #[test]
    fn empty_batch_is_rejected() {
        assert!(matches!(run_batch(&small_config(1), 0), Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn invalid_config_is_rejected_before_running() {
        let config = SimulationConfig { switch_num: 0, ..small_config(1) };
        assert!(run_random(&config).is_err());
    }
}
