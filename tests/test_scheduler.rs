use flow_admission::config::{SimulationConfig, UniformRange};
use flow_admission::domain::demand::demand_generator::DemandGenerator;
use flow_admission::domain::network::id::NodeId;
use flow_admission::domain::network::topology_generator::TopologyGenerator;
use flow_admission::domain::scheduler::admission_controller::{AdmissionDecision, SuspendReason};
use flow_admission::domain::scheduler::simulation::{self, FlowScheduler};
use flow_admission::error::{Error, ValidationError};
use flow_admission::loader::parser::{load_demand, load_topology};
use flow_admission::report::{decision_log, summary};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn data_file(name: &str) -> String {
    format!("{}/data/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn create_test_config(seed: u64) -> SimulationConfig {
    SimulationConfig {
        host_num: 20,
        switch_num: 30,
        link_num: Some(80),
        flow_num: 400,
        capacity_range: UniformRange::new(5000, 10000),
        bandwidth_range: UniformRange::new(1, 500),
        priority_range: UniformRange::new(1, 10),
        seed: Some(seed),
    }
}

#[test]
fn test_run_invariants_hold_for_random_runs() {
    for seed in [1, 2, 3, 4, 5] {
        let config = create_test_config(seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let topology = TopologyGenerator::from(&config).generate(&mut rng).unwrap();
        let hosts: Vec<NodeId> = topology.hosts().into_iter().cloned().collect();
        let demand = DemandGenerator::from(&config).generate(&hosts, &mut rng).unwrap();

        let mut scheduler = FlowScheduler::new(&topology, demand.max_priority());
        for flow in demand.flows() {
            let before = scheduler.ledger().clone();
            let decision = scheduler.process(flow).clone();

            if let AdmissionDecision::Admitted(scheduled) = decision {
                assert!(scheduled.path.len() >= 2, "admitted flow needs a non-empty path");
                assert_eq!(scheduled.path.first(), Some(&flow.src));
                assert_eq!(scheduled.path.last(), Some(&flow.dst));
                for hop in scheduled.path.windows(2) {
                    let residual = before.residual(&hop[0], &hop[1]).unwrap();
                    assert!(residual >= flow.requested_bandwidth, "hop {} -> {} had only {}", hop[0], hop[1], residual);
                }
            }
            assert!(scheduler.ledger().is_within_bounds(), "residual left [0, capacity] (seed {})", seed);
        }

        let result = scheduler.finish(Some(seed));
        let requested: f64 = demand.flows().iter().map(|f| f.requested_bandwidth).sum();
        assert_eq!(result.metrics.total_requested_bandwidth, requested);
        assert!(result.metrics.total_accepted_bandwidth <= result.metrics.total_requested_bandwidth);
        assert_eq!(result.scheduled_paths.len() + result.metrics.suspended_flows.len(), demand.len());
        assert!((0.0..=1.0).contains(&result.metrics.max_link_load));
    }
}

#[test]
fn test_decisions_are_deterministic_for_fixed_input() {
    let config = create_test_config(31);
    let mut rng = StdRng::seed_from_u64(31);
    let topology = TopologyGenerator::from(&config).generate(&mut rng).unwrap();
    let hosts: Vec<NodeId> = topology.hosts().into_iter().cloned().collect();
    let demand = DemandGenerator::from(&config).generate(&hosts, &mut rng).unwrap();

    let first = simulation::run(&topology, &demand);
    let second = simulation::run(&topology, &demand.clone());

    assert_eq!(first.decisions, second.decisions);
    assert_eq!(first.metrics, second.metrics);
}

#[test]
fn test_schedule_example_files() {
    let result = flow_admission::schedule_from_files(&data_file("topology_example.json"), &data_file("demand_example.json")).unwrap();

    assert_eq!(result.node_count, 8);
    assert_eq!(result.flow_count, 5);
    assert_eq!(result.metrics.total_requested_bandwidth, 930.0);
    assert_eq!(result.metrics.total_accepted_bandwidth, 870.0);

    // h4 hangs off s4, which has no uplink.
    let suspended: Vec<_> = result.metrics.suspended_flows.iter().map(|s| (s.src.as_str(), s.reason)).collect();
    assert_eq!(suspended, vec![("h1", SuspendReason::NoPath), ("h4", SuspendReason::NoPath)]);

    let hops: Vec<&str> = result.scheduled_paths[2].path.iter().map(|n| n.as_str()).collect();
    assert_eq!(hops, vec!["h3", "s3", "s1", "h1"]);

    // h3 - s3 carries 120 + 450 of 6000.
    assert!((result.metrics.max_link_load - 570.0 / 6000.0).abs() < 1e-12);
}

#[test]
fn test_demand_file_is_checked_against_topology() {
    let topology = load_topology(&data_file("topology_example.json")).unwrap();
    assert_eq!(topology.hosts().len(), 4);

    let demand = load_demand(&data_file("demand_example.json"), &topology).unwrap();
    assert_eq!(demand.max_priority(), 9);

    let switch_endpoint = std::env::temp_dir().join("flow_admission_switch_endpoint.json");
    std::fs::write(&switch_endpoint, r#"{"flows": [{"src": "h1", "dst": "s2", "bandwidth": 5, "priority": 1}]}"#).unwrap();
    let err = load_demand(switch_endpoint.to_str().unwrap(), &topology).unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::EndpointNotHost { index: 0, .. })));

    let missing = std::env::temp_dir().join("flow_admission_missing_demand.json");
    let err = load_demand(missing.to_str().unwrap(), &topology).unwrap_err();
    assert!(matches!(err, Error::IoError(_)));
}

#[test]
fn test_simulation_config_file() {
    let config = SimulationConfig::from_file(&data_file("simulation.json")).unwrap();
    assert_eq!(config.seed, Some(2024));
    assert_eq!(config.link_num(), 170 * 170 / 4);
}

#[test]
fn test_reports_render_every_flow() {
    let result = flow_admission::schedule_from_files(&data_file("topology_example.json"), &data_file("demand_example.json")).unwrap();

    let text = summary::render(&result, true);
    assert!(text.contains("Reject ratio:       0.0645"));
    assert!(text.contains("h3 -> s3 -> s1 -> h1"));

    let mut buffer = Vec::new();
    decision_log::write_decisions(&result, &mut buffer).unwrap();
    let csv = String::from_utf8(buffer).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 6, "header plus one row per flow");
    assert!(lines[0].starts_with("index,src,dst,bandwidth,priority,admitted,reason,cost,path"));
    assert!(lines[3].contains("no path"));

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["totalAcceptedBandwidth"], 870.0);
    assert_eq!(json["scheduledPaths"][0]["path"][0], "h1");
    assert_eq!(json["suspendedFlows"][0]["reason"], "noPath");
}
