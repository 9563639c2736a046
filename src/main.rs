use std::path::Path;

use anyhow::{Context, bail};
use clap::Parser;

use flow_admission::config::SimulationConfig;
use flow_admission::domain::scheduler::simulation::{self, SchedulingResult};
use flow_admission::logger;
use flow_admission::report::{self, decision_log, summary};

/// Bandwidth-constrained flow admission and routing simulator.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// JSON simulation configuration for random runs.
    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    hosts: Option<usize>,

    #[arg(long)]
    switches: Option<usize>,

    /// Number of link pairs, defaults to (hosts + switches)^2 / 4.
    #[arg(long)]
    links: Option<usize>,

    #[arg(long)]
    flows: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// Topology descriptor (JSON). Requires --demand.
    #[arg(long, requires = "demand")]
    topology: Option<String>,

    /// Demand descriptor (JSON). Requires --topology.
    #[arg(long, requires = "topology")]
    demand: Option<String>,

    /// Number of independent random runs, executed in parallel.
    #[arg(long, default_value_t = 1)]
    runs: usize,

    /// Write the result records as JSON.
    #[arg(long)]
    json: Option<String>,

    /// Write the per-flow decision log as CSV.
    #[arg(long)]
    csv: Option<String>,

    /// Print every scheduled path.
    #[arg(long)]
    show_paths: bool,
}

impl Cli {
    fn simulation_config(&self) -> anyhow::Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_file(path).with_context(|| format!("loading configuration '{}'", path))?,
            None => SimulationConfig::default(),
        };

        if let Some(hosts) = self.hosts {
            config.host_num = hosts;
        }
        if let Some(switches) = self.switches {
            config.switch_num = switches;
        }
        if let Some(links) = self.links {
            config.link_num = Some(links);
        }
        if let Some(flows) = self.flows {
            config.flow_num = flows;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }

        Ok(config)
    }

    fn run(&self) -> anyhow::Result<Vec<SchedulingResult>> {
        if let (Some(topology), Some(demand)) = (&self.topology, &self.demand) {
            if self.runs != 1 {
                bail!("--runs only applies to random simulations");
            }
            let result = flow_admission::schedule_from_files(topology, demand).context("scheduling supplied descriptors")?;
            return Ok(vec![result]);
        }

        let config = self.simulation_config()?;
        let results = if self.runs == 1 {
            vec![simulation::run_random(&config)?]
        } else {
            simulation::run_batch(&config, self.runs)?
        };
        Ok(results)
    }
}

/// `decisions.csv` becomes `decisions-run2.csv` for the third run of a batch.
fn numbered_path(path: &str, run: usize, total: usize) -> String {
    if total == 1 {
        return path.to_string();
    }
    let path = Path::new(path);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("decisions");
    let file_name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}-run{}.{}", stem, run, ext),
        None => format!("{}-run{}", stem, run),
    };
    path.with_file_name(file_name).to_string_lossy().into_owned()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init();

    let results = cli.run().inspect_err(|e| log::error!("Simulation failed: {:#}", e))?;

    for result in &results {
        println!("{}", summary::render(result, cli.show_paths));
    }

    if let Some(path) = &cli.json {
        report::write_json(&results, path).with_context(|| format!("writing '{}'", path))?;
    }
    if let Some(path) = &cli.csv {
        for (i, result) in results.iter().enumerate() {
            let target = numbered_path(path, i, results.len());
            decision_log::write_decisions_file(result, &target).with_context(|| format!("writing '{}'", target))?;
        }
    }

    Ok(())
}
