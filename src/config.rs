use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, ValidationError};
use crate::loader::parser::parse_json_file;

const DEFAULT_HOST_NUM: usize = 42;
const DEFAULT_SWITCH_NUM: usize = 128;
const DEFAULT_FLOW_NUM: usize = 2000;

/// Inclusive integer range `[min, max]` that values are drawn from uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct UniformRange {
    pub min: u64,
    pub max: u64,
}

impl UniformRange {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    pub(crate) fn validate(&self, name: &'static str) -> std::result::Result<(), ValidationError> {
        if self.min == 0 || self.min > self.max {
            return Err(ValidationError::InvalidRange { name, min: self.min, max: self.max });
        }
        Ok(())
    }
}

/// Parameters of a randomly generated simulation run.
///
/// Every field is optional in the JSON form; missing fields take the defaults of the
/// reference experiment (42 hosts, 128 switches, 2000 flows).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationConfig {
    pub host_num: usize,
    pub switch_num: usize,

    /// Number of link pairs. Defaults to `(host_num + switch_num)^2 / 4`.
    pub link_num: Option<usize>,

    pub flow_num: usize,

    /// Capacity of every generated link pair.
    pub capacity_range: UniformRange,

    /// Requested bandwidth of every generated flow.
    pub bandwidth_range: UniformRange,

    pub priority_range: UniformRange,

    /// Seed of the run. A random seed is drawn (and logged) when absent.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            host_num: DEFAULT_HOST_NUM,
            switch_num: DEFAULT_SWITCH_NUM,
            link_num: None,
            flow_num: DEFAULT_FLOW_NUM,
            capacity_range: UniformRange::new(5000, 10000),
            bandwidth_range: UniformRange::new(1, 500),
            priority_range: UniformRange::new(1, 10),
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn from_file(file_path: &str) -> Result<Self> {
        let config: SimulationConfig = parse_json_file(file_path)?;
        config.validate()?;
        log::info!("Simulation configuration loaded from '{}'.", file_path);
        Ok(config)
    }

    pub fn link_num(&self) -> usize {
        self.link_num.unwrap_or_else(|| (self.host_num + self.switch_num).pow(2) / 4)
    }

    pub fn validate(&self) -> Result<()> {
        if self.host_num < 2 {
            return Err(ValidationError::NotEnoughHosts(self.host_num).into());
        }
        if self.switch_num == 0 {
            return Err(ValidationError::NoSwitches.into());
        }
        self.capacity_range.validate("capacityRange")?;
        self.bandwidth_range.validate("bandwidthRange")?;
        self.priority_range.validate("priorityRange")?;
        if self.priority_range.max > u32::MAX as u64 {
            return Err(Error::InvalidConfiguration(format!("priority {} does not fit into 32 bits", self.priority_range.max)));
        }
        Ok(())
    }
}
