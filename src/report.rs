//! Human- and machine-readable rendering of finished runs. Nothing here feeds back into scheduling.

pub mod decision_log;
pub mod summary;

use std::fs::File;
use std::io::BufWriter;

use crate::domain::scheduler::simulation::SchedulingResult;
use crate::error::Result;

/// Writes the result records as pretty-printed JSON.
pub fn write_json(results: &[SchedulingResult], file_path: &str) -> Result<()> {
    let writer = BufWriter::new(File::create(file_path)?);
    serde_json::to_writer_pretty(writer, results)?;
    log::info!("Wrote {} result record(s) to '{}'.", results.len(), file_path);
    Ok(())
}
