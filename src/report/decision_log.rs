use std::io::Write;

use crate::api::report_dto::DecisionRowDto;
use crate::domain::scheduler::admission_controller::AdmissionDecision;
use crate::domain::scheduler::simulation::{FlowDecision, SchedulingResult};
use crate::error::Result;

impl From<&FlowDecision> for DecisionRowDto {
    fn from(entry: &FlowDecision) -> Self {
        let (admitted, reason, cost, path) = match &entry.decision {
            AdmissionDecision::Admitted(scheduled) => {
                let hops: Vec<&str> = scheduled.path.iter().map(|n| n.as_str()).collect();
                (true, String::new(), Some(scheduled.cost), hops.join("->"))
            }
            AdmissionDecision::Suspended(reason) => (false, reason.to_string(), None, String::new()),
        };

        DecisionRowDto {
            index: entry.index,
            src: entry.flow.src.to_string(),
            dst: entry.flow.dst.to_string(),
            bandwidth: entry.flow.requested_bandwidth,
            priority: entry.flow.priority,
            admitted,
            reason,
            cost,
            path,
        }
    }
}

/// Writes one CSV row per flow, in arrival order.
pub fn write_decisions<W: Write>(result: &SchedulingResult, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for entry in &result.decisions {
        csv_writer.serialize(DecisionRowDto::from(entry))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes the decision log to `file_path`.
pub fn write_decisions_file(result: &SchedulingResult, file_path: &str) -> Result<()> {
    let file = std::fs::File::create(file_path)?;
    write_decisions(result, file)?;
    log::info!("Wrote {} decisions to '{}'.", result.decisions.len(), file_path);
    Ok(())
}
