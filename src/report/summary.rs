use crate::domain::scheduler::metrics::RunMetrics;
use crate::domain::scheduler::simulation::SchedulingResult;

const TOP_LINKS: usize = 5;

/// Rounds to four decimal places.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// `1 - accepted / requested`, or `0.0` when nothing was requested.
pub fn reject_ratio(metrics: &RunMetrics) -> f64 {
    if metrics.total_requested_bandwidth > 0.0 {
        1.0 - metrics.total_accepted_bandwidth / metrics.total_requested_bandwidth
    } else {
        0.0
    }
}

/// Renders the run summary. With `show_paths`, every admitted flow and its route is listed as well.
pub fn render(result: &SchedulingResult, show_paths: bool) -> String {
    let metrics = &result.metrics;
    let mut out = String::new();

    out.push_str(&format!("Run {}{}\n", result.run_id, result.seed.map(|s| format!(" (seed {})", s)).unwrap_or_default()));
    out.push_str(&format!("  Accepted bandwidth: {}\n", metrics.total_accepted_bandwidth));
    out.push_str(&format!("  Total bandwidth:    {}\n", metrics.total_requested_bandwidth));
    out.push_str(&format!("  Reject ratio:       {}\n", round4(reject_ratio(metrics))));
    out.push_str(&format!("  Max link load:      {}\n", round4(metrics.max_link_load)));
    out.push_str(&format!("  Network nodes:      {}\n", result.node_count));
    out.push_str(&format!("  Directed links:     {}\n", result.link_count));
    out.push_str(&format!("  Flows admitted:     {}/{}\n", result.accepted_flow_count(), result.flow_count));

    for (reason, count) in metrics.suspensions_by_reason() {
        out.push_str(&format!("  Suspended ({}): {}\n", reason, count));
    }

    let top = result.ledger.most_loaded_links(TOP_LINKS);
    if top.iter().any(|l| l.load() > 0.0) {
        out.push_str("  Most loaded links:\n");
        for link in top.into_iter().filter(|l| l.load() > 0.0) {
            out.push_str(&format!("    {} -> {}: {:.4} ({} of {})\n", link.from, link.to, link.load(), link.capacity - link.residual, link.capacity));
        }
    }

    if show_paths {
        for scheduled in &result.scheduled_paths {
            let hops: Vec<&str> = scheduled.path.iter().map(|n| n.as_str()).collect();
            out.push_str(&format!("  Flow {} -> {} scheduled on path: {} (cost {:.6})\n", scheduled.flow.src, scheduled.flow.dst, hops.join(" -> "), scheduled.cost));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_ratio_handles_empty_runs() {
        assert_eq!(reject_ratio(&RunMetrics::default()), 0.0);
    }

    #[test]
    fn reject_ratio_rounds_to_four_places() {
        let metrics = RunMetrics { total_requested_bandwidth: 3.0, total_accepted_bandwidth: 1.0, ..RunMetrics::default() };
        assert_eq!(round4(reject_ratio(&metrics)), 0.6667);
    }
}
