//! Plain-text report rendering
//!
//! One line per request in id order, then a single `SUM:` line:
//!
//! ```text
//!     0:     0     0    50
//!     1:     2    50    90
//! SUM: 90 90 1.0000 69.00 24.00 48
//! ```

use super::SimulationSummary;
use crate::models::request::Request;
use std::fmt::Write;

/// `id: arrival start end`, right-aligned; unset timestamps print as `-`
pub fn format_request_line(request: &Request) -> String {
    let stamp = |t: Option<u64>| t.map_or_else(|| "-".to_string(), |t| t.to_string());
    format!(
        "{:>5}:{:>6}{:>6}{:>6}",
        request.id(),
        request.arrival_time(),
        stamp(request.start_time()),
        stamp(request.end_time())
    )
}

pub fn format_summary_line(summary: &SimulationSummary) -> String {
    format!(
        "SUM: {} {} {:.4} {:.2} {:.2} {}",
        summary.total_time,
        summary.total_movement,
        summary.utilization,
        summary.avg_turnaround,
        summary.avg_wait,
        summary.max_wait
    )
}

/// Full report: request lines sorted by id, then the summary line if any
pub fn render_report(requests: &[Request], summary: Option<&SimulationSummary>) -> String {
    let mut sorted: Vec<&Request> = requests.iter().collect();
    sorted.sort_by_key(|r| r.id());

    let mut out = String::new();
    for request in sorted {
        // Writing into a String cannot fail
        let _ = writeln!(out, "{}", format_request_line(request));
    }
    if let Some(summary) = summary {
        let _ = writeln!(out, "{}", format_summary_line(summary));
    }
    out
}
