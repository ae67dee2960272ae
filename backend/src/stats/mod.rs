//! Statistics aggregation over completed requests
//!
//! All figures are derived read-only from the ledger; nothing here mutates a
//! request or the completion order.
//!
//! # Definitions
//!
//! - **total time**: largest `end_time` among completed requests
//! - **utilization**: head movement / total time (0 when total time is 0)
//! - **turnaround**: `end_time - arrival_time`
//! - **wait**: `start_time - arrival_time`

pub mod report;

pub use report::{format_request_line, format_summary_line, render_report};

use crate::models::request::Request;
use serde::{Deserialize, Serialize};

/// Aggregate metrics for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub total_time: u64,
    pub total_movement: u64,
    pub utilization: f64,
    pub avg_turnaround: f64,
    pub avg_wait: f64,
    pub max_wait: u64,
    pub num_completed: usize,
}

impl SimulationSummary {
    /// Summarise completed requests.
    ///
    /// Returns `None` when `completed` is empty. Requests without both
    /// timestamps are ignored.
    ///
    /// # Example
    /// ```
    /// use iosched_core_rs::{Request, SimulationSummary};
    ///
    /// let mut a = Request::new(0, 0, 4);
    /// a.start(0).unwrap();
    /// a.complete(4).unwrap();
    /// let mut b = Request::new(1, 1, 2);
    /// b.start(4).unwrap();
    /// b.complete(6).unwrap();
    ///
    /// let summary = SimulationSummary::from_completed(&[a, b], 6).unwrap();
    /// assert_eq!(summary.total_time, 6);
    /// assert_eq!(summary.max_wait, 3);
    /// assert!((summary.avg_turnaround - 4.5).abs() < 1e-9);
    /// ```
    pub fn from_completed(completed: &[Request], total_movement: u64) -> Option<Self> {
        let finished: Vec<(u64, u64)> = completed
            .iter()
            .filter_map(|r| Some((r.wait_time()?, r.turnaround_time()?)))
            .collect();
        if finished.is_empty() {
            return None;
        }

        let total_time = completed.iter().filter_map(Request::end_time).max().unwrap_or(0);
        let count = finished.len() as f64;
        let total_wait: u64 = finished.iter().map(|(wait, _)| wait).sum();
        let total_turnaround: u64 = finished.iter().map(|(_, turnaround)| turnaround).sum();
        let max_wait = finished.iter().map(|(wait, _)| *wait).max().unwrap_or(0);

        let utilization = if total_time == 0 {
            0.0
        } else {
            total_movement as f64 / total_time as f64
        };

        Some(Self {
            total_time,
            total_movement,
            utilization,
            avg_turnaround: total_turnaround as f64 / count,
            avg_wait: total_wait as f64 / count,
            max_wait,
            num_completed: finished.len(),
        })
    }
}
