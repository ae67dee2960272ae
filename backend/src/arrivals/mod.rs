//! Arrival trace loading.
//!
//! Requests enter the simulation from a plain-text trace, one record per line:
//!
//! ```text
//! # arrival track
//! 0 50
//! 2 10
//! ```
//!
//! # Key Principles
//!
//! 1. **Order**: ids follow accepted-record order, starting at 0
//! 2. **Tolerance**: empty lines, `#` comments and malformed records are
//!    skipped, never fatal
//! 3. **No reordering**: records are returned exactly as they appear; the
//!    orchestrator validates that arrival times are non-decreasing
//!
//! Only the first two fields of a record are read; anything after them is
//! ignored. The arrival must be a non-negative integer, the track may be any
//! signed integer.
//!
//! # Example
//!
//! ```
//! use iosched_core_rs::arrivals::parse_trace;
//!
//! let requests = parse_trace("# demo\n0 50\n\nbogus\n2 10\n");
//! assert_eq!(requests.len(), 2);
//! assert_eq!(requests[1].id(), 1);
//! assert_eq!(requests[1].track(), 10);
//! ```

use crate::models::request::Request;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a trace file
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("cannot read input file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parse a single record into `(arrival, track)`.
///
/// Returns `None` for comments, blank lines and malformed records.
pub fn parse_record(line: &str) -> Option<(u64, i64)> {
    if line.starts_with('#') {
        return None;
    }
    let mut fields = line.split_whitespace();
    let arrival = fields.next()?.parse::<u64>().ok()?;
    let track = fields.next()?.parse::<i64>().ok()?;
    Some((arrival, track))
}

/// Parse a whole trace, assigning sequential ids to accepted records
pub fn parse_trace(text: &str) -> Vec<Request> {
    let mut requests = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        match parse_record(line) {
            Some((arrival, track)) => {
                requests.push(Request::new(requests.len(), arrival, track));
            }
            None => {
                if !line.trim().is_empty() && !line.starts_with('#') {
                    log::debug!("skipping malformed record on line {}: {:?}", line_no + 1, line);
                }
            }
        }
    }
    requests
}

/// Read and parse a trace file
///
/// # Errors
/// `TraceError::Io` if the file cannot be read
pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<Request>, TraceError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| TraceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let requests = parse_trace(&text);
    log::debug!("loaded {} request(s) from {}", requests.len(), path.display());
    Ok(requests)
}
