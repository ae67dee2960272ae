//! Request model
//!
//! Represents a single disk I/O request. Each request has:
//! - A sequential id (input order, starting at 0)
//! - An arrival tick and a target track
//! - Start and end ticks, each stamped exactly once
//!
//! Lifecycle: Pending (arrived, not yet selected) -> Active -> Completed.
//! Requests not yet handed to a policy are simply not in any pool.
//!
//! CRITICAL: `arrival_time <= start_time <= end_time` for every request

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle state derived from the timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    /// Waiting in a policy's pending pool
    Pending,

    /// Selected by the policy; the head is seeking toward it
    Active {
        /// Tick at which the policy selected it
        start_time: u64,
    },

    /// Head reached the target track while the request was active
    Completed { start_time: u64, end_time: u64 },
}

/// Errors raised when stamping lifecycle timestamps
#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("request {id} already started at tick {start_time}")]
    AlreadyStarted { id: usize, start_time: u64 },

    #[error("request {id} cannot start at tick {tick} before its arrival at {arrival_time}")]
    StartBeforeArrival {
        id: usize,
        tick: u64,
        arrival_time: u64,
    },

    #[error("request {id} has not been started")]
    NotStarted { id: usize },

    #[error("request {id} already completed at tick {end_time}")]
    AlreadyCompleted { id: usize, end_time: u64 },

    #[error("request {id} cannot end at tick {tick} before its start at {start_time}")]
    EndBeforeStart { id: usize, tick: u64, start_time: u64 },
}

/// A disk I/O request
///
/// # Example
/// ```
/// use iosched_core_rs::Request;
///
/// let mut req = Request::new(0, 4, 90);
/// req.start(10).unwrap();
/// req.complete(90).unwrap();
///
/// assert_eq!(req.wait_time(), Some(6));
/// assert_eq!(req.turnaround_time(), Some(86));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Sequential id in input order
    id: usize,

    /// Tick at which the request becomes eligible for scheduling
    arrival_time: u64,

    /// Target head position
    track: i64,

    /// Tick at which the policy selected it as active
    start_time: Option<u64>,

    /// Tick at which the head reached `track` while it was active
    end_time: Option<u64>,
}

impl Request {
    /// Create a new request that has neither started nor completed
    pub fn new(id: usize, arrival_time: u64, track: i64) -> Self {
        Self {
            id,
            arrival_time,
            track,
            start_time: None,
            end_time: None,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn arrival_time(&self) -> u64 {
        self.arrival_time
    }

    pub fn track(&self) -> i64 {
        self.track
    }

    pub fn start_time(&self) -> Option<u64> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<u64> {
        self.end_time
    }

    /// Current lifecycle state
    pub fn status(&self) -> RequestStatus {
        match (self.start_time, self.end_time) {
            (Some(start_time), Some(end_time)) => RequestStatus::Completed {
                start_time,
                end_time,
            },
            (Some(start_time), None) => RequestStatus::Active { start_time },
            _ => RequestStatus::Pending,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.end_time.is_some()
    }

    /// Stamp the start tick
    ///
    /// # Errors
    /// - `AlreadyStarted` if a start tick is already set
    /// - `StartBeforeArrival` if `tick < arrival_time`
    pub fn start(&mut self, tick: u64) -> Result<(), RequestError> {
        if let Some(start_time) = self.start_time {
            return Err(RequestError::AlreadyStarted {
                id: self.id,
                start_time,
            });
        }
        if tick < self.arrival_time {
            return Err(RequestError::StartBeforeArrival {
                id: self.id,
                tick,
                arrival_time: self.arrival_time,
            });
        }
        self.start_time = Some(tick);
        Ok(())
    }

    /// Stamp the end tick. After this the request is immutable.
    ///
    /// # Errors
    /// - `NotStarted` if the request was never started
    /// - `AlreadyCompleted` if an end tick is already set
    /// - `EndBeforeStart` if `tick < start_time`
    pub fn complete(&mut self, tick: u64) -> Result<(), RequestError> {
        let start_time = self.start_time.ok_or(RequestError::NotStarted { id: self.id })?;
        if let Some(end_time) = self.end_time {
            return Err(RequestError::AlreadyCompleted {
                id: self.id,
                end_time,
            });
        }
        if tick < start_time {
            return Err(RequestError::EndBeforeStart {
                id: self.id,
                tick,
                start_time,
            });
        }
        self.end_time = Some(tick);
        Ok(())
    }

    /// `start_time - arrival_time`, once started
    pub fn wait_time(&self) -> Option<u64> {
        self.start_time.map(|start| start - self.arrival_time)
    }

    /// `end_time - arrival_time`, once completed
    pub fn turnaround_time(&self) -> Option<u64> {
        self.end_time.map(|end| end - self.arrival_time)
    }
}
