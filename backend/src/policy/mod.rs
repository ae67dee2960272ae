//! Disk Scheduling Policy Module
//!
//! This module defines the policy interface that decides which pending request
//! the head services next.
//!
//! # Overview
//!
//! A policy owns two things:
//! - its **pending pool**, whose internal ordering is private to the policy
//!   (queue, unordered list, track-sorted list, or split batch/incoming lists)
//! - a [`ServiceSlot`]: the single active request plus the completed list
//!
//! At most one request is active at any time. The orchestrator never asks for a
//! new activation while one is active, and [`IoSchedulerPolicy::activate_next`]
//! is a no-op if it does.
//!
//! # Policy Interface
//!
//! Implementors provide the pool operations (`enqueue`, `pending_len`,
//! `select_next`) and access to their slot. Everything else
//! (`has_work`, `is_active`, `reached_target`, `finish_active`,
//! `activate_next`, ...) is shared through provided methods:
//!
//! ```rust
//! use iosched_core_rs::policy::{IoSchedulerPolicy, PolicyKind, ServiceSlot};
//! use iosched_core_rs::{Request, SimulationContext};
//!
//! /// Always services the most recently arrived request
//! struct Lifo {
//!     stack: Vec<Request>,
//!     slot: ServiceSlot,
//! }
//!
//! impl IoSchedulerPolicy for Lifo {
//!     fn kind(&self) -> PolicyKind {
//!         PolicyKind::Fifo
//!     }
//!     fn enqueue(&mut self, request: Request) {
//!         self.stack.push(request);
//!     }
//!     fn pending_len(&self) -> usize {
//!         self.stack.len()
//!     }
//!     fn select_next(&mut self, _ctx: &SimulationContext) -> Option<Request> {
//!         self.stack.pop()
//!     }
//!     fn slot(&self) -> &ServiceSlot {
//!         &self.slot
//!     }
//!     fn slot_mut(&mut self) -> &mut ServiceSlot {
//!         &mut self.slot
//!     }
//! }
//! ```
//!
//! Available policies:
//! 1. **Fifo** (`N`): strict arrival order
//! 2. **Sstf** (`S`): shortest seek from the current head position
//! 3. **Look** (`L`): sweep in one direction, reverse when nothing lies ahead
//! 4. **CLook** (`C`): sweep upward only, wrap to the lowest track
//! 5. **FLook** (`F`): LOOK over a frozen batch; arrivals wait for the next batch

use crate::core::context::SimulationContext;
use crate::core::head::{seek_distance, Direction};
use crate::models::request::{Request, RequestError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod clook;
pub mod fifo;
pub mod flook;
pub mod look;
pub mod sstf;

pub use clook::CLookPolicy;
pub use fifo::FifoPolicy;
pub use flook::FLookPolicy;
pub use look::LookPolicy;
pub use sstf::SstfPolicy;

/// Policy selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyKind {
    #[default]
    Fifo,
    Sstf,
    Look,
    CLook,
    FLook,
}

/// Errors raised when selecting a policy by name
#[derive(Debug, Error, PartialEq)]
pub enum PolicyError {
    #[error("unknown scheduling policy '{0}' (expected one of N, S, L, C, F)")]
    UnknownPolicy(String),
}

impl PolicyKind {
    /// Every policy, in code order `N S L C F`
    pub const ALL: [PolicyKind; 5] = [
        PolicyKind::Fifo,
        PolicyKind::Sstf,
        PolicyKind::Look,
        PolicyKind::CLook,
        PolicyKind::FLook,
    ];

    /// Parse the single-letter selector used on the command line
    ///
    /// # Example
    /// ```
    /// use iosched_core_rs::policy::PolicyKind;
    ///
    /// assert_eq!(PolicyKind::from_code('C'), Some(PolicyKind::CLook));
    /// assert_eq!(PolicyKind::from_code('x'), None);
    /// ```
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'N' => Some(PolicyKind::Fifo),
            'S' => Some(PolicyKind::Sstf),
            'L' => Some(PolicyKind::Look),
            'C' => Some(PolicyKind::CLook),
            'F' => Some(PolicyKind::FLook),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            PolicyKind::Fifo => 'N',
            PolicyKind::Sstf => 'S',
            PolicyKind::Look => 'L',
            PolicyKind::CLook => 'C',
            PolicyKind::FLook => 'F',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Fifo => "FIFO",
            PolicyKind::Sstf => "SSTF",
            PolicyKind::Look => "LOOK",
            PolicyKind::CLook => "C-LOOK",
            PolicyKind::FLook => "F-LOOK",
        }
    }

    /// Instantiate a fresh policy of this kind
    pub fn build(self) -> Box<dyn IoSchedulerPolicy> {
        match self {
            PolicyKind::Fifo => Box::new(FifoPolicy::new()),
            PolicyKind::Sstf => Box::new(SstfPolicy::new()),
            PolicyKind::Look => Box::new(LookPolicy::new()),
            PolicyKind::CLook => Box::new(CLookPolicy::new()),
            PolicyKind::FLook => Box::new(FLookPolicy::new()),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => {
                Self::from_code(code).ok_or_else(|| PolicyError::UnknownPolicy(s.to_string()))
            }
            _ => Err(PolicyError::UnknownPolicy(s.to_string())),
        }
    }
}

/// The active request and the completed list, shared by every policy
#[derive(Debug, Clone, Default)]
pub struct ServiceSlot {
    active: Option<Request>,
    completed: Vec<Request>,
}

impl ServiceSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&Request> {
        self.active.as_ref()
    }

    /// Completed requests in completion order
    pub fn completed(&self) -> &[Request] {
        &self.completed
    }

    /// Stamp `start_time` and occupy the slot.
    ///
    /// The caller guarantees the slot is empty.
    fn occupy(&mut self, mut request: Request, tick: u64) -> Result<&Request, RequestError> {
        debug_assert!(self.active.is_none(), "second request activated");
        request.start(tick)?;
        let active: &Request = self.active.insert(request);
        Ok(active)
    }

    /// Stamp `end_time`, move the active request to the completed list and
    /// clear the slot. No-op when nothing is active.
    fn release(&mut self, tick: u64) -> Result<Option<&Request>, RequestError> {
        let Some(mut request) = self.active.take() else {
            return Ok(None);
        };
        request.complete(tick)?;
        self.completed.push(request);
        Ok(self.completed.last())
    }
}

/// Disk scheduling policy
///
/// All five variants share this capability set. Required methods manage the
/// policy-private pending pool; the provided methods implement the common
/// active-slot lifecycle on top of [`ServiceSlot`].
pub trait IoSchedulerPolicy: Send + Sync {
    /// Which policy this is
    fn kind(&self) -> PolicyKind;

    /// Add a newly arrived request to the pending pool
    fn enqueue(&mut self, request: Request);

    /// Number of requests waiting in the pending pool
    fn pending_len(&self) -> usize;

    /// Remove and return the request to service next.
    ///
    /// Only called when nothing is active and the pool is non-empty.
    fn select_next(&mut self, ctx: &SimulationContext) -> Option<Request>;

    fn slot(&self) -> &ServiceSlot;

    fn slot_mut(&mut self) -> &mut ServiceSlot;

    /// True if the pending pool is non-empty
    fn has_pending(&self) -> bool {
        self.pending_len() > 0
    }

    /// True if the pending pool is non-empty or a request is active
    fn has_work(&self) -> bool {
        self.has_pending() || self.is_active()
    }

    /// True if a request occupies the active slot
    fn is_active(&self) -> bool {
        self.slot().active().is_some()
    }

    fn active_request(&self) -> Option<&Request> {
        self.slot().active()
    }

    /// Target track of the active request, if any
    fn active_track(&self) -> Option<i64> {
        self.slot().active().map(Request::track)
    }

    /// True if a request is active and its track equals `head_position`
    fn reached_target(&self, head_position: i64) -> bool {
        self.active_track() == Some(head_position)
    }

    /// Complete the active request at `current_time`.
    ///
    /// Returns the completed request, or `None` if nothing was active.
    fn finish_active(&mut self, current_time: u64) -> Result<Option<&Request>, RequestError> {
        self.slot_mut().release(current_time)
    }

    /// Select and activate the next request if nothing is active and the
    /// pending pool is non-empty. Its `start_time` becomes the current tick.
    fn activate_next(
        &mut self,
        ctx: &SimulationContext,
    ) -> Result<Option<&Request>, RequestError> {
        if self.is_active() || !self.has_pending() {
            return Ok(None);
        }
        let Some(next) = self.select_next(ctx) else {
            return Ok(None);
        };
        self.slot_mut().occupy(next, ctx.current_tick()).map(Some)
    }

    /// Completed requests in completion order
    fn completed_requests(&self) -> &[Request] {
        self.slot().completed()
    }
}

/// Index of the request nearest to `head` among those lying ahead of it in
/// `direction`. Ties go to the earliest entry in `pool`.
pub(crate) fn nearest_ahead(pool: &[Request], head: i64, direction: Direction) -> Option<usize> {
    pool.iter()
        .enumerate()
        .filter(|(_, r)| direction.is_ahead(head, r.track()))
        .min_by_key(|(_, r)| seek_distance(head, r.track()))
        .map(|(idx, _)| idx)
}

/// LOOK selection: nearest request ahead in `sweep`, else reverse the sweep
/// and take the nearest request in the new direction.
///
/// Two passes always suffice: the reversed pass covers every track the first
/// pass excluded. `sweep` is only updated when the reversal finds something.
pub(crate) fn sweep_select(pool: &[Request], head: i64, sweep: &mut Direction) -> Option<usize> {
    if let Some(idx) = nearest_ahead(pool, head, *sweep) {
        return Some(idx);
    }
    let reversed = sweep.reversed();
    let idx = nearest_ahead(pool, head, reversed)?;
    *sweep = reversed;
    Some(idx)
}
