//! FIFO (First-In-First-Out) Policy
//!
//! Simplest baseline policy: service requests strictly in arrival order.
//!
//! # Behavior
//!
//! - Pending pool is a queue; the head of the queue is always activated next
//! - No consideration of head position, so seeks can be arbitrarily long
//!
//! # Use Case
//!
//! - Baseline for comparison with seek-aware policies
//! - Fair by construction: no request can be overtaken

use super::{IoSchedulerPolicy, PolicyKind, ServiceSlot};
use crate::core::context::SimulationContext;
use crate::models::request::Request;
use std::collections::VecDeque;

/// FIFO policy: activate requests in the order they were enqueued
///
/// # Example
///
/// ```
/// use iosched_core_rs::policy::{FifoPolicy, IoSchedulerPolicy};
/// use iosched_core_rs::{Request, SimulationContext};
///
/// let mut policy = FifoPolicy::new();
/// policy.enqueue(Request::new(0, 0, 90));
/// policy.enqueue(Request::new(1, 0, 1));
///
/// let ctx = SimulationContext::new(0);
/// let active = policy.activate_next(&ctx).unwrap().unwrap();
/// assert_eq!(active.track(), 90); // oldest first, even though 1 is closer
/// ```
#[derive(Debug, Default)]
pub struct FifoPolicy {
    queue: VecDeque<Request>,
    slot: ServiceSlot,
}

impl FifoPolicy {
    /// Create new FIFO policy
    pub fn new() -> Self {
        Self::default()
    }
}

impl IoSchedulerPolicy for FifoPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Fifo
    }

    fn enqueue(&mut self, request: Request) {
        self.queue.push_back(request);
    }

    fn pending_len(&self) -> usize {
        self.queue.len()
    }

    fn select_next(&mut self, _ctx: &SimulationContext) -> Option<Request> {
        self.queue.pop_front()
    }

    fn slot(&self) -> &ServiceSlot {
        &self.slot
    }

    fn slot_mut(&mut self) -> &mut ServiceSlot {
        &mut self.slot
    }
}
