//! SSTF (Shortest Seek Time First) Policy
//!
//! Activates the pending request closest to the current head position,
//! regardless of direction. Ties go to the request that was enqueued first.
//!
//! Minimises each individual seek but can starve requests far from a busy
//! region of the disk.

use super::{IoSchedulerPolicy, PolicyKind, ServiceSlot};
use crate::core::context::SimulationContext;
use crate::core::head::seek_distance;
use crate::models::request::Request;

/// SSTF policy over an insertion-ordered pool
///
/// # Example
///
/// ```
/// use iosched_core_rs::policy::{IoSchedulerPolicy, SstfPolicy};
/// use iosched_core_rs::{Request, SimulationContext};
///
/// let mut policy = SstfPolicy::new();
/// policy.enqueue(Request::new(0, 0, 90));
/// policy.enqueue(Request::new(1, 0, 40));
///
/// let ctx = SimulationContext::new(50);
/// let active = policy.activate_next(&ctx).unwrap().unwrap();
/// assert_eq!(active.track(), 40);
/// ```
#[derive(Debug, Default)]
pub struct SstfPolicy {
    pending: Vec<Request>,
    slot: ServiceSlot,
}

impl SstfPolicy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IoSchedulerPolicy for SstfPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Sstf
    }

    fn enqueue(&mut self, request: Request) {
        self.pending.push(request);
    }

    fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn select_next(&mut self, ctx: &SimulationContext) -> Option<Request> {
        let head = ctx.head_position();
        // min_by_key keeps the first of equal minima, preserving insertion order on ties
        let idx = self
            .pending
            .iter()
            .enumerate()
            .min_by_key(|(_, r)| seek_distance(head, r.track()))
            .map(|(idx, _)| idx)?;
        Some(self.pending.remove(idx))
    }

    fn slot(&self) -> &ServiceSlot {
        &self.slot
    }

    fn slot_mut(&mut self) -> &mut ServiceSlot {
        &mut self.slot
    }
}
