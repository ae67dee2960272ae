//! C-LOOK (Circular LOOK) Policy
//!
//! Sweeps upward only. When no pending request lies at or above the head, the
//! head jumps back to the lowest pending track and starts a new upward sweep.
//! Treating the track space as circular gives more uniform wait times than
//! LOOK, whose middle tracks are passed twice per round trip.

use super::{IoSchedulerPolicy, PolicyKind, ServiceSlot};
use crate::core::context::SimulationContext;
use crate::models::request::Request;

/// C-LOOK policy over a track-sorted pool
///
/// # Example
///
/// ```
/// use iosched_core_rs::policy::{CLookPolicy, IoSchedulerPolicy};
/// use iosched_core_rs::{Request, SimulationContext};
///
/// let mut policy = CLookPolicy::new();
/// policy.enqueue(Request::new(0, 0, 45));
/// policy.enqueue(Request::new(1, 0, 10));
///
/// // Nothing at or above 50: wrap to the lowest track
/// let ctx = SimulationContext::new(50);
/// let active = policy.activate_next(&ctx).unwrap().unwrap();
/// assert_eq!(active.track(), 10);
/// ```
#[derive(Debug, Default)]
pub struct CLookPolicy {
    /// Pending requests, ascending by track; equal tracks keep arrival order
    pending: Vec<Request>,
    slot: ServiceSlot,
}

impl CLookPolicy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IoSchedulerPolicy for CLookPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::CLook
    }

    fn enqueue(&mut self, request: Request) {
        let at = self
            .pending
            .partition_point(|r| r.track() <= request.track());
        self.pending.insert(at, request);
    }

    fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn select_next(&mut self, ctx: &SimulationContext) -> Option<Request> {
        if self.pending.is_empty() {
            return None;
        }
        let head = ctx.head_position();
        let idx = match self.pending.iter().position(|r| r.track() >= head) {
            Some(idx) => idx,
            None => {
                log::debug!("C-LOOK wrapping from track {} to {}", head, self.pending[0].track());
                0
            }
        };
        Some(self.pending.remove(idx))
    }

    fn slot(&self) -> &ServiceSlot {
        &self.slot
    }

    fn slot_mut(&mut self) -> &mut ServiceSlot {
        &mut self.slot
    }
}
