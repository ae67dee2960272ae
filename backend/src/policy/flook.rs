//! F-LOOK Policy
//!
//! LOOK over a frozen batch. Pending requests live in two lists:
//!
//! - **batch**: the requests being serviced in the current pass
//! - **incoming**: everything that arrived since the batch was formed
//!
//! `enqueue` only ever appends to `incoming`. When the batch runs dry, the two
//! lists are swapped wholesale and the new batch is ordered by proximity to the
//! head (requests ahead in the sweep first). Selection inside the batch uses
//! the same nearest-ahead-else-reverse rule as LOOK.
//!
//! Requests arriving mid-batch cannot cut ahead of it, which bounds wait times
//! under a steady stream of arrivals near the head.

use super::{sweep_select, IoSchedulerPolicy, PolicyKind, ServiceSlot};
use crate::core::context::SimulationContext;
use crate::core::head::{seek_distance, Direction};
use crate::models::request::Request;

/// F-LOOK policy with batch/incoming double buffering
///
/// # Example
///
/// ```
/// use iosched_core_rs::policy::{FLookPolicy, IoSchedulerPolicy};
/// use iosched_core_rs::{Request, SimulationContext};
///
/// let mut policy = FLookPolicy::new();
/// policy.enqueue(Request::new(0, 0, 80));
/// policy.enqueue(Request::new(1, 0, 90));
///
/// let ctx = SimulationContext::new(50);
/// policy.activate_next(&ctx).unwrap();
/// assert_eq!(policy.batch_len(), 1);
///
/// // Arrives during the batch: waits even though it is right under the head
/// policy.enqueue(Request::new(2, 1, 51));
/// assert_eq!(policy.incoming_len(), 1);
/// ```
#[derive(Debug)]
pub struct FLookPolicy {
    batch: Vec<Request>,
    incoming: Vec<Request>,
    sweep: Direction,
    slot: ServiceSlot,
}

impl FLookPolicy {
    pub fn new() -> Self {
        Self {
            batch: Vec::new(),
            incoming: Vec::new(),
            sweep: Direction::Up,
            slot: ServiceSlot::new(),
        }
    }

    /// Requests frozen in the current batch
    pub fn batch_len(&self) -> usize {
        self.batch.len()
    }

    /// Requests waiting for the next batch
    pub fn incoming_len(&self) -> usize {
        self.incoming.len()
    }

    pub fn sweep(&self) -> Direction {
        self.sweep
    }

    /// Promote `incoming` to the batch, ordered ahead-first then by distance
    fn refill_batch(&mut self, head: i64) {
        std::mem::swap(&mut self.batch, &mut self.incoming);
        let sweep = self.sweep;
        self.batch
            .sort_by_key(|r| (!sweep.is_ahead(head, r.track()), seek_distance(head, r.track())));
        log::debug!(
            "F-LOOK new batch of {} request(s) at track {}",
            self.batch.len(),
            head
        );
    }
}

impl Default for FLookPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl IoSchedulerPolicy for FLookPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::FLook
    }

    fn enqueue(&mut self, request: Request) {
        self.incoming.push(request);
    }

    fn pending_len(&self) -> usize {
        self.batch.len() + self.incoming.len()
    }

    fn select_next(&mut self, ctx: &SimulationContext) -> Option<Request> {
        let head = ctx.head_position();
        if self.batch.is_empty() {
            self.refill_batch(head);
        }
        let idx = sweep_select(&self.batch, head, &mut self.sweep)?;
        Some(self.batch.remove(idx))
    }

    fn slot(&self) -> &ServiceSlot {
        &self.slot
    }

    fn slot_mut(&mut self) -> &mut ServiceSlot {
        &mut self.slot
    }
}
