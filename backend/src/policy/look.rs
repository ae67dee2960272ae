//! LOOK Policy
//!
//! The head sweeps in one direction servicing the nearest request ahead of it,
//! and reverses only when nothing is left ahead. Unlike SCAN it never travels
//! past the last pending request to the end of the disk.
//!
//! # Sweep direction
//!
//! The policy keeps its own sweep direction, starting `Up`. The head's movement
//! direction is not usable here: it is `Idle` whenever the head already sits on
//! the active request's track.

use super::{sweep_select, IoSchedulerPolicy, PolicyKind, ServiceSlot};
use crate::core::context::SimulationContext;
use crate::core::head::Direction;
use crate::models::request::Request;

/// LOOK policy over a track-sorted pool
///
/// # Example
///
/// ```
/// use iosched_core_rs::policy::{IoSchedulerPolicy, LookPolicy};
/// use iosched_core_rs::{Direction, Request, SimulationContext};
///
/// let mut policy = LookPolicy::new();
/// policy.enqueue(Request::new(0, 0, 45)); // closer, but behind the sweep
/// policy.enqueue(Request::new(1, 0, 70));
///
/// let ctx = SimulationContext::new(50);
/// let active = policy.activate_next(&ctx).unwrap().unwrap();
/// assert_eq!(active.track(), 70);
/// assert_eq!(policy.sweep(), Direction::Up);
/// ```
#[derive(Debug)]
pub struct LookPolicy {
    /// Pending requests, ascending by track; equal tracks keep arrival order
    pending: Vec<Request>,
    sweep: Direction,
    slot: ServiceSlot,
}

impl LookPolicy {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            sweep: Direction::Up,
            slot: ServiceSlot::new(),
        }
    }

    /// Current sweep direction
    pub fn sweep(&self) -> Direction {
        self.sweep
    }
}

impl Default for LookPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl IoSchedulerPolicy for LookPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Look
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
        let previous = self.sweep;
        let idx = sweep_select(&self.pending, ctx.head_position(), &mut self.sweep)?;
        if self.sweep != previous {
            log::debug!(
                "LOOK reversing sweep {:?} -> {:?} at track {}",
                previous,
                self.sweep,
                ctx.head_position()
            );
        }
        Some(self.pending.remove(idx))
    }

    fn slot(&self) -> &ServiceSlot {
        &self.slot
    }

    fn slot_mut(&mut self) -> &mut ServiceSlot {
        &mut self.slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(policy: &mut LookPolicy, start: i64) -> Vec<i64> {
        // Move the head onto each selected track, like the orchestrator would
        let mut ctx = SimulationContext::new(start);
        let mut order = Vec::new();
        while policy.has_pending() {
            let track = policy.activate_next(&ctx).unwrap().unwrap().track();
            order.push(track);
            policy.finish_active(0).unwrap();
            ctx = SimulationContext::new(track);
        }
        order
    }

    #[test]
    fn test_pool_stays_sorted() {
        let mut policy = LookPolicy::new();
        for (id, track) in [30, 10, 20, 10].into_iter().enumerate() {
            policy.enqueue(Request::new(id, 0, track));
        }
        let tracks: Vec<i64> = policy.pending.iter().map(Request::track).collect();
        let ids: Vec<usize> = policy.pending.iter().map(Request::id).collect();
        assert_eq!(tracks, vec![10, 10, 20, 30]);
        assert_eq!(ids, vec![1, 3, 2, 0]);
    }

    #[test]
    fn test_look_sweeps_up_then_down() {
        let mut policy = LookPolicy::new();
        for (id, track) in [10, 90, 30, 70, 55].into_iter().enumerate() {
            policy.enqueue(Request::new(id, 0, track));
        }
        assert_eq!(drain(&mut policy, 50), vec![55, 70, 90, 30, 10]);
        assert_eq!(policy.sweep(), Direction::Down);
    }

    #[test]
    fn test_look_request_on_head_track_is_ahead() {
        let mut policy = LookPolicy::new();
        policy.enqueue(Request::new(0, 0, 49));
        policy.enqueue(Request::new(1, 0, 50));
        assert_eq!(drain(&mut policy, 50), vec![50, 49]);
    }
}
