//! Simulation context
//!
//! Bundles the clock and the head into one value owned by the orchestrator.
//! Policies receive it by shared reference when they need the current tick or
//! head position; only the orchestrator mutates it.

use super::head::{DiskHead, Direction};
use super::time::TimeManager;
use serde::{Deserialize, Serialize};

/// Clock and head state for one simulation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationContext {
    time: TimeManager,
    head: DiskHead,
}

impl SimulationContext {
    /// Fresh context at tick 0 with the head parked on `start_track`
    ///
    /// # Example
    /// ```
    /// use iosched_core_rs::{Direction, SimulationContext};
    ///
    /// let ctx = SimulationContext::new(25);
    /// assert_eq!(ctx.current_tick(), 0);
    /// assert_eq!(ctx.head_position(), 25);
    /// assert_eq!(ctx.direction(), Direction::Up);
    /// ```
    pub fn new(start_track: i64) -> Self {
        Self {
            time: TimeManager::new(),
            head: DiskHead::new(start_track),
        }
    }

    pub fn current_tick(&self) -> u64 {
        self.time.current_tick()
    }

    pub fn head_position(&self) -> i64 {
        self.head.position()
    }

    pub fn direction(&self) -> Direction {
        self.head.direction()
    }

    pub fn total_movement(&self) -> u64 {
        self.head.total_movement()
    }

    pub fn head(&self) -> &DiskHead {
        &self.head
    }

    pub(crate) fn head_mut(&mut self) -> &mut DiskHead {
        &mut self.head
    }

    pub(crate) fn advance_tick(&mut self) {
        self.time.advance_tick();
    }
}
