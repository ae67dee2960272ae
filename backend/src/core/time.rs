//! Time management for the simulation
//!
//! The simulation operates in discrete ticks. The head travels exactly one
//! track per tick, so a tick is also the unit of seek cost.

use serde::{Deserialize, Serialize};

/// Manages the simulation clock in discrete ticks
///
/// # Example
/// ```
/// use iosched_core_rs::TimeManager;
///
/// let mut time = TimeManager::new();
/// assert_eq!(time.current_tick(), 0);
///
/// time.advance_tick();
/// assert_eq!(time.current_tick(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeManager {
    /// Total ticks elapsed since simulation start
    current_tick: u64,
}

impl TimeManager {
    /// Create a clock positioned at tick 0
    pub fn new() -> Self {
        Self { current_tick: 0 }
    }

    /// Advance time by one tick
    ///
    /// # Example
    /// ```
    /// use iosched_core_rs::TimeManager;
    ///
    /// let mut time = TimeManager::new();
    /// for _ in 0..5 {
    ///     time.advance_tick();
    /// }
    /// assert_eq!(time.current_tick(), 5);
    /// ```
    pub fn advance_tick(&mut self) {
        self.current_tick += 1;
    }

    /// Get the current tick (total ticks since start)
    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }
}
