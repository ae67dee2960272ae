//! Orchestrator Engine
//!
//! Main simulation loop tying the clock, the head and the scheduling policy
//! together.
//!
//! # Architecture
//!
//! Each call to [`Orchestrator::tick`] runs one iteration of a fixed sequence.
//! Every step depends on the effect of the previous one, so the order must not
//! change:
//!
//! ```text
//! 1. Admit arrivals whose arrival time has been reached
//! 2. Complete the active request if the head sits on its track
//! 3. Activate a new request if nothing is active and work is pending
//! 4. Stop if nothing is pending, active or still to arrive
//! 5. Aim the head at the active request; an edge iteration (head already on
//!    the target) keeps the clock where it is
//! 6. Advance the clock and move the head one track if it is aimed
//! ```
//!
//! Request lifecycle: Unarrived -> Pending -> Active -> Completed.
//!
//! # Example
//!
//! ```rust
//! use iosched_core_rs::orchestrator::{Orchestrator, OrchestratorConfig};
//! use iosched_core_rs::policy::PolicyKind;
//! use iosched_core_rs::arrivals::parse_trace;
//!
//! let requests = parse_trace("0 50\n2 10\n4 90\n6 30\n");
//! let config = OrchestratorConfig::with_policy(PolicyKind::Sstf);
//!
//! let outcome = Orchestrator::new(config, requests).unwrap().run().unwrap();
//! assert_eq!(outcome.total_time(), 170);
//! assert_eq!(outcome.total_movement(), 170);
//! ```

use crate::core::context::SimulationContext;
use crate::core::head::{seek_distance, Direction};
use crate::models::event::{Event, EventLog};
use crate::models::request::{Request, RequestError};
use crate::policy::{IoSchedulerPolicy, PolicyKind};
use crate::stats::SimulationSummary;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

// ============================================================================
// Configuration Types
// ============================================================================

/// How many arrivals are admitted per loop iteration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdmissionMode {
    /// Every request whose arrival time has been reached
    #[default]
    All,

    /// At most one request per iteration, in input order. A request sharing
    /// its arrival time with an earlier one is admitted on a later iteration.
    OnePerTick,
}

/// Complete orchestrator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Scheduling policy, fixed for the whole run
    pub policy: PolicyKind,

    /// Arrival admission behaviour
    pub admission: AdmissionMode,

    /// Track the head starts on
    pub start_track: i64,

    /// Record an [`Event`] for every arrival, activation and completion
    pub record_events: bool,
}

impl OrchestratorConfig {
    /// Default configuration with the given policy
    pub fn with_policy(policy: PolicyKind) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::default(),
            admission: AdmissionMode::default(),
            start_track: 0,
            record_events: true,
        }
    }
}

/// Simulation error types
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("request {id} arrives at tick {arrival_time}, before the preceding arrival at tick {previous}")]
    UnorderedArrivals {
        id: usize,
        arrival_time: u64,
        previous: u64,
    },

    #[error("request at position {position} has id {id}; ids must run 0, 1, 2, ...")]
    InvalidRequestId { position: usize, id: usize },

    #[error("request {id} already carries lifecycle timestamps")]
    StaleRequest { id: usize },

    #[error("ledger invariant violated: {0}")]
    Ledger(#[from] RequestError),

    #[error("simulation has already finished")]
    Finished,

    #[error("serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Main orchestrator owning the simulation context, the policy and the
/// requests that have not arrived yet.
///
/// # Determinism
///
/// There is no randomness anywhere in the loop: the same config and the same
/// requests always produce the same `(id, start, end)` tuples.
pub struct Orchestrator {
    config: OrchestratorConfig,

    /// Clock and head
    ctx: SimulationContext,

    /// Policy selected at construction
    policy: Box<dyn IoSchedulerPolicy>,

    /// Requests not yet handed to the policy, in input order
    unarrived: VecDeque<Request>,

    /// Total number of requests in the run
    total_requests: usize,

    event_log: EventLog,

    finished: bool,
}

/// Result of a single loop iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickResult {
    /// Clock value during the iteration
    pub tick: u64,

    /// Requests admitted this iteration
    pub num_arrivals: usize,

    /// Request completed this iteration
    pub completed: Option<usize>,

    /// Request activated this iteration
    pub activated: Option<usize>,

    /// Whether the clock advanced (false on edge iterations and at the end)
    pub clock_advanced: bool,

    /// Whether the head moved one track
    pub head_moved: bool,

    /// Whether this iteration ended the run
    pub finished: bool,
}

impl Orchestrator {
    /// Create new orchestrator from configuration and the input requests
    ///
    /// # Errors
    ///
    /// * `InvalidRequestId` - ids are not `0, 1, 2, ...` in input order
    /// * `UnorderedArrivals` - arrival times decrease somewhere in the input
    /// * `StaleRequest` - a request already has a start or end stamp
    pub fn new(config: OrchestratorConfig, requests: Vec<Request>) -> Result<Self, SimulationError> {
        Self::validate_requests(&requests)?;

        log::debug!(
            "starting {} simulation: {} request(s), head at track {}",
            config.policy,
            requests.len(),
            config.start_track
        );

        Ok(Self {
            ctx: SimulationContext::new(config.start_track),
            policy: config.policy.build(),
            total_requests: requests.len(),
            unarrived: requests.into(),
            event_log: EventLog::new(),
            finished: false,
            config,
        })
    }

    fn validate_requests(requests: &[Request]) -> Result<(), SimulationError> {
        let mut previous: Option<u64> = None;
        for (position, request) in requests.iter().enumerate() {
            if request.id() != position {
                return Err(SimulationError::InvalidRequestId {
                    position,
                    id: request.id(),
                });
            }
            if request.start_time().is_some() || request.end_time().is_some() {
                return Err(SimulationError::StaleRequest { id: request.id() });
            }
            if let Some(previous) = previous {
                if request.arrival_time() < previous {
                    return Err(SimulationError::UnorderedArrivals {
                        id: request.id(),
                        arrival_time: request.arrival_time(),
                        previous,
                    });
                }
            }
            previous = Some(request.arrival_time());
        }
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn context(&self) -> &SimulationContext {
        &self.ctx
    }

    pub fn current_tick(&self) -> u64 {
        self.ctx.current_tick()
    }

    pub fn head_position(&self) -> i64 {
        self.ctx.head_position()
    }

    pub fn policy(&self) -> &dyn IoSchedulerPolicy {
        self.policy.as_ref()
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Requests still waiting for their arrival tick
    pub fn unarrived_len(&self) -> usize {
        self.unarrived.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn log_event(&mut self, event: Event) {
        if self.config.record_events {
            self.event_log.log(event);
        }
    }

    // ========================================================================
    // Tick Loop Implementation
    // ========================================================================

    /// Execute one loop iteration
    ///
    /// # Errors
    ///
    /// * `Finished` - the run already terminated
    /// * `Ledger` - a lifecycle stamp was rejected (internal invariant broken)
    pub fn tick(&mut self) -> Result<TickResult, SimulationError> {
        if self.finished {
            return Err(SimulationError::Finished);
        }
        let tick = self.ctx.current_tick();

        // STEP 1: ARRIVALS
        let num_arrivals = self.admit_arrivals(tick);

        // STEP 2: COMPLETION
        let mut completed = None;
        if self.policy.reached_target(self.ctx.head_position()) {
            let done = self
                .policy
                .finish_active(tick)?
                .map(|r| (r.id(), r.track()));
            if let Some((request_id, track)) = done {
                log::trace!("t={} complete request {} at track {}", tick, request_id, track);
                self.log_event(Event::Completion {
                    tick,
                    request_id,
                    track,
                });
                completed = Some(request_id);
            }
        }

        // STEP 3: ACTIVATION
        let mut activated = None;
        if !self.policy.is_active() && self.policy.has_work() {
            let head_position = self.ctx.head_position();
            let started = self
                .policy
                .activate_next(&self.ctx)?
                .map(|r| (r.id(), r.track()));
            if let Some((request_id, track)) = started {
                log::trace!(
                    "t={} activate request {} (track {}, head {})",
                    tick,
                    request_id,
                    track,
                    head_position
                );
                self.log_event(Event::Activation {
                    tick,
                    request_id,
                    track,
                    head_position,
                    seek_distance: seek_distance(head_position, track),
                });
                activated = Some(request_id);
            }
        }

        // STEP 4: TERMINATION
        if !self.policy.has_work() && self.unarrived.is_empty() {
            self.finished = true;
            log::debug!(
                "{} finished at t={} after {} track(s) of head movement",
                self.config.policy,
                tick,
                self.ctx.total_movement()
            );
            return Ok(TickResult {
                tick,
                num_arrivals,
                completed,
                activated,
                clock_advanced: false,
                head_moved: false,
                finished: true,
            });
        }

        // STEP 5: DIRECTION
        let mut clock_advanced = true;
        let mut moving = false;
        if let Some(track) = self.policy.active_track() {
            if self.ctx.head_mut().aim_at(track) == Direction::Idle {
                // Edge iteration: completion is resolved on the same tick
                clock_advanced = false;
            } else {
                moving = true;
            }
        }

        // STEP 6: ADVANCE
        if clock_advanced {
            self.ctx.advance_tick();
        }
        let head_moved = moving && self.ctx.head_mut().step();

        Ok(TickResult {
            tick,
            num_arrivals,
            completed,
            activated,
            clock_advanced,
            head_moved,
            finished: false,
        })
    }

    /// Hand requests whose arrival time has been reached to the policy
    fn admit_arrivals(&mut self, tick: u64) -> usize {
        let limit = match self.config.admission {
            AdmissionMode::All => usize::MAX,
            AdmissionMode::OnePerTick => 1,
        };
        let mut admitted = 0;
        while admitted < limit
            && self
                .unarrived
                .front()
                .is_some_and(|r| r.arrival_time() <= tick)
        {
            let Some(request) = self.unarrived.pop_front() else {
                break;
            };
            let (request_id, track) = (request.id(), request.track());
            self.policy.enqueue(request);
            log::trace!("t={} arrival of request {} for track {}", tick, request_id, track);
            let pending = self.policy.pending_len();
            self.log_event(Event::Arrival {
                tick,
                request_id,
                track,
                pending,
            });
            admitted += 1;
        }
        admitted
    }

    /// Iterate until the run terminates
    pub fn run_to_completion(&mut self) -> Result<(), SimulationError> {
        while !self.finished {
            self.tick()?;
        }
        Ok(())
    }

    /// Run to completion and return the outcome
    pub fn run(mut self) -> Result<SimulationOutcome, SimulationError> {
        self.run_to_completion()?;
        Ok(self.into_outcome())
    }

    /// Final state of the run. Callable at any point; a run that has not
    /// finished yields a partial outcome.
    pub fn into_outcome(self) -> SimulationOutcome {
        SimulationOutcome {
            total_time: self.ctx.current_tick(),
            total_movement: self.ctx.total_movement(),
            final_head_position: self.ctx.head_position(),
            completed: self.policy.completed_requests().to_vec(),
            total_requests: self.total_requests,
            events: self.event_log,
            config: self.config,
        }
    }
}

// Manual Debug implementation (policies are trait objects)
impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("policy", &self.config.policy)
            .field("current_tick", &self.ctx.current_tick())
            .field("head_position", &self.ctx.head_position())
            .field("pending", &self.policy.pending_len())
            .field("active", &self.policy.active_request().map(Request::id))
            .field("unarrived", &self.unarrived.len())
            .field("finished", &self.finished)
            .finish()
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    config: OrchestratorConfig,
    total_time: u64,
    total_movement: u64,
    final_head_position: i64,
    /// Completed requests in completion order
    completed: Vec<Request>,
    total_requests: usize,
    events: EventLog,
}

impl SimulationOutcome {
    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn policy(&self) -> PolicyKind {
        self.config.policy
    }

    /// Clock value at termination (the last completion's end time)
    pub fn total_time(&self) -> u64 {
        self.total_time
    }

    /// Single-track head moves over the whole run
    pub fn total_movement(&self) -> u64 {
        self.total_movement
    }

    pub fn final_head_position(&self) -> i64 {
        self.final_head_position
    }

    /// Completed requests in completion order
    pub fn completed(&self) -> &[Request] {
        &self.completed
    }

    pub fn total_requests(&self) -> usize {
        self.total_requests
    }

    /// Copy of the completed requests sorted by id
    pub fn requests_by_id(&self) -> Vec<Request> {
        let mut sorted = self.completed.clone();
        sorted.sort_by_key(Request::id);
        sorted
    }

    /// Tracks in completion order
    pub fn service_order(&self) -> Vec<i64> {
        self.completed.iter().map(Request::track).collect()
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Aggregate statistics, `None` when nothing completed
    pub fn summary(&self) -> Option<SimulationSummary> {
        SimulationSummary::from_completed(&self.completed, self.total_movement)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn requests(records: &[(u64, i64)]) -> Vec<Request> {
        records
            .iter()
            .enumerate()
            .map(|(id, &(arrival, track))| Request::new(id, arrival, track))
            .collect()
    }

    #[test]
    fn test_orchestrator_creation() {
        let orchestrator =
            Orchestrator::new(OrchestratorConfig::default(), requests(&[(0, 5), (3, 1)])).unwrap();

        assert_eq!(orchestrator.current_tick(), 0);
        assert_eq!(orchestrator.head_position(), 0);
        assert_eq!(orchestrator.unarrived_len(), 2);
        assert_eq!(orchestrator.policy().kind(), PolicyKind::Fifo);
        assert!(!orchestrator.is_finished());
    }

    #[test]
    fn test_validate_unordered_arrivals() {
        let result = Orchestrator::new(OrchestratorConfig::default(), requests(&[(5, 1), (2, 1)]));
        assert_eq!(
            result.unwrap_err(),
            SimulationError::UnorderedArrivals {
                id: 1,
                arrival_time: 2,
                previous: 5
            }
        );
    }

    #[test]
    fn test_validate_sequential_ids() {
        let reqs = vec![Request::new(0, 0, 1), Request::new(2, 0, 1)];
        let result = Orchestrator::new(OrchestratorConfig::default(), reqs);
        assert_eq!(
            result.unwrap_err(),
            SimulationError::InvalidRequestId { position: 1, id: 2 }
        );
    }

    #[test]
    fn test_validate_stale_request() {
        let mut req = Request::new(0, 0, 1);
        req.start(0).unwrap();
        let result = Orchestrator::new(OrchestratorConfig::default(), vec![req]);
        assert_eq!(result.unwrap_err(), SimulationError::StaleRequest { id: 0 });
    }

    #[test]
    fn test_first_tick_activates_and_moves() {
        let mut orchestrator =
            Orchestrator::new(OrchestratorConfig::default(), requests(&[(0, 3)])).unwrap();

        let result = orchestrator.tick().unwrap();
        assert_eq!(result.tick, 0);
        assert_eq!(result.num_arrivals, 1);
        assert_eq!(result.activated, Some(0));
        assert!(result.clock_advanced);
        assert!(result.head_moved);
        assert_eq!(orchestrator.head_position(), 1);
        assert_eq!(orchestrator.current_tick(), 1);
    }

    #[test]
    fn test_edge_iteration_holds_clock() {
        let mut orchestrator =
            Orchestrator::new(OrchestratorConfig::default(), requests(&[(0, 0), (0, 2)])).unwrap();

        // Request 0 is already under the head
        let first = orchestrator.tick().unwrap();
        assert_eq!(first.activated, Some(0));
        assert!(!first.clock_advanced);
        assert!(!first.head_moved);
        assert_eq!(orchestrator.current_tick(), 0);

        let second = orchestrator.tick().unwrap();
        assert_eq!(second.tick, 0);
        assert_eq!(second.completed, Some(0));
        assert_eq!(second.activated, Some(1));
        assert!(second.head_moved);
    }

    #[test]
    fn test_idle_gap_advances_clock_without_movement() {
        let mut orchestrator =
            Orchestrator::new(OrchestratorConfig::default(), requests(&[(5, 0)])).unwrap();

        for expected in 0..5 {
            let result = orchestrator.tick().unwrap();
            assert_eq!(result.tick, expected);
            assert_eq!(result.num_arrivals, 0);
            assert!(!result.head_moved);
        }
        assert_eq!(orchestrator.context().total_movement(), 0);
    }

    #[test]
    fn test_empty_run_finishes_immediately() {
        let mut orchestrator = Orchestrator::new(OrchestratorConfig::default(), Vec::new()).unwrap();
        let result = orchestrator.tick().unwrap();
        assert!(result.finished);
        assert_eq!(orchestrator.tick(), Err(SimulationError::Finished));

        let outcome = orchestrator.into_outcome();
        assert_eq!(outcome.total_time(), 0);
        assert!(outcome.summary().is_none());
    }

    #[test]
    fn test_events_can_be_disabled() {
        let config = OrchestratorConfig {
            record_events: false,
            ..OrchestratorConfig::default()
        };
        let outcome = Orchestrator::new(config, requests(&[(0, 4)]))
            .unwrap()
            .run()
            .unwrap();
        assert!(outcome.events().is_empty());
        assert_eq!(outcome.completed().len(), 1);
    }
}
