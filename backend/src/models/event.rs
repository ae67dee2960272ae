//! Event logging for simulation tracing and auditing.
//!
//! The orchestrator records one event per lifecycle transition of a request.
//! Events enable:
//! - Debugging (see exactly when the head picked and finished each request)
//! - Auditing (verify a policy's choices against the pending set)
//! - Replay comparison between runs
//!
//! # Event Types
//!
//! - **Arrival**: request handed to the policy's pending pool
//! - **Activation**: policy selected a request; head starts seeking
//! - **Completion**: head reached the active request's track
//!
//! # Example
//!
//! ```rust
//! use iosched_core_rs::models::event::Event;
//!
//! let event = Event::Activation {
//!     tick: 50,
//!     request_id: 2,
//!     track: 90,
//!     head_position: 50,
//!     seek_distance: 40,
//! };
//!
//! assert_eq!(event.tick(), 50);
//! assert_eq!(event.request_id(), 2);
//! ```

use serde::{Deserialize, Serialize};

/// Simulation event capturing a request state change.
///
/// Events are logged in the order they occur within a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Request entered the policy's pending pool
    Arrival {
        tick: u64,
        request_id: usize,
        track: i64,
        /// Pending requests held by the policy after admission
        pending: usize,
    },

    /// Policy made the request active
    Activation {
        tick: u64,
        request_id: usize,
        track: i64,
        head_position: i64,
        seek_distance: u64,
    },

    /// Head reached the active request's track
    Completion {
        tick: u64,
        request_id: usize,
        track: i64,
    },
}

impl Event {
    /// Get the tick number when this event occurred
    pub fn tick(&self) -> u64 {
        match self {
            Event::Arrival { tick, .. } => *tick,
            Event::Activation { tick, .. } => *tick,
            Event::Completion { tick, .. } => *tick,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::Arrival { .. } => "Arrival",
            Event::Activation { .. } => "Activation",
            Event::Completion { .. } => "Completion",
        }
    }

    pub fn request_id(&self) -> usize {
        match self {
            Event::Arrival { request_id, .. } => *request_id,
            Event::Activation { request_id, .. } => *request_id,
            Event::Completion { request_id, .. } => *request_id,
        }
    }

    pub fn track(&self) -> i64 {
        match self {
            Event::Arrival { track, .. } => *track,
            Event::Activation { track, .. } => *track,
            Event::Completion { track, .. } => *track,
        }
    }
}

/// Event log for storing and querying simulation events.
///
/// This is a simple wrapper around Vec<Event> with convenience methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events for a specific tick
    pub fn events_at_tick(&self, tick: u64) -> Vec<&Event> {
        self.events.iter().filter(|e| e.tick() == tick).collect()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events for a specific request
    pub fn events_for_request(&self, request_id: usize) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.request_id() == request_id)
            .collect()
    }

    /// Tracks in the order the policy activated them
    pub fn activation_order(&self) -> Vec<i64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Activation { track, .. } => Some(*track),
                _ => None,
            })
            .collect()
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
