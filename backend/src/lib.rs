//! Disk I/O Scheduler Simulator - Rust Engine
//!
//! Discrete-time simulation of a single disk head servicing track requests
//! under a pluggable scheduling policy.
//!
//! # Architecture
//!
//! - **core**: Clock, disk head and the read-only context handed to policies
//! - **models**: Domain types (Request, Event)
//! - **arrivals**: Trace parsing into requests
//! - **policy**: Scheduling policies (FIFO, SSTF, LOOK, C-LOOK, F-LOOK)
//! - **orchestrator**: Main simulation loop and run snapshots
//! - **stats**: Aggregate metrics and report rendering
//!
//! # Critical Invariants
//!
//! 1. The head moves at most one track per tick
//! 2. At most one request is active at any time
//! 3. `arrival_time <= start_time <= end_time` for every request
//! 4. No randomness: identical input always yields an identical ledger

// Module declarations
pub mod arrivals;
pub mod core;
pub mod models;
pub mod orchestrator;
pub mod policy;
pub mod stats;

// Re-exports for convenience
pub use arrivals::{load_trace, parse_trace, TraceError};
pub use core::{
    context::SimulationContext,
    head::{seek_distance, Direction, DiskHead},
    time::TimeManager,
};
pub use models::{
    event::{Event, EventLog},
    request::{Request, RequestError, RequestStatus},
};
pub use orchestrator::{
    AdmissionMode, Orchestrator, OrchestratorConfig, SimulationError, SimulationOutcome,
    StateSnapshot, TickResult,
};
pub use policy::{IoSchedulerPolicy, PolicyError, PolicyKind};
pub use stats::SimulationSummary;
