//! Orchestrator - main simulation loop
//!
//! Implements the tick loop that feeds arrivals to the policy, completes and
//! activates requests, and moves the head.
//!
//! See `engine.rs` for full implementation.

pub mod checkpoint;
pub mod engine;

// Re-export main types for convenience
pub use engine::{
    AdmissionMode, Orchestrator, OrchestratorConfig, SimulationError, SimulationOutcome, TickResult,
};

// Re-export checkpoint types
pub use checkpoint::{compute_config_hash, RequestSnapshot, StateSnapshot};
