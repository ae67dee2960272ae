//! Checkpoint - Serializable Run State
//!
//! Captures the final state of a run as a serde structure and fingerprints it
//! with SHA-256, so two runs can be compared without diffing ledgers by hand.
//!
//! # Critical Invariants
//!
//! - **Determinism**: Same config + same requests produces the same digest
//! - **Canonical Form**: Requests are stored sorted by id and JSON keys are
//!   sorted before hashing

use crate::models::request::Request;
use crate::orchestrator::engine::{OrchestratorConfig, SimulationError, SimulationOutcome};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// ============================================================================
// Snapshot Structures
// ============================================================================

/// Final state of a simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Configuration the run used
    pub config: OrchestratorConfig,

    /// SHA256 hash of the config
    pub config_hash: String,

    /// Clock at termination
    pub current_tick: u64,

    pub head_position: i64,

    pub total_movement: u64,

    /// Completed requests, sorted by id
    pub requests: Vec<RequestSnapshot>,
}

/// Request ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSnapshot {
    pub id: usize,
    pub arrival_time: u64,
    pub track: i64,
    pub start_time: Option<u64>,
    pub end_time: Option<u64>,
}

impl From<&Request> for RequestSnapshot {
    fn from(req: &Request) -> Self {
        RequestSnapshot {
            id: req.id(),
            arrival_time: req.arrival_time(),
            track: req.track(),
            start_time: req.start_time(),
            end_time: req.end_time(),
        }
    }
}

impl StateSnapshot {
    /// Capture the final state of a run
    pub fn capture(outcome: &SimulationOutcome) -> Result<Self, SimulationError> {
        Ok(Self {
            config: outcome.config().clone(),
            config_hash: compute_config_hash(outcome.config())?,
            current_tick: outcome.total_time(),
            head_position: outcome.final_head_position(),
            total_movement: outcome.total_movement(),
            requests: outcome
                .requests_by_id()
                .iter()
                .map(RequestSnapshot::from)
                .collect(),
        })
    }

    /// SHA256 digest over the whole snapshot
    pub fn digest(&self) -> Result<String, SimulationError> {
        compute_config_hash(self)
    }

    /// `(id, start_time, end_time)` for every request, in id order
    pub fn timings(&self) -> Vec<(usize, Option<u64>, Option<u64>)> {
        self.requests
            .iter()
            .map(|r| (r.id, r.start_time, r.end_time))
            .collect()
    }

    /// Pretty JSON rendering
    pub fn to_json(&self) -> Result<String, SimulationError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SimulationError::SerializationError(format!("Snapshot serialization failed: {}", e)))
    }
}

// ============================================================================
// Hashing
// ============================================================================

/// Compute deterministic SHA256 hash of any serializable value
///
/// Uses canonical JSON serialization with sorted keys so the hash does not
/// depend on field or map ordering.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, SimulationError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(config).map_err(|e| {
        SimulationError::SerializationError(format!("Config serialization failed: {}", e))
    })?;

    // Recursively sort all object keys for canonical representation
    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> = map
                    .into_iter()
                    .map(|(k, v)| (k, canonicalize(v)))
                    .collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value)).map_err(|e| {
        SimulationError::SerializationError(format!("Config serialization failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}
