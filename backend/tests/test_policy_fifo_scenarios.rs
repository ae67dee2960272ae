//! FifoPolicy Integration Tests
//!
//! FIFO is the baseline: requests are serviced strictly in arrival order, no
//! matter how far the head has to travel.

use iosched_core_rs::{
    AdmissionMode, Orchestrator, OrchestratorConfig, PolicyKind, Request, SimulationOutcome,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn requests(records: &[(u64, i64)]) -> Vec<Request> {
    records
        .iter()
        .enumerate()
        .map(|(id, &(arrival, track))| Request::new(id, arrival, track))
        .collect()
}

fn run_fifo(records: &[(u64, i64)], admission: AdmissionMode) -> SimulationOutcome {
    let config = OrchestratorConfig {
        policy: PolicyKind::Fifo,
        admission,
        ..OrchestratorConfig::default()
    };
    Orchestrator::new(config, requests(records))
        .unwrap()
        .run()
        .unwrap()
}

/// `(id, arrival, start, end)` sorted by id
fn ledger(outcome: &SimulationOutcome) -> Vec<(usize, u64, u64, u64)> {
    outcome
        .requests_by_id()
        .iter()
        .map(|r| {
            (
                r.id(),
                r.arrival_time(),
                r.start_time().unwrap(),
                r.end_time().unwrap(),
            )
        })
        .collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_fifo_reference_scenario() {
    let outcome = run_fifo(&[(0, 50), (2, 10), (4, 90), (6, 30)], AdmissionMode::All);

    assert_eq!(outcome.events().activation_order(), vec![50, 10, 90, 30]);
    assert_eq!(
        ledger(&outcome),
        vec![(0, 0, 0, 50), (1, 2, 50, 90), (2, 4, 90, 170), (3, 6, 170, 230)]
    );
    assert_eq!(outcome.total_time(), 230);
    assert_eq!(outcome.total_movement(), 230);
    assert_eq!(outcome.final_head_position(), 30);
}

#[test]
fn test_fifo_preserves_arrival_order() {
    let outcome = run_fifo(
        &[(0, 20), (1, 5), (1, 40), (3, -10), (30, 25), (31, 60)],
        AdmissionMode::All,
    );

    let ids: Vec<usize> = outcome.completed().iter().map(Request::id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(outcome.total_time(), 190);
}

#[test]
fn test_fifo_same_arrival_ties_broken_by_id() {
    let outcome = run_fifo(&[(0, 5), (0, 2), (0, 8)], AdmissionMode::All);

    assert_eq!(outcome.service_order(), vec![5, 2, 8]);
    assert_eq!(outcome.total_time(), 14);
}

#[test]
fn test_fifo_head_already_on_track() {
    // Two requests for track 0 complete at tick 0 without the clock moving
    let outcome = run_fifo(&[(0, 0), (0, 0), (1, 5)], AdmissionMode::All);

    assert_eq!(
        ledger(&outcome),
        vec![(0, 0, 0, 0), (1, 0, 0, 0), (2, 1, 1, 6)]
    );
    assert_eq!(outcome.total_movement(), 5);
}

#[test]
fn test_fifo_idle_gap_between_arrivals() {
    let outcome = run_fifo(&[(0, 3), (10, 1)], AdmissionMode::All);

    assert_eq!(ledger(&outcome), vec![(0, 0, 0, 3), (1, 10, 10, 12)]);
    // Idle ticks advance the clock but not the head
    assert_eq!(outcome.total_time(), 12);
    assert_eq!(outcome.total_movement(), 5);
}

#[test]
fn test_fifo_one_per_tick_matches_all_for_fifo() {
    let records = [(0, 0), (0, 0), (1, 5)];
    let all = run_fifo(&records, AdmissionMode::All);
    let one = run_fifo(&records, AdmissionMode::OnePerTick);
    assert_eq!(ledger(&all), ledger(&one));
}
