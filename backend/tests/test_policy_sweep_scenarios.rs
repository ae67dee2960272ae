//! Sweep Policy Integration Tests (LOOK, C-LOOK, F-LOOK)
//!
//! The sweep policies share the elevator rule: keep moving in the current
//! direction while anything pending lies ahead. They differ in what happens
//! at the end of a sweep (LOOK reverses, C-LOOK wraps to the lowest track)
//! and in which requests a sweep may pick up (F-LOOK freezes its batch).

use iosched_core_rs::{Orchestrator, OrchestratorConfig, PolicyKind, Request, SimulationOutcome};

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

fn run(policy: PolicyKind, records: &[(u64, i64)]) -> SimulationOutcome {
    Orchestrator::new(OrchestratorConfig::with_policy(policy), requests(records))
        .unwrap()
        .run()
        .unwrap()
}

/// `(id, start, end)` sorted by id
fn timings(outcome: &SimulationOutcome) -> Vec<(usize, u64, u64)> {
    outcome
        .requests_by_id()
        .iter()
        .map(|r| (r.id(), r.start_time().unwrap(), r.end_time().unwrap()))
        .collect()
}

/// Number of times the serviced track sequence changes direction
fn direction_changes(order: &[i64]) -> usize {
    let steps: Vec<i64> = order
        .windows(2)
        .map(|w| (w[1] - w[0]).signum())
        .filter(|s| *s != 0)
        .collect();
    steps.windows(2).filter(|w| w[0] != w[1]).count()
}

const REFERENCE: [(u64, i64); 4] = [(0, 50), (2, 10), (4, 90), (6, 30)];

// ============================================================================
// LOOK
// ============================================================================

#[test]
fn test_look_reference_scenario() {
    let outcome = run(PolicyKind::Look, &REFERENCE);

    assert_eq!(outcome.events().activation_order(), vec![50, 90, 30, 10]);
    assert_eq!(
        timings(&outcome),
        vec![(0, 0, 50), (1, 150, 170), (2, 50, 90), (3, 90, 150)]
    );
    assert_eq!(outcome.total_time(), 170);
    assert_eq!(outcome.total_movement(), 170);
}

#[test]
fn test_look_reverses_once_per_exhausted_sweep() {
    let outcome = run(
        PolicyKind::Look,
        &[(0, 20), (1, 5), (1, 40), (3, -10), (30, 25), (31, 60)],
    );

    // Up to 60 picking up late arrivals, then one sweep back down
    let order = outcome.service_order();
    assert_eq!(order, vec![20, 40, 60, 25, 5, -10]);
    assert_eq!(direction_changes(&order), 1);
    assert_eq!(outcome.total_time(), 130);
}

#[test]
fn test_look_picks_up_arrivals_ahead() {
    // 102 arrives while the head travels to 100 and is still ahead of it
    let outcome = run(PolicyKind::Look, &[(0, 100), (1, 98), (2, 3), (50, 102), (60, 1)]);
    assert_eq!(outcome.service_order(), vec![100, 102, 98, 3, 1]);
    assert_eq!(outcome.total_time(), 203);
}

#[test]
fn test_look_equal_tracks_keep_admission_order() {
    let outcome = run(PolicyKind::Look, &[(0, 5), (0, 2), (0, 8)]);
    assert_eq!(outcome.service_order(), vec![2, 5, 8]);
    assert_eq!(outcome.total_time(), 8);

    let outcome = run(PolicyKind::Look, &[(0, 5), (5, 5), (5, 5)]);
    let ids: Vec<usize> = outcome.completed().iter().map(Request::id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
    assert_eq!(outcome.total_time(), 5);
}

// ============================================================================
// C-LOOK
// ============================================================================

#[test]
fn test_clook_reference_scenario() {
    let outcome = run(PolicyKind::CLook, &REFERENCE);

    assert_eq!(outcome.events().activation_order(), vec![50, 90, 10, 30]);
    assert_eq!(
        timings(&outcome),
        vec![(0, 0, 50), (1, 90, 170), (2, 50, 90), (3, 170, 190)]
    );
    assert_eq!(outcome.total_time(), 190);
}

#[test]
fn test_clook_only_serves_upward() {
    let outcome = run(
        PolicyKind::CLook,
        &[(0, 20), (1, 5), (1, 40), (3, -10), (30, 25), (31, 60)],
    );
    let order = outcome.service_order();
    assert_eq!(order, vec![20, 40, 60, -10, 5, 25]);

    // Every downward step is a wrap to the lowest pending track
    for pair in order.windows(2).filter(|w| w[1] < w[0]) {
        assert_eq!(pair[1], -10);
    }
    assert_eq!(outcome.total_time(), 165);
}

#[test]
fn test_clook_wraps_to_lowest_track() {
    let outcome = run(PolicyKind::CLook, &[(0, 100), (1, 98), (2, 3), (50, 102), (60, 1)]);
    assert_eq!(outcome.service_order(), vec![100, 102, 1, 3, 98]);
    assert_eq!(outcome.total_time(), 300);
}

// ============================================================================
// F-LOOK
// ============================================================================

#[test]
fn test_flook_reference_scenario() {
    let outcome = run(PolicyKind::FLook, &REFERENCE);
    assert_eq!(outcome.events().activation_order(), vec![50, 90, 30, 10]);
    assert_eq!(outcome.total_time(), 170);
}

#[test]
fn test_flook_newcomer_waits_for_batch() {
    let records = [(0, 10), (1, 60), (2, 40), (15, 50)];

    // LOOK lets the late request for track 50 cut in on the way to 60
    let look = run(PolicyKind::Look, &records);
    assert_eq!(look.service_order(), vec![10, 40, 50, 60]);
    assert_eq!(look.total_time(), 60);

    // F-LOOK's batch {60, 40} was frozen at tick 10
    let flook = run(PolicyKind::FLook, &records);
    assert_eq!(flook.service_order(), vec![10, 40, 60, 50]);
    assert_eq!(flook.total_time(), 70);
}

#[test]
fn test_flook_batches_do_not_mix() {
    let outcome = run(
        PolicyKind::FLook,
        &[(0, 20), (1, 5), (1, 40), (3, -10), (30, 25), (31, 60)],
    );

    // Batch {40, 5, -10} is drained before {25, 60} even though 25 and 60
    // arrive while the head is still sweeping
    assert_eq!(outcome.service_order(), vec![20, 40, 5, -10, 25, 60]);
    assert_eq!(
        timings(&outcome),
        vec![
            (0, 0, 20),
            (1, 40, 75),
            (2, 20, 40),
            (3, 75, 90),
            (4, 90, 125),
            (5, 125, 160)
        ]
    );
}

#[test]
fn test_sweeps_agree_when_everything_arrives_at_once() {
    let records = [(0, 30), (0, 80), (0, 10), (0, 55)];
    let look = run(PolicyKind::Look, &records);
    let flook = run(PolicyKind::FLook, &records);
    let clook = run(PolicyKind::CLook, &records);

    assert_eq!(look.service_order(), vec![10, 30, 55, 80]);
    assert_eq!(timings(&look), timings(&flook));
    assert_eq!(timings(&look), timings(&clook));
}
