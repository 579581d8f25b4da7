//! The schedule validator.

use std::collections::{BTreeSet, HashMap};

use qs_core::{ArrivalStep, AssignmentRecord, CustomerId, EPSILON, Instance, approx_eq};

use crate::{Mismatch, Overlap, Violation};

/// Check `schedule` against `instance`.
///
/// Pure and deterministic: the same inputs always give the same answer.
/// Returns the first failed check (see the crate docs for the order) with
/// every offending row of that check.
pub fn validate(instance: &Instance, schedule: &[AssignmentRecord]) -> Result<(), Violation> {
    // ① start >= arrival
    let early: Vec<_> = schedule.iter().filter(|r| r.start < r.arrival).copied().collect();
    if !early.is_empty() {
        return Err(Violation::StartBeforeArrival(early));
    }

    // ② each client at most once
    let mut seen: HashMap<CustomerId, usize> = HashMap::with_capacity(schedule.len());
    for r in schedule {
        *seen.entry(r.client).or_default() += 1;
    }
    let repeated: Vec<_> = schedule.iter().filter(|r| seen[&r.client] > 1).copied().collect();
    if !repeated.is_empty() {
        return Err(Violation::DuplicateClient(repeated));
    }

    // ③ end == start + real_proc_time
    let incoherent: Vec<_> = schedule
        .iter()
        .filter(|r| !approx_eq(r.start + r.real_proc_time, r.end))
        .copied()
        .collect();
    if !incoherent.is_empty() {
        return Err(Violation::TimingMismatch(incoherent));
    }

    // ④ known ids
    let customers: HashMap<CustomerId, &ArrivalStep> =
        instance.timeline.iter().map(|s| (s.client, s)).collect();

    let unknown: BTreeSet<_> = schedule
        .iter()
        .map(|r| r.client)
        .filter(|c| !customers.contains_key(c))
        .collect();
    if !unknown.is_empty() {
        return Err(Violation::UnknownClient(unknown.into_iter().collect()));
    }

    let servers = instance.server_count();
    let unknown: BTreeSet<_> = schedule
        .iter()
        .map(|r| r.server)
        .filter(|s| s.index() >= servers)
        .collect();
    if !unknown.is_empty() {
        return Err(Violation::UnknownServer(unknown.into_iter().collect()));
    }

    // ⑤ recorded arrival
    let wrong_arrival: Vec<_> = schedule
        .iter()
        .filter_map(|r| {
            let expected = customers[&r.client].arrival_time;
            (!approx_eq(r.arrival, expected)).then_some(Mismatch { record: *r, expected })
        })
        .collect();
    if !wrong_arrival.is_empty() {
        return Err(Violation::ArrivalMismatch(wrong_arrival));
    }

    // ⑥ recorded duration
    let wrong_duration: Vec<_> = schedule
        .iter()
        .filter_map(|r| {
            let expected = customers[&r.client]
                .real_service_times
                .get(r.server.index())
                .copied()
                .unwrap_or(f64::NAN);
            (!approx_eq(r.real_proc_time, expected)).then_some(Mismatch { record: *r, expected })
        })
        .collect();
    if !wrong_duration.is_empty() {
        return Err(Violation::DurationMismatch(wrong_duration));
    }

    // ⑦ no double-booking
    let mut sorted = schedule.to_vec();
    sorted.sort_by(|a, b| a.server.cmp(&b.server).then(a.start.total_cmp(&b.start)));
    let overlaps: Vec<_> = sorted
        .windows(2)
        .filter(|w| w[0].server == w[1].server && w[1].start < w[0].end - EPSILON)
        .map(|w| Overlap { record: w[1], previous_end: w[0].end })
        .collect();
    if !overlaps.is_empty() {
        return Err(Violation::ServerOverlap(overlaps));
    }

    Ok(())
}
