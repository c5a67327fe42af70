// SPDX-License-Identifier: MIT OR Apache-2.0

//! Black-box, full-pipeline exercises of the public API: construct a
//! [`Dispatcher`], feed it descriptors through [`Dispatcher::spawn_descriptor`], drive
//! it with [`tick`] and a [`FakeAdapter`], and observe outcomes purely through
//! [`Dispatcher::process`]/[`TickOutcome`]: the same surface a real caller (the
//! `dispatcher-io`-driven binary) uses, as opposed to the scheduler's own unit tests,
//! which reach into its private step functions.

use dispatcher_core::testing::FakeAdapter;
use dispatcher_core::{tick, Dispatcher, DispatcherConfig, Placement, TickOutcome};

fn run_to_completion(disp: &mut Dispatcher, adapter: &mut FakeAdapter) -> u64 {
    let mut outcome = TickOutcome::Continue;
    while outcome == TickOutcome::Continue {
        outcome = tick(disp, adapter);
    }
    disp.clock
}

#[test]
fn real_time_job_admits_runs_and_drains_the_system() {
    let mut disp = Dispatcher::new(DispatcherConfig::default());
    let mut adapter = FakeAdapter::default();
    let job = disp.spawn_descriptor(
        vec!["sigtrap".into(), "3".into()],
        0,
        0,
        3,
        50,
        0,
        0,
        0,
        0,
    );

    tick(&mut disp, &mut adapter);
    assert_eq!(disp.process(job).placement, Placement::Active);
    assert_eq!(adapter.spawned, vec![vec!["sigtrap".to_string(), "3".to_string()]]);

    let clock = run_to_completion(&mut disp, &mut adapter);
    assert_eq!(clock, 4);
    assert_eq!(disp.memory.largest_free(), disp.config.available_memory);
}

#[test]
fn mixed_batch_serializes_on_shared_printers_then_drains() {
    // Three user jobs each need both printers the system has; only one can hold
    // both at a time, so the batch finishes one job at a time.
    let mut disp = Dispatcher::new(DispatcherConfig::default());
    let mut adapter = FakeAdapter::default();
    let jobs: Vec<_> = (0..3)
        .map(|_| disp.spawn_descriptor(vec!["sigtrap".into()], 0, 1, 2, 5, 2, 0, 0, 0))
        .collect();

    tick(&mut disp, &mut adapter);
    let active_count = jobs
        .iter()
        .filter(|&&id| disp.process(id).placement == Placement::Active)
        .count();
    assert_eq!(active_count, 1, "only one job can hold both printers at once");

    let clock = run_to_completion(&mut disp, &mut adapter);
    assert_eq!(adapter.spawned.len(), 3);
    assert!(clock >= 6, "three serialized two-tick jobs take at least six ticks");
    assert!(disp.resources.iter().all(|(_, holder)| holder.is_none()));
}

#[test]
fn late_arrival_waits_in_the_input_queue_until_its_arrival_time() {
    let mut disp = Dispatcher::new(DispatcherConfig::default());
    let mut adapter = FakeAdapter::default();
    let late = disp.spawn_descriptor(vec!["sigtrap".into()], 3, 1, 1, 10, 0, 0, 0, 0);

    tick(&mut disp, &mut adapter);
    assert_eq!(disp.process(late).placement, Placement::Pending);
    assert!(adapter.spawned.is_empty());

    tick(&mut disp, &mut adapter);
    tick(&mut disp, &mut adapter);
    assert_eq!(disp.process(late).placement, Placement::Pending);

    run_to_completion(&mut disp, &mut adapter);
    assert_eq!(adapter.spawned.len(), 1);
}

#[test]
fn unschedulable_request_is_dropped_without_blocking_the_real_time_queue() {
    let mut disp = Dispatcher::new(DispatcherConfig::default());
    let mut adapter = FakeAdapter::default();
    let doomed = disp.spawn_descriptor(vec!["sigtrap".into()], 0, 1, 5, 2000, 0, 0, 0, 0);
    let rt = disp.spawn_descriptor(vec!["sigtrap".into(), "1".into()], 0, 0, 1, 10, 0, 0, 0, 0);

    let clock = run_to_completion(&mut disp, &mut adapter);
    assert_eq!(clock, 2);
    assert_eq!(adapter.spawned.len(), 1, "only the real-time job ever spawns");
    let _ = (doomed, rt);
}

#[test]
fn os_call_failure_on_spawn_destroys_the_record_instead_of_hanging() {
    let mut disp = Dispatcher::new(DispatcherConfig::default());
    let mut adapter = FakeAdapter::default();
    adapter.fail_with = Some("forced failure".into());
    disp.spawn_descriptor(vec!["sigtrap".into()], 0, 0, 3, 10, 0, 0, 0, 0);

    let outcome = tick(&mut disp, &mut adapter);
    assert_eq!(outcome, TickOutcome::Finished);
    assert_eq!(disp.all_ids().count(), 0);
}
