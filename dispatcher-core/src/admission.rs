// SPDX-License-Identifier: MIT OR Apache-2.0

//! Promotes descriptors from the input holding area into the runnable queues, and from
//! the user-job queue into a feedback queue once memory+resources can be acquired.

use crate::acquisition::acquire;
use crate::dispatcher::Dispatcher;
use crate::process::{dequeue, enqueue, Placement, ProcessId};
use tracing::{info, warn};

/// Runs both admission phases for the current tick.
pub fn run(disp: &mut Dispatcher) {
    phase_a_input_to_runnable(disp);
    phase_b_user_job_to_feedback(disp);
}

/// Phase A: walk the input queue, moving every descriptor whose `arrival_time` has
/// passed onto either the real-time queue or the user-job queue.
///
/// Collects the ready ids first and moves them afterward rather than mutating the
/// queue being walked, avoiding the aliasing hazard a mutate-while-iterating approach
/// would hit.
fn phase_a_input_to_runnable(disp: &mut Dispatcher) {
    let clock = disp.clock;
    let ready: Vec<ProcessId> = disp
        .input_queue
        .iter()
        .copied()
        .filter(|&id| disp.process(id).arrival_time <= clock)
        .collect();
    disp.input_queue.retain(|id| !ready.contains(id));

    for id in ready {
        let priority = disp.process(id).priority;
        if priority == 0 {
            enqueue(&mut disp.real_time_queue, id);
            disp.set_placement(id, Placement::QueuedRealTime);
            info!(pid = id.get(), "admitted to real-time queue");
        } else {
            enqueue(&mut disp.user_job_queue, id);
            disp.set_placement(id, Placement::PendingResources);
            info!(pid = id.get(), "admitted to user-job queue");
        }
    }
}

/// Phase B: walk the user-job queue; unschedulable jobs are destroyed, jobs whose
/// acquisition succeeds move to their feedback queue, the rest are retried next tick.
fn phase_b_user_job_to_feedback(disp: &mut Dispatcher) {
    let candidates: Vec<ProcessId> = disp.user_job_queue.iter().copied().collect();
    let mut remaining = disp.user_job_queue.clone();
    remaining.clear();

    for id in candidates {
        if let Some(reason) = unschedulable_reason(disp, id) {
            warn!(pid = id.get(), reason, "process will not be executed");
            disp.destroy(id);
            continue;
        }

        if acquire(disp, id) {
            let priority = disp.process(id).priority;
            enqueue(&mut disp.feedback_queues[(priority - 1) as usize], id);
            disp.set_placement(id, Placement::QueuedFeedback);
            info!(pid = id.get(), priority, "admitted to feedback queue");
        } else {
            enqueue(&mut remaining, id);
        }
    }

    disp.user_job_queue = remaining;
}

/// Capacity-level feasibility check: can this job's declared demands ever be satisfied,
/// regardless of current contention? Distinct from the *current* availability check
/// performed by [`acquire`].
fn unschedulable_reason(disp: &Dispatcher, id: ProcessId) -> Option<String> {
    let p = disp.process(id);
    if p.mbytes > disp.config.available_memory.saturating_sub(disp.config.reserved_memory) {
        return Some(format!(
            "declared {} MB exceeds the {} MB schedulable envelope",
            p.mbytes,
            disp.config.available_memory - disp.config.reserved_memory
        ));
    }
    if p.num_printers > disp.config.available_printers {
        return Some(format!("declared {} printers exceeds system total", p.num_printers));
    }
    if p.num_scanners > disp.config.available_scanners {
        return Some(format!("declared {} scanners exceeds system total", p.num_scanners));
    }
    if p.num_modems > disp.config.available_modems {
        return Some(format!("declared {} modems exceeds system total", p.num_modems));
    }
    if p.num_cds > disp.config.available_cds {
        return Some(format!("declared {} CDs exceeds system total", p.num_cds));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DispatcherConfig;

    fn spawn(disp: &mut Dispatcher, arrival: u64, priority: u32, mbytes: u32) -> ProcessId {
        disp.spawn_descriptor(vec!["sigtrap".into()], arrival, priority, 5, mbytes, 0, 0, 0, 0)
    }

    mod phase_a {
        use super::*;

        #[test]
        fn future_arrival_stays_on_input_queue() {
            let mut disp = Dispatcher::new(DispatcherConfig::default());
            spawn(&mut disp, 5, 1, 10);
            run(&mut disp);
            assert_eq!(disp.input_queue.len(), 1);
            assert!(disp.user_job_queue.is_empty());
        }

        #[test]
        fn real_time_bypasses_phase_b_entirely() {
            let mut disp = Dispatcher::new(DispatcherConfig::default());
            let p = spawn(&mut disp, 0, 0, 900);
            run(&mut disp);
            assert_eq!(dequeue(&mut disp.real_time_queue), Some(p));
            // Real-time jobs acquire lazily at dispatch, not during admission.
            assert!(disp.process(p).memory_holding.is_none());
        }
    }

    mod phase_b {
        use super::*;

        #[test]
        fn user_job_admits_into_its_feedback_queue_on_success() {
            let mut disp = Dispatcher::new(DispatcherConfig::default());
            let p = spawn(&mut disp, 0, 2, 10);
            run(&mut disp);
            assert_eq!(dequeue(&mut disp.feedback_queues[1]), Some(p));
            assert!(disp.process(p).memory_holding.is_some());
        }

        #[test]
        fn unschedulable_job_is_destroyed() {
            let mut disp = Dispatcher::new(DispatcherConfig::default());
            let p = spawn(&mut disp, 0, 1, 2000);
            run(&mut disp);
            assert!(disp.user_job_queue.is_empty());
            assert!(disp.feedback_queues.iter().all(|q| q.is_empty()));
            // The descriptor was destroyed; looking it up would now panic, so we only
            // assert indirectly via queue emptiness plus memory being untouched.
            assert_eq!(disp.memory.largest_free(), 1024);
            let _ = p;
        }

        #[test]
        fn deferred_job_is_retried_next_tick() {
            let mut disp = Dispatcher::new(DispatcherConfig::default());
            let big = spawn(&mut disp, 0, 1, 1000); // leaves 24 MB free: fails reservation
            run(&mut disp);
            assert_eq!(disp.user_job_queue.len(), 1);
            assert!(disp.process(big).memory_holding.is_none());
            run(&mut disp); // retried, still fails since nothing changed
            assert_eq!(disp.user_job_queue.len(), 1);
        }
    }
}
