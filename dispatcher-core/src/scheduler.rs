// SPDX-License-Identifier: MIT OR Apache-2.0

//! The per-tick state machine: admission, time accounting, preemption/demotion, and
//! dispatch.

use crate::acquisition::acquire;
use crate::adapter::ChildProcessAdapter;
use crate::admission;
use crate::config::LOWEST_PRIORITY;
use crate::dispatcher::Dispatcher;
use crate::process::{decrement_time, dequeue, enqueue, lower_priority, Placement, ProcessId};
use crate::termination::terminate;
use tracing::{info, warn};

/// What the caller should do after a tick completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// More work remains; keep looping.
    Continue,
    /// No active process and every queue is empty: the run is over.
    Finished,
}

/// Runs exactly one tick of the scheduler's state machine (admission, time accounting,
/// preemption, dispatch) and advances the clock. Does not perform any wall-clock
/// pacing sleep; callers that want real-time pacing should sleep between calls to
/// this function. Tests typically do not.
pub fn tick<A: ChildProcessAdapter>(disp: &mut Dispatcher, adapter: &mut A) -> TickOutcome {
    admission::run(disp);
    time_accounting(disp, adapter);
    preemption(disp, adapter);
    dispatch(disp, adapter);
    disp.clock += 1;

    if disp.is_idle() {
        TickOutcome::Finished
    } else {
        TickOutcome::Continue
    }
}

/// Step 2: decrements the active process's remaining time; terminates it through the
/// cascade if it has now run out, clearing [`Dispatcher::active`].
fn time_accounting<A: ChildProcessAdapter>(disp: &mut Dispatcher, adapter: &mut A) {
    let Some(id) = disp.active else { return };
    let exhausted = decrement_time(disp.process_mut(id));
    if exhausted {
        terminate(disp, adapter, id);
        disp.active = None;
    }
}

/// Step 3: if the active process is not real-time and an equal-or-higher-priority
/// runnable exists, suspend and demote the active process, freeing it up for dispatch.
///
/// `min_priority` at the call site is the active process's own priority: the loop bound
/// used by [`peek_next_queued`] is exclusive on its parameter but the active process's
/// priority level is itself included in the scan range, so a same-priority candidate
/// does preempt. This is intentional, not a bug to fix.
fn preemption<A: ChildProcessAdapter>(disp: &mut Dispatcher, adapter: &mut A) {
    let Some(id) = disp.active else { return };
    if disp.process(id).is_real_time() {
        return;
    }
    let min_priority = disp.process(id).priority;
    if peek_next_queued(disp, min_priority).is_none() {
        return;
    }

    if let Some(handle) = disp.process(id).child_handle {
        if let Err(err) = adapter.suspend(handle) {
            warn!(pid = id.get(), %err, "suspend signal failed");
        }
    }
    lower_priority(disp.process_mut(id));
    let new_priority = disp.process(id).priority;
    enqueue(&mut disp.feedback_queues[(new_priority - 1) as usize], id);
    disp.set_placement(id, Placement::Suspended);
    info!(pid = id.get(), new_priority, "preempted and demoted");
    disp.active = None;
}

/// Step 4: if nothing is active, select the next runnable, start or resume it.
fn dispatch<A: ChildProcessAdapter>(disp: &mut Dispatcher, adapter: &mut A) {
    if disp.active.is_some() {
        return;
    }
    let Some(id) = select_next(disp, LOWEST_PRIORITY + 1) else {
        return;
    };

    if disp.process(id).has_run() {
        let handle = disp.process(id).child_handle.unwrap();
        if let Err(err) = adapter.resume(handle) {
            warn!(pid = id.get(), %err, "resume signal failed");
            terminate(disp, adapter, id);
            return;
        }
        info!(pid = id.get(), "resumed");
        disp.set_placement(id, Placement::Active);
        disp.active = Some(id);
        return;
    }

    // First dispatch. Real-time jobs acquire memory+resources lazily, right now;
    // failure destroys the record rather than deferring it (it is privileged and
    // races for resources rather than pre-admitting).
    if disp.process(id).is_real_time() && !acquire(disp, id) {
        warn!(pid = id.get(), "real-time process failed acquisition at dispatch");
        disp.destroy(id);
        return;
    }

    let argv = disp.process(id).argv.clone();
    match adapter.spawn(&argv) {
        Ok(handle) => {
            disp.process_mut(id).child_handle = Some(handle);
            disp.set_placement(id, Placement::Active);
            disp.active = Some(id);
            info!(pid = id.get(), "started");
        }
        Err(err) => {
            warn!(pid = id.get(), %err, "spawn failed");
            disp.destroy(id);
        }
    }
}

/// Selection rule: the real-time queue head if ready, else the first ready head among
/// `feedback_queue[0..min(min_priority, LOWEST_PRIORITY) - 1]` in index order. Removes
/// the selected id from its queue.
fn select_next(disp: &mut Dispatcher, min_priority: u32) -> Option<ProcessId> {
    if head_ready(disp, &disp.real_time_queue) {
        return dequeue(&mut disp.real_time_queue);
    }
    let bound = min_priority.min(LOWEST_PRIORITY) as usize;
    for queue in disp.feedback_queues[..bound].iter_mut() {
        if queue.front().is_some() {
            return dequeue(queue);
        }
    }
    None
}

/// Same selection rule as [`select_next`] but without dequeuing, used by the preemption
/// decision to test whether a suitable candidate exists before disturbing the active
/// process.
fn peek_next_queued(disp: &Dispatcher, min_priority: u32) -> Option<ProcessId> {
    if head_ready(disp, &disp.real_time_queue) {
        return disp.real_time_queue.front().copied();
    }
    // Exclusive bound on `min_priority`, but since priority classes are 1-indexed while
    // queue indices are 0-indexed, a priority-p candidate lives at index p-1 (already
    // inside `0..p`). This is what makes an equal-priority candidate preempt.
    let bound = min_priority.min(LOWEST_PRIORITY) as usize;
    for queue in &disp.feedback_queues[..bound] {
        if let Some(&id) = queue.front() {
            return Some(id);
        }
    }
    None
}

fn head_ready(disp: &Dispatcher, queue: &crate::process::Queue) -> bool {
    match queue.front() {
        Some(&id) => disp.process(id).arrival_time <= disp.clock,
        None => false,
    }
}
