// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process descriptor and the FIFO queue primitives that operate on it.

use crate::config::LOWEST_PRIORITY;
use crate::memory::BlockId;
use crate::resources::UnitId;
use std::collections::VecDeque;

/// A monotonically increasing, never-reused process identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessId(u64);

impl ProcessId {
    /// Only used by tests in this crate that need a `ProcessId` without going through
    /// the id generator.
    #[cfg(test)]
    pub(crate) fn for_test(n: u64) -> Self {
        Self(n)
    }

    /// The numeric value, exposed for the status display.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Hands out unique, never-reused [`ProcessId`]s.
#[derive(Debug, Default)]
pub struct ProcessIdGenerator {
    next: u64,
}

impl ProcessIdGenerator {
    /// Creates a generator starting at id 1 (0 is reserved as "no id").
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Returns the next unused id.
    pub fn next(&mut self) -> ProcessId {
        let id = ProcessId(self.next);
        self.next += 1;
        id
    }
}

/// An opaque handle identifying a spawned worker, assigned on first dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChildHandle(pub i32);

/// Which queue (if any) a process currently sits on, used only by the status display
/// since ownership of the descriptor itself always follows the queue containing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Waiting on the input holding area; its arrival time has not yet passed.
    Pending,
    /// Waiting on the user-job queue for memory+resource acquisition to succeed.
    PendingResources,
    /// Waiting on the real-time queue.
    QueuedRealTime,
    /// Waiting on `feedback_queue[priority - 1]`, ready to run.
    QueuedFeedback,
    /// Currently the active (running) process.
    Active,
    /// Suspended by the scheduler after preemption; still resident on a feedback queue.
    Suspended,
}

/// The central entity: a process descriptor with its lifecycle state.
#[derive(Debug)]
pub struct ProcessRecord {
    /// Unique, never-reused identifier.
    pub id: ProcessId,
    /// Set once the process has been forked/exec'd for the first time.
    pub child_handle: Option<ChildHandle>,
    /// Program path plus up to two arguments.
    pub argv: Vec<String>,
    /// Simulated clock tick at which this process becomes eligible for admission.
    pub arrival_time: u64,
    /// CPU time quanta remaining before termination.
    pub remaining_cpu_time: i64,
    /// Priority class: 0 is real-time, 1..=LOWEST_PRIORITY are user classes.
    pub priority: u32,
    /// Declared memory requirement, in megabytes.
    pub mbytes: u32,
    /// Declared printer requirement.
    pub num_printers: u32,
    /// Declared scanner requirement.
    pub num_scanners: u32,
    /// Declared modem requirement.
    pub num_modems: u32,
    /// Declared CD-drive requirement.
    pub num_cds: u32,
    /// The memory block currently owned by this process, if any.
    pub memory_holding: Option<BlockId>,
    /// The resource units currently owned by this process.
    pub resource_holding: Vec<UnitId>,
    /// Where the process currently sits, for the status display only.
    pub placement: Placement,
}

impl ProcessRecord {
    /// Creates a freshly-parsed descriptor: no child yet, no memory, not yet placed.
    pub fn new(
        id: ProcessId,
        argv: Vec<String>,
        arrival_time: u64,
        priority: u32,
        remaining_cpu_time: u64,
        mbytes: u32,
        num_printers: u32,
        num_scanners: u32,
        num_modems: u32,
        num_cds: u32,
    ) -> Self {
        Self {
            id,
            child_handle: None,
            argv,
            arrival_time,
            remaining_cpu_time: remaining_cpu_time as i64,
            priority,
            mbytes,
            num_printers,
            num_scanners,
            num_modems,
            num_cds,
            memory_holding: None,
            resource_holding: Vec::new(),
            placement: Placement::Pending,
        }
    }

    /// `true` for the real-time priority class.
    pub fn is_real_time(&self) -> bool {
        self.priority == 0
    }

    /// `true` once this process has been started at least once.
    pub fn has_run(&self) -> bool {
        self.child_handle.is_some()
    }
}

/// A FIFO of process ids. O(n) traversal for Phase B's walk-and-retry is acceptable at
/// the job counts this dispatcher is meant to handle.
pub type Queue = VecDeque<ProcessId>;

/// Appends `pid` to the tail of `queue`.
pub fn enqueue(queue: &mut Queue, pid: ProcessId) {
    queue.push_back(pid);
}

/// Removes and returns the head of `queue`, if any.
pub fn dequeue(queue: &mut Queue) -> Option<ProcessId> {
    queue.pop_front()
}

/// Subtracts one tick from `record`'s remaining CPU time. Returns `true` if the process
/// has now exhausted its budget (remaining time reached zero or below) and should be
/// terminated by the caller; the record itself is left untouched either way. Time
/// accounting does not itself perform the termination cascade.
pub fn decrement_time(record: &mut ProcessRecord) -> bool {
    record.remaining_cpu_time -= 1;
    record.remaining_cpu_time <= 0
}

/// Clamps `priority + 1` to [`LOWEST_PRIORITY`]. A no-op for real-time records, which
/// must never be demoted, and a no-op once a record is already at the lowest class.
pub fn lower_priority(record: &mut ProcessRecord) {
    if record.is_real_time() {
        return;
    }
    record.priority = (record.priority + 1).min(LOWEST_PRIORITY);
}
