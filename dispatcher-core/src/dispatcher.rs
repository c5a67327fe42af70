// SPDX-License-Identifier: MIT OR Apache-2.0

//! The explicit context threaded through every component operation, replacing
//! process-wide global queues and allocator state with one struct an operation takes
//! by reference.

use crate::config::{DispatcherConfig, LOWEST_PRIORITY};
use crate::memory::MemoryArena;
use crate::process::{Placement, ProcessId, ProcessIdGenerator, ProcessRecord, Queue};
use crate::resources::ResourcePool;
use std::collections::HashMap;

/// All scheduler-owned state: the allocators, the process table, and every queue.
///
/// There is exactly one of these per dispatcher run; since the dispatcher is
/// single-threaded, no locking is required anywhere in this module.
pub struct Dispatcher {
    /// Static configuration (capacity constants), loaded once at startup.
    pub config: DispatcherConfig,
    /// The memory allocator.
    pub memory: MemoryArena,
    /// The peripheral resource pool.
    pub resources: ResourcePool,
    /// Every live process descriptor, keyed by id. A process is removed from this map
    /// at the moment it is destroyed (termination, unschedulability, or OS-call failure).
    processes: HashMap<ProcessId, ProcessRecord>,
    /// Descriptors awaiting their `arrival_time`.
    pub input_queue: Queue,
    /// Ready real-time processes (priority 0).
    pub real_time_queue: Queue,
    /// User-job descriptors awaiting memory+resource acquisition.
    pub user_job_queue: Queue,
    /// `feedback_queue[priority - 1]` for each user priority class.
    pub feedback_queues: Vec<Queue>,
    /// The currently running process, if any.
    pub active: Option<ProcessId>,
    /// The simulated global clock, incremented once per tick.
    pub clock: u64,
    id_gen: ProcessIdGenerator,
}

impl Dispatcher {
    /// Builds a fresh dispatcher context from `config`, with all queues empty.
    pub fn new(config: DispatcherConfig) -> Self {
        let memory = MemoryArena::new(config.available_memory);
        let resources = ResourcePool::new(
            config.available_printers,
            config.available_scanners,
            config.available_modems,
            config.available_cds,
        );
        Self {
            config,
            memory,
            resources,
            processes: HashMap::new(),
            input_queue: Queue::new(),
            real_time_queue: Queue::new(),
            user_job_queue: Queue::new(),
            feedback_queues: (0..LOWEST_PRIORITY).map(|_| Queue::new()).collect(),
            active: None,
            clock: 0,
            id_gen: ProcessIdGenerator::new(),
        }
    }

    /// Allocates a fresh id and inserts a new process descriptor onto the input queue.
    #[allow(clippy::too_many_arguments)]
    pub fn spawn_descriptor(
        &mut self,
        argv: Vec<String>,
        arrival_time: u64,
        priority: u32,
        remaining_cpu_time: u64,
        mbytes: u32,
        num_printers: u32,
        num_scanners: u32,
        num_modems: u32,
        num_cds: u32,
    ) -> ProcessId {
        let id = self.id_gen.next();
        let record = ProcessRecord::new(
            id,
            argv,
            arrival_time,
            priority,
            remaining_cpu_time,
            mbytes,
            num_printers,
            num_scanners,
            num_modems,
            num_cds,
        );
        self.processes.insert(id, record);
        self.input_queue.push_back(id);
        id
    }

    /// Immutable lookup of a process descriptor, used by queue-walking code and the
    /// status display.
    pub fn process(&self, id: ProcessId) -> &ProcessRecord {
        self.processes
            .get(&id)
            .expect("queues never hold ids for destroyed processes")
    }

    /// Mutable lookup of a process descriptor.
    pub fn process_mut(&mut self, id: ProcessId) -> &mut ProcessRecord {
        self.processes
            .get_mut(&id)
            .expect("queues never hold ids for destroyed processes")
    }

    /// All live process ids, for the status display (which lists every known process
    /// regardless of which queue it is on).
    pub fn all_ids(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.processes.keys().copied()
    }

    /// Frees the descriptor's memory + resources and removes it from the process
    /// table. Does not touch whatever queue the id might still be on; callers must
    /// have already removed it from its queue before calling this.
    pub fn destroy(&mut self, id: ProcessId) {
        if let Some(block) = self.processes.get(&id).and_then(|p| p.memory_holding) {
            self.memory.release(block);
        }
        self.resources.release_all(id);
        self.processes.remove(&id);
    }

    /// `true` once every queue is empty and no process is active.
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
            && self.input_queue.is_empty()
            && self.real_time_queue.is_empty()
            && self.user_job_queue.is_empty()
            && self.feedback_queues.iter().all(|q| q.is_empty())
    }

    /// Sets a process's placement tag, used only by the status display.
    pub fn set_placement(&mut self, id: ProcessId, placement: Placement) {
        self.process_mut(id).placement = placement;
    }
}
