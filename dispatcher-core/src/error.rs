// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by the dispatcher's core engine.

/// Errors that can occur while admitting, allocating for, or scheduling a process.
///
/// Per the error handling design, most of these are handled locally (logged and the
/// offending process destroyed or deferred) rather than propagated out of the tick loop;
/// they are still typed so call sites can match on the precise cause.
#[derive(thiserror::Error, Debug)]
pub enum DispatchError {
    /// `MemoryArena::allocate` found no free block large enough for the request.
    #[error("no free memory block of at least {requested} MB")]
    OutOfMemory {
        /// The size that was requested, in megabytes.
        requested: u32,
    },

    /// `ResourcePool::acquire` found no free unit of the requested kind.
    #[error("no free {kind:?} unit available")]
    OutOfResource {
        /// The resource kind that was exhausted.
        kind: super::resources::ResourceKind,
    },

    /// A spawn/suspend/resume/terminate call into the child-process adapter failed.
    #[error("child process {op} failed for pid {pid}: {detail}")]
    ChildProcess {
        /// The operation that failed (`"spawn"`, `"suspend"`, `"resume"`, `"terminate"`).
        op: &'static str,
        /// The dispatcher-internal process id involved.
        pid: u64,
        /// A description of the underlying OS failure.
        detail: String,
    },
}

/// Convenience alias for core engine results.
pub type DispatchResult<T> = Result<T, DispatchError>;
