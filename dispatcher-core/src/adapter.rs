// SPDX-License-Identifier: MIT OR Apache-2.0

//! The contract the scheduler uses to drive real OS-level child processes.
//!
//! The specific signals used to implement suspend/resume/terminate
//! are an implementation detail of whichever adapter is plugged in; the scheduler only
//! ever calls these four operations.

use crate::error::DispatchResult;
use crate::process::ChildHandle;

/// Abstracts fork/exec/suspend/resume/kill so the scheduler can be driven by a real
/// implementation (see `dispatcher-os`) or a fake one in tests.
pub trait ChildProcessAdapter {
    /// Forks and execs `argv` (program path plus up to two arguments), returning a
    /// handle to the new child.
    fn spawn(&mut self, argv: &[String]) -> DispatchResult<ChildHandle>;

    /// Suspends the child identified by `handle` and waits for acknowledgement.
    fn suspend(&mut self, handle: ChildHandle) -> DispatchResult<()>;

    /// Resumes a previously suspended child.
    fn resume(&mut self, handle: ChildHandle) -> DispatchResult<()>;

    /// Terminates the child and waits for it to exit.
    fn terminate(&mut self, handle: ChildHandle) -> DispatchResult<()>;
}
