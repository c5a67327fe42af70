// SPDX-License-Identifier: MIT OR Apache-2.0

//! A [`dispatcher_core::ChildProcessAdapter`] backed by real `fork`/`execvp`/`kill`.
//!
//! This is the only place in the workspace that touches the host's actual process
//! table: every other crate drives children through the trait, so tests can swap this
//! adapter out for `dispatcher_core::testing::FakeAdapter`.

pub mod error;

use dispatcher_core::{ChildHandle, ChildProcessAdapter, DispatchError, DispatchResult};
use nix::sys::signal::{kill, Signal};
use nix::sys::wait::{waitpid, WaitPidFlag};
use nix::unistd::{execvp, fork, ForkResult, Pid};
use std::ffi::CString;
use tracing::debug;

use error::OsError;

/// Drives real OS child processes with SIGTSTP (suspend), SIGCONT (resume) and
/// SIGINT (terminate). The specific signals are an implementation detail hidden
/// behind the trait.
#[derive(Debug, Default)]
pub struct UnixChildProcessAdapter;

impl UnixChildProcessAdapter {
    /// Creates a new adapter. Stateless: every live child is tracked by the caller via
    /// the [`ChildHandle`] it returned from `spawn`.
    pub fn new() -> Self {
        Self
    }
}

impl ChildProcessAdapter for UnixChildProcessAdapter {
    fn spawn(&mut self, argv: &[String]) -> DispatchResult<ChildHandle> {
        let cstrings = to_cstrings(argv).map_err(|e| wrap("spawn", 0, e))?;

        // Safety: between fork and execvp the child only calls async-signal-safe
        // functions (execvp itself, and _exit on failure), per the constraints
        // documented on `nix::unistd::fork`.
        match unsafe { fork() }.map_err(|e| wrap("spawn", 0, OsError::Fork(e)))? {
            ForkResult::Parent { child } => {
                debug!(child = child.as_raw(), "forked");
                Ok(ChildHandle(child.as_raw()))
            }
            ForkResult::Child => {
                let _ = execvp(&cstrings[0], &cstrings);
                // execvp only returns on failure; there is no safe way to propagate
                // this to the parent, so the child exits immediately.
                std::process::exit(127);
            }
        }
    }

    fn suspend(&mut self, handle: ChildHandle) -> DispatchResult<()> {
        let pid = Pid::from_raw(handle.0);
        kill(pid, Signal::SIGTSTP).map_err(|e| {
            wrap(
                "suspend",
                handle.0,
                OsError::Signal {
                    signal: Signal::SIGTSTP,
                    source: e,
                },
            )
        })?;
        waitpid(pid, Some(WaitPidFlag::WUNTRACED))
            .map_err(|e| wrap("suspend", handle.0, OsError::Wait(e)))?;
        Ok(())
    }

    fn resume(&mut self, handle: ChildHandle) -> DispatchResult<()> {
        let pid = Pid::from_raw(handle.0);
        kill(pid, Signal::SIGCONT).map_err(|e| {
            wrap(
                "resume",
                handle.0,
                OsError::Signal {
                    signal: Signal::SIGCONT,
                    source: e,
                },
            )
        })
    }

    fn terminate(&mut self, handle: ChildHandle) -> DispatchResult<()> {
        let pid = Pid::from_raw(handle.0);
        kill(pid, Signal::SIGINT).map_err(|e| {
            wrap(
                "terminate",
                handle.0,
                OsError::Signal {
                    signal: Signal::SIGINT,
                    source: e,
                },
            )
        })?;
        // Best-effort: an unresponsive child is not forcibly reaped beyond this wait.
        let _ = waitpid(pid, Some(WaitPidFlag::WUNTRACED));
        Ok(())
    }
}

fn to_cstrings(argv: &[String]) -> Result<Vec<CString>, OsError> {
    if argv.is_empty() {
        return Err(OsError::InvalidArgv("argv must contain at least a program path".into()));
    }
    argv.iter()
        .map(|arg| CString::new(arg.as_str()).map_err(|_| OsError::InvalidArgv(arg.clone())))
        .collect()
}

fn wrap(op: &'static str, pid: i32, err: OsError) -> DispatchError {
    DispatchError::ChildProcess {
        op,
        pid: pid as u64,
        detail: err.to_string(),
    }
}
