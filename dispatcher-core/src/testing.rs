// SPDX-License-Identifier: MIT OR Apache-2.0

//! A fake [`ChildProcessAdapter`] for exercising the scheduler without spawning real OS
//! processes.

use crate::adapter::ChildProcessAdapter;
use crate::error::DispatchResult;
use crate::process::ChildHandle;
use std::collections::HashSet;

/// Records every spawn/suspend/resume/terminate call and hands out sequential fake
/// handles, without touching the real OS.
#[derive(Debug, Default)]
pub struct FakeAdapter {
    next_handle: i32,
    /// Handles currently considered "suspended", for assertions in tests.
    pub suspended: HashSet<i32>,
    /// Every argv ever passed to [`spawn`](ChildProcessAdapter::spawn).
    pub spawned: Vec<Vec<String>>,
    /// If set, every call fails with this message (used to test OS-call-failure paths).
    pub fail_with: Option<String>,
}

impl ChildProcessAdapter for FakeAdapter {
    fn spawn(&mut self, argv: &[String]) -> DispatchResult<ChildHandle> {
        if let Some(msg) = &self.fail_with {
            return Err(crate::error::DispatchError::ChildProcess {
                op: "spawn",
                pid: 0,
                detail: msg.clone(),
            });
        }
        self.next_handle += 1;
        self.spawned.push(argv.to_vec());
        Ok(ChildHandle(self.next_handle))
    }

    fn suspend(&mut self, handle: ChildHandle) -> DispatchResult<()> {
        self.suspended.insert(handle.0);
        Ok(())
    }

    fn resume(&mut self, handle: ChildHandle) -> DispatchResult<()> {
        self.suspended.remove(&handle.0);
        Ok(())
    }

    fn terminate(&mut self, handle: ChildHandle) -> DispatchResult<()> {
        self.suspended.remove(&handle.0);
        Ok(())
    }
}
