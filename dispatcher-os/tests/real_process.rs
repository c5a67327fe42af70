// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exercises `UnixChildProcessAdapter` against real child processes. This is the only
//! place in the workspace that actually forks: everything in `dispatcher-core` drives
//! children through the `ChildProcessAdapter` trait against a fake, so these are the
//! tests that would catch a real regression in the signal plumbing itself.
//!
//! Uses `/bin/sleep` rather than the workspace's own `sigtrap` binary so this crate
//! does not need a dev-dependency on another workspace member just to exercise its own
//! adapter; any long-lived, signal-default process would do equally well.

use dispatcher_core::ChildProcessAdapter;
use dispatcher_os::UnixChildProcessAdapter;
use std::time::Duration;

fn sleeper(seconds: &str) -> Vec<String> {
    vec!["/bin/sleep".to_string(), seconds.to_string()]
}

#[test]
fn spawn_then_terminate_reaps_the_child() {
    let mut adapter = UnixChildProcessAdapter::new();
    let handle = adapter.spawn(&sleeper("5")).expect("spawn should succeed");
    adapter.terminate(handle).expect("terminate should succeed");
}

#[test]
fn spawn_suspend_resume_then_terminate_round_trips() {
    let mut adapter = UnixChildProcessAdapter::new();
    let handle = adapter.spawn(&sleeper("5")).expect("spawn should succeed");

    adapter.suspend(handle).expect("suspend should succeed");
    // Give the SIGTSTP a moment to land before resuming; waitpid(WUNTRACED) inside
    // suspend() already blocks until the stop is observed, so this is a courtesy, not
    // a requirement for correctness.
    std::thread::sleep(Duration::from_millis(50));

    adapter.resume(handle).expect("resume should succeed");
    adapter.terminate(handle).expect("terminate should succeed");
}

#[test]
fn terminating_an_already_exited_child_does_not_hang() {
    let mut adapter = UnixChildProcessAdapter::new();
    // `sleep 0` exits almost immediately.
    let handle = adapter.spawn(&sleeper("0")).expect("spawn should succeed");
    std::thread::sleep(Duration::from_millis(200));

    // The child has already exited; terminate is best-effort and must not block
    // forever waiting for an acknowledgement that will never come from a live process.
    let _ = adapter.terminate(handle);
}
