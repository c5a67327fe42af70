// SPDX-License-Identifier: MIT OR Apache-2.0

//! The termination cascade: signal the child, release its holdings, destroy the
//! descriptor.

use crate::adapter::ChildProcessAdapter;
use crate::dispatcher::Dispatcher;
use crate::process::ProcessId;
use tracing::{info, warn};

/// Terminates `id`: sends the terminate signal (if it was ever started), releases its
/// memory and resources, and removes the descriptor from the process table.
///
/// The caller is responsible for having already removed `id` from whatever queue it was
/// on (or cleared [`Dispatcher::active`]) before calling this.
pub fn terminate<A: ChildProcessAdapter>(disp: &mut Dispatcher, adapter: &mut A, id: ProcessId) {
    if let Some(handle) = disp.process(id).child_handle {
        if let Err(err) = adapter.terminate(handle) {
            warn!(pid = id.get(), %err, "terminate signal failed");
        }
    }
    info!(pid = id.get(), "terminated");
    disp.destroy(id);
}
