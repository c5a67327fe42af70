// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced while driving a real child process.

/// Failures from the underlying `fork`/`exec`/`kill`/`waitpid` system calls.
#[derive(thiserror::Error, Debug)]
pub enum OsError {
    /// `fork(2)` failed.
    #[error("fork failed: {0}")]
    Fork(#[source] nix::Error),

    /// Sending a signal to the child via `kill(2)` failed.
    #[error("kill({signal}) failed: {source}")]
    Signal {
        /// The signal that could not be delivered.
        signal: nix::sys::signal::Signal,
        /// The underlying OS error.
        #[source]
        source: nix::Error,
    },

    /// `waitpid(2)` failed while waiting for a suspend/terminate acknowledgement.
    #[error("waitpid failed: {0}")]
    Wait(#[source] nix::Error),

    /// `argv` was empty, or one of its entries contained an embedded NUL byte.
    #[error("invalid argv: {0}")]
    InvalidArgv(String),
}

/// Convenience alias for this crate's results.
pub type OsResult<T> = Result<T, OsError>;
