// SPDX-License-Identifier: MIT OR Apache-2.0

//! The external collaborators whose contract is load-bearing but whose implementation
//! is trivial: batch-file parsing and status/help display.

pub mod error;
pub mod loader;
pub mod printer;

pub use error::{IoError, IoResult};
pub use loader::{load, WORKER_PROGRAM};
pub use printer::{print_finished, print_help, print_status};
