// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admission, memory/resource allocation and MLFQ scheduling engine for the host
//! dispatcher.
//!
//! This crate has no knowledge of real OS processes or file formats: it is driven by a
//! [`dispatcher::Dispatcher`] context and a [`adapter::ChildProcessAdapter`]
//! implementation supplied by the caller (see `dispatcher-os` for the real adapter, or
//! [`testing::FakeAdapter`] for tests).

pub mod acquisition;
pub mod adapter;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod memory;
pub mod process;
pub mod resources;
pub mod scheduler;
pub mod termination;

pub mod testing;

pub use adapter::ChildProcessAdapter;
pub use config::{DispatcherConfig, LOWEST_PRIORITY};
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, DispatchResult};
pub use process::{ChildHandle, Placement, ProcessId, ProcessRecord};
pub use scheduler::{tick, TickOutcome};
