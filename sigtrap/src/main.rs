// SPDX-License-Identifier: MIT OR Apache-2.0

//! The worker binary the dispatcher forks and execs for every admitted process.
//!
//! It performs no useful work and never touches stdout in a way the dispatcher
//! depends on: it simply occupies a process slot for up to `remaining_cpu_time`
//! seconds, sleeping in one-second increments so that the default dispositions of
//! SIGTSTP (stop), SIGCONT (continue) and SIGINT (terminate) are free to interrupt
//! it at any point without a custom signal handler.

use std::env;
use std::process::ExitCode;
use std::thread::sleep;
use std::time::Duration;

fn main() -> ExitCode {
    let budget: u64 = match env::args().nth(1).and_then(|s| s.parse().ok()) {
        Some(n) => n,
        None => {
            eprintln!("usage: sigtrap <remaining_cpu_time>");
            return ExitCode::FAILURE;
        }
    };

    for _ in 0..budget {
        sleep(Duration::from_secs(1));
    }
    ExitCode::SUCCESS
}
