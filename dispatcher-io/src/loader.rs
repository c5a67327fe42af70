// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parses a CSV-like batch file into descriptors on a [`Dispatcher`]'s input queue.

use crate::error::{IoError, IoResult};
use dispatcher_core::{config::LOWEST_PRIORITY, Dispatcher, ProcessId};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::warn;

/// Program path given to the spawned worker (argv[0]); it is shipped as its own
/// workspace crate (`sigtrap`) rather than assumed to already be on `PATH`.
pub const WORKER_PROGRAM: &str = "./sigtrap";

/// The eight fields a batch line must parse into, in file order.
struct Fields {
    arrival_time: u64,
    priority: u32,
    remaining_cpu_time: u64,
    mbytes: u32,
    num_printers: u32,
    num_scanners: u32,
    num_modems: u32,
    num_cds: u32,
}

/// Reads `path` line by line, parsing each into a process descriptor appended to
/// `disp`'s input queue. Returns the number of records loaded.
///
/// Malformed lines are logged and skipped rather than treated as a fatal error; only
/// the inability to open the file itself is fatal (see [`IoError`]).
pub fn load(path: &Path, disp: &mut Dispatcher) -> IoResult<usize> {
    let file = File::open(path).map_err(|source| IoError::Unopenable {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut loaded = 0;
    for (lineno, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!(lineno, %err, "failed to read line, skipping");
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(&line) {
            Some(fields) => {
                admit(disp, fields);
                loaded += 1;
            }
            None => {
                warn!(lineno, line, "invalid data in input file, skipping line");
            }
        }
    }
    Ok(loaded)
}

/// Parses one line into its eight fields, returning `None` on any malformed token: the
/// whole line is rejected as a unit rather than partially accepted.
fn parse_line(line: &str) -> Option<Fields> {
    let mut parts = line.split(',').map(str::trim);
    let arrival_time = parts.next()?.parse().ok()?;
    let priority = parts.next()?.parse().ok()?;
    let remaining_cpu_time = parts.next()?.parse().ok()?;
    let mbytes = parts.next()?.parse().ok()?;
    let num_printers = parts.next()?.parse().ok()?;
    let num_scanners = parts.next()?.parse().ok()?;
    let num_modems = parts.next()?.parse().ok()?;
    let num_cds = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Fields {
        arrival_time,
        priority,
        remaining_cpu_time,
        mbytes,
        num_printers,
        num_scanners,
        num_modems,
        num_cds,
    })
}

/// Clamps priority and, for real-time jobs, memory and peripheral demand, then inserts
/// the descriptor.
fn admit(disp: &mut Dispatcher, mut fields: Fields) -> ProcessId {
    if fields.priority > LOWEST_PRIORITY {
        warn!(
            requested = fields.priority,
            clamped_to = LOWEST_PRIORITY,
            "invalid priority value, clamping to lowest priority"
        );
        fields.priority = LOWEST_PRIORITY;
    }

    if fields.priority == 0 {
        let cap = disp.config.reserved_memory;
        if fields.mbytes > cap {
            warn!(requested = fields.mbytes, clamped_to = cap, "real-time process memory clamped");
            fields.mbytes = cap;
        }
        fields.num_printers = 0;
        fields.num_scanners = 0;
        fields.num_modems = 0;
        fields.num_cds = 0;
    }

    disp.spawn_descriptor(
        vec![WORKER_PROGRAM.to_string(), fields.remaining_cpu_time.to_string()],
        fields.arrival_time,
        fields.priority,
        fields.remaining_cpu_time,
        fields.mbytes,
        fields.num_printers,
        fields.num_scanners,
        fields.num_modems,
        fields.num_cds,
    )
}
