// SPDX-License-Identifier: MIT OR Apache-2.0

//! The per-tick status table and the final summary line.

use dispatcher_core::process::Placement;
use dispatcher_core::Dispatcher;
use std::io::{self, Write};

/// Writes the tabular per-process status listing for the current tick to `out`.
///
/// A fixed-width header names the columns (id, pid, arrival, remaining, priority,
/// memory, per-resource counts, status), then one row follows per known process
/// regardless of which queue it is on. `(none)` is printed in place of the table when
/// the dispatcher holds no processes at all.
pub fn print_status(disp: &Dispatcher, out: &mut impl Write) -> io::Result<()> {
    let divider = "=".repeat(100);
    let subdivider = "-".repeat(100);

    writeln!(out, "{divider}")?;
    writeln!(out, "Time:\t\t\t{}", disp.clock)?;
    writeln!(out, "{divider}")?;
    writeln!(out, "ID\t| PID\tARRIVE\tREMAIN\tPRIOR\t| MB\tMAB ID\t| PRINT\tSCAN\tMODEM\tCD\t| STATUS")?;
    writeln!(out, "{subdivider}")?;

    let mut ids: Vec<_> = disp.all_ids().collect();
    ids.sort_by_key(|id| id.get());

    if ids.is_empty() {
        writeln!(out, "(none)")?;
    } else {
        for id in ids {
            let p = disp.process(id);
            let pid = p.child_handle.map(|h| h.0).unwrap_or(0);
            let mab_id = p
                .memory_holding
                .map(|b| disp.memory.offset_of(b).to_string())
                .unwrap_or_else(|| "(null)".to_string());
            let status = match p.placement {
                Placement::Active => "ACTIVE".to_string(),
                Placement::QueuedRealTime => "QUEUED-RT".to_string(),
                Placement::QueuedFeedback => format!("QUEUED-RRQ{}", p.priority),
                Placement::Suspended => format!("SUSPENDED-RRQ{}", p.priority),
                Placement::Pending => "UNLOADED".to_string(),
                Placement::PendingResources => "PENDING".to_string(),
            };
            writeln!(
                out,
                "{}\t| {}\t{}\t{}\t{}\t| {}\t{}\t| {}\t{}\t{}\t{}\t| {}",
                id.get(),
                pid,
                p.arrival_time,
                p.remaining_cpu_time,
                p.priority,
                p.mbytes,
                mab_id,
                p.num_printers,
                p.num_scanners,
                p.num_modems,
                p.num_cds,
                status,
            )?;
        }
    }

    writeln!(out, "{divider}")?;
    Ok(())
}

/// Writes the final summary line once the dispatcher has finished.
pub fn print_finished(clock: u64, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\nFinished processing. Total elapsed time is {clock}.")
}

/// Writes the abbreviations/terminology help block, shown once at startup.
pub fn print_help(out: &mut impl Write) -> io::Result<()> {
    let divider = "=".repeat(100);
    writeln!(out, "{divider}")?;
    writeln!(out, "ABBREVIATIONS AND TERMINOLOGY")?;
    writeln!(out, "{divider}")?;
    writeln!(out, "FIELDS")?;
    writeln!(out, "\tID\t\tUnique identifier.")?;
    writeln!(out, "\tPID\t\tProcess ID.")?;
    writeln!(out, "\tARRIVE\t\tProcess arrival time.")?;
    writeln!(out, "\tREMAIN\t\tRemaining CPU time.")?;
    writeln!(out, "\tPRIOR\t\tProcess priority.")?;
    writeln!(out, "\tMB\t\tMegabytes of memory required by process.")?;
    writeln!(out, "\tMAB ID\t\tMemory allocation block currently allocated to process.")?;
    writeln!(out, "\tPRINT\t\tNumber of printer resources required by process.")?;
    writeln!(out, "\tSCAN\t\tNumber of scanner resources required by process.")?;
    writeln!(out, "\tMODEM\t\tNumber of modem resources required by process.")?;
    writeln!(out, "\tCD\t\tNumber of CD resources required by process.")?;
    writeln!(out, "\tSTATUS\t\tCurrent status of process.")?;
    writeln!(out)?;
    writeln!(out, "STATUSES")?;
    writeln!(out, "\tACTIVE\t\tProcess is currently being executed.")?;
    writeln!(out, "\tQUEUED-RT\tProcess is queued in the real time queue.")?;
    writeln!(
        out,
        "\tQUEUED-RRQx\tProcess is queued in the feedback (round robin) queue with priority x and\n\t\t\thas not been started."
    )?;
    writeln!(
        out,
        "\tSUSPENDED-RRQx\tProcess is queued in the feedback (round robin) queue with priority x and\n\t\t\thas been suspended."
    )?;
    writeln!(
        out,
        "\tPENDING\t\tProcess is in the user job queue and has not yet been allocated memory or\n\t\t\tresources."
    )?;
    writeln!(
        out,
        "\tUNLOADED\tProcess is in the input dispatcher queue and is not ready to be executed\n\t\t\tyet."
    )?;
    writeln!(out, "{divider}")
}
