// SPDX-License-Identifier: MIT OR Apache-2.0

//! All-or-nothing memory + resource acquisition, with rollback on partial failure.

use crate::dispatcher::Dispatcher;
use crate::process::ProcessId;
use crate::resources::ResourceKind;

/// Attempts to bind memory and every declared resource to `id`, atomically.
///
/// On success the process holds its memory block and resource units (even before it is
/// dispatched, for user jobs admitted into a feedback queue). On any failure, every
/// partial holding acquired during this attempt is released and `false` is returned;
/// the caller decides what to do next (defer and retry, or destroy for real-time jobs).
pub fn acquire(disp: &mut Dispatcher, id: ProcessId) -> bool {
    // Defensive: release any holdings the process already has before trying again.
    release_holdings(disp, id);

    let mbytes = disp.process(id).mbytes;
    if mbytes > 0 {
        match disp.memory.allocate(mbytes) {
            Ok(block) => disp.process_mut(id).memory_holding = Some(block),
            Err(_) => return false,
        }
    }

    let is_real_time = disp.process(id).is_real_time();
    if !is_real_time && disp.memory.largest_free() < disp.config.reserved_memory {
        // The reservation rule is a soft admission control: it only requires that one
        // contiguous RESERVED_MEMORY-sized block remain somewhere, not a partition.
        release_holdings(disp, id);
        return false;
    }

    let wants = {
        let p = disp.process(id);
        [
            (ResourceKind::Printer, p.num_printers),
            (ResourceKind::Scanner, p.num_scanners),
            (ResourceKind::Modem, p.num_modems),
            (ResourceKind::Cd, p.num_cds),
        ]
    };
    for (kind, count) in wants {
        for _ in 0..count {
            match disp.resources.acquire(kind, id) {
                Ok(unit) => disp.process_mut(id).resource_holding.push(unit),
                Err(_) => {
                    release_holdings(disp, id);
                    return false;
                }
            }
        }
    }

    true
}

/// Releases whatever memory and resources `id` currently holds, without destroying the
/// descriptor itself.
fn release_holdings(disp: &mut Dispatcher, id: ProcessId) {
    if let Some(block) = disp.process_mut(id).memory_holding.take() {
        disp.memory.release(block);
    }
    disp.process_mut(id).resource_holding.clear();
    disp.resources.release_all(id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DispatcherConfig;

    fn spawn(disp: &mut Dispatcher, priority: u32, mbytes: u32) -> ProcessId {
        disp.spawn_descriptor(vec!["sigtrap".into()], 0, priority, 5, mbytes, 0, 0, 0, 0)
    }

    mod reservation_guard {
        use super::*;

        #[test]
        fn acquire_succeeds_with_sufficient_capacity() {
            let mut disp = Dispatcher::new(DispatcherConfig::default());
            let p = spawn(&mut disp, 1, 100);
            assert!(acquire(&mut disp, p));
            assert!(disp.process(p).memory_holding.is_some());
        }

        #[test]
        fn acquire_rolls_back_memory_on_reservation_violation() {
            // After allocating 1000 MB out of 1024, only 24 MB remain free: below the 64 MB
            // reservation, so a non-real-time job must be rejected and rolled back.
            let mut disp = Dispatcher::new(DispatcherConfig::default());
            let p = spawn(&mut disp, 1, 1000);
            assert!(!acquire(&mut disp, p));
            assert!(disp.process(p).memory_holding.is_none());
            assert_eq!(disp.memory.largest_free(), 1024);
        }

        #[test]
        fn real_time_job_is_exempt_from_reservation_rule() {
            let mut disp = Dispatcher::new(DispatcherConfig::default());
            let p = spawn(&mut disp, 0, 1000);
            assert!(acquire(&mut disp, p));
        }
    }

    mod rollback {
        use super::*;

        #[test]
        fn acquire_rolls_back_memory_on_resource_exhaustion() {
            let mut disp = Dispatcher::new(DispatcherConfig::default());
            let p = disp.spawn_descriptor(vec!["sigtrap".into()], 0, 1, 5, 10, 0, 2, 0, 0); // only 1 scanner exists
            assert!(!acquire(&mut disp, p));
            assert!(disp.process(p).memory_holding.is_none());
            assert_eq!(disp.memory.largest_free(), 1024);
        }

        #[test]
        fn acquire_then_release_all_restores_pool_state() {
            let mut disp = Dispatcher::new(DispatcherConfig::default());
            let p = spawn(&mut disp, 1, 10);
            assert!(acquire(&mut disp, p));
            let before = disp.resources.check(ResourceKind::Printer).is_some();
            release_holdings(&mut disp, p);
            assert_eq!(disp.resources.check(ResourceKind::Printer).is_some(), before);
        }
    }
}
