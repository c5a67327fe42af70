// SPDX-License-Identifier: MIT OR Apache-2.0

//! A flat, typed pool of indivisible peripheral units (printers, scanners, modems, CDs).
//!
//! Unit granularity (rather than bare counters) lets the status display show which
//! process holds which unit; the back-reference is the sole ownership link.

use crate::error::{DispatchError, DispatchResult};
use crate::process::ProcessId;

/// The kind of a peripheral resource unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A printer unit.
    Printer,
    /// A scanner unit.
    Scanner,
    /// A modem unit.
    Modem,
    /// A CD-drive unit.
    Cd,
}

/// A stable handle to a resource unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitId(usize);

struct Unit {
    kind: ResourceKind,
    holder: Option<ProcessId>,
}

/// The pool of all peripheral units known to the system, grouped by kind in creation
/// order (all printers, then scanners, then modems, then CDs).
pub struct ResourcePool {
    units: Vec<Unit>,
}

impl ResourcePool {
    /// Builds a pool with the given per-kind unit counts.
    pub fn new(printers: u32, scanners: u32, modems: u32, cds: u32) -> Self {
        let mut units = Vec::new();
        for _ in 0..printers {
            units.push(Unit {
                kind: ResourceKind::Printer,
                holder: None,
            });
        }
        for _ in 0..scanners {
            units.push(Unit {
                kind: ResourceKind::Scanner,
                holder: None,
            });
        }
        for _ in 0..modems {
            units.push(Unit {
                kind: ResourceKind::Modem,
                holder: None,
            });
        }
        for _ in 0..cds {
            units.push(Unit {
                kind: ResourceKind::Cd,
                holder: None,
            });
        }
        Self { units }
    }

    /// Total number of units of a given kind known to the system.
    pub fn total_of(&self, kind: ResourceKind) -> u32 {
        self.units.iter().filter(|u| u.kind == kind).count() as u32
    }

    /// Returns the first free unit of `kind`, left to right, without binding it.
    pub fn check(&self, kind: ResourceKind) -> Option<UnitId> {
        self.units
            .iter()
            .position(|u| u.kind == kind && u.holder.is_none())
            .map(UnitId)
    }

    /// Binds the first free unit of `kind` to `process`, or fails if none is free.
    pub fn acquire(&mut self, kind: ResourceKind, process: ProcessId) -> DispatchResult<UnitId> {
        let id = self.check(kind).ok_or(DispatchError::OutOfResource { kind })?;
        self.units[id.0].holder = Some(process);
        Ok(id)
    }

    /// Clears the back-reference of every unit currently held by `process`.
    pub fn release_all(&mut self, process: ProcessId) {
        for unit in &mut self.units {
            if unit.holder == Some(process) {
                unit.holder = None;
            }
        }
    }

    /// The process currently holding a unit, if any (used by the status display).
    pub fn holder_of(&self, id: UnitId) -> Option<ProcessId> {
        self.units[id.0].holder
    }

    /// Iterates `(kind, holder)` for every unit in creation order (used by the status
    /// display's per-resource columns).
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, Option<ProcessId>)> + '_ {
        self.units.iter().map(|u| (u.kind, u.holder))
    }
}
