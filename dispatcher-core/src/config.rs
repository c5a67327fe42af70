// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed system constants and their overridable configuration layer.
//!
//! The scheduling and allocation algorithms are all parameterized on a
//! [`DispatcherConfig`] rather than bare `const`s, so a `--config` file can adjust
//! the simulated system's capacity for experimentation while the compiled-in
//! [`Default`] matches the fixed baseline constants exactly.

use serde::Deserialize;

/// The lowest (worst) user-job priority class; also the number of feedback queues.
pub const LOWEST_PRIORITY: u32 = 3;

/// System-wide resource and memory configuration.
///
/// All fields default to the system's fixed baseline capacities. Loading a TOML
/// file only needs to set the fields it wants to change; the rest fall back to
/// [`Default::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Total simulated memory, in megabytes.
    pub available_memory: u32,
    /// Memory, in megabytes, that must remain findable as a single free block at all
    /// times so a future real-time arrival can always admit.
    pub reserved_memory: u32,
    /// Total printer units in the system.
    pub available_printers: u32,
    /// Total scanner units in the system.
    pub available_scanners: u32,
    /// Total modem units in the system.
    pub available_modems: u32,
    /// Total CD-drive units in the system.
    pub available_cds: u32,
    /// Wall-clock milliseconds paced at the end of every tick.
    pub tick_millis: u64,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            available_memory: 1024,
            reserved_memory: 64,
            available_printers: 2,
            available_scanners: 1,
            available_modems: 1,
            available_cds: 2,
            tick_millis: 1000,
        }
    }
}

impl DispatcherConfig {
    /// Parses a [`DispatcherConfig`] override from TOML text, falling back to
    /// [`Default::default`] for any field the document omits.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod defaults {
        use super::*;

        #[test]
        fn default_matches_spec_constants() {
            let cfg = DispatcherConfig::default();
            assert_eq!(cfg.available_memory, 1024);
            assert_eq!(cfg.reserved_memory, 64);
            assert_eq!(cfg.available_printers, 2);
            assert_eq!(cfg.available_scanners, 1);
            assert_eq!(cfg.available_modems, 1);
            assert_eq!(cfg.available_cds, 2);
            assert_eq!(LOWEST_PRIORITY, 3);
        }
    }

    mod overrides {
        use super::*;

        #[test]
        fn partial_override_keeps_remaining_defaults() {
            let cfg = DispatcherConfig::from_toml_str("available_memory = 256\n").unwrap();
            assert_eq!(cfg.available_memory, 256);
            assert_eq!(cfg.reserved_memory, 64);
            assert_eq!(cfg.available_printers, 2);
        }
    }
}
