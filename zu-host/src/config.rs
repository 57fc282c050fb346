//! Host configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Default directory scanned for mods.
pub const DEFAULT_MODS_DIR: &str = "mods";

/// Default tick interval (~60 ticks per second).
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HostConfig {
    /// Directory scanned for `.wasm` / `.wat` mods.
    pub mods_dir: PathBuf,
    /// Target time between two `update` rounds.
    pub tick_interval: Duration,
    /// Stop after this many ticks. `None` runs until every mod has been unloaded.
    pub max_ticks: Option<u64>,
    /// Fuel each `init`/`update` call may burn before it traps. `None` disables metering.
    pub fuel_per_call: Option<u64>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            mods_dir: PathBuf::from(DEFAULT_MODS_DIR),
            tick_interval: DEFAULT_TICK_INTERVAL,
            max_ticks: None,
            fuel_per_call: None,
        }
    }
}
