//! zu-host: loads zu engine mods and drives their lifecycle.
//!
//! Mods are WebAssembly components built against the `zu:engine/zu-mod@0.1.0` world
//! (see `wit/engine.wit`):
//!
//! Host-provided import:
//! - `zu:engine/core`: `info`, `warn`, `error`, `debug`, `trace` (each takes a string)
//!
//! Required mod exports:
//! - `init()`: called once after instantiation
//! - `update() -> result<_, string>`: called once per engine tick
//!
//! Guests written in Rust use `zu-mod-sdk`; any toolchain that can target the
//! component model works.

pub mod config;
pub mod loader;
pub mod logging;
pub mod manager;
pub mod runtime;
pub mod state;

#[cfg(test)]
mod fixtures;

use std::thread;
use std::time::Instant;

use tracing::{debug, info};

pub use config::HostConfig;
pub use manager::{ModManager, UpdateReport};

/// Load every mod in `config.mods_dir` and tick them until `max_ticks` is reached
/// or no mods are left. Returns the number of ticks run.
pub fn run(config: &HostConfig) -> Result<u64, anyhow::Error> {
    let mut manager = ModManager::new(config)?;
    let loaded = manager.load_dir(&config.mods_dir)?;
    info!(loaded, dir = %config.mods_dir.display(), "mods loaded");

    let mut ticks = 0;
    while !manager.is_empty() && config.max_ticks.is_none_or(|max| ticks < max) {
        let started = Instant::now();

        let report = manager.update_all();
        ticks += 1;
        if !report.is_clean() {
            debug!(
                tick = ticks,
                ok = report.ok,
                failed = report.failed,
                trapped = report.trapped,
                "tick finished with errors"
            );
        }

        if let Some(rest) = config.tick_interval.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }

    for module in manager.mods() {
        let stats = module.log_stats();
        info!(
            mod_name = module.name(),
            logged = stats.total(),
            warnings = stats.warn,
            errors = stats.error,
            "mod log summary"
        );
    }
    info!(ticks, remaining = manager.len(), "host stopped");
    Ok(ticks)
}
