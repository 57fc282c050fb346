//! Host import definitions for the Wasmtime runtime.
//!
//! Mods import two things: WASI preview 2 (pulled in by the Rust/TinyGo toolchains) and the
//! engine's `zu:engine/core` logging interface, implemented here on top of `tracing`.

use tracing::{Level, debug, error, info, trace, warn};
use wasmtime::component::{HasSelf, Linker};

use super::bindings::{ZuMod, zu::engine::core as zu_core};
use crate::state::ScriptingState;

/// Define all host imports expected by mods.
///
/// Must be called before instantiating the component.
pub fn define_imports(linker: &mut Linker<ScriptingState>) -> Result<(), anyhow::Error> {
    wasmtime_wasi::p2::add_to_linker_sync(linker)?;
    ZuMod::add_to_linker::<ScriptingState, HasSelf<ScriptingState>>(linker, |state| state)?;
    Ok(())
}

impl zu_core::Host for ScriptingState {
    fn info(&mut self, text: String) {
        self.log_stats.record(Level::INFO);
        info!(target: "zu_mod", mod_name = %self.name, "{text}");
    }

    fn warn(&mut self, text: String) {
        self.log_stats.record(Level::WARN);
        warn!(target: "zu_mod", mod_name = %self.name, "{text}");
    }

    fn error(&mut self, text: String) {
        self.log_stats.record(Level::ERROR);
        error!(target: "zu_mod", mod_name = %self.name, "{text}");
    }

    fn debug(&mut self, text: String) {
        self.log_stats.record(Level::DEBUG);
        debug!(target: "zu_mod", mod_name = %self.name, "{text}");
    }

    fn trace(&mut self, text: String) {
        self.log_stats.record(Level::TRACE);
        trace!(target: "zu_mod", mod_name = %self.name, "{text}");
    }
}
