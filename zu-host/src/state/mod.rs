//! Per-mod host state.
//!
//! Every loaded mod gets its own Wasmtime `Store<ScriptingState>`, so nothing in here
//! is shared between mods:
//! - WASI preview 2 context + resource table (guests built for `wasm32-wasip2` import WASI).
//! - The mod's name, used to tag everything it logs.
//! - Counters of the lines the mod has logged, per level.

use tracing::Level;
use wasmtime::component::ResourceTable;
use wasmtime_wasi::{WasiCtx, WasiCtxBuilder, WasiCtxView, WasiView};

pub struct ScriptingState {
    /// Name the mod was loaded under (file stem).
    pub name: String,

    // WASI specific fields
    pub wasi_ctx: WasiCtx,
    pub resource_table: ResourceTable,

    pub log_stats: LogStats,
}

impl ScriptingState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wasi_ctx: WasiCtxBuilder::new().inherit_stdio().inherit_args().build(),
            resource_table: ResourceTable::new(),
            log_stats: LogStats::default(),
        }
    }
}

impl WasiView for ScriptingState {
    fn ctx(&mut self) -> WasiCtxView<'_> {
        WasiCtxView {
            ctx: &mut self.wasi_ctx,
            table: &mut self.resource_table,
        }
    }
}

/// How many lines a mod has sent through the `core` logging interface.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LogStats {
    pub trace: u64,
    pub debug: u64,
    pub info: u64,
    pub warn: u64,
    pub error: u64,
}

impl LogStats {
    pub fn record(&mut self, level: Level) {
        let counter = match level {
            Level::TRACE => &mut self.trace,
            Level::DEBUG => &mut self.debug,
            Level::INFO => &mut self.info,
            Level::WARN => &mut self.warn,
            // ERROR; `Level` is a struct so the match can't be exhaustive on its own.
            _ => &mut self.error,
        };
        *counter = counter.saturating_add(1);
    }

    pub fn total(&self) -> u64 {
        [self.debug, self.info, self.warn, self.error]
            .into_iter()
            .fold(self.trace, u64::saturating_add)
    }
}
