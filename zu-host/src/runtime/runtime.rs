//! Engine construction and the per-mod instance wrapper.
//!
//! One `EngineMod` owns one `Store`; calls into a mod never touch another mod's state.
//! `init` is called exactly once, from `EngineMod::new`, and a trap there is a load failure.

use anyhow::Context;
use tracing::debug;
use wasmtime::{
    Engine, Store,
    component::{Component, Linker},
};

use super::{bindings::ZuMod, imports};
use crate::{
    config::HostConfig,
    state::{LogStats, ScriptingState},
};

/// What a mod's `update` export returns. `Err` carries the mod's own message.
pub type UpdateResult = Result<(), String>;

/// Create a Wasmtime engine suitable for running mods.
///
/// Fuel metering is only switched on when the config sets a per-call budget.
pub fn build_engine(config: &HostConfig) -> Result<Engine, anyhow::Error> {
    let mut cfg = wasmtime::Config::new();

    cfg.wasm_component_model(true);
    cfg.wasm_multi_value(true);
    cfg.wasm_bulk_memory(true);
    cfg.wasm_reference_types(true);
    cfg.wasm_simd(true);

    if config.fuel_per_call.is_some() {
        cfg.consume_fuel(true);
    }

    Engine::new(&cfg)
}

/// A mod that has been instantiated and initialized.
pub struct EngineMod {
    bindings: ZuMod,
    store: Store<ScriptingState>,
    fuel_per_call: Option<u64>,
}

impl EngineMod {
    /// Instantiate `component` and run its `init` export.
    pub fn new(
        name: &str,
        engine: &Engine,
        component: &Component,
        fuel_per_call: Option<u64>,
    ) -> Result<Self, anyhow::Error> {
        let mut linker: Linker<ScriptingState> = Linker::new(engine);
        imports::define_imports(&mut linker)?;

        let mut store = Store::new(engine, ScriptingState::new(name));
        refuel(&mut store, fuel_per_call)?;

        let bindings = ZuMod::instantiate(&mut store, component, &linker)
            .with_context(|| format!("failed to instantiate mod `{name}`"))?;

        bindings
            .call_init(&mut store)
            .with_context(|| format!("mod `{name}` trapped in init"))?;
        debug!(mod_name = name, "mod initialized");

        Ok(Self {
            bindings,
            store,
            fuel_per_call,
        })
    }

    /// Run one tick.
    ///
    /// The outer error is a trap (or fuel exhaustion); the inner one is what the mod reported.
    pub fn update(&mut self) -> Result<UpdateResult, anyhow::Error> {
        refuel(&mut self.store, self.fuel_per_call)?;
        self.bindings.call_update(&mut self.store)
    }

    pub fn name(&self) -> &str {
        &self.store.data().name
    }

    pub fn log_stats(&self) -> LogStats {
        self.store.data().log_stats
    }
}

fn refuel(store: &mut Store<ScriptingState>, fuel: Option<u64>) -> Result<(), anyhow::Error> {
    if let Some(fuel) = fuel {
        store.set_fuel(fuel)?;
    }
    Ok(())
}
