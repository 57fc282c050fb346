// Minimal zu engine mod.
//
// Compiled to `wasm32-wasip2` and loaded by `zu-host`.
//
// The host calls:
// - `init()` once after instantiation.
// - `update()` once per engine tick.

use zu_mod_sdk::prelude::*;

pub const INIT_MESSAGE: &str = "Engine module initialized ✅";
pub const UPDATE_MESSAGE: &str = "Engine update tick...";

pub fn on_init(logger: &impl Logger) {
    logger.info(INIT_MESSAGE);
}

pub fn on_update(logger: &impl Logger) -> UpdateResult {
    logger.debug(UPDATE_MESSAGE);
    Ok(())
}

struct HelloMod;

impl Guest for HelloMod {
    fn init() {
        on_init(&HostLogger);
    }

    fn update() -> Result<(), String> {
        on_update(&HostLogger)
    }
}

zu_mod_sdk::export!(HelloMod);
