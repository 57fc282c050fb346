//! Wasmtime-backed runtime glue for zu-host.
//!
//! Responsibilities:
//! - Generate host bindings for the `zu:engine/zu-mod` world.
//! - Create a Wasmtime `Engine` with the component model enabled.
//! - Define host imports (WASI preview 2 + the `core` logging interface).
//! - Instantiate a compiled component and drive its `init`/`update` exports.

pub mod imports;
pub mod runtime;

pub use runtime::{EngineMod, UpdateResult, build_engine};

pub mod bindings {
    wasmtime::component::bindgen!({
        path: "../wit",
        world: "zu-mod",
    });
}
