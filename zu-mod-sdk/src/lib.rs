//! zu-mod-sdk
//!
//! This crate is used by **guest** mods that run inside the zu engine.
//!
//! Contract (component model, `zu:engine/zu-mod@0.1.0`):
//! - Host provides the `core` logging interface.
//! - Guest exports `init` (called once after instantiation) and `update`
//!   (called on every engine tick, returns `result<_, string>`).
//!
//! Bindings are generated here so mod crates only implement [`Guest`] and call
//! [`export!`]:
//!
//! ```ignore
//! use zu_mod_sdk::prelude::*;
//!
//! struct MyMod;
//!
//! impl Guest for MyMod {
//!     fn init() {
//!         logging::info("ready");
//!     }
//!
//!     fn update() -> UpdateResult {
//!         Ok(())
//!     }
//! }
//!
//! zu_mod_sdk::export!(MyMod);
//! ```

pub mod bindings {
    wit_bindgen::generate!({
        path: "../wit",
        world: "zu-mod",
        pub_export_macro: true,
        export_macro_name: "export",
        default_bindings_module: "zu_mod_sdk::bindings",
    });
}

pub use bindings::*;

pub mod logging;

/// Value returned from `update`. `Err` carries a message the host reports.
pub type UpdateResult = Result<(), String>;

/// Convenience prelude for mods.
pub mod prelude {
    pub use crate::Guest;
    pub use crate::UpdateResult;
    pub use crate::logging::{self, HostLogger, Level, Logger, MemoryLogger, Record};
}
