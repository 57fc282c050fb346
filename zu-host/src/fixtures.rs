//! Hand-written `zu-mod` components for tests.
//!
//! Every fixture logs one `info` line from `init`; only the body of `update` differs.
//! `update` returns `result<_, string>` through a result area at offset 16:
//! byte 0 is the discriminant, then (ptr, len) of the error string at offsets 4 and 8.

use std::fs;
use std::path::{Path, PathBuf};

/// `update` returns `Ok(())`.
pub const UPDATE_OK: &str = "
    (i32.store8 (i32.const 16) (i32.const 0))
    (i32.const 16)";

/// `update` returns `Err("boom")`.
pub const UPDATE_ERR: &str = "
    (i32.store8 (i32.const 16) (i32.const 1))
    (i32.store (i32.const 20) (i32.const 32))
    (i32.store (i32.const 24) (i32.const 4))
    (i32.const 16)";

/// `update` traps.
pub const UPDATE_TRAP: &str = "
    unreachable";

/// `update` never returns; only fuel metering can stop it.
pub const UPDATE_SPIN: &str = "
    (loop $spin (br $spin))
    (i32.const 16)";

/// WAT source of a mod whose `update` runs `update_body`.
pub fn mod_wat(update_body: &str) -> String {
    format!(
        r#"(component
  (import "zu:engine/core@0.1.0" (instance $core
    (export "info" (func (param "text" string)))
  ))

  (core module $memory_module
    (memory (export "memory") 1)
  )
  (core instance $memory_instance (instantiate $memory_module))
  (alias core export $memory_instance "memory" (core memory $memory))

  (alias export $core "info" (func $info))
  (core func $info_lowered (canon lower (func $info) (memory $memory)))

  (core module $mod
    (import "env" "memory" (memory 1))
    (import "core" "info" (func $info (param i32 i32)))
    (data (i32.const 0) "hello")
    (data (i32.const 32) "boom")
    (func (export "init")
      (call $info (i32.const 0) (i32.const 5)))
    (func (export "update") (result i32) {update_body})
  )

  (core instance $env (export "memory" (memory $memory)))
  (core instance $host (export "info" (func $info_lowered)))
  (core instance $instance (instantiate $mod
    (with "env" (instance $env))
    (with "core" (instance $host))
  ))

  (type $init_type (func))
  (type $update_type (func (result (result (error string)))))
  (func (export "init") (type $init_type)
    (canon lift (core func $instance "init")))
  (func (export "update") (type $update_type)
    (canon lift (core func $instance "update") (memory $memory)))
)
"#
    )
}

/// Write `<dir>/<name>.wat` and return its path.
pub fn write_mod(dir: &Path, name: &str, update_body: &str) -> PathBuf {
    let path = dir.join(format!("{name}.wat"));
    fs::write(&path, mod_wat(update_body)).unwrap();
    path
}
