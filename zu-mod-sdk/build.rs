//! Build script for `zu-mod-sdk`.
//!
//! Bindings are generated by the `wit_bindgen::generate!` macro at compile time; this
//! script only tells Cargo to rebuild when the WIT contract changes.

fn main() {
    println!("cargo:rerun-if-changed=../wit");
    println!("cargo:rerun-if-changed=../wit/engine.wit");
}
