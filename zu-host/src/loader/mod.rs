//! Loader utilities for zu-host.
//!
//! Responsibilities:
//! - Detect whether the provided mod bytes are a binary `.wasm` or `.wat` text.
//! - If it looks like WAT, convert it to WASM bytes (via the `wat` crate).
//! - Reject core modules: mods must be components built against the `zu-mod` world.
//! - Compile a Wasmtime `Component` from the resulting bytes.
//!
//! Notes:
//! - File extensions are only used to pick candidates from the mods directory;
//!   the format itself is sniffed from the bytes.
//! - We accept leading whitespace and a UTF-8 BOM for WAT as best-effort.

use thiserror::Error;
use wasmtime::{Engine, component::Component};

/// Error returned by loader helpers.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input was empty or otherwise not recognized as WASM/WAT.
    #[error("unrecognized mod format (expected wasm or wat)")]
    UnrecognizedFormat,
    /// WAT parsing failed.
    #[error("failed to parse WAT: {0}")]
    WatParseFailed(#[from] wat::Error),
    /// The bytes are a core module, not a component.
    #[error("expected a WebAssembly component, found a core module")]
    NotAComponent,
    /// Wasmtime component compilation failed.
    #[error("failed to compile component: {0:#}")]
    CompileFailed(wasmtime::Error),
}

/// What kind of input the loader inferred from the bytes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DetectedFormat {
    Component,
    CoreModule,
    Wat,
}

/// Result of normalizing (detecting + possibly converting) the input.
#[derive(Clone, Debug)]
pub struct Detected {
    pub format: DetectedFormat,
    /// Always valid component bytes.
    pub wasm_bytes: Vec<u8>,
}

/// Load: detect -> (optional) wat->wasm -> compile.
pub fn compile_component(engine: &Engine, bytes: &[u8]) -> Result<Component, LoadError> {
    let Detected { wasm_bytes, .. } = normalize_to_wasm(bytes)?;
    Component::new(engine, &wasm_bytes).map_err(LoadError::CompileFailed)
}

/// Detect format and normalize to component bytes.
pub fn normalize_to_wasm(bytes: &[u8]) -> Result<Detected, LoadError> {
    let format = detect_format(bytes).ok_or(LoadError::UnrecognizedFormat)?;

    let wasm_bytes = match format {
        DetectedFormat::Component => bytes.to_vec(),
        DetectedFormat::CoreModule => return Err(LoadError::NotAComponent),
        DetectedFormat::Wat => {
            let parsed = wat::parse_bytes(bytes)?.into_owned();
            // `(module ...)` text parses fine but is still not a mod.
            if !is_component_binary(&parsed) {
                return Err(LoadError::NotAComponent);
            }
            parsed
        }
    };

    Ok(Detected { format, wasm_bytes })
}

/// Best-effort detection.
///
/// Rules:
/// - If the first 4 bytes are `\0asm`, it's a binary; the layer field (bytes 6..8)
///   tells a component (`01 00`) from a core module (`00 00`).
/// - Else, after stripping UTF-8 BOM / leading whitespace, if the first non-ws byte is `(`,
///   treat as WAT (`(component ...)` or `(module ...)`).
pub fn detect_format(bytes: &[u8]) -> Option<DetectedFormat> {
    if is_wasm_magic(bytes) {
        return match bytes.get(6..8) {
            Some([0x01, 0x00]) => Some(DetectedFormat::Component),
            Some([0x00, 0x00]) => Some(DetectedFormat::CoreModule),
            _ => None,
        };
    }

    let i = skip_bom_and_leading_ws(bytes);
    if i < bytes.len() && bytes[i] == b'(' {
        return Some(DetectedFormat::Wat);
    }

    None
}

fn is_component_binary(bytes: &[u8]) -> bool {
    matches!(detect_format(bytes), Some(DetectedFormat::Component))
}

fn is_wasm_magic(bytes: &[u8]) -> bool {
    bytes.len() >= 4 && bytes[0..4] == *b"\0asm"
}

fn skip_bom_and_leading_ws(bytes: &[u8]) -> usize {
    let mut i = 0;

    // UTF-8 BOM: EF BB BF
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        i = 3;
    }

    while i < bytes.len() {
        match bytes[i] {
            b' ' | b'\t' | b'\r' | b'\n' => i += 1,
            _ => break,
        }
    }

    i
}
