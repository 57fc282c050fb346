//! Mod manager.
//!
//! Owns the shared Wasmtime `Engine` and every loaded `EngineMod`.
//!
//! Lifecycle:
//! - `load_mod` / `load_dir`: compile, instantiate, call `init` once.
//! - `update_all`: call `update` on every mod, once per engine tick.
//!
//! A mod returning `Err` from `update` is reported and stays loaded.
//! A mod that traps is unloaded; its store may be in an arbitrary state.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use tracing::{error, info, warn};
use wasmtime::Engine;

use crate::{
    config::HostConfig,
    loader,
    runtime::{self, EngineMod},
};

/// File extensions picked up by `load_dir`.
pub const MOD_EXTENSIONS: [&str; 2] = ["wasm", "wat"];

/// Outcome of one `update_all` round.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct UpdateReport {
    /// Mods that returned `Ok`.
    pub ok: usize,
    /// Mods that returned `Err`.
    pub failed: usize,
    /// Mods that trapped and were unloaded.
    pub trapped: usize,
}

impl UpdateReport {
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.trapped == 0
    }
}

pub struct ModManager {
    engine: Engine,
    fuel_per_call: Option<u64>,
    modules: Vec<EngineMod>,
}

impl ModManager {
    pub fn new(config: &HostConfig) -> Result<Self, anyhow::Error> {
        Ok(Self {
            engine: runtime::build_engine(config)?,
            fuel_per_call: config.fuel_per_call,
            modules: Vec::new(),
        })
    }

    /// Load a single mod file. The mod is named after the file stem.
    pub fn load_mod(&mut self, path: impl AsRef<Path>) -> Result<(), anyhow::Error> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .and_then(OsStr::to_str)
            .with_context(|| format!("mod path `{}` has no usable file name", path.display()))?;

        if self.get(name).is_some() {
            bail!("a mod named `{name}` is already loaded");
        }

        let bytes =
            fs::read(path).with_context(|| format!("failed to read `{}`", path.display()))?;
        let component = loader::compile_component(&self.engine, &bytes)
            .with_context(|| format!("failed to load mod `{name}`"))?;

        let module = EngineMod::new(name, &self.engine, &component, self.fuel_per_call)?;
        info!(mod_name = name, path = %path.display(), "mod loaded");
        self.modules.push(module);
        Ok(())
    }

    /// Load every mod file in `dir`, in file name order.
    ///
    /// Files that fail to load are logged and skipped. Returns how many mods were loaded.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize, anyhow::Error> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir)
            .with_context(|| format!("failed to read mods directory `{}`", dir.display()))?;

        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && is_mod_file(path))
            .collect();
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            match self.load_mod(&path) {
                Ok(()) => loaded += 1,
                Err(e) => warn!(path = %path.display(), "skipping mod: {e:#}"),
            }
        }

        Ok(loaded)
    }

    /// Run `update` on every loaded mod.
    pub fn update_all(&mut self) -> UpdateReport {
        let mut report = UpdateReport::default();

        self.modules.retain_mut(|module| match module.update() {
            Ok(Ok(())) => {
                report.ok += 1;
                true
            }
            Ok(Err(message)) => {
                report.failed += 1;
                warn!(mod_name = module.name(), "update failed: {message}");
                true
            }
            Err(trap) => {
                report.trapped += 1;
                error!(mod_name = module.name(), "mod trapped, unloading: {trap:#}");
                false
            }
        });

        report
    }

    /// Drop a mod by name. Returns whether it was loaded.
    pub fn unload(&mut self, name: &str) -> bool {
        let before = self.modules.len();
        self.modules.retain(|m| m.name() != name);
        let removed = self.modules.len() != before;
        if removed {
            info!(mod_name = name, "mod unloaded");
        }
        removed
    }

    pub fn get(&self, name: &str) -> Option<&EngineMod> {
        self.modules.iter().find(|m| m.name() == name)
    }

    pub fn mods(&self) -> &[EngineMod] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

fn is_mod_file(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| MOD_EXTENSIONS.iter().any(|m| ext.eq_ignore_ascii_case(m)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, UPDATE_ERR, UPDATE_OK, UPDATE_SPIN, UPDATE_TRAP};
    use std::path::PathBuf;

    fn manager() -> ModManager {
        ModManager::new(&HostConfig::default()).unwrap()
    }

    #[test]
    fn mod_file_filter_uses_extension() {
        assert!(is_mod_file(Path::new("mods/hello.wasm")));
        assert!(is_mod_file(Path::new("mods/hello.WAT")));
        assert!(!is_mod_file(Path::new("mods/readme.md")));
        assert!(!is_mod_file(Path::new("mods/wasm")));
    }

    #[test]
    fn empty_dir_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = manager();

        assert_eq!(manager.load_dir(dir.path()).unwrap(), 0);
        assert!(manager.is_empty());
    }

    #[test]
    fn missing_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing: PathBuf = dir.path().join("nope");

        assert!(manager().load_dir(&missing).is_err());
    }

    #[test]
    fn broken_mods_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("garbage.wasm"), b"definitely not wasm").unwrap();
        fs::write(dir.path().join("core.wat"), b"(module)").unwrap();
        fs::write(dir.path().join("empty.wat"), b"(component)").unwrap();
        fs::write(dir.path().join("notes.txt"), b"(component)").unwrap();

        let mut manager = manager();
        assert_eq!(manager.load_dir(dir.path()).unwrap(), 0);
        assert_eq!(manager.len(), 0);
    }

    #[test]
    fn load_mod_reports_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = manager()
            .load_mod(dir.path().join("ghost.wasm"))
            .unwrap_err();
        assert!(format!("{err:#}").contains("ghost.wasm"));
    }

    #[test]
    fn update_with_no_mods_is_clean() {
        let report = manager().update_all();
        assert_eq!(report, UpdateReport::default());
        assert!(report.is_clean());
    }

    #[test]
    fn unload_unknown_mod_is_a_no_op() {
        let mut manager = manager();
        assert!(!manager.unload("missing"));
        assert!(manager.get("missing").is_none());
    }

    #[test]
    fn init_logs_once_per_mod() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_mod(dir.path(), "a_ok", UPDATE_OK);
        fixtures::write_mod(dir.path(), "b_err", UPDATE_ERR);

        let mut manager = manager();
        assert_eq!(manager.load_dir(dir.path()).unwrap(), 2);

        let names: Vec<_> = manager.mods().iter().map(|m| m.name()).collect();
        assert_eq!(names, ["a_ok", "b_err"]);
        for module in manager.mods() {
            let stats = module.log_stats();
            assert_eq!(stats.info, 1, "mod {}", module.name());
            assert_eq!(stats.total(), 1, "mod {}", module.name());
        }
    }

    #[test]
    fn update_all_sorts_outcomes_and_drops_trapped_mods() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_mod(dir.path(), "a_ok", UPDATE_OK);
        fixtures::write_mod(dir.path(), "b_err", UPDATE_ERR);
        fixtures::write_mod(dir.path(), "c_trap", UPDATE_TRAP);

        let mut manager = manager();
        assert_eq!(manager.load_dir(dir.path()).unwrap(), 3);

        let first = manager.update_all();
        assert_eq!(
            first,
            UpdateReport {
                ok: 1,
                failed: 1,
                trapped: 1,
            }
        );
        assert_eq!(manager.len(), 2);
        assert!(manager.get("c_trap").is_none());

        // A mod reporting `Err` stays loaded and keeps being ticked.
        let second = manager.update_all();
        assert_eq!(
            second,
            UpdateReport {
                ok: 1,
                failed: 1,
                trapped: 0,
            }
        );
        assert!(manager.get("b_err").is_some());
    }

    #[test]
    fn duplicate_mod_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixtures::write_mod(dir.path(), "a_ok", UPDATE_OK);

        let mut manager = manager();
        manager.load_mod(&path).unwrap();
        let err = manager.load_mod(&path).unwrap_err();

        assert!(format!("{err:#}").contains("already loaded"));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn unload_removes_a_loaded_mod() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixtures::write_mod(dir.path(), "a_ok", UPDATE_OK);

        let mut manager = manager();
        manager.load_mod(&path).unwrap();
        assert!(manager.unload("a_ok"));
        assert!(manager.is_empty());
    }

    #[test]
    fn exhausted_fuel_unloads_the_mod() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixtures::write_mod(dir.path(), "spin", UPDATE_SPIN);

        let config = HostConfig {
            fuel_per_call: Some(100_000),
            ..HostConfig::default()
        };
        let mut manager = ModManager::new(&config).unwrap();
        manager.load_mod(&path).unwrap();

        let report = manager.update_all();
        assert_eq!(report.trapped, 1);
        assert!(manager.is_empty());
    }

    #[test]
    fn report_with_failures_is_not_clean() {
        let report = UpdateReport {
            ok: 2,
            failed: 1,
            trapped: 0,
        };
        assert!(!report.is_clean());
    }
}
