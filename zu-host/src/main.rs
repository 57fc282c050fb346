use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::error;
use zu_host::{HostConfig, config, logging};

/// Run zu engine mods headless.
#[derive(Debug, Parser)]
#[command(name = "zu-host", version, about)]
struct Cli {
    /// Directory containing `.wasm` / `.wat` mods
    #[arg(default_value = config::DEFAULT_MODS_DIR)]
    mods_dir: PathBuf,

    /// Milliseconds between ticks
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Stop after this many ticks (runs until no mods are left when omitted)
    #[arg(long)]
    ticks: Option<u64>,

    /// Fuel budget per init/update call (unmetered when omitted)
    #[arg(long)]
    fuel: Option<u64>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl From<Cli> for HostConfig {
    fn from(cli: Cli) -> Self {
        Self {
            mods_dir: cli.mods_dir,
            tick_interval: Duration::from_millis(cli.tick_ms),
            max_ticks: cli.ticks,
            fuel_per_call: cli.fuel,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    match zu_host::run(&HostConfig::from(cli)) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
