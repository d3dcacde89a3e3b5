//! File logging.
//!
//! The terminal is owned by the grid while the app runs, so log output goes to
//! a file instead of stderr.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use color_eyre::eyre::{Result, WrapErr};
use gridfield_config::Config;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "GRIDFIELD_LOG";

/// Install the global subscriber. Without a usable log path nothing is
/// installed and events are dropped.
pub fn init(config: &Config) -> Result<()> {
    let Some(path) = config.log_path() else {
        return Ok(());
    };
    let file = open_log(&path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter(&config.log.level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();
    Ok(())
}

/// `GRIDFIELD_LOG` when set and valid, else the configured level.
fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn open_log(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .wrap_err_with(|| format!("failed to create log directory {}", dir.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))
}
