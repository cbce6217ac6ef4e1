use crate::persistence::log_file;
use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Route `log` output to `<data_dir>/zenfocus.log`; the TUI owns the terminal.
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_logging(data_dir: &Path) -> Result<PathBuf> {
    let path = log_file(data_dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    // A second init (tests, repeated CLI calls in-process) keeps the first logger
    if let Err(e) = Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_secs()
        .try_init()
    {
        log::debug!("Logger already initialized: {}", e);
    }

    Ok(path)
}
