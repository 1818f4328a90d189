//! Logging initialization.
//!
//! The calculator logs through `tracing`. The binary calls [`init`] once at
//! startup to route events to the configured log file; the library itself
//! never installs a subscriber.

use crate::config::CalcConfig;
use crate::error::Result;
use std::fs::{self, OpenOptions};
use std::sync::{Mutex, Once};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "calcz=info";

static INIT_ONCE: Once = Once::new();

/// Send log events to `config.log_file()`, appending.
///
/// `RUST_LOG` overrides the default `calcz=info` filter. Calling this more
/// than once is harmless; only the first call installs a subscriber.
pub fn init(config: &CalcConfig) -> Result<()> {
    let log_file = config.log_file();
    if let Some(dir) = log_file.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)?;

    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        // A subscriber may already be installed by an embedding application
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(false)
            .with_writer(Mutex::new(file))
            .try_init();
    });

    tracing::info!(path = %log_file.display(), "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_creates_log_file_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let config = CalcConfig::new(dir.path());

        init(&config).unwrap();
        init(&config).unwrap();

        assert!(config.log_file().exists());
    }
}
