//! Log output for the player.
//!
//! The terminal belongs to the UI, so events go to a file. `RUST_LOG` wins
//! over the configured level.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{self, LoggingSettings};

/// Where log lines are written for `settings`, if anywhere.
pub fn log_path(settings: &LoggingSettings) -> Option<PathBuf> {
    settings.file.clone().or_else(config::default_log_path)
}

/// Install the global subscriber. Returns the file in use.
///
/// Failing to open the log file leaves logging disabled; the player still runs.
pub fn init(settings: &LoggingSettings) -> Option<PathBuf> {
    let path = log_path(settings)?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).ok()?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_file_wins_over_default() {
        let settings = LoggingSettings {
            file: Some(PathBuf::from("/tmp/spindle-test.log")),
            ..LoggingSettings::default()
        };
        assert_eq!(
            log_path(&settings),
            Some(PathBuf::from("/tmp/spindle-test.log"))
        );
    }
}
