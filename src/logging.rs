//! Tracing setup. Logs go to a file so they never mix with the widget on
//! stdout.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Filter directives, e.g. `UNICOM_USAGE_LOG=unicom_usage=trace`.
pub const LOG_ENV: &str = "UNICOM_USAGE_LOG";

fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "unicom_usage=debug"
        } else {
            "unicom_usage=info"
        })
    })
}

fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}

/// Installs the global subscriber. Falls back to stderr when the log file
/// cannot be opened.
pub fn init(verbose: bool) {
    let file = crate::app_paths::log_path().and_then(|path| open_log_file(&path));

    match file {
        Ok(file) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter(verbose))
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init();
        }
        Err(e) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter(verbose))
                .with_writer(std::io::stderr)
                .try_init();
            tracing::warn!("Logging to stderr: {e:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_open_log_file_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unicom-usage.log");
        std::fs::write(&path, "first\n").unwrap();

        {
            use std::io::Write;
            let mut file = open_log_file(&path).unwrap();
            writeln!(file, "second").unwrap();
        }

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_open_log_file_missing_dir_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("unicom-usage.log");
        let err = open_log_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("unicom-usage.log"));
    }

    #[test]
    #[serial]
    fn test_filter_prefers_env() {
        std::env::set_var(LOG_ENV, "unicom_usage=trace");
        let from_env = filter(false).to_string();
        std::env::remove_var(LOG_ENV);

        assert_eq!(from_env, "unicom_usage=trace");
        assert_eq!(filter(true).to_string(), "unicom_usage=debug");
        assert_eq!(filter(false).to_string(), "unicom_usage=info");
    }
}
