//! Home-based storage paths for unicom-usage.
//!
//! Everything lives under `~/.unicom-usage/`:
//! - `china10010.json` - Key/value settings (phone number, cookie, colors)
//! - `config.yaml` - Optional configuration overrides
//! - `logs/unicom-usage.log` - Tracing output
//! - `browser-profile/` - Chromium profile used by the login window

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// The name of the app directory.
const APP_DIR: &str = ".unicom-usage";

/// Overrides the app directory (used by tests and portable installs).
pub const HOME_ENV: &str = "UNICOM_USAGE_HOME";

/// Returns the app directory: `$UNICOM_USAGE_HOME` or `~/.unicom-usage/`
///
/// Creates the directory if it doesn't exist.
///
/// # Errors
///
/// Returns an error if:
/// - Home directory cannot be determined
/// - Directory creation fails
pub fn app_home_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os(HOME_ENV) {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => dirs::home_dir()
            .context("Could not determine home directory for settings storage")?
            .join(APP_DIR),
    };
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create app directory: {}", dir.display()))?;
    Ok(dir)
}

/// Returns the settings store path: `<home>/china10010.json`
pub fn settings_path() -> Result<PathBuf> {
    Ok(app_home_dir()?.join("china10010.json"))
}

/// Returns the default config path: `<home>/config.yaml`
pub fn config_path() -> Result<PathBuf> {
    Ok(app_home_dir()?.join("config.yaml"))
}

/// Returns the log file path: `<home>/logs/unicom-usage.log`
pub fn log_path() -> Result<PathBuf> {
    let logs = app_home_dir()?.join("logs");
    fs::create_dir_all(&logs)
        .with_context(|| format!("Failed to create logs directory: {}", logs.display()))?;
    Ok(logs.join("unicom-usage.log"))
}

/// Returns the Chromium profile directory: `<home>/browser-profile/`
///
/// Creates the directory if it doesn't exist.
pub fn browser_profile_dir() -> Result<PathBuf> {
    let dir = app_home_dir()?.join("browser-profile");
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create browser profile: {}", dir.display()))?;
    Ok(dir)
}

#[cfg(test)]
#[path = "tests/app_paths_tests.rs"]
mod tests;
