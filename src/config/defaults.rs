//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::path::PathBuf;
use std::time::Duration;

/// Default per-attempt timeout in milliseconds.
pub const TIMEOUT_MS: u64 = 30_000;

/// Default number of retries after the first attempt.
pub const RETRIES: u32 = 0;

/// Default base retry delay in milliseconds.
pub const RETRY_DELAY_MS: u64 = 1_000;

/// Directory under the platform config dir holding the config file.
pub const CONFIG_DIR: &str = "bold";

/// File name of the config file.
pub const CONFIG_FILE: &str = "bold.toml";

/// Default per-attempt timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_millis(TIMEOUT_MS)
}

/// Default base retry delay as Duration.
#[must_use]
pub const fn retry_delay() -> Duration {
    Duration::from_millis(RETRY_DELAY_MS)
}

/// Platform location of the config file (`~/.config/bold/bold.toml` on
/// Linux), if the platform has a config dir.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}
