//! Application-level configuration resolved from the environment.

use std::{env, path::PathBuf, time::Duration};

use tracing::warn;

/// Default listen port when no environment override is present.
const DEFAULT_PORT: u16 = 3000;
/// Default location on disk for the JSON snapshot file.
const DEFAULT_DATA_FILE: &str = "data.json";
/// Default cadence of the unconditional autosave timer.
const DEFAULT_SAVE_INTERVAL: Duration = Duration::from_secs(30);

/// Environment variables consulted for the listen port, in order.
const PORT_ENVS: [&str; 2] = ["PORT", "BYTEFORGE_PORT"];
/// Environment variable overriding [`DEFAULT_DATA_FILE`].
const DATA_FILE_ENV: &str = "BYTEFORGE_DATA_FILE";
/// Environment variable overriding [`DEFAULT_SAVE_INTERVAL`] (seconds).
const SAVE_INTERVAL_ENV: &str = "BYTEFORGE_SAVE_INTERVAL_SECS";

/// Immutable runtime configuration shared across the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port the HTTP server binds.
    pub port: u16,
    /// Location of the JSON snapshot file.
    pub data_file: PathBuf,
    /// Interval between unconditional autosaves.
    pub save_interval: Duration,
}

impl AppConfig {
    /// Resolve the configuration from the environment, warning about
    /// unparseable overrides and falling back to defaults.
    pub fn from_env() -> Self {
        let port = PORT_ENVS
            .iter()
            .find_map(|name| env::var(name).ok())
            .and_then(|value| match value.parse::<u16>() {
                Ok(port) => Some(port),
                Err(err) => {
                    warn!(%value, error = %err, "ignoring unparseable port override");
                    None
                }
            })
            .unwrap_or(DEFAULT_PORT);

        let data_file = env::var_os(DATA_FILE_ENV)
            .map(PathBuf::from)
            .filter(|path| !path.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        let save_interval = env::var(SAVE_INTERVAL_ENV)
            .ok()
            .and_then(|value| match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                Ok(_) => {
                    warn!("ignoring zero save interval override");
                    None
                }
                Err(err) => {
                    warn!(%value, error = %err, "ignoring unparseable save interval");
                    None
                }
            })
            .unwrap_or(DEFAULT_SAVE_INTERVAL);

        Self {
            port,
            data_file,
            save_interval,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            save_interval: DEFAULT_SAVE_INTERVAL,
        }
    }
}
