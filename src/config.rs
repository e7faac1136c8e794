//! Application-level configuration loading: snapshot location and the two
//! debounce windows that shape persistence and score commits.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the application looks for the JSON
/// configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "TALLY_KEEPER_CONFIG_PATH";
/// Default location of the persisted snapshot document.
const DEFAULT_SNAPSHOT_PATH: &str = "data/game_state.json";
/// Default quiet window before a state change is persisted.
const DEFAULT_AUTOSAVE_DEBOUNCE_MS: u64 = 300;
/// Default quiet period before an accumulated score delta commits.
const DEFAULT_COMMIT_QUIET_MS: u64 = 1200;

/// Immutable runtime configuration shared across the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    snapshot_path: PathBuf,
    autosave_debounce: Duration,
    commit_quiet_period: Duration,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to
    /// built-in defaults when the file is missing or unreadable.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(path = %path.display(), "loaded configuration");
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Path of the persisted snapshot document.
    pub fn snapshot_path(&self) -> &PathBuf {
        &self.snapshot_path
    }

    /// Quiet window before a state change is persisted.
    pub fn autosave_debounce(&self) -> Duration {
        self.autosave_debounce
    }

    /// Quiet period before an accumulated score delta commits.
    pub fn commit_quiet_period(&self) -> Duration {
        self.commit_quiet_period
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            autosave_debounce: Duration::from_millis(DEFAULT_AUTOSAVE_DEBOUNCE_MS),
            commit_quiet_period: Duration::from_millis(DEFAULT_COMMIT_QUIET_MS),
        }
    }
}

/// JSON representation of the configuration file located at
/// [`DEFAULT_CONFIG_PATH`]. Every field is optional.
#[derive(Debug, Deserialize)]
struct RawConfig {
    snapshot_path: Option<PathBuf>,
    autosave_debounce_ms: Option<u64>,
    commit_quiet_ms: Option<u64>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = AppConfig::default();
        Self {
            snapshot_path: value.snapshot_path.unwrap_or(defaults.snapshot_path),
            autosave_debounce: value
                .autosave_debounce_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.autosave_debounce),
            commit_quiet_period: value
                .commit_quiet_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.commit_quiet_period),
        }
    }
}

/// Resolve the configuration path taking the environment override into
/// account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_defaults_are_applied() {
        let config = AppConfig::default();
        assert_eq!(config.autosave_debounce(), Duration::from_millis(300));
        assert_eq!(config.commit_quiet_period(), Duration::from_millis(1200));
        assert_eq!(
            config.snapshot_path(),
            &PathBuf::from("data/game_state.json")
        );
    }

    #[test]
    fn partial_config_keeps_defaults_for_missing_fields() {
        let raw: RawConfig = serde_json::from_str(r#"{"commit_quiet_ms": 500}"#).unwrap();
        let config = AppConfig::from(raw);
        assert_eq!(config.commit_quiet_period(), Duration::from_millis(500));
        assert_eq!(config.autosave_debounce(), Duration::from_millis(300));
    }
}
