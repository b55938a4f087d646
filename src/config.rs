//! Application-level configuration loading.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "SCOREBOARD_CONFIG_PATH";
/// Environment variable that overrides the configured listening port.
const PORT_ENV: &str = "PORT";

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_TICK_INTERVAL_MS: u64 = 200;
const DEFAULT_SUBSCRIBER_BUFFER: usize = 32;
const DEFAULT_LOGO_FETCH_TIMEOUT_SECS: u64 = 7;
const DEFAULT_KEEP_ALIVE_SECS: u64 = 15;

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    port: u16,
    static_dir: PathBuf,
    control_dir: PathBuf,
    saves_dir: PathBuf,
    tick_interval: Duration,
    subscriber_buffer: usize,
    logo_fetch_timeout: Duration,
    keep_alive: Duration,
}

impl AppConfig {
    /// Load the configuration from disk, falling back to built-in defaults.
    ///
    /// The `PORT` environment variable wins over the file either way.
    pub fn load() -> Self {
        let path = resolve_config_path();
        let config = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    info!(path = %path.display(), "loaded configuration");
                    raw.into()
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
        };

        match env::var(PORT_ENV).ok().map(|value| value.parse::<u16>()) {
            Some(Ok(port)) => config.with_port(port),
            Some(Err(err)) => {
                warn!(error = %err, "ignoring invalid PORT override");
                config
            }
            None => config,
        }
    }

    /// Replace the listening port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Replace the directory holding saved snapshots.
    pub fn with_saves_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.saves_dir = dir.into();
        self
    }

    /// Replace the viewer queue depth.
    pub fn with_subscriber_buffer(mut self, buffer: usize) -> Self {
        self.subscriber_buffer = buffer;
        self
    }

    /// TCP port the HTTP server binds to.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Directory served at `/` for the display UI.
    pub fn static_dir(&self) -> &PathBuf {
        &self.static_dir
    }

    /// Directory served at `/ovladani/` for the control UI.
    pub fn control_dir(&self) -> &PathBuf {
        &self.control_dir
    }

    /// Directory holding saved snapshots.
    pub fn saves_dir(&self) -> &PathBuf {
        &self.saves_dir
    }

    /// Polling period of the match timer.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Snapshots a viewer may have queued before it is disconnected.
    pub fn subscriber_buffer(&self) -> usize {
        self.subscriber_buffer
    }

    /// Upper bound for fetching a logo image.
    pub fn logo_fetch_timeout(&self) -> Duration {
        self.logo_fetch_timeout
    }

    /// Interval between SSE keep-alive comments.
    pub fn keep_alive(&self) -> Duration {
        self.keep_alive
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    port: Option<u16>,
    static_dir: Option<PathBuf>,
    control_dir: Option<PathBuf>,
    saves_dir: Option<PathBuf>,
    tick_interval_ms: Option<u64>,
    subscriber_buffer: Option<usize>,
    logo_fetch_timeout_secs: Option<u64>,
    keep_alive_secs: Option<u64>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            port: value.port.unwrap_or(DEFAULT_PORT),
            static_dir: value.static_dir.unwrap_or_else(|| "static".into()),
            control_dir: value.control_dir.unwrap_or_else(|| "ovladani".into()),
            saves_dir: value.saves_dir.unwrap_or_else(|| "saved".into()),
            tick_interval: Duration::from_millis(
                value
                    .tick_interval_ms
                    .filter(|ms| *ms > 0)
                    .unwrap_or(DEFAULT_TICK_INTERVAL_MS),
            ),
            subscriber_buffer: value
                .subscriber_buffer
                .filter(|buffer| *buffer > 0)
                .unwrap_or(DEFAULT_SUBSCRIBER_BUFFER),
            logo_fetch_timeout: Duration::from_secs(
                value
                    .logo_fetch_timeout_secs
                    .unwrap_or(DEFAULT_LOGO_FETCH_TIMEOUT_SECS),
            ),
            keep_alive: Duration::from_secs(
                value
                    .keep_alive_secs
                    .filter(|secs| *secs > 0)
                    .unwrap_or(DEFAULT_KEEP_ALIVE_SECS),
            ),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
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
    fn defaults_match_the_reference_deployment() {
        let config = AppConfig::default();
        assert_eq!(config.port(), 5000);
        assert_eq!(config.tick_interval(), Duration::from_millis(200));
        assert_eq!(config.saves_dir(), &PathBuf::from("saved"));
        assert_eq!(config.logo_fetch_timeout(), Duration::from_secs(7));
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let raw: RawConfig =
            serde_json::from_str(r#"{ "port": 8080, "tickIntervalMs": 0, "savesDir": "/tmp/s" }"#)
                .unwrap();
        let config = AppConfig::from(raw);

        assert_eq!(config.port(), 8080);
        assert_eq!(config.tick_interval(), Duration::from_millis(200));
        assert_eq!(config.saves_dir(), &PathBuf::from("/tmp/s"));
        assert_eq!(config.subscriber_buffer(), 32);
    }
}
