//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

/// Station configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `ROBOT_HOST`: robot controller host (default: `"localhost"`)
/// - `ROBOT_PORT`: robot controller port (default: `30002`)
/// - `ROBOT_CONNECT_TIMEOUT_MS`: robot connect timeout (default: `5000`)
/// - `ROBOT_ENABLED`: send programs over TCP (default: `true`)
/// - `SEED_FILE`: JSON seed file (default: built-in demo data)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub robot_host: String,
    pub robot_port: u16,
    pub robot_connect_timeout: Duration,
    pub robot_enabled: bool,
    pub seed_file: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            robot_host: lookup("ROBOT_HOST").unwrap_or(defaults.robot_host),
            robot_port: lookup("ROBOT_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.robot_port),
            robot_connect_timeout: lookup("ROBOT_CONNECT_TIMEOUT_MS")
                .and_then(|ms| ms.parse().ok())
                .filter(|&ms| ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(defaults.robot_connect_timeout),
            robot_enabled: lookup("ROBOT_ENABLED")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.robot_enabled),
            seed_file: lookup("SEED_FILE")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the `"host:port"` robot controller address string.
    pub fn robot_addr(&self) -> String {
        format!("{}:{}", self.robot_host, self.robot_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            robot_host: "localhost".to_string(),
            robot_port: robot::client::DEFAULT_PORT,
            robot_connect_timeout: robot::client::DEFAULT_CONNECT_TIMEOUT,
            robot_enabled: true,
            seed_file: None,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
