//! Console configuration baked in at build time.
//!
//! The WASM bundle has no process environment, so values come from
//! `option_env!` when Trunk compiles the crate:
//!
//! - `IAAS_API_BASE_URL`: gateway base URL, default `http://localhost:8079`
//! - `IAAS_LOG_LEVEL`: `error`, `warn`, `info` (default), `debug`, `trace`
//!
//! Invalid values fall back to the defaults; [`ConsoleConfig::from_build_env`]
//! reports what it rejected so start-up can log it.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8079";
pub const DEFAULT_LOG_LEVEL: log::Level = log::Level::Info;

/// Errors from parsing a configuration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("IAAS_API_BASE_URL must start with http:// or https://, got {0:?}")]
    InvalidBaseUrl(String),

    #[error("IAAS_LOG_LEVEL must be one of error|warn|info|debug|trace, got {0:?}")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub api_base_url: String,
    pub log_level: log::Level,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self { api_base_url: DEFAULT_API_BASE_URL.to_owned(), log_level: DEFAULT_LOG_LEVEL }
    }
}

impl ConsoleConfig {
    /// Build from the compile-time environment.
    ///
    /// Returns the config together with any rejected values.
    pub fn from_build_env() -> (Self, Vec<ConfigError>) {
        Self::from_values(option_env!("IAAS_API_BASE_URL"), option_env!("IAAS_LOG_LEVEL"))
    }

    /// Build from raw optional values, keeping defaults for absent or invalid ones.
    pub fn from_values(base_url: Option<&str>, log_level: Option<&str>) -> (Self, Vec<ConfigError>) {
        let mut config = Self::default();
        let mut rejected = Vec::new();

        if let Some(raw) = base_url.filter(|v| !v.trim().is_empty()) {
            match parse_base_url(raw) {
                Ok(url) => config.api_base_url = url,
                Err(e) => rejected.push(e),
            }
        }
        if let Some(raw) = log_level.filter(|v| !v.trim().is_empty()) {
            match parse_log_level(raw) {
                Ok(level) => config.log_level = level,
                Err(e) => rejected.push(e),
            }
        }

        (config, rejected)
    }
}

/// Validate a gateway URL and strip trailing slashes.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidBaseUrl`] if the scheme is not HTTP(S).
pub fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(trimmed.trim_end_matches('/').to_owned())
}

/// Parse a log level name, case-insensitively.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidLogLevel`] for unknown names.
pub fn parse_log_level(raw: &str) -> Result<log::Level, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "error" => Ok(log::Level::Error),
        "warn" | "warning" => Ok(log::Level::Warn),
        "info" => Ok(log::Level::Info),
        "debug" => Ok(log::Level::Debug),
        "trace" => Ok(log::Level::Trace),
        _ => Err(ConfigError::InvalidLogLevel(raw.to_owned())),
    }
}
