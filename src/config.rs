use std::env;
use std::path::PathBuf;
use std::time::Duration;

use dotenvy::dotenv;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://3.110.46.79:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SESSION_FILE: &str = ".quiz-session.json";
pub const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Clone)]
pub struct Config {
    /// Backend root, never ending in `/`.
    pub base_url: String,
    pub request_timeout: Duration,
    pub session_file: PathBuf,
    pub log_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("QUIZ_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let base_url = normalize_base_url(&base_url)?;

        let request_timeout = match lookup("QUIZ_REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        key: "QUIZ_REQUEST_TIMEOUT_SECS",
                        value: raw,
                    });
                }
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let session_file = lookup("QUIZ_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE));
        let log_dir = lookup("QUIZ_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));
        let rust_log = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            base_url,
            request_timeout,
            session_file,
            log_dir,
            rust_log,
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = normalize_base_url(base_url)?;
        Ok(self)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::Empty {
            key: "QUIZ_API_BASE_URL",
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.session_file, PathBuf::from(DEFAULT_SESSION_FILE));
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let config = config_from(&[("QUIZ_API_BASE_URL", "http://localhost:5000/")]).unwrap();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.endpoint("/login"), "http://localhost:5000/login");
        assert_eq!(config.endpoint("login"), "http://localhost:5000/login");
    }

    #[test]
    fn test_invalid_timeout() {
        assert!(config_from(&[("QUIZ_REQUEST_TIMEOUT_SECS", "soon")]).is_err());
        assert!(config_from(&[("QUIZ_REQUEST_TIMEOUT_SECS", "0")]).is_err());
        assert!(config_from(&[("QUIZ_API_BASE_URL", " / ")]).is_err());
    }
}
