//! Client configuration

use crate::{ClientError, ClientResult};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_POLL_SECS: u64 = 60;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_SESSION_PATH: &str = ".dinebox/session.json";

/// Client configuration for the Order and Catalog services
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "http://localhost:5000")
    pub base_url: String,

    /// Bearer token; overrides whatever the session file holds
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Order list refresh period in seconds
    pub poll_interval: u64,

    /// Page size of the global order search
    pub page_size: u32,

    /// Where the session token is persisted
    pub session_path: PathBuf,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            poll_interval: DEFAULT_POLL_SECS,
            page_size: DEFAULT_PAGE_SIZE,
            session_path: PathBuf::from(DEFAULT_SESSION_PATH),
        }
    }

    /// Load `.env` if present, then read `DINEBOX_*` variables
    pub fn from_env() -> ClientResult<Self> {
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut config = Self::new(get("DINEBOX_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()));
        config.token = get("DINEBOX_TOKEN");
        if let Some(v) = get("DINEBOX_TIMEOUT_SECS") {
            config.timeout = parse_number("DINEBOX_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = get("DINEBOX_POLL_SECS") {
            config.poll_interval = parse_number("DINEBOX_POLL_SECS", &v)?;
        }
        if let Some(v) = get("DINEBOX_PAGE_SIZE") {
            config.page_size = parse_number("DINEBOX_PAGE_SIZE", &v)?;
        }
        if let Some(v) = get("DINEBOX_SESSION_PATH") {
            config.session_path = PathBuf::from(v);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ClientResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "base URL must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        if self.timeout == 0 || self.poll_interval == 0 || self.page_size == 0 {
            return Err(ClientError::Config(
                "timeout, poll interval and page size must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn with_poll_interval(mut self, seconds: u64) -> Self {
        self.poll_interval = seconds;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_session_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_path = path.into();
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn poll_duration(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> ClientResult<T> {
    value
        .parse()
        .map_err(|_| ClientError::Config(format!("{key} is not a valid number: {value:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, 30);
        assert_eq!(config.poll_duration(), Duration::from_secs(60));
        assert_eq!(config.page_size, 10);
        assert!(config.token.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("DINEBOX_API_URL", "https://api.example.com/"),
            ("DINEBOX_TOKEN", "abc"),
            ("DINEBOX_POLL_SECS", "15"),
            ("DINEBOX_PAGE_SIZE", " 25 "),
            ("DINEBOX_TIMEOUT_SECS", ""),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.poll_interval, 15);
        assert_eq!(config.page_size, 25);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[("DINEBOX_PAGE_SIZE", "ten")])),
            Err(ClientError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[("DINEBOX_POLL_SECS", "0")])),
            Err(ClientError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[("DINEBOX_API_URL", "ftp://x")])),
            Err(ClientError::Config(_))
        ));
    }
}
