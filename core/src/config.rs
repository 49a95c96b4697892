//! Client configuration.

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the users API lives and how long a request may take.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Defaults overridden by `USERS_API_URL` and `USERS_API_TIMEOUT_SECS`.
    /// An unparsable timeout keeps the default.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup("USERS_API_URL") {
            config.base_url = url;
        }
        if let Some(raw) = lookup("USERS_API_TIMEOUT_SECS") {
            match raw.parse() {
                Ok(secs) => config.timeout_secs = secs,
                Err(_) => tracing::warn!(value = %raw, "ignoring invalid USERS_API_TIMEOUT_SECS"),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn vars_override_defaults() {
        let config = ClientConfig::from_vars(|key| match key {
            "USERS_API_URL" => Some("http://api.internal:8080".to_string()),
            "USERS_API_TIMEOUT_SECS" => Some("5".to_string()),
            _ => None,
        });
        assert_eq!(config.base_url, "http://api.internal:8080");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn bad_timeout_keeps_default() {
        let config = ClientConfig::from_vars(|key| match key {
            "USERS_API_TIMEOUT_SECS" => Some("soon".to_string()),
            _ => None,
        });
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"base_url":"http://example.test"}"#).unwrap();
        assert_eq!(config.base_url, "http://example.test");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
