//! Client configuration.

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "POLL_API_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Read `POLL_API_BASE_URL`, falling back to the local default when it is
    /// unset or blank.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(BASE_URL_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self { base_url }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_localhost() {
        assert_eq!(ClientConfig::default().base_url, "http://localhost:8000");
    }

    #[test]
    fn lookup_overrides_default() {
        let config = ClientConfig::from_lookup(|key| {
            assert_eq!(key, BASE_URL_ENV);
            Some(" https://polls.example.com ".to_string())
        });
        assert_eq!(config.base_url, "https://polls.example.com");
    }

    #[test]
    fn blank_value_falls_back() {
        assert_eq!(ClientConfig::from_lookup(|_| Some("  ".to_string())), ClientConfig::default());
        assert_eq!(ClientConfig::from_lookup(|_| None), ClientConfig::default());
    }
}
