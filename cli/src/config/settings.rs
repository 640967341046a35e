//! Application configuration settings.

use serde::{Deserialize, Serialize};
use url::Url;

/// Default base URL of the account service API.
pub const DEFAULT_API_URL: &str = "https://api.anaconda.org";

/// Default URL recorded as the application that will use a new token.
pub const DEFAULT_APPLICATION_URL: &str = "http://binstar.org";

/// Main configuration for the binstar CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BinstarConfig {
    /// Authentication settings.
    pub auth: AuthConfig,
    /// API client settings.
    pub api: ApiConfig,
}

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// API token used for listing and removing tokens.
    pub token: Option<String>,
    /// Application URL used when `--url` is not given.
    pub default_application_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token: None,
            default_application_url: DEFAULT_APPLICATION_URL.to_string(),
        }
    }
}

/// API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Account service base URL.
    #[serde(with = "url_serde")]
    pub base_url: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum number of retries for transient failures.
    pub max_retries: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_URL).expect("valid default URL"),
            timeout_secs: 30,
            max_retries: 3,
        }
    }
}

/// Custom serde module for URL serialization.
mod url_serde {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use url::Url;

    pub fn serialize<S>(url: &Url, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(url.as_str())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Url, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Url::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Environment variables that can override configuration.
pub mod env {
    pub const API_URL: &str = "BINSTAR_API_URL";
    pub const TOKEN: &str = "BINSTAR_TOKEN";
    pub const LOG_LEVEL: &str = "BINSTAR_LOG";
}

impl BinstarConfig {
    /// Apply environment variable overrides to the configuration.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(env::API_URL).ok().as_deref(),
            std::env::var(env::TOKEN).ok().as_deref(),
        )
    }

    /// Apply explicit overrides; invalid URLs and empty tokens are ignored.
    #[must_use]
    pub fn with_overrides(mut self, api_url: Option<&str>, token: Option<&str>) -> Self {
        if let Some(url) = api_url {
            match Url::parse(url) {
                Ok(parsed) => self.api.base_url = parsed,
                Err(e) => tracing::warn!(url, error = %e, "Ignoring invalid API URL override"),
            }
        }

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.auth.token = Some(token.to_string());
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = BinstarConfig::default();
        assert_eq!(config.api.base_url.as_str(), "https://api.anaconda.org/");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.api.max_retries, 3);
        assert_eq!(config.auth.token, None);
        assert_eq!(config.auth.default_application_url, "http://binstar.org");
    }

    #[test]
    fn overrides_replace_url_and_token() {
        let config = BinstarConfig::default()
            .with_overrides(Some("https://binstar.example.com/api"), Some("abc"));
        assert_eq!(
            config.api.base_url.as_str(),
            "https://binstar.example.com/api"
        );
        assert_eq!(config.auth.token.as_deref(), Some("abc"));
    }

    #[test]
    fn invalid_overrides_are_ignored() {
        let config = BinstarConfig::default().with_overrides(Some("not a url"), Some(""));
        assert_eq!(config.api.base_url.as_str(), "https://api.anaconda.org/");
        assert_eq!(config.auth.token, None);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: BinstarConfig = toml::from_str(
            r#"
            [api]
            base_url = "http://localhost:8080"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url.as_str(), "http://localhost:8080/");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.auth.default_application_url, "http://binstar.org");
    }
}
