//! Error types and result aliases for the binstar CLI.
//!
//! This module provides a single error enum covering:
//! - Account service failures, with `Unauthorized` kept distinct so callers can retry
//! - Interactive prompt and configuration failures
//! - Automatic conversion from common error types

use thiserror::Error;

/// Main error type for binstar operations.
///
/// Use [`is_unauthorized`](Self::is_unauthorized) to tell rejected credentials
/// apart from every other failure.
#[derive(Error, Debug)]
pub enum BinstarError {
    /// The account service rejected the supplied credentials (HTTP 401).
    #[error("Unauthorized. Check your username and password, or pass a valid token with --token.")]
    Unauthorized,

    /// The requested resource does not exist (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// API returned a non-success status code.
    #[error("API request failed ({status}): {message}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// API server is unreachable (503 or connection failed).
    #[error("API server is unavailable. Check your network connection or try again later.")]
    ApiUnavailable,

    /// Request timed out.
    #[error("Request timed out. The server may be slow or unreachable. Try again later.")]
    Timeout,

    /// Network error during HTTP request.
    #[error("Network error: {0}. Check your internet connection.")]
    Network(String),

    /// Reading from the terminal failed.
    #[error("Failed to read input: {0}")]
    Prompt(String),

    /// General configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}. Check file permissions and format.")]
    ConfigRead(String),

    /// IO operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("Data serialization error: {0}. The server response may be malformed.")]
    Serialization(String),
}

impl BinstarError {
    /// Checks if the account service rejected the credentials.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// Result type alias using [`BinstarError`].
pub type Result<T> = std::result::Result<T, BinstarError>;

impl From<serde_json::Error> for BinstarError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(format!("JSON error: {err}"))
    }
}

impl From<toml::de::Error> for BinstarError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigRead(format!("TOML parse error: {err}"))
    }
}

impl From<dialoguer::Error> for BinstarError {
    fn from(err: dialoguer::Error) -> Self {
        Self::Prompt(err.to_string())
    }
}

impl From<reqwest::Error> for BinstarError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::ApiUnavailable
        } else if err.is_decode() {
            Self::Serialization(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<reqwest_middleware::Error> for BinstarError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(e) => e.into(),
            reqwest_middleware::Error::Middleware(e) => {
                let err_str = e.to_string();
                if err_str.contains("timeout") || err_str.contains("timed out") {
                    Self::Timeout
                } else if err_str.contains("connect") || err_str.contains("connection") {
                    Self::ApiUnavailable
                } else {
                    Self::Network(err_str)
                }
            }
        }
    }
}
