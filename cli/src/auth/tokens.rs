//! Token types for the account service.

use serde::{Deserialize, Deserializer, Serialize};

/// Token strength selector sent when creating a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    /// A longer token.
    #[default]
    Strong,
    /// A shorter token.
    Weak,
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strong => write!(f, "strong"),
            Self::Weak => write!(f, "weak"),
        }
    }
}

/// An authentication token record as returned by the account service.
///
/// Records are owned server-side; the CLI only reads them for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authentication {
    /// Token identifier, used with `--remove`.
    pub id: String,
    /// Application name the token was created for.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub application: String,
    /// Address the token was created from.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub remote_addr: String,
    /// Host the token was created on.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hostname: String,
    /// Raw expiry timestamp; `None` or empty means the token never expires.
    #[serde(default)]
    pub expires: Option<String>,
}

/// The currently authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    /// Account login name.
    pub login: String,
}

/// Everything needed to ask the account service for a new token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthentication {
    pub username: String,
    pub password: String,
    /// Token label.
    pub name: String,
    /// URL of the application that will use the token.
    pub application_url: String,
    pub scopes: Vec<String>,
    /// Create the token for this organization instead of the user.
    pub for_organization: Option<String>,
    /// Maximum token lifetime in seconds.
    pub max_age: Option<u64>,
    /// Command line that requested the token.
    pub created_with: String,
    pub strength: Strength,
}

/// Flattens user-supplied scope arguments into individual scopes.
///
/// Each argument may hold several whitespace-separated scopes, so
/// `["repos conda:download", "issues"]` yields three scopes.
pub fn flatten_scopes<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    raw.iter()
        .flat_map(|value| value.as_ref().split_whitespace())
        .map(str::to_string)
        .collect()
}

/// Returns the local machine's hostname, or `localhost` if it cannot be determined.
pub fn local_hostname() -> String {
    #[cfg(unix)]
    {
        if let Ok(name) = nix::unistd::gethostname() {
            let name = name.to_string_lossy().into_owned();
            if !name.is_empty() {
                return name;
            }
        }
    }

    ["HOSTNAME", "COMPUTERNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| "localhost".to_string())
}

/// Default label for a new token: `binstar_token:<hostname>`.
pub fn default_token_name() -> String {
    format!("binstar_token:{}", local_hostname())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_splits_on_whitespace() {
        let scopes = flatten_scopes(&["repos conda:download", "issues"]);
        assert_eq!(scopes, vec!["repos", "conda:download", "issues"]);
    }

    #[test]
    fn flatten_ignores_blank_values() {
        let scopes = flatten_scopes(&["", "   ", "\tall\n"]);
        assert_eq!(scopes, vec!["all"]);

        let empty: Vec<String> = Vec::new();
        assert!(flatten_scopes(&empty).is_empty());
    }

    #[test]
    fn flatten_keeps_duplicates() {
        let scopes = flatten_scopes(&["repos repos"]);
        assert_eq!(scopes, vec!["repos", "repos"]);
    }

    #[test]
    fn strength_defaults_to_strong() {
        assert_eq!(Strength::default(), Strength::Strong);
        assert_eq!(Strength::Weak.to_string(), "weak");
        assert_eq!(serde_json::to_string(&Strength::Strong).unwrap(), "\"strong\"");
    }

    #[test]
    fn authentication_tolerates_nulls() {
        let json = r#"{
            "id": "5a1b",
            "application": null,
            "remote_addr": "10.0.0.1",
            "hostname": "build-box",
            "expires": null
        }"#;
        let auth: Authentication = serde_json::from_str(json).unwrap();
        assert_eq!(auth.id, "5a1b");
        assert_eq!(auth.application, "");
        assert_eq!(auth.hostname, "build-box");
        assert_eq!(auth.expires, None);
    }

    #[test]
    fn default_token_name_has_prefix() {
        let name = default_token_name();
        assert!(name.starts_with("binstar_token:"));
        assert!(name.len() > "binstar_token:".len());
    }
}
