//! Interactive token creation.
//!
//! Creating a token runs in three steps:
//! 1. [`resolve_username`] - ask the account service who is logged in, or prompt for a username
//! 2. [`warn_if_unscoped`] - advise when no scopes were requested
//! 3. [`create_with_retries`] - prompt for the password and request the token, up to
//!    [`MAX_PASSWORD_ATTEMPTS`] times

use std::io::Write;

use crate::auth::prompt::Prompter;
use crate::auth::report::Reporter;
use crate::auth::tokens::{NewAuthentication, Strength};
use crate::client::AccountService;
use crate::error::Result;

/// Number of password attempts before giving up.
pub const MAX_PASSWORD_ATTEMPTS: usize = 3;

/// Options for a new token, as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenOptions {
    /// Token label.
    pub name: String,
    /// URL of the application that will use the token.
    pub url: String,
    /// Maximum token lifetime in seconds.
    pub max_age: Option<u64>,
    /// Flattened scopes; empty grants full account access.
    pub scopes: Vec<String>,
    pub strength: Strength,
    /// Owning organization, if not the user.
    pub organization: Option<String>,
    /// Command line recorded as the token's provenance.
    pub created_with: String,
}

/// Returns the login of the authenticated user.
///
/// Any failure to look up the current user, including not being logged in,
/// falls back to prompting for a username.
pub async fn resolve_username(
    service: &dyn AccountService,
    prompter: &dyn Prompter,
) -> Result<String> {
    match service.current_user().await {
        Ok(user) => Ok(user.login),
        Err(e) => {
            tracing::debug!(error = %e, "Could not determine current user");
            prompter.read_line("Username")
        }
    }
}

/// Warns that a token without scopes grants full access to the account.
///
/// Returns `true` if warnings were emitted. Creation proceeds either way.
pub fn warn_if_unscoped(scopes: &[String], username: &str, reporter: &dyn Reporter) -> bool {
    if !scopes.is_empty() {
        return false;
    }

    reporter.warn("You have not specified the scope of this token with the '--scopes' argument.");
    reporter.warn(&format!(
        "This token will grant full access to {username}'s account"
    ));
    reporter.warn("Use the --list-scopes option to see a listing of your options");
    true
}

/// Prompts for the password and asks the account service for a token.
///
/// Rejected credentials are reported and the password is asked for again,
/// at most [`MAX_PASSWORD_ATTEMPTS`] times in total. On success the token is
/// written to `out` and returned. When every attempt is rejected this returns
/// `Ok(None)` without further output.
///
/// # Errors
///
/// Returns any error other than [`BinstarError::Unauthorized`](crate::error::BinstarError::Unauthorized) as soon as it
/// occurs, as well as prompt and output failures.
pub async fn create_with_retries(
    service: &dyn AccountService,
    prompter: &dyn Prompter,
    reporter: &dyn Reporter,
    username: &str,
    options: &TokenOptions,
    out: &mut dyn Write,
) -> Result<Option<String>> {
    for attempt in 1..=MAX_PASSWORD_ATTEMPTS {
        let password = prompter.read_password(&format!("Please re-enter {username}'s Password"))?;

        let request = NewAuthentication {
            username: username.to_string(),
            password,
            name: options.name.clone(),
            application_url: options.url.clone(),
            scopes: options.scopes.clone(),
            for_organization: options.organization.clone(),
            max_age: options.max_age,
            created_with: options.created_with.clone(),
            strength: options.strength,
        };

        match service.create_authentication(&request).await {
            Ok(token) => {
                writeln!(out, "{token}")?;
                return Ok(Some(token));
            }
            Err(e) if e.is_unauthorized() => {
                tracing::debug!(attempt, "Credentials rejected");
                reporter.error("Invalid Username password combination, please try again");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(None)
}
