//! Authentication token command handlers.
//!
//! This module implements `binstar auth`:
//! - [`handle_list`] - Show the user's tokens (`binstar auth --list`)
//! - [`handle_remove`] - Delete tokens by id (`binstar auth --remove ID...`)
//! - [`handle_list_scopes`] - Show available scopes (`binstar auth --list-scopes`)
//! - [`handle_create`] - Create a new token (`binstar auth --create`)

use std::io::Write;

use chrono::{DateTime, Utc};

use crate::auth::{
    create_with_retries, default_token_name, flatten_scopes, render_authentications,
    resolve_username, warn_if_unscoped, Prompter, Reporter, TerminalPrompter, TokenOptions,
    TracingReporter,
};
use crate::cli::{AuthArgs, AuthMode};
use crate::client::{AccountService, BinstarApiClient};
use crate::config::BinstarConfig;
use crate::error::Result;

const SCOPE_EXAMPLES: &str = "

Examples

To allow access to only conda downloads from your account you can run:

    binstar auth --create --scopes 'repos conda:download'

To allow full access to your account:

    binstar auth --create --scopes 'all'
";

/// Handles the `binstar auth` command.
///
/// # Errors
///
/// Returns any account service error other than rejected credentials
/// during `--create`.
pub async fn handle_auth(args: &AuthArgs, config: &BinstarConfig) -> Result<()> {
    let client = BinstarApiClient::new(&config.api, config.auth.token.clone())?;
    let reporter = TracingReporter;
    let mut stdout = std::io::stdout();

    match args.mode() {
        AuthMode::List => handle_list(&client, Utc::now(), &mut stdout).await,
        AuthMode::Remove(ids) => handle_remove(&client, &ids, &reporter).await,
        AuthMode::ListScopes => handle_list_scopes(&client, &mut stdout).await,
        AuthMode::Create => {
            let options = token_options(args, config, invocation());
            handle_create(&client, &TerminalPrompter, &reporter, &options, &mut stdout).await
        }
    }
}

/// Handles `binstar auth --list`.
pub async fn handle_list(
    service: &dyn AccountService,
    now: DateTime<Utc>,
    out: &mut dyn Write,
) -> Result<()> {
    let authentications = service.list_authentications().await?;
    writeln!(out)?;
    write!(out, "{}", render_authentications(&authentications, now))?;
    Ok(())
}

/// Handles `binstar auth --remove ID...`.
///
/// Tokens are removed one at a time, in order. The first failure stops
/// the command; tokens already removed stay removed.
pub async fn handle_remove(
    service: &dyn AccountService,
    ids: &[String],
    reporter: &dyn Reporter,
) -> Result<()> {
    for id in ids {
        service.remove_authentication(id).await?;
        reporter.info(&format!("Removed authentication token {id}"));
    }
    Ok(())
}

/// Handles `binstar auth --list-scopes`.
pub async fn handle_list_scopes(service: &dyn AccountService, out: &mut dyn Write) -> Result<()> {
    let scopes = service.list_scopes().await?;
    for (name, description) in &scopes {
        writeln!(out, "{name}")?;
        writeln!(out, "  {description}")?;
        writeln!(out)?;
    }
    writeln!(out, "{SCOPE_EXAMPLES}")?;
    Ok(())
}

/// Handles `binstar auth --create`.
pub async fn handle_create(
    service: &dyn AccountService,
    prompter: &dyn Prompter,
    reporter: &dyn Reporter,
    options: &TokenOptions,
    out: &mut dyn Write,
) -> Result<()> {
    let username = resolve_username(service, prompter).await?;
    warn_if_unscoped(&options.scopes, &username, reporter);
    create_with_retries(service, prompter, reporter, &username, options, out).await?;
    Ok(())
}

/// Builds token options from the command line, falling back to configured defaults.
fn token_options(args: &AuthArgs, config: &BinstarConfig, created_with: String) -> TokenOptions {
    TokenOptions {
        name: args.name.clone().unwrap_or_else(default_token_name),
        url: args
            .url
            .clone()
            .unwrap_or_else(|| config.auth.default_application_url.clone()),
        max_age: args.max_age,
        scopes: flatten_scopes(&args.scopes),
        strength: args.strength(),
        organization: args.organization.clone(),
        created_with,
    }
}

/// The full command line, recorded as the token's provenance.
fn invocation() -> String {
    std::env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
