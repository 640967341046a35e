//! Command-line argument parsing.

use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::auth::Strength;

/// Command-line client for the binstar account service.
#[derive(Parser, Debug)]
#[command(name = "binstar")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Authentication token to use for API requests.
    #[arg(short, long, global = true, env = "BINSTAR_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Base URL of the account service API.
    #[arg(long, global = true, env = "BINSTAR_API_URL")]
    pub api_url: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage authentication tokens.
    Auth(AuthArgs),
}

/// Arguments for `binstar auth`.
///
/// Exactly one of `--list-scopes`, `--list`, `--remove`, or `--create` is required.
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["list_scopes", "list", "remove", "create"])
))]
pub struct AuthArgs {
    /// A unique name so you can identify this token later.
    ///
    /// Defaults to `binstar_token:<hostname>`.
    #[arg(short, long)]
    pub name: Option<String>,

    /// The URL of the application that will use this token.
    #[arg(long)]
    pub url: Option<String>,

    /// The maximum age in seconds that this token will be valid for.
    #[arg(long, value_name = "SECONDS")]
    pub max_age: Option<u64>,

    /// Scopes for the token.
    ///
    /// For example, to limit the token to conda downloads only use
    /// --scopes "repos conda:download".
    #[arg(short, long)]
    pub scopes: Vec<String>,

    /// Token strength.
    #[arg(
        long,
        value_enum,
        default_value_t = Strength::Strong,
        overrides_with_all = ["strong", "weak"],
        help_heading = "Token Strength options"
    )]
    pub strength: Strength,

    /// Create a longer token (default).
    #[arg(long, overrides_with_all = ["strength", "weak"], help_heading = "Token Strength options")]
    pub strong: bool,

    /// Create a shorter token.
    #[arg(short, long, overrides_with_all = ["strength", "strong"], help_heading = "Token Strength options")]
    pub weak: bool,

    /// Set the token owner (must be an organization).
    #[arg(short, long = "org", visible_alias = "organization", value_name = "ORG")]
    pub organization: Option<String>,

    /// List all authentication scopes.
    #[arg(short = 'x', long)]
    pub list_scopes: bool,

    /// List all user authentication tokens.
    #[arg(short, long)]
    pub list: bool,

    /// Remove authentication tokens.
    #[arg(short, long, value_name = "ID", num_args = 1..)]
    pub remove: Vec<String>,

    /// Create an authentication token.
    #[arg(short, long)]
    pub create: bool,
}

/// The action selected by the `binstar auth` mode flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMode {
    ListScopes,
    List,
    Remove(Vec<String>),
    Create,
}

impl AuthArgs {
    /// Returns the selected action.
    pub fn mode(&self) -> AuthMode {
        if self.list_scopes {
            AuthMode::ListScopes
        } else if self.list {
            AuthMode::List
        } else if self.create {
            AuthMode::Create
        } else {
            AuthMode::Remove(self.remove.clone())
        }
    }

    /// Resolves `--strength`, `--strong`, and `--weak` into one strength.
    ///
    /// The three flags override each other, so at most one is still set
    /// after parsing and the last one given wins.
    pub const fn strength(&self) -> Strength {
        if self.weak {
            Strength::Weak
        } else if self.strong {
            Strength::Strong
        } else {
            self.strength
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    fn parse(args: &[&str]) -> AuthArgs {
        let cli = Cli::try_parse_from(std::iter::once("binstar").chain(args.iter().copied()))
            .unwrap();
        match cli.command {
            Commands::Auth(args) => args,
        }
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn mode_flags() {
        assert_eq!(parse(&["auth", "--list"]).mode(), AuthMode::List);
        assert_eq!(parse(&["auth", "-x"]).mode(), AuthMode::ListScopes);
        assert_eq!(parse(&["auth", "-c"]).mode(), AuthMode::Create);
        assert_eq!(
            parse(&["auth", "-r", "a1", "b2"]).mode(),
            AuthMode::Remove(vec!["a1".to_string(), "b2".to_string()])
        );
    }

    #[test]
    fn mode_is_required() {
        let err = Cli::try_parse_from(["binstar", "auth"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn modes_are_exclusive() {
        let err = Cli::try_parse_from(["binstar", "auth", "--list", "--create"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn scopes_are_repeatable() {
        let args = parse(&["auth", "-c", "--scopes", "repos conda:download", "-s", "issues"]);
        assert_eq!(args.scopes, vec!["repos conda:download", "issues"]);
    }

    #[test]
    fn strength_options() {
        assert_eq!(parse(&["auth", "-c"]).strength(), Strength::Strong);
        assert_eq!(parse(&["auth", "-c", "-w"]).strength(), Strength::Weak);
        assert_eq!(parse(&["auth", "-c", "--strength", "weak"]).strength(), Strength::Weak);
    }

    #[test]
    fn last_strength_flag_wins() {
        let cases: [(&[&str], Strength); 6] = [
            (&["--strong", "--strength", "weak"], Strength::Weak),
            (&["--strength", "weak", "--strong"], Strength::Strong),
            (&["--strong", "--weak"], Strength::Weak),
            (&["--weak", "--strong"], Strength::Strong),
            (&["-w", "--strength", "strong"], Strength::Strong),
            (&["--strength", "strong", "-w"], Strength::Weak),
        ];
        for (flags, expected) in cases {
            let args: Vec<&str> = ["auth", "-c"].iter().chain(flags).copied().collect();
            assert_eq!(parse(&args).strength(), expected, "flags: {flags:?}");
        }
    }

    #[test]
    fn organization_aliases() {
        for flag in ["-o", "--org", "--organization"] {
            let args = parse(&["auth", "-c", flag, "acme"]);
            assert_eq!(args.organization.as_deref(), Some("acme"));
        }
    }

    #[test]
    fn creation_options() {
        let args = parse(&[
            "auth",
            "--create",
            "--name",
            "ci-token",
            "--url",
            "https://ci.example.com",
            "--max-age",
            "3600",
        ]);
        assert_eq!(args.name.as_deref(), Some("ci-token"));
        assert_eq!(args.url.as_deref(), Some("https://ci.example.com"));
        assert_eq!(args.max_age, Some(3600));
    }

    #[test]
    fn global_token_after_subcommand() {
        let cli = Cli::try_parse_from(["binstar", "auth", "-l", "--token", "abc"]).unwrap();
        assert_eq!(cli.token.as_deref(), Some("abc"));
    }
}
