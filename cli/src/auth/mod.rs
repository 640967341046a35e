//! Authentication token management.
//!
//! This module holds the token types, the expiry countdown and table
//! rendering used by `--list`, and the interactive `--create` flow.

pub mod create;
pub mod expiry;
pub mod prompt;
pub mod report;
pub mod table;
pub mod tokens;

pub use create::{create_with_retries, resolve_username, warn_if_unscoped, TokenOptions};
pub use prompt::{Prompter, TerminalPrompter};
pub use report::{Reporter, TracingReporter};
pub use table::render_authentications;
pub use tokens::{
    default_token_name, flatten_scopes, Authentication, NewAuthentication, Strength, User,
};
