//! The account service seen by the command handlers.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::auth::{Authentication, NewAuthentication, User};
use crate::error::Result;

/// Remote account service that owns users, tokens, and scopes.
///
/// Rejected credentials surface as [`BinstarError::Unauthorized`](crate::error::BinstarError::Unauthorized).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Gets the currently authenticated user.
    async fn current_user(&self) -> Result<User>;

    /// Lists the user's authentication tokens.
    async fn list_authentications(&self) -> Result<Vec<Authentication>>;

    /// Deletes the token with the given id.
    async fn remove_authentication(&self, auth_id: &str) -> Result<()>;

    /// Lists the available scopes, keyed by scope name.
    async fn list_scopes(&self) -> Result<BTreeMap<String, String>>;

    /// Creates a new token and returns its value.
    async fn create_authentication(&self, request: &NewAuthentication) -> Result<String>;
}
