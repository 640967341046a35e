//! Authentication middleware for injecting the API token.

use async_trait::async_trait;
use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result};

/// Middleware that adds `Authorization: token <token>` to requests.
///
/// Requests that already carry an `Authorization` header, such as token
/// creation with a username and password, are left untouched.
pub struct TokenAuthMiddleware {
    token: Option<String>,
}

impl TokenAuthMiddleware {
    /// Create a new authentication middleware.
    #[must_use]
    pub const fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

#[async_trait]
impl Middleware for TokenAuthMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        if let Some(token) = self.token.as_deref() {
            if !req.headers().contains_key(http::header::AUTHORIZATION) {
                if let Ok(value) = format!("token {token}").parse() {
                    req.headers_mut().insert(http::header::AUTHORIZATION, value);
                }
            }
        }

        next.run(req, extensions).await
    }
}
