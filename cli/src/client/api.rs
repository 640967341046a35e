//! Binstar API client implementation.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::policies::ExponentialBackoff;
use reqwest_retry::RetryTransientMiddleware;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::auth::tokens::local_hostname;
use crate::auth::{Authentication, NewAuthentication, Strength, User};
use crate::client::middleware::TokenAuthMiddleware;
use crate::client::AccountService;
use crate::config::ApiConfig;
use crate::error::{BinstarError, Result};

/// HTTP client for the binstar account service.
///
/// Reads and deletes retry transient failures. Token creation is not
/// idempotent and goes through `create_client`, which never retries.
pub struct BinstarApiClient {
    client: ClientWithMiddleware,
    create_client: ClientWithMiddleware,
    base_url: Url,
}

#[derive(Serialize)]
struct CreateAuthenticationBody<'a> {
    scopes: &'a [String],
    note: &'a str,
    note_url: &'a str,
    hostname: String,
    user: Option<&'a str>,
    #[serde(rename = "max-age")]
    max_age: Option<u64>,
    created_with: &'a str,
    strength: Strength,
}

#[derive(Deserialize)]
struct CreateAuthenticationResponse {
    token: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl BinstarApiClient {
    /// Create a new API client.
    ///
    /// `token` authorizes every request that does not carry its own
    /// credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig, token: Option<String>) -> Result<Self> {
        let inner_client = Client::builder()
            .user_agent(format!("binstar-cli/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);

        // Build middleware stacks
        let client = ClientBuilder::new(inner_client.clone())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .with(TokenAuthMiddleware::new(token.clone()))
            .build();
        let create_client = ClientBuilder::new(inner_client)
            .with(TokenAuthMiddleware::new(token))
            .build();

        Ok(Self {
            client,
            create_client,
            base_url: config.base_url.clone(),
        })
    }

    /// Builds an endpoint URL below the base URL, escaping each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| BinstarError::Config(format!("Invalid API URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, segments: &[&str]) -> Result<Response> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        check_response(response).await
    }
}

/// Maps non-success responses onto [`BinstarError`] variants.
async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            } else {
                body
            }
        });
    tracing::debug!(status = status.as_u16(), %message, "Request failed");

    Err(match status {
        StatusCode::UNAUTHORIZED => BinstarError::Unauthorized,
        StatusCode::NOT_FOUND => BinstarError::NotFound(message),
        StatusCode::SERVICE_UNAVAILABLE => BinstarError::ApiUnavailable,
        _ => BinstarError::ApiError {
            status: status.as_u16(),
            message,
        },
    })
}

#[async_trait]
impl AccountService for BinstarApiClient {
    async fn current_user(&self) -> Result<User> {
        Ok(self.get(&["user"]).await?.json().await?)
    }

    async fn list_authentications(&self) -> Result<Vec<Authentication>> {
        Ok(self.get(&["authentications"]).await?.json().await?)
    }

    async fn remove_authentication(&self, auth_id: &str) -> Result<()> {
        let url = self.endpoint(&["authentications", auth_id])?;
        tracing::debug!(%url, "DELETE");
        let response = self.client.delete(url).send().await?;
        check_response(response).await?;
        Ok(())
    }

    async fn list_scopes(&self) -> Result<BTreeMap<String, String>> {
        Ok(self.get(&["scopes"]).await?.json().await?)
    }

    async fn create_authentication(&self, request: &NewAuthentication) -> Result<String> {
        let url = self.endpoint(&["authentications"])?;

        let body = CreateAuthenticationBody {
            scopes: &request.scopes,
            note: &request.name,
            note_url: &request.application_url,
            hostname: local_hostname(),
            user: request.for_organization.as_deref(),
            max_age: request.max_age,
            created_with: &request.created_with,
            strength: request.strength,
        };

        tracing::debug!(%url, username = %request.username, "POST");
        let response = self
            .create_client
            .post(url)
            .basic_auth(&request.username, Some(&request.password))
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(serde_json::to_string(&body)?)
            .send()
            .await?;

        let data: CreateAuthenticationResponse = check_response(response).await?.json().await?;
        Ok(data.token)
    }
}
