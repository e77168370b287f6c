//! Onfleet API client implementation

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::{debug, warn};
use reqwest::{Client as HttpClient, Method, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;

use super::OnfleetApi;
use crate::decode::{decode, decode_list};
use crate::error::{ApiError, ConfigError, Result};
use crate::models::{Administrator, AdministratorUpdate, NewAdministrator, Organization};

/// Production API host
pub const API_HOST: &str = "https://onfleet.com";

/// Version prefix appended to the host
const API_PATH: &str = "/api/v2";

/// Onfleet allows 20 requests per second per API key
const RATE_LIMIT_PER_SECOND: NonZeroU32 = NonZeroU32::new(20).unwrap();

/// Fallback wait when a 429 carries no usable `Retry-After`
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Onfleet API client
pub struct OnfleetClient {
    http: HttpClient,
    base_url: Url,
    auth_header: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl OnfleetClient {
    /// Create a client for the production API
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_host(api_key, API_HOST)
    }

    /// Create a client against a custom host (e.g. a local mock server).
    ///
    /// `host` is scheme plus authority; the `/api/v2` prefix is appended.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` if `host` is not an http(s) URL.
    pub fn with_host(api_key: &str, host: &str) -> Result<Self> {
        let base = format!("{}{}", host.trim_end_matches('/'), API_PATH);
        let base_url = Url::parse(&base)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .ok_or_else(|| ConfigError::Invalid(format!("Invalid API host: {}", host)))?;

        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(
            RATE_LIMIT_PER_SECOND,
        )));

        Ok(Self {
            http,
            base_url,
            auth_header: basic_auth_header(api_key),
            rate_limiter,
        })
    }

    /// Base URL all request paths are joined to
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Endpoint URL below the base; each segment is percent-encoded, so an
    /// id containing `/`, `?` or `#` stays a single path segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments.iter().copied());
        }
        url
    }

    /// Make an authenticated API request and return the raw response body.
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<String> {
        if self.rate_limiter.check().is_err() {
            debug!("Client rate limit reached, waiting for a slot");
            self.rate_limiter.until_ready().await;
        }

        let url = self.endpoint(segments);
        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header("Authorization", &self.auth_header);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ApiError::from)?;

        let status = response.status();
        if status.is_success() {
            return response
                .text()
                .await
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)).into());
        }

        debug!("{} {} returned {}", method, url, status);

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        let text = response.text().await.unwrap_or_default();

        Err(status_error(status, retry_after, &text).into())
    }

    /// Make a request whose response body must be JSON.
    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<Value> {
        let text = self.send(method, segments, body).await?;
        parse_body(&text)
    }

    async fn get_json(&self, segments: &[&str]) -> Result<Value> {
        self.send_json::<Value>(Method::GET, segments, None).await
    }
}

#[async_trait]
impl OnfleetApi for OnfleetClient {
    async fn get_my_organization(&self) -> Result<Organization> {
        let payload = self.get_json(&["organization"]).await?;
        Ok(decode(&payload)?)
    }

    async fn get_organization(&self, id: &str) -> Result<Organization> {
        let payload = self.get_json(&["organizations", id]).await?;
        Ok(decode(&payload)?)
    }

    async fn list_administrators(&self) -> Result<Vec<Administrator>> {
        let payload = self.get_json(&["admins"]).await?;
        Ok(decode_list(&payload)?)
    }

    async fn create_administrator(&self, admin: &NewAdministrator) -> Result<Administrator> {
        let payload = self.send_json(Method::POST, &["admins"], Some(admin)).await?;
        Ok(decode(&payload)?)
    }

    async fn update_administrator(
        &self,
        id: &str,
        update: &AdministratorUpdate,
    ) -> Result<Administrator> {
        let payload = self
            .send_json(Method::PUT, &["admins", id], Some(update))
            .await?;
        Ok(decode(&payload)?)
    }

    async fn delete_administrator(&self, id: &str) -> Result<()> {
        self.send::<Value>(Method::DELETE, &["admins", id], None)
            .await?;
        Ok(())
    }
}

/// `Authorization` value: the API key as user name with an empty password
fn basic_auth_header(api_key: &str) -> String {
    let credentials = general_purpose::STANDARD.encode(format!("{}:", api_key));
    format!("Basic {}", credentials)
}

fn parse_body(text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Err(ApiError::InvalidResponse("Empty response body".to_string()).into());
    }

    serde_json::from_str(text).map_err(|e| {
        ApiError::InvalidResponse(format!("Failed to parse response: {}", e)).into()
    })
}

/// Map a non-success status to an [`ApiError`].
fn status_error(status: StatusCode, retry_after: Option<u64>, body: &str) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::FORBIDDEN => ApiError::Forbidden,
        StatusCode::NOT_FOUND => ApiError::NotFound(error_message(body, "Resource not found")),
        StatusCode::TOO_MANY_REQUESTS => {
            let wait = retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            warn!("Rate limited by API, retry after {}s", wait);
            ApiError::RateLimit(Duration::from_secs(wait))
        }
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ApiError::BadRequest(error_message(body, "Bad request"))
        }
        status if status.is_server_error() => {
            ApiError::ServerError(error_message(body, &format!("Server error: {}", status)))
        }
        status => ApiError::InvalidResponse(format!("Unexpected status code: {}", status)),
    }
}

/// Pull a readable message out of an error body.
///
/// The API wraps errors as `{"code": "...", "message": {"message": "...", "cause": ...}}`.
/// Falls back to the raw body, then to `fallback` when the body is empty.
fn error_message(body: &str, fallback: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let message = parsed.as_ref().and_then(|v| {
        let message = v.get("message")?;
        message
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| message.as_str())
            .map(str::to_string)
    });

    match message {
        Some(message) => message,
        None if body.trim().is_empty() => fallback.to_string(),
        None => body.trim().to_string(),
    }
}
