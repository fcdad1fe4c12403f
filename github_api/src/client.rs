//! HTTP client for the GitHub REST API.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, IF_NONE_MATCH};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{ApiError, Error};

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("github_api/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the GitHub REST API.
///
/// Non-success responses are returned as [`Error::Api`], classified by
/// status code with the server's message when it sent one.
pub struct Client {
    /// Base URL for the API. Defaults to `https://api.github.com`.
    base_api_url: String,
    token: Option<String>,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the public GitHub API.
    pub fn new() -> Self {
        Self {
            base_api_url: DEFAULT_BASE_URL.to_string(),
            token: None,
        }
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Sends `Authorization: Bearer <token>` with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn get_url(&self, path: &str) -> Result<Url, Error> {
        Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })
    }

    fn default_headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));
        if let Some(token) = &self.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
                tracing::error!("Token is not a valid header value: {}", e);
                Error::RequestFailed
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Fetches `path` and decodes the JSON response into `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.send(path, None).await
    }

    /// Conditional fetch. A resource that still matches `etag` comes back
    /// as an [`ApiError`] of kind `NotModified`.
    pub async fn get_if_none_match<T: DeserializeOwned>(
        &self,
        path: &str,
        etag: &str,
    ) -> Result<T, Error> {
        self.send(path, Some(etag)).await
    }

    async fn send<T: DeserializeOwned>(&self, path: &str, etag: Option<&str>) -> Result<T, Error> {
        let url = self.get_url(path)?;
        let mut headers = self.default_headers()?;
        if let Some(etag) = etag {
            let value = HeaderValue::from_str(etag).map_err(|e| {
                tracing::error!("ETag is not a valid header value: {}", e);
                Error::RequestFailed
            })?;
            headers.insert(IF_NONE_MATCH, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client.get(url).headers(headers).send().await.map_err(|e| {
            tracing::error!("Failed to get resource: {}", e);
            Error::RequestFailed
        })?;

        if !resp.status().is_success() {
            let err = ApiError::from_response(resp).await.map_err(|e| {
                tracing::error!("Failed to read error response body: {}", e);
                Error::RequestFailed
            })?;
            tracing::warn!("Request to {} failed: {}", path, err);
            return Err(err.into());
        }

        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::ParseFailed(e.to_string())
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
