//! Error types for the API client.

use std::collections::HashMap;

use reqwest::{header::HeaderMap, StatusCode};

use crate::types::{lookup, ErrorBody, RateLimit};

/// Response headers captured on an [`ApiError`], keyed by header name.
pub type Headers = HashMap<String, String>;

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request never produced a response (bad URL, network error, timeout).
    #[error("Request failed")]
    RequestFailed,
    /// A success response whose body could not be decoded into the expected type.
    #[error("Failed to parse response: {0}")]
    ParseFailed(String),
    /// The API answered with a non-success status.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Classification of a failed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    Forbidden,
    NotFound,
    NotModified,
    Unauthorized,
    InternalServer,
    /// Any status without a dedicated kind.
    Generic,
}

/// Statuses with a dedicated kind, and the message used when the body has none.
const STATUS_TABLE: [(StatusCode, ApiErrorKind, &str); 5] = [
    (
        StatusCode::FORBIDDEN,
        ApiErrorKind::Forbidden,
        "You do not have the permissions to access or modify this resource.",
    ),
    (
        StatusCode::NOT_FOUND,
        ApiErrorKind::NotFound,
        "The server is unable to locate the requested resource.",
    ),
    (
        StatusCode::NOT_MODIFIED,
        ApiErrorKind::NotModified,
        "This resource has not been modified since the last request.",
    ),
    (
        StatusCode::UNAUTHORIZED,
        ApiErrorKind::Unauthorized,
        "You are unauthorized to view the requested resource.",
    ),
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ApiErrorKind::InternalServer,
        "The request was unable to be processed due to an internal server error.",
    ),
];

impl ApiErrorKind {
    pub fn from_status(status: StatusCode) -> Self {
        STATUS_TABLE
            .iter()
            .find(|(code, _, _)| *code == status)
            .map(|(_, kind, _)| *kind)
            .unwrap_or(ApiErrorKind::Generic)
    }

    /// Fixed fallback message for this kind. `Generic` has none; its fallback
    /// depends on the status code.
    pub fn default_message(self) -> Option<&'static str> {
        STATUS_TABLE
            .iter()
            .find(|(_, kind, _)| *kind == self)
            .map(|(_, _, message)| *message)
    }
}

/// A non-success API response, classified by status code.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (HTTP {})", .status.as_u16())]
pub struct ApiError {
    kind: ApiErrorKind,
    status: StatusCode,
    message: String,
    headers: Headers,
}

impl ApiError {
    /// Reads the body of a failed response and classifies it.
    ///
    /// Only a failure to read the body is returned as an error; an unusable
    /// body just means the default message is used.
    pub async fn from_response(response: reqwest::Response) -> Result<Self, reqwest::Error> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        Ok(classify(status, &headers, &body))
    }

    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Looks up a captured header, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        lookup(&self.headers, name)
    }

    pub fn rate_limit(&self) -> Option<RateLimit> {
        RateLimit::from_headers(&self.headers)
    }

    /// True when GitHub refused the request because the quota ran out, or
    /// because a secondary rate limit asked the client to back off
    /// (`retry-after`).
    pub fn is_rate_limited(&self) -> bool {
        (self.status == StatusCode::FORBIDDEN || self.status == StatusCode::TOO_MANY_REQUESTS)
            && (self.header("retry-after").is_some()
                || self.rate_limit().is_some_and(|rl| rl.is_exhausted()))
    }
}

/// Turns the parts of a failed response into an [`ApiError`].
///
/// Pure and infallible: a body that is empty or not a structured error
/// falls back to the default message for the status.
pub fn classify(status: StatusCode, headers: &HeaderMap, body: &[u8]) -> ApiError {
    let headers = collect_headers(headers);
    let kind = ApiErrorKind::from_status(status);
    let message = ErrorBody::message_from(body)
        .or_else(|| kind.default_message().map(str::to_string))
        .unwrap_or_else(|| reason_phrase(status));

    tracing::debug!(status = status.as_u16(), ?kind, "Classified error response: {}", message);

    ApiError {
        kind,
        status,
        message,
        headers,
    }
}

// Duplicate names keep the last value.
fn collect_headers(headers: &HeaderMap) -> Headers {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

fn reason_phrase(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => reason.to_string(),
        None => status.as_u16().to_string(),
    }
}
