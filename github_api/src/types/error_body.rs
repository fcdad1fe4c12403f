use serde::{Deserialize, Serialize};

/// Structured error payload GitHub returns alongside a failed request.
///
/// Every field is optional: servers (and proxies in front of them) are free
/// to send any shape, and the classifier only cares about `message`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: Option<String>,
    pub documentation_url: Option<String>,
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

/// A single validation failure inside an [`ErrorBody`].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorDetail {
    pub resource: Option<String>,
    pub field: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
}

impl ErrorBody {
    /// Best-effort decode of a raw response body.
    ///
    /// Returns `None` for an empty body, non-JSON content, a non-object
    /// payload, or an object without a string `message`. The rest of the
    /// object is not validated against [`ErrorBody`].
    pub fn message_from(body: &[u8]) -> Option<String> {
        if body.is_empty() {
            return None;
        }
        let value = match serde_json::from_slice::<serde_json::Value>(body) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("Error body is not JSON: {}", e);
                return None;
            }
        };
        value.get("message")?.as_str().map(str::to_string)
    }
}
