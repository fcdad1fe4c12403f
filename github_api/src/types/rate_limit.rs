use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::Headers;

/// Request quota reported by the `x-ratelimit-*` response headers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub used: Option<u64>,
    pub reset: DateTime<Utc>,
    pub resource: Option<String>,
}

impl RateLimit {
    /// Reads the quota from captured headers. `limit`, `remaining` and
    /// `reset` must all be present and numeric.
    pub fn from_headers(headers: &Headers) -> Option<Self> {
        let number = |name: &str| lookup(headers, name).and_then(|v| v.trim().parse::<u64>().ok());

        let limit = number("x-ratelimit-limit")?;
        let remaining = number("x-ratelimit-remaining")?;
        let reset_secs = i64::try_from(number("x-ratelimit-reset")?).ok()?;
        let reset = DateTime::<Utc>::from_timestamp(reset_secs, 0)?;

        Some(Self {
            limit,
            remaining,
            used: number("x-ratelimit-used"),
            reset,
            resource: lookup(headers, "x-ratelimit-resource").map(str::to_string),
        })
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

pub(crate) fn lookup<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
