mod error_body;
pub use self::error_body::{ErrorBody, ErrorDetail};

mod rate_limit;
pub(crate) use self::rate_limit::lookup;
pub use self::rate_limit::RateLimit;
