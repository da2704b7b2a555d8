use http::header::HeaderName;

pub const HEADER_X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Prefix for environment variables that override settings.
pub const ENV_PREFIX: &str = "FLIPP_BIDDER";
pub const ENV_SEPARATOR: &str = "__";

/// Fixed currency for every bid set the bidder produces.
pub const DEFAULT_CURRENCY: &str = "USD";
