//! Error types for the Flipp bidder.
//!
//! All fallible operations return [`error_stack::Report<BidderError>`] so that
//! lower level causes (serde, url parsing, the random source) stay attached to
//! the classified error that callers act on.

use derive_more::{Display, Error};
use http::StatusCode;

/// Classified errors produced while translating or forwarding a bid request.
#[derive(Debug, Display, Error)]
pub enum BidderError {
    /// The caller supplied something we cannot translate, or the vendor
    /// rejected the shape of the request.
    #[display("Bad input: {message}")]
    BadInput { message: String },

    /// The vendor answered with an unexpected status or broke its own
    /// response contract.
    #[display("Bad server response: {message}")]
    BadServerResponse { message: String },

    /// The random source could not produce bytes for a user key.
    #[display("Random source error: {message}")]
    RandomSource { message: String },

    /// Settings could not be loaded or failed validation.
    #[display("Configuration error: {message}")]
    Configuration { message: String },

    /// The transport could not deliver the request or read the response.
    #[display("Transport error: {message}")]
    Transport { message: String },
}

/// Maps a classified error onto an HTTP status class.
pub trait ErrorClass {
    /// HTTP status that best describes who is at fault.
    fn status_code(&self) -> StatusCode;

    /// Whether the caller (rather than the vendor or this service) caused it.
    fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

impl ErrorClass for BidderError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadInput { .. } => StatusCode::BAD_REQUEST,
            Self::BadServerResponse { .. } | Self::Transport { .. } => StatusCode::BAD_GATEWAY,
            Self::RandomSource { .. } | Self::Configuration { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl BidderError {
    /// Shorthand for [`BidderError::BadInput`].
    pub fn bad_input(message: impl Into<String>) -> Self {
        Self::BadInput {
            message: message.into(),
        }
    }

    /// Shorthand for [`BidderError::BadServerResponse`].
    pub fn bad_server_response(message: impl Into<String>) -> Self {
        Self::BadServerResponse {
            message: message.into(),
        }
    }
}
