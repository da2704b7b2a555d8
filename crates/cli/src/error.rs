//! CLI error types.

use std::fmt;

use error_stack::Report;
use flipp_bidder_common::error::BidderError;

#[derive(Debug)]
pub enum CliError {
    /// Configuration file error
    Config(String),
    /// IO error
    Io(std::io::Error),
    /// JSON input error
    Json(String),
    /// Usage error (bad flag combination or value)
    Usage(String),
    /// Translation or mapping error from the bidder
    Bidder(Report<BidderError>),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Io(err) => write!(f, "IO error: {}", err),
            CliError::Json(msg) => write!(f, "JSON error: {}", msg),
            CliError::Usage(msg) => write!(f, "Usage error: {}", msg),
            CliError::Bidder(report) => write!(f, "{}", report.current_context()),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(err) => Some(err),
            CliError::Bidder(report) => Some(report.current_context()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Json(err.to_string())
    }
}

impl From<Report<BidderError>> for CliError {
    fn from(report: Report<BidderError>) -> Self {
        match report.current_context() {
            BidderError::Configuration { .. } => CliError::Config(format!("{:?}", report)),
            _ => CliError::Bidder(report),
        }
    }
}
