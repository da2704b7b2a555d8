//! Single-pass request pipeline: translate, forward, map.
//!
//! The pipeline owns no retry or backoff policy. Each outbound request is
//! executed once through the injected [`HttpTransport`].

use std::time::Instant;

use error_stack::{Report, ResultExt};

use crate::bidder::{Bidder, RequestData, ResponseData, TypedBid};
use crate::constants::DEFAULT_CURRENCY;
use crate::error::{BidderError, ErrorClass};
use crate::openrtb::BidRequest;

/// Executes outbound requests. Implementations own network I/O, timeouts
/// and TLS.
pub trait HttpTransport {
    /// Send the request and return the raw status and body for any status
    /// code, including errors.
    ///
    /// # Errors
    ///
    /// Returns [`BidderError::Transport`] when no response could be read.
    fn execute(&self, request: &RequestData) -> Result<ResponseData, Report<BidderError>>;
}

/// Aggregated result of running one bidder for one bid request.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub bidder: &'static str,
    pub currency: String,
    pub bids: Vec<TypedBid>,
    /// Errors from individual outbound requests, in request order
    pub errors: Vec<Report<BidderError>>,
    pub requests_sent: usize,
    pub elapsed_ms: u64,
}

/// Run `bidder` against `request`, forwarding every outbound request once.
///
/// # Errors
///
/// Returns an error if the bidder cannot translate the request; failures of
/// individual outbound requests are collected in
/// [`PipelineOutcome::errors`] instead.
pub fn run<B, T>(
    bidder: &B,
    transport: &T,
    request: &BidRequest,
) -> Result<PipelineOutcome, Report<BidderError>>
where
    B: Bidder + ?Sized,
    T: HttpTransport + ?Sized,
{
    let start_time = Instant::now();
    let bidder_name = bidder.bidder_name();

    let requests = bidder.make_requests(request)?;
    log::info!(
        "Running bidder {} with {} outbound requests",
        bidder_name,
        requests.len()
    );

    let mut outcome = PipelineOutcome {
        bidder: bidder_name,
        currency: DEFAULT_CURRENCY.to_string(),
        bids: Vec::new(),
        errors: Vec::new(),
        requests_sent: requests.len(),
        elapsed_ms: 0,
    };

    for request_data in &requests {
        let result = transport
            .execute(request_data)
            .and_then(|response| bidder.make_bids(request, request_data, &response))
            .attach(format!("bidder: {bidder_name}, uri: {}", request_data.uri));

        match result {
            Ok(response) => {
                outcome.currency = response.currency;
                outcome.bids.extend(response.bids);
            }
            Err(err) => {
                log::warn!(
                    "Bidder {} request failed ({}): {:?}",
                    bidder_name,
                    err.current_context().status_code(),
                    err
                );
                outcome.errors.push(err);
            }
        }
    }

    outcome.elapsed_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX);
    log::info!(
        "Bidder {} returned {} bids and {} errors in {}ms",
        bidder_name,
        outcome.bids.len(),
        outcome.errors.len(),
        outcome.elapsed_ms
    );

    Ok(outcome)
}
