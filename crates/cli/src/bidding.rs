//! Bid traffic commands: inspect outbound requests, map saved responses and
//! run the full pipeline against the live endpoint.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use flipp_bidder_common::bidder::{Bidder, BidderResponse, RequestData, ResponseData};
use flipp_bidder_common::error::ErrorClass;
use flipp_bidder_common::integrations::register_bidders;
use flipp_bidder_common::openrtb::BidRequest;
use flipp_bidder_common::pipeline;
use flipp_bidder_common::settings::Settings;
use http::StatusCode;
use serde::Serialize;
use serde_json::Value as Json;

use crate::error::CliError;
use crate::transport::UreqTransport;

/// Printable form of an outbound request.
#[derive(Debug, Serialize)]
pub(crate) struct RequestView {
    pub bidder: &'static str,
    pub method: String,
    pub uri: String,
    pub headers: BTreeMap<String, String>,
    pub body: Json,
}

impl RequestView {
    fn new(bidder: &'static str, request_data: &RequestData) -> Result<Self, CliError> {
        let headers = request_data
            .headers
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        Ok(Self {
            bidder,
            method: request_data.method.to_string(),
            uri: request_data.uri.clone(),
            headers,
            body: serde_json::from_slice(&request_data.body)?,
        })
    }
}

fn read_bid_request(file: &Path) -> Result<BidRequest, CliError> {
    let content = fs::read_to_string(file)?;
    serde_json::from_str(&content)
        .map_err(|e| CliError::Json(format!("Invalid bid request {}: {e}", file.display())))
}

fn enabled_bidders(settings: &Settings) -> Result<Vec<Arc<dyn Bidder>>, CliError> {
    let bidders = register_bidders(settings);
    if bidders.is_empty() {
        return Err(CliError::Usage(
            "no bidders are enabled in the configuration".to_string(),
        ));
    }
    Ok(bidders)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn describe_requests(
    bidders: &[Arc<dyn Bidder>],
    request: &BidRequest,
) -> Result<Vec<RequestView>, CliError> {
    let mut views = Vec::new();
    for bidder in bidders {
        for request_data in bidder.make_requests(request)? {
            views.push(RequestView::new(bidder.bidder_name(), &request_data)?);
        }
    }
    Ok(views)
}

pub(crate) fn map_saved_response(
    bidders: &[Arc<dyn Bidder>],
    request: &BidRequest,
    response: &ResponseData,
) -> Result<Vec<BidderResponse>, CliError> {
    let mut mapped = Vec::new();
    for bidder in bidders {
        let requests = bidder.make_requests(request)?;
        let request_data = requests.first().ok_or_else(|| {
            CliError::Usage("bid request has no impressions to pair with".to_string())
        })?;
        mapped.push(bidder.make_bids(request, request_data, response)?);
    }
    Ok(mapped)
}

/// Print the outbound request descriptors for a bid request file.
pub fn requests(settings: &Settings, request_file: PathBuf) -> Result<(), CliError> {
    let request = read_bid_request(&request_file)?;
    let bidders = enabled_bidders(settings)?;

    let views = describe_requests(&bidders, &request)?;
    log::info!("Built {} outbound requests", views.len());
    print_json(&views)
}

/// Map a saved vendor response to bids for a bid request file.
pub fn bids(
    settings: &Settings,
    request_file: PathBuf,
    status: u16,
    body_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let request = read_bid_request(&request_file)?;
    let bidders = enabled_bidders(settings)?;

    let status = StatusCode::from_u16(status)
        .map_err(|e| CliError::Usage(format!("invalid status code {status}: {e}")))?;
    let body = match body_file {
        Some(path) => fs::read(path)?,
        None => Vec::new(),
    };

    let mapped = map_saved_response(&bidders, &request, &ResponseData::new(status, body))?;
    print_json(&mapped)
}

/// Translate, forward and map a bid request against the configured endpoint.
pub fn send(settings: &Settings, request_file: PathBuf) -> Result<(), CliError> {
    let request = read_bid_request(&request_file)?;
    let bidders = enabled_bidders(settings)?;
    let transport = UreqTransport::new(Duration::from_millis(settings.transport.timeout_ms));

    let mut responses = Vec::new();
    for bidder in &bidders {
        let outcome = pipeline::run(bidder.as_ref(), &transport, &request)?;
        for err in &outcome.errors {
            eprintln!(
                "{} request failed ({}): {:?}",
                outcome.bidder,
                err.current_context().status_code(),
                err
            );
        }
        responses.push(BidderResponse {
            currency: outcome.currency,
            bids: outcome.bids,
        });
    }

    print_json(&responses)
}
