//! Blocking HTTP transport backed by `ureq`.

use std::time::Duration;

use error_stack::{Report, ResultExt};
use flipp_bidder_common::bidder::{RequestData, ResponseData};
use flipp_bidder_common::error::BidderError;
use flipp_bidder_common::pipeline::HttpTransport;
use ureq::Agent;

/// Sends each request once and hands back the raw status for every code.
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build();

        Self {
            agent: config.into(),
        }
    }
}

impl HttpTransport for UreqTransport {
    fn execute(&self, request: &RequestData) -> Result<ResponseData, Report<BidderError>> {
        let transport_error = |what: &str| BidderError::Transport {
            message: format!("{} for {}", what, request.uri),
        };

        let mut builder = http::Request::builder()
            .method(request.method.clone())
            .uri(request.uri.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let http_request = builder
            .body(request.body.to_vec())
            .change_context(transport_error("Failed to build request"))?;

        log::debug!("Sending {} {}", request.method, request.uri);

        let mut response = self
            .agent
            .run(http_request)
            .change_context(transport_error("Request failed"))?;

        let status = response.status();
        let body = response
            .body_mut()
            .read_to_vec()
            .change_context(transport_error("Failed to read response body"))?;

        log::debug!("Received {} ({} bytes) from {}", status, body.len(), request.uri);

        Ok(ResponseData::new(status, body))
    }
}
