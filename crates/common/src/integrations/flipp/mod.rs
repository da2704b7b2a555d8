//! Flipp integration.
//!
//! Translates OpenRTB banner impressions into Flipp campaign requests (one
//! per impression) and maps the campaign service's inline decisions back into
//! banner bids.

use std::sync::Arc;

use error_stack::Report;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::bidder::{Bidder, BidderResponse, RequestData, ResponseData};
use crate::error::BidderError;
use crate::openrtb::BidRequest;
use crate::settings::Settings;

pub mod params;
mod request;
mod response;
pub mod types;

pub use request::{resolve_user_key, ResolvedUserKey, UserKeySource};

pub const FLIPP_BIDDER: &str = "flipp";
pub(crate) const INLINE_DIV_NAME: &str = "inline";
pub(crate) const PLACEMENT_COUNT: i64 = 1;
pub(crate) const CONTENT_CODE_PARAM: &str = "flipp-content-code";

/// Configuration for the Flipp bidder.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct FlippConfig {
    /// Whether the Flipp bidder is registered
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Campaign service endpoint
    #[validate(url)]
    pub endpoint: String,
}

fn default_enabled() -> bool {
    true
}

/// Flipp campaign service adapter.
pub struct FlippAdapter {
    endpoint: String,
}

impl FlippAdapter {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// Same as [`Bidder::make_requests`] but draws generated user keys from
    /// the supplied random source.
    ///
    /// # Errors
    ///
    /// Returns the first error hit by any impression; no requests are
    /// returned in that case.
    pub fn make_requests_with_rng<R>(
        &self,
        request: &BidRequest,
        rng: &mut R,
    ) -> Result<Vec<RequestData>, Report<BidderError>>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        request::build_requests(&self.endpoint, request, rng)
    }
}

impl Bidder for FlippAdapter {
    fn bidder_name(&self) -> &'static str {
        FLIPP_BIDDER
    }

    fn make_requests(
        &self,
        request: &BidRequest,
    ) -> Result<Vec<RequestData>, Report<BidderError>> {
        self.make_requests_with_rng(request, &mut OsRng)
    }

    fn make_bids(
        &self,
        request: &BidRequest,
        _request_data: &RequestData,
        response: &ResponseData,
    ) -> Result<BidderResponse, Report<BidderError>> {
        response::map_response(request, response)
    }
}

/// Register the Flipp bidder when it is enabled in settings.
#[must_use]
pub fn register_bidders(settings: &Settings) -> Vec<Arc<dyn Bidder>> {
    let config = &settings.flipp;
    if !config.enabled {
        log::debug!("Flipp bidder is disabled");
        return Vec::new();
    }

    log::info!("Registering Flipp bidder (endpoint: {})", config.endpoint);
    vec![Arc::new(FlippAdapter::new(config.endpoint.clone()))]
}
