//! Bidder seam: the trait every vendor adapter implements plus the request and
//! response descriptors exchanged with the transport.

use bytes::Bytes;
use error_stack::Report;
use http::{HeaderMap, Method, StatusCode};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CURRENCY;
use crate::error::BidderError;
use crate::openrtb::BidRequest;

/// Trait implemented by all vendor bidders.
pub trait Bidder: Send + Sync {
    /// Unique identifier for this bidder (e.g., "flipp").
    fn bidder_name(&self) -> &'static str;

    /// Translate an OpenRTB request into one outbound request per line item.
    ///
    /// Implementations must be all-or-nothing: the first failing line item
    /// aborts the call and no descriptors are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if any line item cannot be translated.
    fn make_requests(&self, request: &BidRequest)
        -> Result<Vec<RequestData>, Report<BidderError>>;

    /// Translate the vendor's answer to one outbound request into bids.
    ///
    /// # Errors
    ///
    /// Returns a classified error for unexpected statuses or malformed bodies.
    fn make_bids(
        &self,
        request: &BidRequest,
        request_data: &RequestData,
        response: &ResponseData,
    ) -> Result<BidderResponse, Report<BidderError>>;
}

/// Outbound HTTP request produced by a bidder.
#[derive(Debug, Clone)]
pub struct RequestData {
    pub method: Method,
    pub uri: String,
    pub body: Bytes,
    pub headers: HeaderMap,
}

/// Raw HTTP response handed back by the transport.
#[derive(Debug, Clone)]
pub struct ResponseData {
    pub status: StatusCode,
    pub body: Bytes,
}

impl ResponseData {
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Media type of a bid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BidType {
    Banner,
}

/// Standardized bid returned to the exchange.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bid {
    /// Vendor ad identifier
    pub id: String,
    /// Bid price in CPM
    pub price: f64,
    /// Creative markup (HTML/JS)
    pub adm: String,
    /// Vendor creative identifier
    pub crid: String,
    pub w: i64,
    pub h: i64,
}

/// A bid tagged with its media type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypedBid {
    pub bid: Bid,
    pub bid_type: BidType,
}

/// All bids produced from one vendor response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BidderResponse {
    pub currency: String,
    pub bids: Vec<TypedBid>,
}

impl BidderResponse {
    /// Create an empty response with room for `capacity` bids.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            bids: Vec::with_capacity(capacity),
        }
    }

    /// Create a no-bid response.
    #[must_use]
    pub fn no_bid() -> Self {
        Self::with_capacity(0)
    }
}
