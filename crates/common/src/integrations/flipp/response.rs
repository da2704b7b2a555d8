//! Flipp campaign response to OpenRTB bid translation.

use error_stack::{Report, ResultExt};
use http::StatusCode;

use super::types::{CampaignResponseBody, InlineModel};
use crate::bidder::{Bid, BidType, BidderResponse, ResponseData, TypedBid};
use crate::error::BidderError;
use crate::openrtb::BidRequest;

const BAD_REQUEST_MESSAGE: &str =
    "Unexpected status code: 400. Bad request from publisher. Run with request.debug = 1 for more info.";

/// Map one campaign service response into bids.
///
/// Status handling, first match wins: 204 is a no-bid, 400 is bad input,
/// anything else but 200 is a bad server response.
pub(super) fn map_response(
    request: &BidRequest,
    response: &ResponseData,
) -> Result<BidderResponse, Report<BidderError>> {
    match response.status {
        StatusCode::NO_CONTENT => return Ok(BidderResponse::no_bid()),
        StatusCode::BAD_REQUEST => {
            log::warn!("Flipp: campaign service rejected request {}", request.id);
            return Err(Report::new(BidderError::bad_input(BAD_REQUEST_MESSAGE)));
        }
        StatusCode::OK => {}
        status => {
            log::warn!("Flipp: campaign service returned status {}", status);
            return Err(Report::new(BidderError::bad_server_response(format!(
                "Unexpected status code: {}. Run with request.debug = 1 for more info.",
                status.as_u16()
            ))));
        }
    }

    let body: CampaignResponseBody = serde_json::from_slice(&response.body).change_context(
        BidderError::bad_input("Failed to parse Flipp campaign response"),
    )?;

    let mut bidder_response = BidderResponse::with_capacity(request.imp.len());
    for (index, decision) in body.inline_decisions().iter().enumerate() {
        bidder_response.bids.push(TypedBid {
            bid: decision_to_bid(index, decision)?,
            bid_type: BidType::Banner,
        });
    }

    log::info!(
        "Flipp: mapped {} bids for request {}",
        bidder_response.bids.len(),
        request.id
    );

    Ok(bidder_response)
}

/// A decision must carry its price, markup and at least one sized content
/// block; anything less is a broken upstream response.
fn decision_to_bid(index: usize, decision: &InlineModel) -> Result<Bid, Report<BidderError>> {
    let missing = |what: &str| {
        Report::new(BidderError::bad_server_response(format!(
            "Flipp decision {index} (adId {}) is missing {what}",
            decision.ad_id
        )))
    };

    let prebid = decision.prebid.as_ref().ok_or_else(|| missing("prebid"))?;
    let price = prebid.cpm.ok_or_else(|| missing("prebid.cpm"))?;
    let adm = prebid
        .creative
        .clone()
        .ok_or_else(|| missing("prebid.creative"))?;
    let content = decision
        .contents
        .first()
        .ok_or_else(|| missing("contents"))?;
    let data = content
        .data
        .as_ref()
        .ok_or_else(|| missing("contents[0].data"))?;

    Ok(Bid {
        id: decision.ad_id.to_string(),
        price,
        adm,
        crid: decision.creative_id.to_string(),
        w: data.width,
        h: data.height,
    })
}
