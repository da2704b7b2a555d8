//! OpenRTB to Flipp campaign request translation.

use bytes::Bytes;
use error_stack::{Report, ResultExt};
use http::header::{CONTENT_TYPE, USER_AGENT};
use http::{HeaderMap, HeaderValue, Method};
use rand::{CryptoRng, RngCore};
use serde::Deserialize;
use url::Url;
use uuid::Builder;

use super::params::{CreativeType, ImpExtFlipp};
use super::types::{
    CampaignRequestBody, CampaignRequestBodyUser, Location, Placement, PrebidRequest, Properties,
};
use super::{CONTENT_CODE_PARAM, FLIPP_BIDDER, INLINE_DIV_NAME, PLACEMENT_COUNT};
use crate::bidder::RequestData;
use crate::constants::{CONTENT_TYPE_JSON, HEADER_X_FORWARDED_FOR};
use crate::error::BidderError;
use crate::openrtb::{Banner, BidRequest, Imp};

const RELATIVE_PAGE_BASE: &str = "http://relative-page.invalid/";

/// Where a resolved user key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserKeySource {
    OpenRtbUser,
    BidderParams,
    Generated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUserKey {
    pub key: String,
    pub source: UserKeySource,
}

/// Build one outbound request per impression.
///
/// The first failing impression aborts the whole call.
pub(super) fn build_requests<R>(
    endpoint: &str,
    request: &BidRequest,
    rng: &mut R,
) -> Result<Vec<RequestData>, Report<BidderError>>
where
    R: RngCore + CryptoRng + ?Sized,
{
    log::info!(
        "Flipp: building campaign requests for {} impressions (request: {})",
        request.imp.len(),
        request.id
    );

    request
        .imp
        .iter()
        .map(|imp| {
            let body = build_campaign_request(request, imp, &mut *rng)?;
            make_request_data(endpoint, request, &body)
        })
        .collect()
}

/// Translate a single impression into a campaign request body.
pub(super) fn build_campaign_request<R>(
    request: &BidRequest,
    imp: &Imp,
    rng: &mut R,
) -> Result<CampaignRequestBody, Report<BidderError>>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let params = extract_params(imp)?;

    let site = request.site.as_ref().ok_or_else(|| {
        Report::new(BidderError::bad_input(
            "Flipp requires site.page but the request has no site",
        ))
    })?;
    let page_url = parse_page(&site.page).change_context(BidderError::bad_input(format!(
        "Invalid site page URL: {:?}",
        site.page
    )))?;

    let (width, height) = imp
        .banner
        .as_ref()
        .and_then(Banner::primary_size)
        .ok_or_else(|| {
            Report::new(BidderError::bad_input(format!(
                "Impression {} has no banner size",
                imp.id
            )))
        })?;

    let user_key = resolve_user_key(
        request.user.as_ref().and_then(|u| u.id.as_deref()),
        params.user_key.as_deref(),
        rng,
    )?;
    log::debug!(
        "Flipp: user key for impression {} resolved from {:?}",
        imp.id,
        user_key.source
    );

    let creative_type = CreativeType::from_tag(&params.creative_type);

    let placement = Placement {
        ad_types: creative_type.ad_types().to_vec(),
        count: PLACEMENT_COUNT,
        div_name: INLINE_DIV_NAME.to_string(),
        network_id: None,
        prebid: Some(PrebidRequest {
            creative_type: params.creative_type,
            height,
            publisher_name_identifier: params.publisher_name_identifier,
            request_id: request.id.clone(),
            width,
        }),
        properties: Some(Properties {
            content_code: Some(content_code(&page_url)),
            loc: Location::default(),
        }),
        site_id: params.site_id,
        zone_ids: params.zone_ids,
    };

    Ok(CampaignRequestBody {
        accuracy_radius: None,
        ip: request
            .device
            .as_ref()
            .map(|d| d.ip.clone())
            .unwrap_or_default(),
        keywords: split_keywords(&site.keywords),
        placements: vec![placement],
        preferred_language: None,
        url: site.page.clone(),
        user: CampaignRequestBodyUser { key: user_key.key },
    })
}

fn extract_params(imp: &Imp) -> Result<ImpExtFlipp, Report<BidderError>> {
    let raw = imp.bidder_params(FLIPP_BIDDER).ok_or_else(|| {
        Report::new(BidderError::bad_input(format!(
            "Impression {} is missing ext.prebid.bidder.{}",
            imp.id, FLIPP_BIDDER
        )))
    })?;

    ImpExtFlipp::deserialize(raw).change_context(BidderError::bad_input(format!(
        "Impression {} has malformed {} bidder params",
        imp.id, FLIPP_BIDDER
    )))
}

/// Value of the `flipp-content-code` query parameter, or `""` when absent.
/// Parse the page, resolving relative or scheme-less input against a
/// placeholder base so its query string is still readable.
pub(super) fn parse_page(page: &str) -> Result<Url, url::ParseError> {
    match Url::parse(page) {
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(RELATIVE_PAGE_BASE)?;
            Url::options().base_url(Some(&base)).parse(page)
        }
        result => result,
    }
}

pub(super) fn content_code(page_url: &Url) -> String {
    page_url
        .query_pairs()
        .find(|(name, _)| name == CONTENT_CODE_PARAM)
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}

/// Literal comma split: no trimming and no filtering, so `""` yields `[""]`.
pub(super) fn split_keywords(keywords: &str) -> Vec<String> {
    keywords.split(',').map(str::to_string).collect()
}

/// Resolve the campaign user key.
///
/// Candidates are tried in order and the first non-empty one wins:
/// the OpenRTB `user.id`, then the bidder supplied `userKey`. When neither
/// is usable a fresh v4 UUID is drawn from `rng`.
///
/// # Errors
///
/// Returns [`BidderError::RandomSource`] if the random source fails.
pub fn resolve_user_key<R>(
    user_id: Option<&str>,
    bidder_key: Option<&str>,
    rng: &mut R,
) -> Result<ResolvedUserKey, Report<BidderError>>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let candidates = [
        (user_id, UserKeySource::OpenRtbUser),
        (bidder_key, UserKeySource::BidderParams),
    ];

    let preferred = candidates
        .into_iter()
        .find_map(|(key, source)| key.filter(|k| !k.is_empty()).map(|k| (k, source)));

    match preferred {
        Some((key, source)) => Ok(ResolvedUserKey {
            key: key.to_string(),
            source,
        }),
        None => Ok(ResolvedUserKey {
            key: generate_user_key(rng)?,
            source: UserKeySource::Generated,
        }),
    }
}

fn generate_user_key<R>(rng: &mut R) -> Result<String, Report<BidderError>>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut bytes = [0u8; 16];
    rng.try_fill_bytes(&mut bytes)
        .change_context(BidderError::RandomSource {
            message: "Failed to draw random bytes for user key".to_string(),
        })?;

    Ok(Builder::from_random_bytes(bytes).into_uuid().to_string())
}

fn make_request_data(
    endpoint: &str,
    request: &BidRequest,
    body: &CampaignRequestBody,
) -> Result<RequestData, Report<BidderError>> {
    let json = serde_json::to_vec(body).change_context(BidderError::bad_input(
        "Failed to serialize Flipp campaign request",
    ))?;

    log::debug!(
        "Flipp: campaign request body: {}",
        String::from_utf8_lossy(&json)
    );

    let (ua, ip) = request
        .device
        .as_ref()
        .map(|d| (d.ua.as_str(), d.ip.as_str()))
        .unwrap_or_default();

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
    headers.insert(USER_AGENT, header_value("User-Agent", ua)?);
    headers.insert(HEADER_X_FORWARDED_FOR, header_value("X-Forwarded-For", ip)?);

    Ok(RequestData {
        method: Method::POST,
        uri: endpoint.to_string(),
        body: Bytes::from(json),
        headers,
    })
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, Report<BidderError>> {
    HeaderValue::from_str(value).change_context(BidderError::bad_input(format!(
        "Device value for {name} is not a valid header value"
    )))
}
