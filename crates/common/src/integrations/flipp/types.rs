//! Flipp campaign API wire types.
//!
//! Field names are part of the contract with the vendor. Request types keep
//! the exact casing the campaign service expects, including the snake case
//! `accuracy_radius` and `preferred_language` keys.

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

// ============================================================================
// Campaign request
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CampaignRequestBody {
    /// Accuracy radius from geo lookup for more precise targeting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy_radius: Option<i64>,

    /// User IP forwarded to the campaign service
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ip: String,

    pub keywords: Vec<String>,

    pub placements: Vec<Placement>,

    /// Preferred flyer language (ISO 639-1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<String>,

    /// The URL of the requesting page
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,

    pub user: CampaignRequestBodyUser,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CampaignRequestBodyUser {
    /// Key used to track the user for retargeting
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub ad_types: Vec<i64>,

    pub count: i64,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub div_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prebid: Option<PrebidRequest>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,

    pub site_id: i64,

    /// Passed through from bidder params; `null` when they were omitted
    pub zone_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PrebidRequest {
    pub creative_type: String,
    pub height: i64,
    pub publisher_name_identifier: String,
    pub request_id: String,
    pub width: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Properties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_code: Option<String>,

    #[serde(default)]
    pub loc: Location,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy_radius: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metro_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
}

// ============================================================================
// Campaign response
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CampaignResponseBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_retrieval: Option<Json>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decisions: Option<Decisions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl CampaignResponseBody {
    /// Decisions for the inline placement group; empty when the service
    /// omitted `decisions` or `decisions.inline`.
    #[must_use]
    pub fn inline_decisions(&self) -> &[InlineModel] {
        self.decisions
            .as_ref()
            .and_then(|d| d.inline.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Decisions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline: Option<Vec<InlineModel>>,
}

/// One filled slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct InlineModel {
    #[serde(default)]
    pub ad_id: i64,
    #[serde(default)]
    pub advertiser_id: i64,
    #[serde(default)]
    pub campaign_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub click_url: Option<String>,
    #[serde(default)]
    pub contents: Vec<Content>,
    #[serde(default)]
    pub creative_id: i64,
    #[serde(default)]
    pub flight_id: i64,
    #[serde(default)]
    pub height: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impression_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prebid: Option<PrebidResponse>,
    #[serde(default)]
    pub priority_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storefront: Option<Storefront>,
    #[serde(default)]
    pub width: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ContentData>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContentData {
    /// Custom data returned by the ad server, usually a JSON string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<Json>,
    #[serde(default)]
    pub height: i64,
    #[serde(default)]
    pub width: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PrebidResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creative: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creative_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Flyer and merchant metadata attached to a decision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Storefront {
    #[serde(rename = "campaignConfig", default, skip_serializing_if = "Option::is_none")]
    pub campaign_config: Option<Json>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flyer_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flyer_run_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flyer_type_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_fallback: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storefront_logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storefront_payload_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<String>,
}
