//! Bidder parameters carried at `imp.ext.prebid.bidder.flipp`.

use serde::{Deserialize, Serialize};

/// Ad type codes requested for every creative type other than DTX.
pub const DEFAULT_AD_TYPES: &[i64] = &[4309, 641];
/// Ad type code requested for DTX creatives.
pub const DTX_AD_TYPES: &[i64] = &[5061];

const DTX_TAG: &str = "DTX";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImpExtFlippOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_compact: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImpExtFlipp {
    pub publisher_name_identifier: String,
    pub creative_type: String,
    pub site_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_ids: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ImpExtFlippOptions>,
}

/// Creative type as far as ad type selection is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreativeType {
    Dtx,
    Standard,
}

impl CreativeType {
    /// Classify the raw `creativeType` tag. Only an exact `"DTX"` selects the
    /// DTX set.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        if tag == DTX_TAG {
            Self::Dtx
        } else {
            Self::Standard
        }
    }

    #[must_use]
    pub fn ad_types(self) -> &'static [i64] {
        match self {
            Self::Dtx => DTX_AD_TYPES,
            Self::Standard => DEFAULT_AD_TYPES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dtx_selects_single_code() {
        assert_eq!(CreativeType::from_tag("DTX"), CreativeType::Dtx);
        assert_eq!(CreativeType::from_tag("DTX").ad_types(), &[5061]);
    }

    #[test]
    fn test_everything_else_selects_default_pair() {
        for tag in ["NativeX", "", "dtx", "DTX ", "Banner"] {
            assert_eq!(
                CreativeType::from_tag(tag).ad_types(),
                &[4309, 641],
                "tag {tag:?} should use the default ad types"
            );
        }
    }

    #[test]
    fn test_deserialize_full_params() {
        let params: ImpExtFlipp = serde_json::from_value(json!({
            "publisherNameIdentifier": "wishabi-test-publisher",
            "creativeType": "NativeX",
            "siteId": 1243066,
            "zoneIds": [285431],
            "userKey": "abc123",
            "options": { "startCompact": true }
        }))
        .expect("should parse params");

        assert_eq!(params.publisher_name_identifier, "wishabi-test-publisher");
        assert_eq!(params.site_id, 1243066);
        assert_eq!(params.zone_ids, Some(vec![285431]));
        assert_eq!(params.user_key.as_deref(), Some("abc123"));
        assert_eq!(
            params.options,
            Some(ImpExtFlippOptions {
                start_compact: Some(true)
            })
        );
    }

    #[test]
    fn test_deserialize_minimal_params() {
        let params: ImpExtFlipp = serde_json::from_value(json!({
            "publisherNameIdentifier": "pub",
            "creativeType": "DTX",
            "siteId": 7
        }))
        .expect("should parse params");

        assert!(params.zone_ids.is_none());
        assert!(params.user_key.is_none());
        assert!(params.options.is_none());
    }

    #[test]
    fn test_deserialize_rejects_wrong_shape() {
        let result = serde_json::from_value::<ImpExtFlipp>(json!({
            "publisherNameIdentifier": "pub",
            "creativeType": "DTX",
            "siteId": "not-a-number"
        }));
        assert!(result.is_err());

        let result = serde_json::from_value::<ImpExtFlipp>(json!([1, 2, 3]));
        assert!(result.is_err());
    }
}
