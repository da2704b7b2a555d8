use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Minimal subset of OpenRTB 2.x bid request consumed by the bidder.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BidRequest {
    /// Unique ID of the bid request, provided by the exchange.
    pub id: String,
    #[serde(default)]
    pub imp: Vec<Imp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<Site>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<Device>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Imp {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<Banner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext: Option<ImpExt>,
    #[serde(default, flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Banner {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub format: Vec<Format>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h: Option<i64>,
    #[serde(default, flatten)]
    pub extra: HashMap<String, Value>,
}

impl Banner {
    /// Width and height of the first declared format, falling back to the
    /// banner's own `w`/`h`.
    #[must_use]
    pub fn primary_size(&self) -> Option<(i64, i64)> {
        self.format
            .first()
            .map(|f| (f.w, f.h))
            .or(self.w.zip(self.h))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Format {
    pub w: i64,
    pub h: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Site {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default)]
    pub page: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default, flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Device {
    #[serde(default)]
    pub ua: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default, flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ImpExt {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prebid: Option<PrebidImpExt>,
    #[serde(default, flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PrebidImpExt {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub bidder: HashMap<String, Value>,
}

impl Imp {
    /// Raw bidder parameters at `ext.prebid.bidder.<bidder>`, if present.
    #[must_use]
    pub fn bidder_params(&self, bidder: &str) -> Option<&Value> {
        self.ext.as_ref()?.prebid.as_ref()?.bidder.get(bidder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_minimal_request() {
        let request: BidRequest = serde_json::from_value(json!({
            "id": "req-1",
            "imp": [{
                "id": "imp-1",
                "banner": { "format": [{ "w": 300, "h": 600 }] },
                "ext": { "prebid": { "bidder": { "flipp": { "siteId": 1 } } } }
            }],
            "site": { "page": "https://example.com/", "keywords": "a,b" },
            "device": { "ip": "10.0.0.1", "ua": "Mozilla/5.0" },
            "tmax": 500
        }))
        .expect("should parse request");

        assert_eq!(request.id, "req-1");
        assert_eq!(request.imp.len(), 1);
        assert!(request.user.is_none());
        assert_eq!(request.extra.get("tmax"), Some(&json!(500)));

        let imp = &request.imp[0];
        assert_eq!(
            imp.banner.as_ref().and_then(Banner::primary_size),
            Some((300, 600))
        );
        assert_eq!(imp.bidder_params("flipp"), Some(&json!({ "siteId": 1 })));
        assert!(imp.bidder_params("other").is_none());
    }

    #[test]
    fn test_primary_size_falls_back_to_banner_dimensions() {
        let banner = Banner {
            w: Some(320),
            h: Some(50),
            ..Default::default()
        };
        assert_eq!(banner.primary_size(), Some((320, 50)));

        let banner = Banner {
            w: Some(320),
            ..Default::default()
        };
        assert_eq!(banner.primary_size(), None);
    }

    #[test]
    fn test_bidder_params_missing_ext() {
        let imp = Imp {
            id: "imp-1".to_string(),
            ..Default::default()
        };
        assert!(imp.bidder_params("flipp").is_none());
    }
}
