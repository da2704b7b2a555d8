#[cfg(test)]
pub mod tests {
    use rand::{CryptoRng, RngCore};
    use serde_json::{json, Value as Json};

    use crate::openrtb::BidRequest;
    use crate::settings::Settings;

    pub fn crate_test_settings_str() -> String {
        r#"
            [flipp]
            enabled = true
            endpoint = "https://flipp.example.com/prebid_campaigns"

            [transport]
            timeout_ms = 500
            "#
        .to_string()
    }

    pub fn create_test_settings() -> Settings {
        let toml_str = crate_test_settings_str();
        Settings::from_toml(&toml_str).expect("Invalid config")
    }

    /// A single-impression request carrying every field the Flipp bidder reads.
    pub fn flipp_bid_request() -> BidRequest {
        serde_json::from_value(json!({
            "id": "test-request-id",
            "imp": [{
                "id": "test-imp-id",
                "banner": { "format": [{ "w": 300, "h": 2400 }] },
                "ext": {
                    "prebid": {
                        "bidder": {
                            "flipp": {
                                "publisherNameIdentifier": "wishabi-test-publisher",
                                "creativeType": "NativeX",
                                "siteId": 1243066,
                                "zoneIds": [285431]
                            }
                        }
                    }
                }
            }],
            "site": {
                "page": "https://www.example.com/weekly-ad?flipp-content-code=abc",
                "keywords": "sports,news"
            },
            "device": {
                "ip": "123.123.123.123",
                "ua": "Mozilla/5.0 (test)"
            },
            "user": { "id": "openrtb-user" }
        }))
        .expect("Invalid test bid request")
    }

    /// A campaign service decision with one sized content block.
    pub fn decision_json(ad_id: i64, creative_id: i64, cpm: f64, width: i64, height: i64) -> Json {
        json!({
            "adId": ad_id,
            "advertiserId": 1988027,
            "campaignId": 63285392,
            "creativeId": creative_id,
            "flightId": 164465337,
            "contents": [{
                "type": "raw",
                "data": { "width": width, "height": height, "customData": {} }
            }],
            "prebid": {
                "cpm": cpm,
                "creative": format!("<creative {ad_id}>"),
                "creativeType": "NativeX",
                "requestId": "test-request-id"
            }
        })
    }

    /// Random source that is always exhausted.
    pub struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            unreachable!("FailingRng only supports try_fill_bytes")
        }

        fn next_u64(&mut self) -> u64 {
            unreachable!("FailingRng only supports try_fill_bytes")
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            unreachable!("FailingRng only supports try_fill_bytes")
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new(std::io::Error::new(
                std::io::ErrorKind::Other,
                "entropy source exhausted",
            )))
        }
    }

    impl CryptoRng for FailingRng {}
}
