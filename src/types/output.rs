use std::collections::HashMap;

use http::{HeaderMap, StatusCode};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Result of one capture call.
///
/// `result` is the response body exactly as the service returned it. The
/// shape depends on the requested output and encoding, so it is kept as
/// free-form JSON and validated by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureOutput {
    /// Response body as returned by the service
    pub result: Value,
    /// Metadata extracted from the response headers
    pub meta_data: MetaData,
    /// The untransformed transport response; only present when
    /// `include_raw_response` was enabled at client construction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawResponse>,
}

impl CaptureOutput {
    pub(crate) fn from_raw(raw: RawResponse, include_raw: bool) -> Self {
        let meta_data = MetaData::from_headers(&raw.headers);
        if include_raw {
            Self {
                result: raw.body.clone(),
                meta_data,
                raw: Some(raw),
            }
        } else {
            Self {
                result: raw.body,
                meta_data,
                raw: None,
            }
        }
    }
}

/// Billing and rate-limit metadata the service attaches to every response.
///
/// Numeric fields are `None` when the corresponding header is missing or not
/// a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaData {
    /// Credits left on the account before this request was billed
    pub credits_left_before_request: Option<u64>,
    /// Unix timestamp at which the credit balance refills
    pub credits_refill_timestamp: Option<u64>,
    /// Service-side identifier of this API call
    pub api_call_id: Option<String>,
    /// Content type of the response body
    pub content_type: Option<String>,
    /// Content length of the response body in bytes
    pub content_length: Option<u64>,
    /// Maximum allowed requests per second
    pub rate_limit_max_per_second: Option<u64>,
    /// Requests left in the current rate-limit window
    pub rate_limit_remaining: Option<u64>,
}

impl MetaData {
    /// Extracts capture metadata from the service's response headers.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            credits_left_before_request: parse_numeric_header(headers, "x-credits-remaining-before"),
            credits_refill_timestamp: parse_numeric_header(headers, "x-credits-refill-timestamp"),
            api_call_id: parse_string_header(headers, "x-api-call-id"),
            content_type: parse_string_header(headers, "content-type"),
            content_length: parse_numeric_header(headers, "content-length"),
            rate_limit_max_per_second: parse_numeric_header(headers, "x-ratelimit-limit"),
            rate_limit_remaining: parse_numeric_header(headers, "x-ratelimit-remaining"),
        }
    }
}

/// Helper method to parse numeric header values
fn parse_numeric_header(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers.get(name)?.to_str().ok()?.parse().ok()
}

/// Helper method to parse string header values
fn parse_string_header(headers: &HeaderMap, name: &str) -> Option<String> {
    Some(headers.get(name)?.to_str().ok()?.to_owned())
}

/// A transport response before normalization: status, headers and decoded
/// JSON body. Attached to [`CaptureOutput`] for diagnostics when requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawResponse {
    /// HTTP status code of the response
    #[serde(serialize_with = "serialize_status")]
    pub status: StatusCode,
    /// Full response header map
    #[serde(serialize_with = "serialize_headers")]
    pub headers: HeaderMap,
    /// Decoded JSON response body
    pub body: Value,
}

impl RawResponse {
    pub(crate) async fn from_response(response: reqwest::Response) -> crate::Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.json().await?;
        Ok(Self {
            status,
            headers,
            body,
        })
    }
}

fn serialize_status<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

/// Custom serializer for the response header map
fn serialize_headers<S>(headers: &HeaderMap, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let map: HashMap<String, String> = headers
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_str().unwrap_or("").to_string()))
        .collect();
    map.serialize(serializer)
}

#[cfg(test)]
mod tests {
    use http::header::{HeaderValue, CONTENT_TYPE};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn service_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-credits-remaining-before", HeaderValue::from_static("100"));
        headers.insert(
            "x-credits-refill-timestamp",
            HeaderValue::from_static("1642932140"),
        );
        headers.insert("x-api-call-id", HeaderValue::from_static("xyz-123"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("content-length", HeaderValue::from_static("1200"));
        headers.insert("x-ratelimit-limit", HeaderValue::from_static("100"));
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("99"));
        headers
    }

    #[test]
    fn test_metadata_extraction() {
        let meta = MetaData::from_headers(&service_headers());

        assert_eq!(
            meta,
            MetaData {
                credits_left_before_request: Some(100),
                credits_refill_timestamp: Some(1_642_932_140),
                api_call_id: Some("xyz-123".to_string()),
                content_type: Some("application/json".to_string()),
                content_length: Some(1200),
                rate_limit_max_per_second: Some(100),
                rate_limit_remaining: Some(99),
            }
        );
    }

    #[test]
    fn test_missing_and_malformed_headers() {
        let mut headers = service_headers();
        headers.remove("x-credits-remaining-before");
        headers.insert("x-ratelimit-limit", HeaderValue::from_static("lots"));

        let meta = MetaData::from_headers(&headers);
        assert_eq!(meta.credits_left_before_request, None);
        assert_eq!(meta.rate_limit_max_per_second, None);
        assert_eq!(meta.rate_limit_remaining, Some(99));
    }

    #[test]
    fn test_output_without_raw_response() {
        let raw = RawResponse {
            status: StatusCode::OK,
            headers: service_headers(),
            body: json!({ "fileUrl": "dummyUrl" }),
        };

        let output = CaptureOutput::from_raw(raw, false);
        assert_eq!(output.result, json!({ "fileUrl": "dummyUrl" }));
        assert_eq!(output.raw, None);

        // the `raw` key must be absent, not null
        let serialized = serde_json::to_value(&output).unwrap();
        assert!(serialized.get("raw").is_none());
        assert_eq!(
            serialized["metaData"]["creditsLeftBeforeRequest"],
            json!(100)
        );
    }

    #[test]
    fn test_output_with_raw_response() {
        let raw = RawResponse {
            status: StatusCode::OK,
            headers: service_headers(),
            body: json!({ "fileUrl": "dummyUrl" }),
        };

        let output = CaptureOutput::from_raw(raw.clone(), true);
        assert_eq!(output.raw, Some(raw));

        let serialized = serde_json::to_value(&output).unwrap();
        assert_eq!(serialized["raw"]["status"], json!(200));
        assert_eq!(serialized["raw"]["headers"]["x-api-call-id"], json!("xyz-123"));
        assert_eq!(serialized["raw"]["body"]["fileUrl"], json!("dummyUrl"));
    }
}
