use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use url::Url;

/// Artifact produced by a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// JPEG image
    Jpeg,
    /// WebP image
    Webp,
    /// PNG image
    Png,
    /// PDF document
    Pdf,
    /// Extracted page text
    Text,
    /// Rendered page HTML
    Html,
}

/// How the capture result is delivered in the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Return the artifact inline (base64) instead of a file URL
    Inline,
}

/// Paper size for PDF output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PdfFormat {
    #[serde(rename = "a0")]
    A0,
    #[serde(rename = "a1")]
    A1,
    #[serde(rename = "a2")]
    A2,
    #[serde(rename = "a3")]
    A3,
    #[serde(rename = "a4")]
    A4,
    #[serde(rename = "a5")]
    A5,
    #[serde(rename = "a6")]
    A6,
    Letter,
    Legal,
    Tabloid,
    Ledger,
}

/// Page lifecycle event to wait for before capturing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadUntil {
    Networkidle2,
    Networkidle0,
    Load,
    Domcontentloaded,
}

/// HTTP basic authentication for the captured page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authentication {
    pub username: String,
    pub password: String,
}

/// Geolocation reported to the captured page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geolocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// Region of the page to capture instead of the full viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Cookie `SameSite` policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SameSite {
    Strict,
    Lax,
}

/// Cookie installed in the browser before the page is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Expiry as a unix timestamp in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub same_site: Option<SameSite>,
}

/// Condition to wait for before the capture is taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum WaitFor {
    /// Wait until the given CSS selector matches an element
    Selector(String),
    /// Wait a fixed number of milliseconds
    Timeout(u64),
}

/// Script injected into the page before capturing, either by URL or inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraScript {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Stylesheet injected into the page before capturing, either by URL or inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Configuration for one capture job.
///
/// Only `output` is required; everything else has a service-side default.
/// Either [`url`](Self::url) or [`html_content`](Self::html_content) should be
/// set for the service to have something to render. A request carries no
/// identity of its own; when submitted in a batch, results are associated by
/// position.
///
/// ```
/// use speedyshot::{CaptureRequest, OutputFormat};
/// use url::Url;
///
/// # fn main() -> Result<(), url::ParseError> {
/// let request = CaptureRequest::builder()
///     .output(OutputFormat::Png)
///     .url(Url::parse("https://example.com/pricing")?)
///     .full_page(true)
///     .build();
/// # Ok(())
/// # }
/// ```
#[derive(TypedBuilder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[builder(field_defaults(default, setter(into)))]
#[serde(rename_all = "camelCase")]
pub struct CaptureRequest {
    /// Artifact to produce
    #[builder(!default)]
    pub output: OutputFormat,
    /// Address of the page to capture
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,
    /// Raw HTML to render instead of fetching a URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_content: Option<String>,
    /// Deliver the artifact inline instead of as a stored file URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<Encoding>,
    /// Capture the full scrollable page instead of the viewport
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_page: Option<bool>,
    /// Capture only the given region of the page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip: Option<Clip>,
    /// Viewport width in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Viewport height in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Device scale factor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// Render with a transparent background
    #[serde(skip_serializing_if = "Option::is_none")]
    pub omit_background: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture_beyond_viewport: Option<bool>,
    /// Emulate a mobile device
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_mobile: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_touch: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_landscape: Option<bool>,
    /// Print CSS backgrounds in PDF output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_background: Option<bool>,
    /// Paper size for PDF output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_format: Option<PdfFormat>,
    /// Compression quality for lossy image formats, 0-100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,
    /// HTTP basic authentication for the captured page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<Authentication>,
    /// Cookies installed before the page is loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookies: Option<Vec<Cookie>>,
    /// Extra HTTP headers sent when fetching the page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    /// Geolocation reported to the page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geolocation: Option<Geolocation>,
    /// User agent used when fetching the page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Conditions to wait for before the capture is taken
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for_items: Option<Vec<WaitFor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_javascript: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_offline_mode: Option<bool>,
    /// Page lifecycle event to wait for before capturing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_until: Option<LoadUntil>,
    /// Proxy URL used when fetching the page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
    /// Include the page's console output in the result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console_output: Option<bool>,
    /// Scripts injected into the page before capturing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_scripts: Option<Vec<ExtraScript>>,
    /// Stylesheets injected into the page before capturing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_styles: Option<Vec<ExtraStyle>>,
    /// Destination path in the storage bucket; only used in bulk submissions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_file_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_serialize_skips_absent_fields() {
        let request = CaptureRequest::builder().output(OutputFormat::Jpeg).build();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "output": "jpeg" })
        );
    }

    #[test]
    fn test_serialize_wire_names() {
        let request = CaptureRequest::builder()
            .output(OutputFormat::Pdf)
            .url(Url::parse("https://example.com/pricing").unwrap())
            .full_page(true)
            .pdf_format(PdfFormat::A4)
            .load_until(LoadUntil::Networkidle0)
            .wait_for_items(vec![
                WaitFor::Selector("#main".to_string()),
                WaitFor::Timeout(500),
            ])
            .build();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "output": "pdf",
                "url": "https://example.com/pricing",
                "fullPage": true,
                "pdfFormat": "a4",
                "loadUntil": "networkidle0",
                "waitForItems": [
                    { "type": "selector", "value": "#main" },
                    { "type": "timeout", "value": 500 },
                ],
            })
        );
    }

    #[test]
    fn test_pdf_format_paper_names() {
        assert_eq!(serde_json::to_value(PdfFormat::A0).unwrap(), json!("a0"));
        assert_eq!(
            serde_json::to_value(PdfFormat::Letter).unwrap(),
            json!("Letter")
        );
        assert_eq!(
            serde_json::to_value(PdfFormat::Ledger).unwrap(),
            json!("Ledger")
        );
    }

    #[test]
    fn test_cookie_wire_names() {
        let cookie = Cookie {
            name: "session".to_string(),
            value: "abc".to_string(),
            url: None,
            domain: Some("example.com".to_string()),
            path: None,
            expires: None,
            http_only: Some(true),
            secure: None,
            same_site: Some(SameSite::Lax),
        };

        assert_eq!(
            serde_json::to_value(&cookie).unwrap(),
            json!({
                "name": "session",
                "value": "abc",
                "domain": "example.com",
                "httpOnly": true,
                "sameSite": "Lax",
            })
        );
    }

    #[test]
    fn test_deserialize_roundtrip() {
        let request = CaptureRequest::builder()
            .output(OutputFormat::Webp)
            .html_content("<h1>hi</h1>".to_string())
            .encoding(Encoding::Inline)
            .quality(80u8)
            .clip(Clip {
                x: 0.0,
                y: 10.0,
                width: 640.0,
                height: 480.0,
            })
            .build();

        let roundtripped: CaptureRequest =
            serde_json::from_str(&serde_json::to_string(&request).unwrap()).unwrap();
        assert_eq!(roundtripped, request);
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Png.to_string(), "png");
        assert_eq!(OutputFormat::Pdf.to_string(), "pdf");
    }
}
