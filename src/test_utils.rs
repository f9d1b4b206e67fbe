use wiremock::ResponseTemplate;

use crate::{Client, ClientBuilder};

#[macro_export]
/// Creates a mock capture service, which answers POST requests on the given
/// path with a predefined response template
macro_rules! mock_server {
    ($path:expr, $template:expr) => {{
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .and(wiremock::matchers::path($path))
            .respond_with($template)
            .mount(&mock_server)
            .await;
        mock_server
    }};
}

/// Response template carrying the standard service metadata headers
pub(crate) fn snap_response(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("x-credits-remaining-before", "100")
        .insert_header("x-credits-refill-timestamp", "1642932140")
        .insert_header("x-api-call-id", "xyz-123")
        .insert_header("x-ratelimit-limit", "100")
        .insert_header("x-ratelimit-remaining", "99")
        .set_body_json(body)
}

/// Client pointed at a mock capture service
///
/// # Panic
///
/// This panics on a bad mock URI, so it should only be used for testing
pub(crate) fn get_mock_client(uri: &str) -> Client {
    ClientBuilder::builder()
        .api_key(String::from("dummy-key"))
        .custom_service_url(uri.to_string())
        .build()
        .client()
        .unwrap()
}
