//! Handler of capture operations.
//!
//! This module defines two structs, [`Client`] and [`ClientBuilder`].
//! `Client` submits capture requests to the service and normalizes the
//! responses. `ClientBuilder` exposes a finer level of granularity for
//! building a `Client`.
//!
//! For convenience, a free function [`capture`] is provided for ad-hoc
//! captures.

use std::sync::Arc;

use futures::future::try_join_all;
use http::header::{self, HeaderMap, HeaderValue};
use log::debug;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use typed_builder::TypedBuilder;
use url::Url;

use crate::{
    dispatch::Dispatcher,
    types::bulk::BulkPayload,
    BulkConfig, CaptureOutput, CaptureRequest, ErrorKind, RawResponse, Result,
};

/// Default base URL of the capture service.
pub const DEFAULT_SERVICE_URL: &str = "https://service.speedyshot.com";
/// Default endpoint for single captures.
pub const DEFAULT_SERVICE_ENDPOINT: &str = "/api/snap";
/// Default endpoint for bulk submissions.
pub const DEFAULT_BULK_ENDPOINT: &str = "/api/bulk";
/// Default number of concurrent capture requests, 50.
pub const DEFAULT_MAX_CONCURRENCY: usize = 50;
/// Hard upper bound on concurrent capture requests, 100.
///
/// Requesting more gets clamped down to this; the service rejects busier
/// clients anyway.
pub const MAX_CONCURRENCY_CEILING: usize = 100;
/// Default user agent, `speedyshot-<PKG_VERSION>`.
pub const DEFAULT_USER_AGENT: &str = concat!("speedyshot/", env!("CARGO_PKG_VERSION"));

/// Builder for [`Client`].
///
/// See crate-level documentation for usage example.
#[derive(TypedBuilder, Debug, Clone)]
#[builder(field_defaults(default, setter(into)))]
pub struct ClientBuilder {
    /// API key sent in the `authorization` header of every request.
    #[builder(!default)]
    api_key: SecretString,
    /// Maximum number of capture requests in flight at once.
    ///
    /// Defaults to [`DEFAULT_MAX_CONCURRENCY`] when unset. Values above
    /// [`MAX_CONCURRENCY_CEILING`] are clamped down to it; zero is rejected
    /// at construction since it would queue requests forever.
    max_concurrency: Option<usize>,
    /// Overrides the base URL of the capture service.
    ///
    /// Useful for testing and for self-hosted deployments.
    custom_service_url: Option<String>,
    /// Overrides the path of the single-capture endpoint.
    custom_service_endpoint: Option<String>,
    /// When `true`, attach the untransformed transport response to every
    /// result for diagnostic use.
    include_raw_response: bool,
    /// Sets additional default headers for every request.
    custom_headers: HeaderMap,
}

impl ClientBuilder {
    /// Instantiates a [`Client`].
    ///
    /// # Errors
    ///
    /// Returns an `Err` if:
    /// - The API key cannot be used as a header value.
    /// - `max_concurrency` is zero.
    /// - The service URL or endpoint do not form a valid URL.
    /// - The request client cannot be created.
    ///   See [here](https://docs.rs/reqwest/latest/reqwest/struct.ClientBuilder.html#errors).
    pub fn client(self) -> Result<Client> {
        let Self {
            api_key,
            max_concurrency,
            custom_service_url,
            custom_service_endpoint,
            include_raw_response,
            custom_headers: mut headers,
        } = self;

        let max_concurrency = max_concurrency.unwrap_or(DEFAULT_MAX_CONCURRENCY);
        if max_concurrency == 0 {
            return Err(ErrorKind::InvalidMaxConcurrency(max_concurrency));
        }
        let max_concurrency = max_concurrency.min(MAX_CONCURRENCY_CEILING);

        let mut auth_value = HeaderValue::from_str(api_key.expose_secret())?;
        auth_value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth_value);
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static(DEFAULT_USER_AGENT),
        );

        let base_url = custom_service_url.unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());
        let single_url = endpoint_url(
            &base_url,
            custom_service_endpoint
                .as_deref()
                .unwrap_or(DEFAULT_SERVICE_ENDPOINT),
        )?;
        let bulk_url = endpoint_url(&base_url, DEFAULT_BULK_ENDPOINT)?;

        let reqwest_client = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .build()
            .map_err(ErrorKind::BuildRequestClient)?;

        Ok(Client {
            reqwest_client,
            single_url,
            bulk_url,
            include_raw_response,
            dispatcher: Arc::new(Dispatcher::new(max_concurrency)),
        })
    }
}

/// Joins the configured base URL and endpoint path by plain concatenation,
/// matching what the service documents.
fn endpoint_url(base: &str, endpoint: &str) -> Result<Url> {
    let joined = format!("{base}{endpoint}");
    Url::parse(&joined).map_err(|e| ErrorKind::InvalidServiceUrl(joined, e))
}

/// Submits capture requests to the service and normalizes the responses.
///
/// All single captures issued through one `Client` (directly or via
/// [`capture_many`](Client::capture_many)) share a single concurrency budget;
/// see [`ClientBuilder`] for the knobs. Cloning is cheap and clones keep
/// drawing from the same budget.
#[derive(Debug, Clone)]
pub struct Client {
    /// Underlying `reqwest` client instance that handles the HTTP requests.
    ///
    /// Carries the `authorization` header for every request.
    reqwest_client: reqwest::Client,
    /// Full URL of the single-capture endpoint.
    single_url: Url,
    /// Full URL of the bulk endpoint.
    bulk_url: Url,
    /// Whether to attach the raw transport response to every result.
    include_raw_response: bool,
    /// Gate bounding the number of in-flight capture requests.
    dispatcher: Arc<Dispatcher>,
}

impl Client {
    /// Captures a single page.
    ///
    /// The request starts as soon as a concurrency slot is free; until then
    /// it waits behind earlier captures on this client. Exactly one HTTP
    /// call is made, with no retry.
    ///
    /// # Errors
    ///
    /// Returns an `Err` if the transport fails: connection error, non-2xx
    /// response, or a response body that is not JSON. The error is the
    /// transport's own, unmodified.
    pub async fn capture(&self, request: &CaptureRequest) -> Result<CaptureOutput> {
        debug!("dispatching {} capture", request.output);
        let raw = self
            .dispatcher
            .run(self.post_json(self.single_url.clone(), request))
            .await?;
        Ok(CaptureOutput::from_raw(raw, self.include_raw_response))
    }

    /// Captures many pages, bounded by the client's concurrency ceiling.
    ///
    /// Results come back in the same order as `requests`, regardless of
    /// which responses arrive first. On the first failure the error is
    /// returned and the remaining in-flight captures are dropped; partial
    /// successes are not surfaced.
    ///
    /// # Errors
    ///
    /// Returns the first transport failure among the individual captures.
    pub async fn capture_many(&self, requests: &[CaptureRequest]) -> Result<Vec<CaptureOutput>> {
        try_join_all(requests.iter().map(|request| self.capture(request))).await
    }

    /// Submits a batch for asynchronous server-side processing and storage.
    ///
    /// This issues exactly one HTTP call regardless of batch size and does
    /// not consume dispatcher capacity. The service acknowledges receipt and
    /// processes the items later, writing results to the bucket named in
    /// `config`; only the acknowledgment is returned here, normalized the
    /// same way as a single capture.
    ///
    /// # Errors
    ///
    /// Returns an `Err` if the transport fails, same as [`capture`](Self::capture).
    pub async fn capture_bulk(
        &self,
        config: &BulkConfig,
        requests: &[CaptureRequest],
    ) -> Result<CaptureOutput> {
        debug!("submitting bulk batch of {} items", requests.len());
        let payload = BulkPayload {
            config,
            items: requests,
        };
        let raw = self.post_json(self.bulk_url.clone(), &payload).await?;
        Ok(CaptureOutput::from_raw(raw, self.include_raw_response))
    }

    /// Effective concurrency ceiling of this client.
    #[must_use]
    pub fn max_concurrency(&self) -> usize {
        self.dispatcher.max_concurrency()
    }

    /// Number of free concurrency slots at this instant.
    #[must_use]
    pub fn available_slots(&self) -> usize {
        self.dispatcher.available_slots()
    }

    /// POSTs `body` as JSON and reads back the full response.
    async fn post_json<B>(&self, url: Url, body: &B) -> Result<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        debug!("POST {url}");
        let response = self
            .reqwest_client
            .post(url)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        RawResponse::from_response(response).await
    }
}

/// A convenience function to run a single capture.
///
/// This provides the simplest capture utility without having to create a
/// [`Client`]. For more complex scenarios, see documentation of
/// [`ClientBuilder`] instead.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The client cannot be built (see [`ClientBuilder::client`] for failure cases).
/// - The capture fails (see [`Client::capture`] for failure cases).
pub async fn capture(
    api_key: impl Into<SecretString>,
    request: &CaptureRequest,
) -> Result<CaptureOutput> {
    let client = ClientBuilder::builder().api_key(api_key).build().client()?;
    client.capture(request).await
}
