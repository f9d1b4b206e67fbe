//! `speedyshot` is an async client library for the SpeedyShot page capture
//! service: render a URL or raw HTML remotely and get back an image, PDF,
//! text or HTML artifact. "Hello world" example:
//!
//! ```no_run
//! use speedyshot::{CaptureRequest, OutputFormat};
//! use url::Url;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let request = CaptureRequest::builder()
//!         .output(OutputFormat::Png)
//!         .url(Url::parse("https://example.com")?)
//!         .build();
//!     let output = speedyshot::capture(String::from("my-api-key"), &request).await?;
//!     println!("{}", output.result);
//!     Ok(())
//! }
//! ```
//!
//! For more specific use-cases you can build a client yourself, using the
//! [`ClientBuilder`], which grants full flexibility. The client bounds how
//! many captures it has in flight at once (50 by default, 100 at most); all
//! captures issued through one client share that budget:
//!
//! ```no_run
//! use speedyshot::{CaptureRequest, ClientBuilder, OutputFormat, Result};
//! use url::Url;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ClientBuilder::builder()
//!         .api_key(String::from("my-api-key"))
//!         .max_concurrency(10_usize)
//!         .build()
//!         .client()?;
//!
//!     let requests: Vec<_> = ["https://example.com", "https://example.org"]
//!         .iter()
//!         .map(|url| {
//!             CaptureRequest::builder()
//!                 .output(OutputFormat::Pdf)
//!                 .url(Url::parse(url).unwrap())
//!                 .build()
//!         })
//!         .collect();
//!
//!     // At most 10 requests in flight; results come back in input order.
//!     for output in client.capture_many(&requests).await? {
//!         println!("{:?}", output.meta_data.api_call_id);
//!     }
//!     Ok(())
//! }
//! ```
// #![deny(missing_docs)]

#[cfg(doctest)]
doc_comment::doctest!("../README.md");

mod client;
mod dispatch;
mod types;

#[cfg(test)]
#[macro_use]
pub mod test_utils;

pub use client::{
    capture, Client, ClientBuilder, DEFAULT_BULK_ENDPOINT, DEFAULT_MAX_CONCURRENCY,
    DEFAULT_SERVICE_ENDPOINT, DEFAULT_SERVICE_URL, DEFAULT_USER_AGENT, MAX_CONCURRENCY_CEILING,
};
pub use types::*;
