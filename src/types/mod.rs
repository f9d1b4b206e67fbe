#![allow(unreachable_pub)]

pub(crate) mod bulk;
mod error;
mod output;
mod request;

pub use bulk::BulkConfig;
pub use error::ErrorKind;
pub use output::{CaptureOutput, MetaData, RawResponse};
pub use request::{
    Authentication, CaptureRequest, Clip, Cookie, Encoding, ExtraScript, ExtraStyle, Geolocation,
    LoadUntil, OutputFormat, PdfFormat, SameSite, WaitFor,
};

/// The speedyshot `Result` type
pub type Result<T> = std::result::Result<T, crate::ErrorKind>;
