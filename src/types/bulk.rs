use serde::{Deserialize, Serialize};

use super::request::CaptureRequest;

/// Storage configuration for a bulk submission.
///
/// Bulk results are processed asynchronously and persisted by the service
/// rather than returned inline, so credentials for the target bucket are
/// required. Each item in the batch additionally carries its own
/// [`storage_file_path`](CaptureRequest::storage_file_path).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkConfig {
    /// Access key for the storage bucket
    pub storage_auth_key: String,
    /// Secret key for the storage bucket
    pub storage_auth_secret_key: String,
    /// Name of the bucket the results are written to
    pub storage_bucket: String,
}

impl BulkConfig {
    /// Creates a new bulk storage configuration.
    pub fn new(
        storage_auth_key: impl Into<String>,
        storage_auth_secret_key: impl Into<String>,
        storage_bucket: impl Into<String>,
    ) -> Self {
        Self {
            storage_auth_key: storage_auth_key.into(),
            storage_auth_secret_key: storage_auth_secret_key.into(),
            storage_bucket: storage_bucket.into(),
        }
    }
}

/// Wire format of a bulk submission: the shared storage config plus the
/// full list of capture jobs, sent in a single request.
#[derive(Debug, Serialize)]
pub(crate) struct BulkPayload<'a> {
    pub(crate) config: &'a BulkConfig,
    pub(crate) items: &'a [CaptureRequest],
}
