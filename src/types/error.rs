use thiserror::Error;

/// Possible errors when interacting with the capture service
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Network error while talking to the capture service.
    ///
    /// This covers connection failures, non-2xx responses and undecodable
    /// response bodies. The underlying error is passed on unchanged; the
    /// client never classifies or retries it.
    #[error("Network error while trying to reach the capture service")]
    NetworkRequest(#[from] reqwest::Error),
    /// The request client cannot be created
    #[error("Error creating request client")]
    BuildRequestClient(#[source] reqwest::Error),
    /// The API key cannot be used as an `authorization` header value
    #[error("Header could not be parsed.")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),
    /// The configured service URL and endpoint do not form a valid URL
    #[error("Cannot parse service URL `{0}`: {1}")]
    InvalidServiceUrl(String, url::ParseError),
    /// A concurrency ceiling of zero would queue requests forever
    #[error("Invalid max concurrency: {0} (must be at least 1)")]
    InvalidMaxConcurrency(usize),
}

impl PartialEq for ErrorKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NetworkRequest(e1), Self::NetworkRequest(e2))
            | (Self::BuildRequestClient(e1), Self::BuildRequestClient(e2)) => {
                e1.to_string() == e2.to_string()
            }
            (Self::InvalidHeader(_), Self::InvalidHeader(_)) => true,
            (Self::InvalidServiceUrl(s1, e1), Self::InvalidServiceUrl(s2, e2)) => {
                s1 == s2 && e1 == e2
            }
            (Self::InvalidMaxConcurrency(n1), Self::InvalidMaxConcurrency(n2)) => n1 == n2,
            _ => false,
        }
    }
}
