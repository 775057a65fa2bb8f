use thiserror::Error;

/// Errors returned by the content-store client and sync service.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The content store answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A configured URL could not be parsed.
    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Studio deep links require `CMSYNC_STUDIO_URL` to be set.
    #[error("no studio URL configured")]
    MissingStudioUrl,
}
