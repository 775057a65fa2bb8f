use thiserror::Error;

use cmsync_content::ContentError;

/// Errors from the commerce-side product source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The commerce backend answered with a non-2xx status.
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
}

/// Errors surfaced by the batch engine outside the permanent-failure path.
///
/// Per-record sync failures do not appear here — they turn the whole run
/// into a [`crate::batch::BatchOutcome::PermanentFailure`] instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("commerce source error: {0}")]
    Source(#[from] SourceError),

    #[error("content store error: {0}")]
    Content(#[from] ContentError),
}
