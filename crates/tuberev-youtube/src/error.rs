use thiserror::Error;

/// Errors returned by the `YouTube` Data API client and the pipeline stages
/// built on it.
#[derive(Debug, Error)]
pub enum YoutubeError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-2xx status with an error body.
    #[error("YouTube API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The API rejected the call with a quota/rate-limit reason. Surfaced
    /// separately so callers can show a "try again later" hint.
    #[error("YouTube API quota exhausted: {0}")]
    QuotaExceeded(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The resolver found no channel matching the input.
    #[error("no channel found for \"{0}\"")]
    ChannelNotFound(String),

    /// The input was empty or whitespace. Rejected before any network call.
    #[error("query must not be empty")]
    EmptyQuery,
}
