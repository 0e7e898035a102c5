use revdash_core::ReviewFlag;
use thiserror::Error;

/// Errors returned by the reviews backend client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure, or a non-2xx status not mapped below.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL could not be parsed.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// `PATCH /api/reviews/{id}` answered 404.
    #[error("review {review_id} not found")]
    ReviewNotFound { review_id: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from an optimistic flag toggle.
#[derive(Debug, Error)]
pub enum ToggleError {
    /// The review is not in the local set.
    #[error("review {review_id} is not loaded")]
    UnknownReview { review_id: String },

    /// A toggle of the same review and flag has not resolved yet.
    #[error("a {flag} update for review {review_id} is already in flight")]
    InFlight { review_id: String, flag: ReviewFlag },

    /// The backend rejected the update; the local flag has been reverted.
    #[error("failed to update review {review_id}: {source}")]
    Backend {
        review_id: String,
        #[source]
        source: ClientError,
    },
}
