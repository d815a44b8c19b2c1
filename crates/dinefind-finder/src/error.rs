use dinefind_places::{PlacesError, ProviderStatus};
use thiserror::Error;

/// Failures that escape [`crate::RestaurantFinder`].
///
/// Zero matches and bad detail records never show up here; they fold into a
/// valid (possibly empty) outcome.
#[derive(Debug, Error)]
pub enum FinderError {
    #[error("query must not be empty")]
    EmptyQuery,

    /// The provider reported a non-`OK`, non-`ZERO_RESULTS` status or refused
    /// the request with a 4xx.
    #[error("places API returned status {status} for query \"{query}\"")]
    Upstream {
        status: ProviderStatus,
        query: String,
    },

    /// The provider answered 2xx with something that is not a search envelope.
    #[error("malformed places response for \"{query}\": {source}")]
    MalformedResponse {
        query: String,
        #[source]
        source: serde_json::Error,
    },

    /// Network failure, timeout or 5xx. Safe to retry the whole invocation.
    #[error("places API unreachable while searching for \"{query}\": {source}")]
    Transient {
        query: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build places client: {0}")]
    Places(#[from] PlacesError),

    #[error("failed to build completion client: {0}")]
    Completion(#[from] CompletionError),
}

impl FinderError {
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }

    /// Stable machine-readable code for the outer boundary.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyQuery => "bad_request",
            Self::Upstream { .. } | Self::MalformedResponse { .. } => "upstream_error",
            Self::Transient { .. } => "transient_error",
            Self::Places(_) | Self::Completion(_) => "internal_error",
        }
    }
}

/// Errors from the completion endpoint. Always absorbed by callers.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion endpoint returned status {0}")]
    Status(u16),

    #[error("JSON deserialization error for completion response: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error("completion response contained no text")]
    Empty,
}
