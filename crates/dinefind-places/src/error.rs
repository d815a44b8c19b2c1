use thiserror::Error;

/// Failures building a [`crate::PlacesClient`].
///
/// Search outcomes never surface here; they are classified by
/// [`crate::TextSearch`] and detail failures by [`crate::DetailError`].
#[derive(Debug, Error)]
pub enum PlacesError {
    /// The underlying `reqwest::Client` could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_base_url_names_the_url() {
        let err = PlacesError::InvalidBaseUrl {
            url: "nope".to_owned(),
            reason: "relative URL without a base".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "invalid base URL 'nope': relative URL without a base"
        );
    }
}
