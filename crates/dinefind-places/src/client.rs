//! HTTP client for the places text-search and details endpoints.
//!
//! Each public call issues exactly one outbound request. Nothing is cached
//! between calls.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::detail::{DetailError, PlaceDetail};
use crate::error::PlacesError;
use crate::types::{DetailEnvelope, PlaceCandidate, ProviderStatus, TextSearchEnvelope};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Provider page size. Further pages are never followed.
pub const MAX_CANDIDATES: usize = 20;

/// Field mask requested from the details endpoint.
pub const DETAIL_FIELDS: &str = "name,formatted_address,formatted_phone_number,rating,\
user_ratings_total,price_level,opening_hours,website,url,geometry,vicinity";

/// Parameters sent alongside the query text on every search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub place_type: String,
    pub radius_m: Option<u32>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            place_type: "restaurant".to_owned(),
            radius_m: None,
        }
    }
}

/// Classified outcome of one text-search attempt.
#[derive(Debug)]
pub enum TextSearch {
    /// `OK`, possibly with fewer candidates than the page size.
    Found(Vec<PlaceCandidate>),
    /// `ZERO_RESULTS`.
    ZeroResults,
    /// Any other provider status, or a 4xx refusal of the request.
    ProviderError(ProviderStatus),
    /// Network failure, timeout, or a 5xx HTTP status.
    TransportError(reqwest::Error),
    /// A 2xx body that is not a search envelope.
    Malformed(serde_json::Error),
}

/// Client for the places API.
///
/// Holds a pooled `reqwest::Client` and the API credential; safe to share
/// across concurrent requests. Use [`PlacesClient::new`] for production or
/// [`PlacesClient::with_base_url`] to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl PlacesClient {
    /// Creates a client pointed at the production places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL.
    ///
    /// `timeout_secs` bounds every individual call; an elapsed timeout is
    /// reported as a transport failure.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`PlacesError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        // A single trailing slash makes `Url::join` append rather than
        // replace the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(PlacesError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: parsed,
        })
    }

    /// Runs one text search and classifies the outcome.
    ///
    /// At most [`MAX_CANDIDATES`] candidates are returned; results without a
    /// `place_id` are dropped.
    pub async fn text_search(&self, query: &str, params: &SearchParams) -> TextSearch {
        let radius;
        let mut extra = vec![("query", query), ("type", params.place_type.as_str())];
        if let Some(r) = params.radius_m {
            radius = r.to_string();
            extra.push(("radius", radius.as_str()));
        }
        let url = self.build_url("textsearch/json", &extra);

        tracing::debug!(query, place_type = %params.place_type, "places text search");

        let body = match self.get_text(url).await {
            Ok(body) => body,
            Err(FetchError::Rejected(code)) => {
                tracing::error!(query, status = code, "places API rejected the search");
                return TextSearch::ProviderError(ProviderStatus::HttpStatus(code));
            }
            Err(FetchError::Transport(e)) => {
                tracing::error!(query, error = %e, "network error searching places");
                return TextSearch::TransportError(e);
            }
        };

        let envelope: TextSearchEnvelope = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::error!(query, error = %e, "unparseable places search response");
                return TextSearch::Malformed(e);
            }
        };

        match envelope.status {
            ProviderStatus::Ok => {
                let candidates: Vec<PlaceCandidate> = envelope
                    .results
                    .into_iter()
                    .filter_map(crate::types::RawSearchResult::into_candidate)
                    .take(MAX_CANDIDATES)
                    .collect();
                tracing::debug!(query, count = candidates.len(), "places search returned");
                TextSearch::Found(candidates)
            }
            ProviderStatus::ZeroResults => {
                tracing::warn!(query, "no results found for query");
                TextSearch::ZeroResults
            }
            status => {
                tracing::error!(
                    query,
                    status = %status,
                    message = envelope.error_message.as_deref().unwrap_or(""),
                    "places API error"
                );
                TextSearch::ProviderError(status)
            }
        }
    }

    /// Fetches and validates one place, soft-skipping any failure.
    ///
    /// Returns `None` when the lookup fails for any reason; the cause is
    /// logged at `warn`.
    pub async fn fetch_detail(&self, place_id: &str) -> Option<PlaceDetail> {
        match self.try_fetch_detail(place_id).await {
            Ok(detail) => Some(detail),
            Err(e) => {
                tracing::warn!(place_id, error = %e, "skipping place detail");
                None
            }
        }
    }

    /// Fetches and validates one place.
    ///
    /// # Errors
    ///
    /// Returns a [`DetailError`] describing why no valid record came back.
    pub async fn try_fetch_detail(&self, place_id: &str) -> Result<PlaceDetail, DetailError> {
        let url = self.build_url(
            "details/json",
            &[("place_id", place_id), ("fields", DETAIL_FIELDS)],
        );
        let body = self.get_text(url).await.map_err(|e| match e {
            FetchError::Rejected(code) => DetailError::Status(ProviderStatus::HttpStatus(code)),
            FetchError::Transport(e) => DetailError::Transport(e),
        })?;
        let envelope: DetailEnvelope =
            serde_json::from_str(&body).map_err(DetailError::Malformed)?;

        if envelope.status != ProviderStatus::Ok {
            tracing::debug!(
                place_id,
                status = %envelope.status,
                message = envelope.error_message.as_deref().unwrap_or(""),
                "place details API error"
            );
            return Err(DetailError::Status(envelope.status));
        }

        let raw = envelope.result.ok_or(DetailError::MissingResult)?;
        Ok(PlaceDetail::from_raw(place_id, raw)?)
    }

    /// Builds an endpoint URL with percent-encoded query parameters.
    ///
    /// The API key is appended last so it is easy to spot in test assertions.
    fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Url {
        let mut url = self
            .base_url
            .join(endpoint)
            .unwrap_or_else(|_| self.base_url.clone());
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        url
    }

    /// Sends a GET request and returns the body of a 2xx response.
    ///
    /// A 4xx is reported as [`FetchError::Rejected`]; everything else that
    /// goes wrong is a transport failure. Errors are stripped of their URL so
    /// the API key never reaches logs.
    async fn get_text(&self, url: Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::transport)?;
        let status = response.status();
        if status.is_client_error() {
            return Err(FetchError::Rejected(status.as_u16()));
        }
        let response = response.error_for_status().map_err(FetchError::transport)?;
        response.text().await.map_err(FetchError::transport)
    }
}

/// Why a GET produced no usable body.
#[derive(Debug)]
enum FetchError {
    /// The provider refused the request as sent (HTTP 4xx). Repeating it
    /// will not help.
    Rejected(u16),
    /// Connect failure, timeout, 5xx, or an unreadable body.
    Transport(reqwest::Error),
}

impl FetchError {
    fn transport(e: reqwest::Error) -> Self {
        Self::Transport(e.without_url())
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
