//! Restaurant search pipeline orchestration.

use std::sync::Arc;

use dinefind_core::AppConfig;
use dinefind_places::{PlaceCandidate, PlaceDetail, PlacesClient, SearchParams, TextSearch};
use futures::stream::{self, StreamExt};

use crate::analysis::analyze;
use crate::completion::CompletionClient;
use crate::error::FinderError;
use crate::normalizer::QueryNormalizer;
use crate::recommend::{Recommender, EMPTY_TEXT};
use crate::types::{FinderSettings, SearchOutcome, SearchQuery, SearchStrategy};

/// Runs normalise → search → detail fetch → rank for one query at a time.
///
/// Holds only read-only configuration and pooled HTTP clients, so a single
/// instance can serve concurrent requests behind an `Arc`. Every invocation
/// builds its outcome from scratch; nothing is cached.
pub struct RestaurantFinder {
    places: PlacesClient,
    normalizer: QueryNormalizer,
    recommender: Option<Recommender>,
    settings: FinderSettings,
}

impl RestaurantFinder {
    #[must_use]
    pub fn new(
        places: PlacesClient,
        normalizer: QueryNormalizer,
        recommender: Option<Recommender>,
        settings: FinderSettings,
    ) -> Self {
        Self {
            places,
            normalizer,
            recommender,
            settings,
        }
    }

    /// Wires the places and completion clients from application config.
    ///
    /// The normalizer and recommender are enabled only when completion
    /// credentials are present; recommendations can be switched off
    /// separately.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Places`] or [`FinderError::Completion`] if an
    /// HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, FinderError> {
        let places = PlacesClient::with_base_url(
            &config.places_api_key,
            config.places_timeout_secs,
            &config.user_agent,
            &config.places_base_url,
        )?;

        let completion = config
            .completion
            .as_ref()
            .map(|c| {
                CompletionClient::new(
                    &c.api_key,
                    &c.base_url,
                    &c.model,
                    c.timeout_secs,
                    &config.user_agent,
                )
                .map(Arc::new)
            })
            .transpose()?;

        let recommender = completion
            .as_ref()
            .filter(|_| config.recommendations_enabled)
            .map(|client| Recommender::new(Arc::clone(client)));

        let settings = FinderSettings {
            place_type: config.place_type.clone(),
            radius_m: config.search_radius_m,
            detail_concurrency: config.detail_concurrency,
        };

        tracing::debug!(
            normalizer = completion.is_some(),
            recommendations = recommender.is_some(),
            detail_concurrency = settings.detail_concurrency,
            "restaurant finder configured"
        );

        Ok(Self::new(
            places,
            QueryNormalizer::new(completion),
            recommender,
            settings,
        ))
    }

    /// Whether any completion-backed step (normalizer or recommender) is
    /// wired in.
    #[must_use]
    pub fn completion_configured(&self) -> bool {
        self.normalizer.is_enabled() || self.recommender.is_some()
    }

    /// Normalises `raw` and runs the full pipeline.
    ///
    /// "No results" is a successful, empty outcome.
    ///
    /// # Errors
    ///
    /// - [`FinderError::EmptyQuery`] if `raw` is blank.
    /// - [`FinderError::Upstream`] / [`FinderError::MalformedResponse`] when
    ///   the provider misbehaves or refuses the request.
    /// - [`FinderError::Transient`] on network failure, timeout or a 5xx; the
    ///   whole call may be retried.
    pub async fn find_restaurants(&self, raw: &str) -> Result<SearchOutcome, FinderError> {
        let query = SearchQuery::new(raw)?;
        self.find_restaurants_for(&query).await
    }

    /// Normalises a prebuilt query, keeping its radius, type and keyword, then
    /// runs the pipeline.
    ///
    /// # Errors
    ///
    /// Same as [`RestaurantFinder::find_restaurants`], minus `EmptyQuery`.
    pub async fn find_restaurants_for(
        &self,
        query: &SearchQuery,
    ) -> Result<SearchOutcome, FinderError> {
        let query = self.normalizer.normalize(query).await;
        self.find_restaurants_with(&query).await
    }

    /// Runs the pipeline for an already-built query, without normalisation.
    ///
    /// # Errors
    ///
    /// Same as [`RestaurantFinder::find_restaurants`], minus `EmptyQuery`.
    pub async fn find_restaurants_with(
        &self,
        query: &SearchQuery,
    ) -> Result<SearchOutcome, FinderError> {
        let strategy = SearchStrategy::for_query(query, &self.settings);
        let params = SearchParams {
            place_type: strategy.place_type.clone(),
            radius_m: Some(strategy.radius),
        };
        let search_text = strategy.location.clone();

        let candidates = match self.places.text_search(&search_text, &params).await {
            TextSearch::Found(candidates) => candidates,
            TextSearch::ZeroResults => return Ok(self.empty_outcome(strategy)),
            TextSearch::ProviderError(status) => {
                return Err(FinderError::Upstream {
                    status,
                    query: search_text,
                })
            }
            TextSearch::TransportError(source) => {
                return Err(FinderError::Transient {
                    query: search_text,
                    source,
                })
            }
            TextSearch::Malformed(source) => {
                return Err(FinderError::MalformedResponse {
                    query: search_text,
                    source,
                })
            }
        };

        let details = self.fetch_details(&candidates).await;
        if details.is_empty() {
            tracing::info!(
                query = %search_text,
                candidates = candidates.len(),
                "no candidate survived detail validation"
            );
            return Ok(self.empty_outcome(strategy));
        }

        let (restaurants, analysis) = analyze(details);
        tracing::info!(
            query = %search_text,
            candidates = candidates.len(),
            restaurants = restaurants.len(),
            score = analysis.score(),
            "restaurant search complete"
        );

        let recommendations = match &self.recommender {
            Some(recommender) => Some(recommender.recommend(query.raw(), &restaurants).await),
            None => None,
        };

        Ok(SearchOutcome {
            strategy,
            restaurants,
            analysis: analysis.with_recommendations(recommendations),
        })
    }

    /// Looks up one place by identifier. `None` covers every failure.
    pub async fn place_details(&self, place_id: &str) -> Option<PlaceDetail> {
        self.places.fetch_detail(place_id).await
    }

    /// Fetches details with at most `detail_concurrency` requests in flight.
    ///
    /// Survivors keep the order in which their candidates were issued.
    async fn fetch_details(&self, candidates: &[PlaceCandidate]) -> Vec<PlaceDetail> {
        let limit = self.settings.detail_concurrency.max(1);
        let places = &self.places;
        let ids: Vec<String> = candidates.iter().map(|c| c.place_id.clone()).collect();
        // Each future owns its id so the whole pipeline future stays `Send`.
        stream::iter(ids)
            .map(|id| async move { places.fetch_detail(&id).await })
            .buffered(limit)
            .filter_map(|detail| async move { detail })
            .collect()
            .await
    }

    fn empty_outcome(&self, strategy: SearchStrategy) -> SearchOutcome {
        let recommendations = self
            .completion_configured()
            .then(|| EMPTY_TEXT.to_owned());
        SearchOutcome::not_found(strategy, recommendations)
    }
}
