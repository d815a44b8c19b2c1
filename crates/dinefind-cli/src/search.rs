//! Command handlers. Results go to stdout as pretty JSON.

use dinefind_core::AppConfig;
use dinefind_finder::{retry_with_backoff, RestaurantFinder, SearchQuery};

/// Builds a query from the command-line text and optional overrides.
///
/// # Errors
///
/// Returns an error when `text` is blank.
pub(crate) fn build_query(
    text: &str,
    radius: Option<u32>,
    place_type: Option<String>,
    keyword: Option<String>,
) -> anyhow::Result<SearchQuery> {
    let mut query = SearchQuery::new(text)?;
    if let Some(radius) = radius {
        query = query.with_radius(radius);
    }
    if let Some(place_type) = place_type {
        query = query.with_place_type(place_type);
    }
    if let Some(keyword) = keyword {
        query = query.with_keyword(keyword);
    }
    Ok(query)
}

/// Runs one search, retrying transient failures per `config`.
///
/// # Errors
///
/// Returns an error when the provider fails hard. An empty result set is
/// printed, not treated as an error.
pub(crate) async fn run_search(
    finder: &RestaurantFinder,
    config: &AppConfig,
    query: &SearchQuery,
    raw: bool,
) -> anyhow::Result<()> {
    let max_retries = config.search_max_retries;
    let backoff_base_ms = config.retry_backoff_base_ms;

    let outcome = if raw {
        retry_with_backoff(max_retries, backoff_base_ms, || {
            finder.find_restaurants_with(query)
        })
        .await?
    } else {
        retry_with_backoff(max_retries, backoff_base_ms, || {
            finder.find_restaurants_for(query)
        })
        .await?
    };

    if outcome.is_empty() {
        tracing::info!(query = query.raw(), "no restaurants found");
    }
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

/// Prints one place.
///
/// # Errors
///
/// Returns an error when the place is unknown or fails validation.
pub(crate) async fn run_details(finder: &RestaurantFinder, place_id: &str) -> anyhow::Result<()> {
    let detail = finder
        .place_details(place_id)
        .await
        .ok_or_else(|| anyhow::anyhow!("place '{place_id}' not found"))?;
    println!("{}", serde_json::to_string_pretty(&detail)?);
    Ok(())
}
