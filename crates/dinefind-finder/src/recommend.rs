//! Free-text recommendation write-up for a ranked result set.

use std::sync::Arc;

use dinefind_places::PlaceDetail;
use serde::Serialize;

use crate::completion::CompletionClient;

pub(crate) const FALLBACK_TEXT: &str =
    "Unable to generate personalized recommendations at this time.";
pub(crate) const EMPTY_TEXT: &str =
    "No restaurants found. Try adjusting your search criteria or location.";

const MAX_TOKENS: u32 = 1000;
const TEMPERATURE: f32 = 0.6;

const SYSTEM_PROMPT: &str = "You are an experienced restaurant advisor. You know how to \
evaluate restaurants, compare cuisines and dining experiences, and match places to a \
diner's location and preferences. Give personalised, practical recommendations.";

/// Compact per-restaurant summary sent to the completion endpoint.
#[derive(Serialize)]
struct Summary<'a> {
    name: &'a str,
    rating: f64,
    total_ratings: u32,
    address: &'a str,
    opening_hours: &'a [String],
    website: Option<&'a str>,
    phone: Option<&'a str>,
}

impl<'a> From<&'a PlaceDetail> for Summary<'a> {
    fn from(place: &'a PlaceDetail) -> Self {
        Self {
            name: &place.name,
            rating: place.rating,
            total_ratings: place.review_count,
            address: &place.vicinity,
            opening_hours: place
                .opening_hours
                .as_ref()
                .map(|h| h.weekday_text.as_slice())
                .unwrap_or_default(),
            website: place.website.as_deref(),
            phone: place.phone.as_deref(),
        }
    }
}

/// Writes recommendations through a completion endpoint. Never fails.
#[derive(Debug, Clone)]
pub struct Recommender {
    client: Arc<CompletionClient>,
}

impl Recommender {
    #[must_use]
    pub fn new(client: Arc<CompletionClient>) -> Self {
        Self { client }
    }

    /// Returns a write-up for `ranked`, or a fixed fallback sentence.
    pub async fn recommend(&self, user_query: &str, ranked: &[PlaceDetail]) -> String {
        if ranked.is_empty() {
            return EMPTY_TEXT.to_owned();
        }

        let prompt = match build_prompt(user_query, ranked) {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize restaurant summaries");
                return FALLBACK_TEXT.to_owned();
            }
        };

        match self
            .client
            .complete(SYSTEM_PROMPT, &prompt, MAX_TOKENS, TEMPERATURE)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "recommendation generation failed");
                FALLBACK_TEXT.to_owned()
            }
        }
    }
}

fn build_prompt(user_query: &str, ranked: &[PlaceDetail]) -> Result<String, serde_json::Error> {
    let summaries: Vec<Summary<'_>> = ranked.iter().map(Summary::from).collect();
    let listing = serde_json::to_string_pretty(&summaries)?;
    Ok(format!(
        "Analyze these restaurants for the following request.\n\n\
         User query: {user_query}\n\n\
         Available restaurants:\n{listing}\n\n\
         Provide:\n\
         1. A ranked list of the best matches\n\
         2. A short explanation for each recommendation\n\
         3. Practical details such as contact information and opening hours\n\
         4. Any special considerations or tips\n\n\
         Use clear sections and bullet points."
    ))
}
