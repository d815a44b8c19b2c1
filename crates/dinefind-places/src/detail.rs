//! Validated place detail records.

use serde::Serialize;
use thiserror::Error;

use crate::types::{Geometry, OpeningHours, ProviderStatus, RawPlaceDetail};

/// A detail record is missing a field the ranking step depends on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
}

/// Why a single detail lookup produced no record.
///
/// Never escapes a batch: [`crate::PlacesClient::fetch_detail`] logs it and
/// returns `None`.
#[derive(Debug, Error)]
pub enum DetailError {
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("details API returned status {0}")]
    Status(ProviderStatus),

    #[error("details response had no result")]
    MissingResult,

    #[error("malformed details response: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Fully enriched place information used for ranking.
///
/// Serialises with the provider's field names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceDetail {
    pub place_id: String,
    pub name: String,
    pub formatted_address: String,
    #[serde(rename = "formatted_phone_number", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<OpeningHours>,
    pub rating: f64,
    #[serde(rename = "user_ratings_total")]
    pub review_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u8>,
    /// `(0, 0)` when the provider omitted it; see [`crate::LatLng::is_unknown`].
    pub geometry: Geometry,
    pub vicinity: String,
}

impl PlaceDetail {
    /// Validates a raw record and fills genuinely optional fields.
    ///
    /// `name`, `formatted_address`, `rating` and `user_ratings_total` are
    /// required; `vicinity` falls back to the formatted address and a missing
    /// geometry becomes the unknown-location sentinel.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] naming the first absent
    /// required field.
    pub fn from_raw(place_id: &str, raw: RawPlaceDetail) -> Result<Self, ValidationError> {
        let name = raw.name.ok_or(ValidationError::MissingField("name"))?;
        let formatted_address = raw
            .formatted_address
            .ok_or(ValidationError::MissingField("formatted_address"))?;
        let rating = raw.rating.ok_or(ValidationError::MissingField("rating"))?;
        let review_count = raw
            .user_ratings_total
            .ok_or(ValidationError::MissingField("user_ratings_total"))?;

        let vicinity = raw.vicinity.unwrap_or_else(|| formatted_address.clone());
        let geometry = raw.geometry.unwrap_or(Geometry::UNKNOWN);

        Ok(Self {
            place_id: place_id.to_owned(),
            name,
            formatted_address,
            phone: raw.formatted_phone_number,
            website: raw.website,
            url: raw.url,
            opening_hours: raw.opening_hours,
            rating,
            review_count,
            price_level: raw.price_level,
            geometry,
            vicinity,
        })
    }
}
