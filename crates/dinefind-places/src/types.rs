//! Places API response types.
//!
//! Both endpoints wrap their payload in a `{"status": "...", ...}` envelope.
//! Everything the provider may omit is modelled as `Option` here; the
//! validated shape lives in [`crate::detail::PlaceDetail`].

use serde::{Deserialize, Serialize};

/// Status strings returned in the provider envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ProviderStatus {
    Ok,
    ZeroResults,
    OverQueryLimit,
    RequestDenied,
    InvalidRequest,
    NotFound,
    UnknownError,
    Other(String),
    /// The endpoint refused the request with a 4xx before any envelope.
    HttpStatus(u16),
}

impl ProviderStatus {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ok => "OK",
            Self::ZeroResults => "ZERO_RESULTS",
            Self::OverQueryLimit => "OVER_QUERY_LIMIT",
            Self::RequestDenied => "REQUEST_DENIED",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::UnknownError => "UNKNOWN_ERROR",
            Self::Other(raw) => raw,
            Self::HttpStatus(_) => "HTTP_ERROR",
        }
    }
}

impl From<String> for ProviderStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "OK" => Self::Ok,
            "ZERO_RESULTS" => Self::ZeroResults,
            "OVER_QUERY_LIMIT" => Self::OverQueryLimit,
            "REQUEST_DENIED" => Self::RequestDenied,
            "INVALID_REQUEST" => Self::InvalidRequest,
            "NOT_FOUND" => Self::NotFound,
            "UNKNOWN_ERROR" => Self::UnknownError,
            _ => Self::Other(raw),
        }
    }
}

impl std::fmt::Display for ProviderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HttpStatus(code) => write!(f, "HTTP {code}"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Placeholder for "location unknown". Never a real position.
    pub const UNKNOWN: Self = Self { lat: 0.0, lng: 0.0 };

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

impl Geometry {
    pub const UNKNOWN: Self = Self {
        location: LatLng::UNKNOWN,
    };
}

/// Opening-hours block as returned by the details endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_now: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weekday_text: Vec<String>,
}

/// A minimally identified place from a text search, pending detail lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceCandidate {
    pub place_id: String,
    pub name: String,
    pub formatted_address: Option<String>,
    pub location: Option<LatLng>,
}

// ---------------------------------------------------------------------------
// textsearch
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct TextSearchEnvelope {
    pub status: ProviderStatus,
    #[serde(default)]
    pub results: Vec<RawSearchResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSearchResult {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

impl RawSearchResult {
    /// Results without a `place_id` cannot be enriched and are dropped.
    pub(crate) fn into_candidate(self) -> Option<PlaceCandidate> {
        let place_id = self.place_id.filter(|id| !id.is_empty())?;
        Some(PlaceCandidate {
            place_id,
            name: self.name.unwrap_or_default(),
            formatted_address: self.formatted_address,
            location: self.geometry.map(|g| g.location),
        })
    }
}

// ---------------------------------------------------------------------------
// details
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct DetailEnvelope {
    pub status: ProviderStatus,
    #[serde(default)]
    pub result: Option<RawPlaceDetail>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Unvalidated detail record. Every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlaceDetail {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub vicinity: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_status_parses_known_values() {
        let status: ProviderStatus = serde_json::from_str("\"ZERO_RESULTS\"").unwrap();
        assert_eq!(status, ProviderStatus::ZeroResults);
        let status: ProviderStatus = serde_json::from_str("\"OVER_QUERY_LIMIT\"").unwrap();
        assert_eq!(status, ProviderStatus::OverQueryLimit);
    }

    #[test]
    fn provider_status_keeps_unknown_values() {
        let status: ProviderStatus = serde_json::from_str("\"OVER_DAILY_LIMIT\"").unwrap();
        assert_eq!(status, ProviderStatus::Other("OVER_DAILY_LIMIT".to_owned()));
        assert_eq!(status.to_string(), "OVER_DAILY_LIMIT");
    }

    #[test]
    fn http_rejection_displays_the_code() {
        assert_eq!(ProviderStatus::HttpStatus(403).to_string(), "HTTP 403");
    }

    #[test]
    fn search_result_without_place_id_is_dropped() {
        let raw: RawSearchResult = serde_json::from_value(serde_json::json!({
            "name": "Nameless Grill"
        }))
        .unwrap();
        assert!(raw.into_candidate().is_none());
    }

    #[test]
    fn search_result_keeps_provisional_location() {
        let raw: RawSearchResult = serde_json::from_value(serde_json::json!({
            "place_id": "abc",
            "name": "Sushi Club",
            "formatted_address": "Honduras 5000",
            "geometry": { "location": { "lat": -34.58, "lng": -58.43 }, "viewport": {} }
        }))
        .unwrap();
        let candidate = raw.into_candidate().expect("candidate");
        assert_eq!(candidate.place_id, "abc");
        assert_eq!(
            candidate.location,
            Some(LatLng {
                lat: -34.58,
                lng: -58.43
            })
        );
    }

    #[test]
    fn sentinel_location_reports_unknown() {
        assert!(LatLng::UNKNOWN.is_unknown());
        assert!(!LatLng { lat: 1.0, lng: 0.0 }.is_unknown());
    }
}
