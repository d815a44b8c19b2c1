use dinefind_places::PlaceDetail;
use serde::Serialize;

use crate::error::FinderError;

/// Concern recorded when the search produced nothing usable.
pub const NOT_FOUND_CONCERN: &str = "no restaurants found in this area";

/// Tunables for one [`crate::RestaurantFinder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinderSettings {
    /// Entity-type filter sent with every search.
    pub place_type: String,
    /// Radius used when the query does not carry its own.
    pub radius_m: u32,
    /// Upper bound on in-flight detail requests.
    pub detail_concurrency: usize,
}

impl Default for FinderSettings {
    fn default() -> Self {
        Self {
            place_type: "restaurant".to_owned(),
            radius_m: 5000,
            detail_concurrency: 4,
        }
    }
}

/// A user request. Builders consume `self`; normalisation derives a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    normalized: Option<String>,
    radius_m: Option<u32>,
    place_type: Option<String>,
    keyword: Option<String>,
}

impl SearchQuery {
    /// # Errors
    ///
    /// Returns [`FinderError::EmptyQuery`] when `raw` is blank.
    pub fn new(raw: &str) -> Result<Self, FinderError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(FinderError::EmptyQuery);
        }
        Ok(Self {
            raw: raw.to_owned(),
            normalized: None,
            radius_m: None,
            place_type: None,
            keyword: None,
        })
    }

    #[must_use]
    pub fn with_radius(mut self, radius_m: u32) -> Self {
        self.radius_m = Some(radius_m);
        self
    }

    #[must_use]
    pub fn with_place_type(mut self, place_type: impl Into<String>) -> Self {
        let place_type = place_type.into();
        self.place_type = (!place_type.trim().is_empty()).then(|| place_type.trim().to_owned());
        self
    }

    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        self.keyword = (!keyword.trim().is_empty()).then(|| keyword.trim().to_owned());
        self
    }

    /// Returns a copy carrying `text` as its normalised form.
    ///
    /// Blank text, or text equal to the raw query, leaves the copy
    /// un-normalised.
    #[must_use]
    pub fn with_normalized(&self, text: &str) -> Self {
        let text = text.trim();
        let normalized = (!text.is_empty() && text != self.raw).then(|| text.to_owned());
        Self {
            normalized,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn normalized(&self) -> Option<&str> {
        self.normalized.as_deref()
    }

    #[must_use]
    pub fn radius_m(&self) -> Option<u32> {
        self.radius_m
    }

    #[must_use]
    pub fn place_type(&self) -> Option<&str> {
        self.place_type.as_deref()
    }

    #[must_use]
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    /// Text actually sent to the provider: the normalised form when present,
    /// with the keyword appended.
    #[must_use]
    pub fn search_text(&self) -> String {
        let base = self.normalized.as_deref().unwrap_or(&self.raw);
        match &self.keyword {
            Some(keyword) => format!("{base} {keyword}"),
            None => base.to_owned(),
        }
    }
}

/// Parameters used for one search attempt, echoed back for transparency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchStrategy {
    pub location: String,
    pub radius: u32,
    #[serde(rename = "type")]
    pub place_type: String,
    pub keyword: Option<String>,
    pub open_now: Option<bool>,
    pub min_rating: Option<f64>,
    pub max_price: Option<u8>,
}

impl SearchStrategy {
    #[must_use]
    pub fn for_query(query: &SearchQuery, settings: &FinderSettings) -> Self {
        Self {
            location: query.search_text(),
            radius: query.radius_m().unwrap_or(settings.radius_m),
            place_type: query
                .place_type()
                .unwrap_or(&settings.place_type)
                .to_owned(),
            keyword: query.keyword().map(str::to_owned),
            open_now: None,
            min_rating: None,
            max_price: None,
        }
    }
}

/// Ordered observations about a ranked set plus a coarse score in `[0, 1]`.
///
/// Produced wholesale by [`crate::analyze`]; never edited piecemeal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    matching_factors: Vec<String>,
    concerns: Vec<String>,
    score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    recommendations: Option<String>,
}

impl AnalysisResult {
    pub(crate) fn new(matching_factors: Vec<String>, concerns: Vec<String>, score: f64) -> Self {
        Self {
            matching_factors,
            concerns,
            score,
            recommendations: None,
        }
    }

    pub(crate) fn not_found() -> Self {
        Self::new(Vec::new(), vec![NOT_FOUND_CONCERN.to_owned()], 0.0)
    }

    #[must_use]
    pub(crate) fn with_recommendations(mut self, text: Option<String>) -> Self {
        self.recommendations = text;
        self
    }

    #[must_use]
    pub fn matching_factors(&self) -> &[String] {
        &self.matching_factors
    }

    #[must_use]
    pub fn concerns(&self) -> &[String] {
        &self.concerns
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[must_use]
    pub fn recommendations(&self) -> Option<&str> {
        self.recommendations.as_deref()
    }
}

/// The externally visible result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub strategy: SearchStrategy,
    pub restaurants: Vec<PlaceDetail>,
    pub analysis: AnalysisResult,
}

impl SearchOutcome {
    pub(crate) fn not_found(strategy: SearchStrategy, recommendations: Option<String>) -> Self {
        Self {
            strategy,
            restaurants: Vec::new(),
            analysis: AnalysisResult::not_found().with_recommendations(recommendations),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }
}
