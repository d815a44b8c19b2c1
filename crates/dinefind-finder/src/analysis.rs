//! Ranking and annotation of enriched places.
//!
//! Ordering is by `(rating, review_count)` descending. Each ranked record then
//! contributes zero or more matching factors and concerns, in rank order and
//! with duplicates kept. The score counts positive signals only.

use dinefind_places::PlaceDetail;

use crate::types::AnalysisResult;

const HIGH_RATING: f64 = 4.0;
const LOW_RATING: f64 = 3.5;
const POPULAR_REVIEWS: u32 = 100;
const FEW_REVIEWS: u32 = 50;
const UPSCALE_PRICE: u8 = 3;
const BASIC_PRICE: u8 = 2;
/// Price level assumed for the upscale/basic checks when the provider omits it.
const DEFAULT_PRICE_LEVEL: u8 = 1;
/// Number of matching factors at which the score saturates.
const SATURATION: f64 = 5.0;

pub(crate) const EMPTY_CONCERN: &str = "no restaurants to analyze";

/// Sorts `details` and derives the analysis for the sorted order.
///
/// Empty input yields no factors, a single `"no restaurants to analyze"`
/// concern and a score of `0.0`.
#[must_use]
pub fn analyze(mut details: Vec<PlaceDetail>) -> (Vec<PlaceDetail>, AnalysisResult) {
    if details.is_empty() {
        return (
            details,
            AnalysisResult::new(Vec::new(), vec![EMPTY_CONCERN.to_owned()], 0.0),
        );
    }

    rank(&mut details);

    let mut matching_factors = Vec::new();
    let mut concerns = Vec::new();
    for place in &details {
        classify(place, &mut matching_factors, &mut concerns);
    }

    let score = score_for(matching_factors.len());
    (details, AnalysisResult::new(matching_factors, concerns, score))
}

/// Stable descending sort on `(rating, review_count)`.
fn rank(details: &mut [PlaceDetail]) {
    details.sort_by(|a, b| {
        b.rating
            .total_cmp(&a.rating)
            .then_with(|| b.review_count.cmp(&a.review_count))
    });
}

fn classify(place: &PlaceDetail, factors: &mut Vec<String>, concerns: &mut Vec<String>) {
    let name = &place.name;
    let rating = place.rating;
    let reviews = place.review_count;
    let price = place.price_level.unwrap_or(DEFAULT_PRICE_LEVEL);

    if rating >= HIGH_RATING {
        factors.push(format!("high rating ({rating:.1}) at {name}"));
    }
    if reviews >= POPULAR_REVIEWS {
        factors.push(format!("popular place ({reviews} reviews) at {name}"));
    }
    if price >= UPSCALE_PRICE {
        factors.push(format!("upscale place (price level {price}) at {name}"));
    }

    if rating < LOW_RATING {
        concerns.push(format!("low rating ({rating:.1}) at {name}"));
    }
    if reviews < FEW_REVIEWS {
        concerns.push(format!("few reviews ({reviews}) at {name}"));
    }
    if price < BASIC_PRICE {
        concerns.push(format!("basic place (price level {price}) at {name}"));
    }
}

/// `min(1.0, matching / 5.0)`. Concerns never subtract.
#[must_use]
pub fn score_for(matching_factors: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let count = matching_factors as f64;
    (count / SATURATION).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dinefind_places::Geometry;

    fn place(name: &str, rating: f64, reviews: u32, price: Option<u8>) -> PlaceDetail {
        PlaceDetail {
            place_id: format!("id-{name}"),
            name: name.to_owned(),
            formatted_address: format!("{name} street 1"),
            phone: None,
            website: None,
            url: None,
            opening_hours: None,
            rating,
            review_count: reviews,
            price_level: price,
            geometry: Geometry::UNKNOWN,
            vicinity: "Palermo".to_owned(),
        }
    }

    fn names(details: &[PlaceDetail]) -> Vec<&str> {
        details.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn empty_input_reports_nothing_to_analyze() {
        let (ranked, analysis) = analyze(Vec::new());
        assert!(ranked.is_empty());
        assert!(analysis.matching_factors().is_empty());
        assert_eq!(analysis.concerns(), [EMPTY_CONCERN]);
        assert_eq!(analysis.score(), 0.0);
    }

    #[test]
    fn rating_dominates_review_count() {
        let (ranked, _) = analyze(vec![
            place("Busy", 4.0, 5000, None),
            place("Quiet", 4.8, 10, None),
        ]);
        assert_eq!(names(&ranked), ["Quiet", "Busy"]);
    }

    #[test]
    fn review_count_breaks_rating_ties() {
        let (ranked, _) = analyze(vec![
            place("Few", 4.2, 20, None),
            place("Many", 4.2, 900, None),
        ]);
        assert_eq!(names(&ranked), ["Many", "Few"]);
    }

    #[test]
    fn full_ties_keep_input_order() {
        let (ranked, _) = analyze(vec![
            place("First", 4.0, 100, None),
            place("Second", 4.0, 100, None),
            place("Third", 4.0, 100, None),
        ]);
        assert_eq!(names(&ranked), ["First", "Second", "Third"]);
    }

    #[test]
    fn ranked_order_is_lexicographically_non_increasing() {
        let (ranked, _) = analyze(vec![
            place("a", 3.1, 40, None),
            place("b", 4.9, 12, None),
            place("c", 4.9, 300, None),
            place("d", 2.0, 1000, None),
            place("e", 4.0, 0, None),
        ]);
        for pair in ranked.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(
                a.rating > b.rating || (a.rating == b.rating && a.review_count >= b.review_count),
                "{} should not precede {}",
                a.name,
                b.name
            );
        }
    }

    #[test]
    fn sushi_palermo_scenario() {
        let (ranked, analysis) = analyze(vec![
            place("Cheap Rolls", 3.0, 10, Some(1)),
            place("Sushi Club", 4.5, 200, Some(3)),
        ]);
        assert_eq!(names(&ranked), ["Sushi Club", "Cheap Rolls"]);
        assert_eq!(
            analysis.matching_factors(),
            [
                "high rating (4.5) at Sushi Club",
                "popular place (200 reviews) at Sushi Club",
                "upscale place (price level 3) at Sushi Club",
            ]
        );
        assert_eq!(
            analysis.concerns(),
            [
                "low rating (3.0) at Cheap Rolls",
                "few reviews (10) at Cheap Rolls",
                "basic place (price level 1) at Cheap Rolls",
            ]
        );
        assert!((analysis.score() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn missing_price_level_counts_as_basic() {
        let (_, analysis) = analyze(vec![place("Unknown Price", 3.8, 75, None)]);
        assert!(analysis.matching_factors().is_empty());
        assert_eq!(
            analysis.concerns(),
            ["basic place (price level 1) at Unknown Price"]
        );
    }

    #[test]
    fn mid_range_place_produces_no_observations() {
        let (_, analysis) = analyze(vec![place("Middle", 3.7, 60, Some(2))]);
        assert!(analysis.matching_factors().is_empty());
        assert!(analysis.concerns().is_empty());
        assert_eq!(analysis.score(), 0.0);
    }

    #[test]
    fn duplicate_observations_are_kept() {
        let (_, analysis) = analyze(vec![
            place("Twin", 4.1, 10, Some(2)),
            place("Twin", 4.1, 10, Some(2)),
        ]);
        assert_eq!(
            analysis.matching_factors(),
            ["high rating (4.1) at Twin", "high rating (4.1) at Twin"]
        );
    }

    #[test]
    fn concerns_do_not_reduce_score() {
        let (_, with_concerns) = analyze(vec![place("Mixed", 4.5, 10, Some(1))]);
        let (_, without) = analyze(vec![place("Clean", 4.5, 60, Some(2))]);
        assert_eq!(with_concerns.matching_factors().len(), 1);
        assert_eq!(with_concerns.score(), without.score());
    }

    #[test]
    fn score_saturates_at_five_factors() {
        assert_eq!(score_for(0), 0.0);
        assert!((score_for(3) - 0.6).abs() < 1e-9);
        assert!(score_for(4) < 1.0);
        assert_eq!(score_for(5), 1.0);
        assert_eq!(score_for(12), 1.0);
    }

    #[test]
    fn score_is_monotone_in_factor_count() {
        let mut previous = score_for(0);
        for n in 1..20 {
            let current = score_for(n);
            assert!(current >= previous);
            assert!((0.0..=1.0).contains(&current));
            previous = current;
        }
    }
}
