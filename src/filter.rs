// Filter Engine: reduces the catalog to the hotels matching the active criteria

use crate::hotel::HotelRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceBand {
    #[default]
    All,
    // Up to 100
    Budget,
    // Above 100, up to 200
    Mid,
    // Above 200
    Luxury,
}

impl PriceBand {
    pub fn contains(self, price: f64) -> bool {
        match self {
            PriceBand::All => true,
            PriceBand::Budget => price <= 100.0,
            PriceBand::Mid => price > 100.0 && price <= 200.0,
            PriceBand::Luxury => price > 200.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PriceBand::All => "all",
            PriceBand::Budget => "budget",
            PriceBand::Mid => "mid",
            PriceBand::Luxury => "luxury",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum RatingBand {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "4plus")]
    FourPlus,
    #[serde(rename = "3plus")]
    ThreePlus,
}

impl RatingBand {
    pub fn contains(self, rating: f64) -> bool {
        match self {
            RatingBand::All => true,
            RatingBand::FourPlus => rating >= 4.0,
            RatingBand::ThreePlus => rating >= 3.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RatingBand::All => "all",
            RatingBand::FourPlus => "4plus",
            RatingBand::ThreePlus => "3plus",
        }
    }
}

// Token parsing for values coming from the presentation layer

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown token: {0}")]
pub struct UnknownToken(pub String);

impl FromStr for PriceBand {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            PriceBand::All,
            PriceBand::Budget,
            PriceBand::Mid,
            PriceBand::Luxury,
        ]
        .into_iter()
        .find(|band| band.as_str() == s)
        .ok_or_else(|| UnknownToken(s.to_string()))
    }
}

impl FromStr for RatingBand {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [RatingBand::All, RatingBand::FourPlus, RatingBand::ThreePlus]
            .into_iter()
            .find(|band| band.as_str() == s)
            .ok_or_else(|| UnknownToken(s.to_string()))
    }
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RatingBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user's current narrowing of the catalog.
///
/// Criteria are replaced as a whole whenever one field changes; nothing mutates a
/// `FilterCriteria` that the query state already holds.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub search_text: String,
    pub price_band: PriceBand,
    pub rating_band: RatingBand,
}

impl FilterCriteria {
    pub fn with_search_text(&self, search_text: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            ..self.clone()
        }
    }

    pub fn with_price_band(&self, price_band: PriceBand) -> Self {
        Self {
            price_band,
            ..self.clone()
        }
    }

    pub fn with_rating_band(&self, rating_band: RatingBand) -> Self {
        Self {
            rating_band,
            ..self.clone()
        }
    }

    pub fn matches(&self, hotel: &HotelRecord) -> bool {
        self.matches_with_needle(hotel, &self.search_text.to_lowercase())
    }

    // `needle` is the search text already lower-cased
    fn matches_with_needle(&self, hotel: &HotelRecord, needle: &str) -> bool {
        matches_text(hotel, needle)
            && self.price_band.contains(hotel.headline_price())
            && self.rating_band.contains(hotel.rating())
    }
}

fn matches_text(hotel: &HotelRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    hotel.name().to_lowercase().contains(needle)
        || hotel.location().to_lowercase().contains(needle)
}

// Keep the hotels matching every criterion, in catalog order
pub fn filter<'a>(catalog: &'a [HotelRecord], criteria: &FilterCriteria) -> Vec<&'a HotelRecord> {
    let needle = criteria.search_text.to_lowercase();
    let filtered: Vec<&HotelRecord> = catalog
        .iter()
        .filter(|hotel| criteria.matches_with_needle(hotel, &needle))
        .collect();

    tracing::debug!(
        "Filter applied (input count: {}, output count: {})",
        catalog.len(),
        filtered.len()
    );
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hotel::fixtures::hotel;
    use test_case::test_case;

    fn sample_catalog() -> Vec<HotelRecord> {
        vec![
            hotel("Central Park Inn", "Upper West Side", 145.0, 4.4),
            hotel("Budget Stay", "Queens", 80.0, 3.1),
            hotel("The Grand", "Park Avenue", 320.0, 4.8),
            hotel("Harbor Motel", "Brooklyn", 100.0, 2.9),
            hotel("Midtown Suites", "Midtown", 200.0, 3.9),
            hotel("Riverside Lodge", "Harlem", 60.0, 4.0),
        ]
    }

    fn names(hotels: &[&HotelRecord]) -> Vec<String> {
        hotels.iter().map(|h| h.name().to_string()).collect()
    }

    #[test_case(FilterCriteria {search_text: "park".to_string(), ..FilterCriteria::default()},
        vec!["Central Park Inn", "The Grand"]; "#1 Search matches name or location")]
    #[test_case(FilterCriteria {search_text: "PARK".to_string(), ..FilterCriteria::default()},
        vec!["Central Park Inn", "The Grand"]; "#2 Search is case-insensitive")]
    #[test_case(FilterCriteria {price_band: PriceBand::Budget, ..FilterCriteria::default()},
        vec!["Budget Stay", "Harbor Motel", "Riverside Lodge"]; "#3 Budget includes 100")]
    #[test_case(FilterCriteria {price_band: PriceBand::Mid, ..FilterCriteria::default()},
        vec!["Central Park Inn", "Midtown Suites"]; "#4 Mid includes 200 and excludes 100")]
    #[test_case(FilterCriteria {price_band: PriceBand::Luxury, ..FilterCriteria::default()},
        vec!["The Grand"]; "#5 Luxury is above 200")]
    #[test_case(FilterCriteria {rating_band: RatingBand::FourPlus, ..FilterCriteria::default()},
        vec!["Central Park Inn", "The Grand", "Riverside Lodge"]; "#6 Four plus is inclusive")]
    #[test_case(FilterCriteria {rating_band: RatingBand::ThreePlus, ..FilterCriteria::default()},
        vec!["Central Park Inn", "Budget Stay", "The Grand", "Midtown Suites", "Riverside Lodge"]; "#7 Three plus")]
    #[test_case(FilterCriteria {search_text: "i".to_string(), price_band: PriceBand::Mid, rating_band: RatingBand::FourPlus},
        vec!["Central Park Inn"]; "#8 Combined filters")]
    #[test_case(FilterCriteria {search_text: "nowhere".to_string(), ..FilterCriteria::default()},
        vec![]; "#9 No matches")]
    fn test_criteria_filter_hotels(criteria: FilterCriteria, expected: Vec<&str>) {
        let catalog = sample_catalog();
        let results = filter(&catalog, &criteria);
        assert_eq!(names(&results), expected);
    }

    #[test]
    fn test_default_criteria_keep_everything_in_order() {
        let catalog = sample_catalog();
        let results = filter(&catalog, &FilterCriteria::default());
        assert_eq!(results.len(), catalog.len());
        assert!(results.iter().zip(&catalog).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn test_rating_boundary_scenario() {
        let catalog = vec![
            hotel("A", "X", 50.0, 3.9),
            hotel("B", "X", 50.0, 4.0),
            hotel("C", "X", 50.0, 4.5),
        ];
        let criteria = FilterCriteria::default().with_rating_band(RatingBand::FourPlus);
        assert_eq!(names(&filter(&catalog, &criteria)), vec!["B", "C"]);
    }

    #[test]
    fn test_price_band_uses_headline_price() {
        let catalog = vec![crate::hotel::fixtures::hotel_with_rooms(
            "Split Rate",
            "SoHo",
            vec![250.0, 90.0],
            4.0,
        )];
        let budget = FilterCriteria::default().with_price_band(PriceBand::Budget);
        let luxury = FilterCriteria::default().with_price_band(PriceBand::Luxury);
        assert!(filter(&catalog, &budget).is_empty());
        assert_eq!(filter(&catalog, &luxury).len(), 1);
    }

    #[test]
    fn test_filter_soundness_and_idempotence() {
        let catalog = sample_catalog();
        let criteria = FilterCriteria {
            search_text: "e".to_string(),
            price_band: PriceBand::Budget,
            rating_band: RatingBand::ThreePlus,
        };

        let once = filter(&catalog, &criteria);
        for hotel in &catalog {
            let kept = once.iter().any(|h| std::ptr::eq(*h, hotel));
            assert_eq!(kept, criteria.matches(hotel), "{}", hotel.name());
        }

        let owned: Vec<HotelRecord> = once.iter().map(|h| (*h).clone()).collect();
        let twice = filter(&owned, &criteria);
        assert_eq!(names(&once), names(&twice));
    }

    #[test_case("all", PriceBand::All)]
    #[test_case("budget", PriceBand::Budget)]
    #[test_case("mid", PriceBand::Mid)]
    #[test_case("luxury", PriceBand::Luxury)]
    fn test_price_band_tokens(token: &str, band: PriceBand) {
        assert_eq!(token.parse::<PriceBand>(), Ok(band));
        assert_eq!(band.to_string(), token);
    }

    #[test_case("all", RatingBand::All)]
    #[test_case("4plus", RatingBand::FourPlus)]
    #[test_case("3plus", RatingBand::ThreePlus)]
    fn test_rating_band_tokens(token: &str, band: RatingBand) {
        assert_eq!(token.parse::<RatingBand>(), Ok(band));
        assert_eq!(band.to_string(), token);
    }

    #[test]
    fn test_mixed_case_search_text_matches_like_single_record_check() {
        let catalog = sample_catalog();
        let criteria = FilterCriteria::default().with_search_text("bRoOkLyN");
        let results = filter(&catalog, &criteria);
        assert_eq!(names(&results), vec!["Harbor Motel"]);
        assert!(catalog
            .iter()
            .all(|h| criteria.matches(h) == results.iter().any(|r| std::ptr::eq(*r, h))));
    }

    #[test]
    fn test_unknown_token_is_an_error() {
        let err = "cheap".parse::<PriceBand>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown token: cheap");
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.source().is_none());
    }

    #[test]
    fn test_unknown_tokens_rejected() {
        assert_eq!(
            "cheap".parse::<PriceBand>(),
            Err(UnknownToken("cheap".to_string()))
        );
        assert!("5plus".parse::<RatingBand>().is_err());
    }

    #[test]
    fn test_criteria_deserialize_from_ui_tokens() {
        let criteria: FilterCriteria = serde_json::from_str(
            r#"{ "search_text": "soho", "price_band": "luxury", "rating_band": "4plus" }"#,
        )
        .unwrap();
        assert_eq!(criteria.price_band, PriceBand::Luxury);
        assert_eq!(criteria.rating_band, RatingBand::FourPlus);
    }
}
