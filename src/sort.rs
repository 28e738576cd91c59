// Sort Engine: orders the filtered hotels by the active sort key

use crate::filter::UnknownToken;
use crate::hotel::HotelRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum SortKey {
    // Catalog order
    #[default]
    #[serde(rename = "recommended")]
    Recommended,
    #[serde(rename = "price-asc")]
    PriceAscending,
    #[serde(rename = "price-desc")]
    PriceDescending,
    #[serde(rename = "rating")]
    RatingDescending,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Recommended,
        SortKey::PriceAscending,
        SortKey::PriceDescending,
        SortKey::RatingDescending,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Recommended => "recommended",
            SortKey::PriceAscending => "price-asc",
            SortKey::PriceDescending => "price-desc",
            SortKey::RatingDescending => "rating",
        }
    }
}

impl FromStr for SortKey {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownToken(s.to_string()))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the hotels ordered by `key`, leaving `records` untouched.
///
/// The ordering is stable: hotels with equal keys keep their relative input order.
/// `Recommended` never runs a comparator and returns the input order as is.
pub fn sort<'a>(records: &[&'a HotelRecord], key: SortKey) -> Vec<&'a HotelRecord> {
    let mut sorted = records.to_vec();

    match key {
        SortKey::Recommended => {}
        SortKey::PriceAscending => {
            sorted.sort_by(|a, b| a.headline_price().total_cmp(&b.headline_price()))
        }
        SortKey::PriceDescending => {
            sorted.sort_by(|a, b| b.headline_price().total_cmp(&a.headline_price()))
        }
        SortKey::RatingDescending => sorted.sort_by(|a, b| b.rating().total_cmp(&a.rating())),
    }

    tracing::debug!("Sorted {} hotels by {}", sorted.len(), key);
    sorted
}
