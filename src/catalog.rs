// Catalog loading: turns a JSON snapshot into validated hotel records
// Malformed entries are quarantined at this boundary so nothing downstream has to re-check shape

use crate::config::EngineConfig;
use crate::hotel::{HotelFields, HotelRecord, RecordError, RoomOffer};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(String),

    #[error("Catalog snapshot must be a JSON array of hotels")]
    NotAnArray,

    #[error("Malformed catalog entry {index}: {source}")]
    Malformed { index: usize, source: RecordError },
}

// Data structures for the catalog snapshot JSON
#[derive(Debug, Deserialize, Serialize)]
pub struct SnapshotHotel {
    pub hotel_name: String,
    pub location: String,
    #[serde(default)]
    pub details: String,
    pub review_scores: SnapshotReviewScores,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub rooms: Vec<SnapshotRoom>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub hotel_link: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SnapshotReviewScores {
    pub rating: f64,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SnapshotRoom {
    pub price: SnapshotPrice,
    #[serde(default)]
    pub room_type: String,
    #[serde(default)]
    pub bed_configuration: String,
    #[serde(default)]
    pub cancellation_policy: String,
    #[serde(default)]
    pub board_type: String,
    #[serde(default)]
    pub special_conditions: Vec<String>,
}

// Prices arrive as numbers, but older exports carry them as "$120" strings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SnapshotPrice {
    Amount(f64),
    Text(String),
}

impl SnapshotPrice {
    pub fn normalize(&self) -> Result<f64, RecordError> {
        match self {
            SnapshotPrice::Amount(amount) => Ok(*amount),
            SnapshotPrice::Text(text) => parse_price_text(text),
        }
    }
}

// Flat listing shape written by the original scraper
#[derive(Debug, Deserialize, Serialize)]
pub struct LegacyListing {
    pub name: String,
    pub location: String,
    pub price: SnapshotPrice,
    pub rating: String,
    #[serde(default)]
    pub amenities: Option<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub hotel_link: String,
}

const CURRENCY_PREFIXES: &[&str] = &["US$", "$", "€", "£"];
const MISSING_VALUE: &str = "N/A";

fn parse_price_text(text: &str) -> Result<f64, RecordError> {
    let trimmed = text.trim();
    let digits = CURRENCY_PREFIXES
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .unwrap_or(trimmed)
        .trim()
        .replace(',', "");

    digits
        .parse::<f64>()
        .map_err(|_| RecordError::UnparseablePrice(text.to_string()))
}

impl TryFrom<SnapshotHotel> for HotelRecord {
    type Error = RecordError;

    fn try_from(item: SnapshotHotel) -> Result<Self, Self::Error> {
        let rooms = item
            .rooms
            .into_iter()
            .map(|room| {
                Ok(RoomOffer {
                    price: room.price.normalize()?,
                    room_type: room.room_type,
                    bed_configuration: room.bed_configuration,
                    cancellation_policy: room.cancellation_policy,
                    board_type: room.board_type,
                    special_conditions: room.special_conditions,
                })
            })
            .collect::<Result<Vec<_>, RecordError>>()?;

        HotelRecord::new(HotelFields {
            name: item.hotel_name,
            location: item.location,
            details: item.details,
            rating: item.review_scores.rating,
            review_count: item.review_scores.count,
            rooms,
            amenities: item.amenities.into_iter().collect(),
            image_url: item.image_url,
            detail_link: item.hotel_link,
        })
    }
}

impl TryFrom<LegacyListing> for HotelRecord {
    type Error = RecordError;

    fn try_from(item: LegacyListing) -> Result<Self, Self::Error> {
        // "<label>\n<count> reviews\n<score>"
        let lines: Vec<&str> = item.rating.lines().map(str::trim).collect();
        let rating = lines
            .get(2)
            .and_then(|score| score.parse::<f64>().ok())
            .ok_or(RecordError::MissingField("rating"))?;
        let review_count = lines
            .get(1)
            .map(|count| {
                count
                    .chars()
                    .filter(char::is_ascii_digit)
                    .collect::<String>()
            })
            .and_then(|digits| digits.parse::<u64>().ok())
            .unwrap_or(0);

        let amenities: BTreeSet<String> = match item.amenities.as_deref() {
            None | Some(MISSING_VALUE) => BTreeSet::new(),
            Some(text) => text
                .split([',', '\n'])
                .map(str::trim)
                .filter(|amenity| !amenity.is_empty())
                .map(str::to_string)
                .collect(),
        };

        HotelRecord::new(HotelFields {
            name: item.name,
            location: item.location,
            details: String::new(),
            rating,
            review_count,
            rooms: vec![RoomOffer::priced(item.price.normalize()?)],
            amenities,
            image_url: item.image_url,
            detail_link: item.hotel_link,
        })
    }
}

// Parse one catalog entry in either the snapshot or the legacy listing shape
pub fn parse_entry(value: Value) -> Result<HotelRecord, RecordError> {
    let is_snapshot = match value.as_object() {
        Some(object) if object.contains_key("hotel_name") => true,
        Some(object) if object.contains_key("name") => false,
        Some(_) => return Err(RecordError::MissingField("hotel_name")),
        None => return Err(RecordError::UnknownShape(format!("expected object, got {}", value))),
    };

    if is_snapshot {
        serde_json::from_value::<SnapshotHotel>(value)
            .map_err(|e| RecordError::UnknownShape(e.to_string()))?
            .try_into()
    } else {
        serde_json::from_value::<LegacyListing>(value)
            .map_err(|e| RecordError::UnknownShape(e.to_string()))?
            .try_into()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuarantinedEntry {
    pub index: usize,
    pub reason: RecordError,
}

/// Immutable snapshot of every hotel available for a browsing session.
#[derive(Debug, Clone)]
pub struct Catalog {
    hotels: Vec<HotelRecord>,
    quarantined: Vec<QuarantinedEntry>,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    pub fn new(hotels: Vec<HotelRecord>) -> Self {
        Self {
            hotels,
            quarantined: Vec::new(),
            loaded_at: Utc::now(),
        }
    }

    pub fn from_json_str(json: &str, config: &EngineConfig) -> Result<Self, CatalogError> {
        let document: Value =
            serde_json::from_str(json).map_err(|e| CatalogError::JsonParse(e.to_string()))?;
        let entries = match document {
            Value::Array(entries) => entries,
            _ => return Err(CatalogError::NotAnArray),
        };

        let mut hotels = Vec::with_capacity(entries.len());
        let mut quarantined = Vec::new();

        for (index, entry) in entries.into_iter().enumerate() {
            match parse_entry(entry) {
                Ok(hotel) => hotels.push(hotel),
                Err(source) if config.strict_loading => {
                    return Err(CatalogError::Malformed { index, source });
                }
                Err(reason) => {
                    tracing::warn!(index, %reason, "Quarantining malformed catalog entry");
                    quarantined.push(QuarantinedEntry { index, reason });
                }
            }
        }

        tracing::info!(
            loaded = hotels.len(),
            quarantined = quarantined.len(),
            "Catalog loaded"
        );

        Ok(Self {
            hotels,
            quarantined,
            loaded_at: Utc::now(),
        })
    }

    pub fn from_path(path: impl AsRef<Path>, config: &EngineConfig) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content, config)
    }

    pub fn hotels(&self) -> &[HotelRecord] {
        &self.hotels
    }

    pub fn quarantined(&self) -> &[QuarantinedEntry] {
        &self.quarantined
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.hotels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty()
    }
}

// Sample snapshot shipped with the crate
pub const SAMPLE_CATALOG_PATH: &str = "samples/hotel_data.json";
