// Hotel record model shared by every stage of the listing pipeline

use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

// Reasons a single catalog entry cannot become a HotelRecord
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Hotel has no room offers")]
    NoRooms,

    #[error("Invalid price {price} for room offer {index}")]
    InvalidPrice { index: usize, price: f64 },

    #[error("Unparseable price: {0}")]
    UnparseablePrice(String),

    #[error("Rating {0} outside [0, 5]")]
    RatingOutOfRange(f64),

    #[error("Unrecognized entry shape: {0}")]
    UnknownShape(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomOffer {
    pub price: f64,
    pub room_type: String,
    pub bed_configuration: String,
    pub cancellation_policy: String,
    pub board_type: String,
    pub special_conditions: Vec<String>,
}

impl RoomOffer {
    // Room offer carrying only a price, used for listings that never had room detail
    pub fn priced(price: f64) -> Self {
        Self {
            price,
            room_type: String::new(),
            bed_configuration: String::new(),
            cancellation_policy: String::new(),
            board_type: String::new(),
            special_conditions: Vec::new(),
        }
    }
}

/// A validated hotel listing.
///
/// Construction goes through [`HotelRecord::new`], which rejects empty room lists,
/// negative or non-finite prices and ratings outside `[0, 5]`. Once built a record is
/// never mutated, so every accessor can rely on those invariants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelRecord {
    name: String,
    location: String,
    details: String,
    rating: f64,
    review_count: u64,
    rooms: Vec<RoomOffer>,
    amenities: BTreeSet<String>,
    image_url: String,
    detail_link: String,
}

// Builder-style input for HotelRecord::new
#[derive(Debug, Clone, Default)]
pub struct HotelFields {
    pub name: String,
    pub location: String,
    pub details: String,
    pub rating: f64,
    pub review_count: u64,
    pub rooms: Vec<RoomOffer>,
    pub amenities: BTreeSet<String>,
    pub image_url: String,
    pub detail_link: String,
}

impl HotelRecord {
    pub fn new(fields: HotelFields) -> Result<Self, RecordError> {
        if fields.rooms.is_empty() {
            return Err(RecordError::NoRooms);
        }

        if let Some((index, room)) = fields
            .rooms
            .iter()
            .enumerate()
            .find(|(_, room)| !room.price.is_finite() || room.price < 0.0)
        {
            return Err(RecordError::InvalidPrice {
                index,
                price: room.price,
            });
        }

        if !(0.0..=5.0).contains(&fields.rating) {
            // NaN fails the range check as well
            return Err(RecordError::RatingOutOfRange(fields.rating));
        }

        // Adding 0.0 turns -0.0 into 0.0 so equal values compare equal under total_cmp
        let rooms = fields
            .rooms
            .into_iter()
            .map(|room| RoomOffer {
                price: room.price + 0.0,
                ..room
            })
            .collect();

        Ok(Self {
            name: fields.name,
            location: fields.location,
            details: fields.details,
            rating: fields.rating + 0.0,
            review_count: fields.review_count,
            rooms,
            amenities: fields.amenities,
            image_url: fields.image_url,
            detail_link: fields.detail_link,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn review_count(&self) -> u64 {
        self.review_count
    }

    pub fn rooms(&self) -> &[RoomOffer] {
        &self.rooms
    }

    pub fn amenities(&self) -> &BTreeSet<String> {
        &self.amenities
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn detail_link(&self) -> &str {
        &self.detail_link
    }

    /// Price of the first listed room offer, not the cheapest one.
    /// Price filtering and sorting both key on it.
    pub fn headline_price(&self) -> f64 {
        self.rooms[0].price
    }

    // Icons for the amenities of this hotel, in amenity order
    pub fn amenity_icons(&self) -> impl Iterator<Item = (&str, AmenityIcon)> + '_ {
        self.amenities
            .iter()
            .map(|amenity| (amenity.as_str(), AmenityIcon::for_amenity(amenity)))
    }
}

// Icon shown next to an amenity in a listing card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AmenityIcon {
    Wifi,
    Parking,
    Coffee,
    Generic,
}

impl AmenityIcon {
    const KEYWORDS: &'static [(&'static str, AmenityIcon)] = &[
        ("wifi", AmenityIcon::Wifi),
        ("wi-fi", AmenityIcon::Wifi),
        ("internet", AmenityIcon::Wifi),
        ("parking", AmenityIcon::Parking),
        ("garage", AmenityIcon::Parking),
        ("valet", AmenityIcon::Parking),
        ("coffee", AmenityIcon::Coffee),
        ("breakfast", AmenityIcon::Coffee),
        ("cafe", AmenityIcon::Coffee),
        ("café", AmenityIcon::Coffee),
    ];

    /// Maps any amenity string to an icon. Unknown amenities get [`AmenityIcon::Generic`].
    pub fn for_amenity(amenity: &str) -> Self {
        let amenity = amenity.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(keyword, _)| amenity.contains(keyword))
            .map_or(AmenityIcon::Generic, |(_, icon)| *icon)
    }

    pub fn icon_name(self) -> &'static str {
        match self {
            AmenityIcon::Wifi => "wifi",
            AmenityIcon::Parking => "car",
            AmenityIcon::Coffee => "coffee",
            AmenityIcon::Generic => "check",
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn hotel(name: &str, location: &str, price: f64, rating: f64) -> HotelRecord {
        hotel_with_rooms(name, location, vec![price], rating)
    }

    pub fn hotel_with_rooms(
        name: &str,
        location: &str,
        prices: Vec<f64>,
        rating: f64,
    ) -> HotelRecord {
        HotelRecord::new(HotelFields {
            name: name.to_string(),
            location: location.to_string(),
            rating,
            review_count: 10,
            rooms: prices.into_iter().map(RoomOffer::priced).collect(),
            ..HotelFields::default()
        })
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_headline_price_is_first_room_not_cheapest() {
        let hotel = hotel_with_rooms("Park Lane", "Midtown", vec![180.0, 95.0, 240.0], 4.2);
        assert_eq!(hotel.headline_price(), 180.0);
        assert_eq!(hotel.rooms().len(), 3);
    }

    #[test]
    fn test_rejects_hotel_without_rooms() {
        let result = HotelRecord::new(HotelFields {
            name: "Empty".to_string(),
            rating: 3.0,
            ..HotelFields::default()
        });
        assert_eq!(result, Err(RecordError::NoRooms));
    }

    #[test_case(-1.0; "negative price")]
    #[test_case(f64::NAN; "nan price")]
    #[test_case(f64::INFINITY; "infinite price")]
    fn test_rejects_invalid_prices(price: f64) {
        let result = HotelRecord::new(HotelFields {
            rating: 3.0,
            rooms: vec![RoomOffer::priced(100.0), RoomOffer::priced(price)],
            ..HotelFields::default()
        });
        assert!(matches!(
            result,
            Err(RecordError::InvalidPrice { index: 1, .. })
        ));
    }

    #[test_case(5.1; "above five")]
    #[test_case(-0.5; "negative")]
    #[test_case(f64::NAN; "nan")]
    fn test_rejects_rating_out_of_range(rating: f64) {
        let result = HotelRecord::new(HotelFields {
            rating,
            rooms: vec![RoomOffer::priced(100.0)],
            ..HotelFields::default()
        });
        assert!(matches!(result, Err(RecordError::RatingOutOfRange(_))));
    }

    #[test]
    fn test_accepts_boundary_values() {
        let free = hotel("Hostel", "Bronx", 0.0, 0.0);
        assert_eq!(free.headline_price(), 0.0);
        let top = hotel("Palace", "Upper East Side", 999.0, 5.0);
        assert_eq!(top.rating(), 5.0);
    }

    #[test]
    fn test_negative_zero_normalized() {
        let hotel = hotel("Zero", "Nowhere", -0.0, -0.0);
        assert!(hotel.headline_price().is_sign_positive());
        assert!(hotel.rating().is_sign_positive());
    }

    #[test_case("Free WiFi", AmenityIcon::Wifi)]
    #[test_case("High-speed internet", AmenityIcon::Wifi)]
    #[test_case("Valet parking", AmenityIcon::Parking)]
    #[test_case("Breakfast included", AmenityIcon::Coffee)]
    #[test_case("Rooftop pool", AmenityIcon::Generic)]
    #[test_case("", AmenityIcon::Generic)]
    fn test_amenity_icon_mapping(amenity: &str, expected: AmenityIcon) {
        assert_eq!(AmenityIcon::for_amenity(amenity), expected);
    }

    #[test]
    fn test_amenity_icons_follow_amenity_set() {
        let hotel = HotelRecord::new(HotelFields {
            rating: 4.0,
            rooms: vec![RoomOffer::priced(120.0)],
            amenities: ["Spa", "Wifi"].iter().map(|s| s.to_string()).collect(),
            ..HotelFields::default()
        })
        .unwrap();

        let icons: Vec<_> = hotel
            .amenity_icons()
            .map(|(_, icon)| icon.icon_name())
            .collect();
        assert_eq!(icons, vec!["check", "wifi"]);
    }
}
