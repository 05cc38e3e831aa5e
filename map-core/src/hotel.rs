//! Hotel records
//!
//! A hotel is opaque to the filter apart from its identifier and
//! coordinates. Everything else the API sends (name, price, rating,
//! themes, ...) is carried through untouched.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::geo::Coordinates;

/// Stable hotel identifier
///
/// The REST API uses strings (`"cm-kani"`); the bundled demo data uses
/// integers. Both are accepted and kept as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawHotelId", into = "String")]
pub struct HotelId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawHotelId {
    Text(String),
    Number(i64),
}

impl From<RawHotelId> for HotelId {
    fn from(raw: RawHotelId) -> Self {
        match raw {
            RawHotelId::Text(s) => HotelId(s),
            RawHotelId::Number(n) => HotelId(n.to_string()),
        }
    }
}

impl From<HotelId> for String {
    fn from(id: HotelId) -> Self {
        id.0
    }
}

impl HotelId {
    pub fn new(id: impl Into<String>) -> Self {
        HotelId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HotelId {
    fn from(s: &str) -> Self {
        HotelId(s.to_string())
    }
}

impl From<String> for HotelId {
    fn from(s: String) -> Self {
        HotelId(s)
    }
}

impl From<i64> for HotelId {
    fn from(n: i64) -> Self {
        HotelId(n.to_string())
    }
}

impl fmt::Display for HotelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A hotel as supplied by the data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: HotelId,
    pub coordinates: Coordinates,
    /// Pass-through descriptive fields
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Hotel {
    pub fn new(id: impl Into<HotelId>, coordinates: Coordinates) -> Self {
        Self {
            id: id.into(),
            coordinates,
            details: Map::new(),
        }
    }

    /// Attach a descriptive field
    pub fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    /// Raw descriptive field
    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.get(key)
    }

    /// Descriptive field as a string
    pub fn detail_str(&self, key: &str) -> Option<&str> {
        self.details.get(key).and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.detail_str("name")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_string_ids() {
        let numeric: Hotel = serde_json::from_value(serde_json::json!({
            "id": 2,
            "name": "Ibis Kolkata Rajarhat",
            "coordinates": [88.345, 22.565]
        }))
        .unwrap();
        assert_eq!(numeric.id, HotelId::new("2"));
        assert_eq!(numeric.name(), Some("Ibis Kolkata Rajarhat"));

        let text: Hotel = serde_json::from_value(serde_json::json!({
            "id": "cm-kani",
            "coordinates": [73.5065, 4.2979],
            "themes": ["beach", "luxury"]
        }))
        .unwrap();
        assert_eq!(text.id.as_str(), "cm-kani");
        assert_eq!(text.detail("themes"), Some(&serde_json::json!(["beach", "luxury"])));
    }

    #[test]
    fn test_details_round_trip_untouched() {
        let input = serde_json::json!({
            "id": "cm-punta-cana",
            "coordinates": [-68.3725, 18.5601],
            "basePrice": 240,
            "rating": 4.6,
            "bookingUrl": "https://www.clubmed.example/book/punta-cana"
        });
        let hotel: Hotel = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(serde_json::to_value(&hotel).unwrap(), input);
    }
}
