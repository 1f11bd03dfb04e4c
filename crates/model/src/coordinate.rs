use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use utility::geo;

use crate::{InvalidInput, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lng")]
    pub longitude: f64,
}

/// Either spelling a stored document may use for a position.
#[derive(Deserialize)]
#[serde(untagged)]
enum CoordinateInput {
    Pair([f64; 2]),
    Object(Coordinate),
}

impl From<CoordinateInput> for Coordinate {
    fn from(value: CoordinateInput) -> Self {
        match value {
            CoordinateInput::Pair([latitude, longitude]) => Coordinate::new(latitude, longitude),
            CoordinateInput::Object(coordinate) => coordinate,
        }
    }
}

/// Reads an optional coordinate given as an object or as a
/// `[latitude, longitude]` pair.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<Coordinate>, D::Error>
where
    D: Deserializer<'de>,
{
    let input = Option::<CoordinateInput>::deserialize(deserializer)?;
    Ok(input.map(Coordinate::from))
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance in kilometers.
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        geo::haversine_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

impl Validate for Coordinate {
    fn validate(&self) -> Result<(), InvalidInput> {
        if !geo::is_valid_latitude(self.latitude) {
            return Err(InvalidInput::LatitudeOutOfRange(self.latitude));
        }
        if !geo::is_valid_longitude(self.longitude) {
            return Err(InvalidInput::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_delegates_to_haversine() {
        let delhi = Coordinate::new(28.6139, 77.2090);
        let jaipur = Coordinate::new(26.9124, 75.7873);
        let distance = delhi.distance_km(&jaipur);
        assert!((distance - 235.29).abs() < 0.1, "got {distance}");
        assert_eq!(delhi.distance_km(&delhi), 0.0);
    }

    #[derive(Deserialize)]
    struct Marker {
        #[serde(deserialize_with = "deserialize_option", default)]
        at: Option<Coordinate>,
    }

    #[test]
    fn reads_pairs_and_objects() {
        let pair: Marker = serde_json::from_str(r#"{"at": [26.9124, 75.7873]}"#).unwrap();
        assert_eq!(pair.at, Some(Coordinate::new(26.9124, 75.7873)));

        let short: Marker = serde_json::from_str(r#"{"at": {"lat": 26.9124, "lng": 75.7873}}"#).unwrap();
        assert_eq!(short.at, pair.at);

        let long: Marker =
            serde_json::from_str(r#"{"at": {"latitude": 26.9124, "longitude": 75.7873}}"#).unwrap();
        assert_eq!(long.at, pair.at);

        let missing: Marker = serde_json::from_str(r#"{"at": null}"#).unwrap();
        assert_eq!(missing.at, None);
        let absent: Marker = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.at, None);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Coordinate::new(45.0, 45.0).validate().is_ok());
        assert_eq!(
            Coordinate::new(91.0, 0.0).validate(),
            Err(InvalidInput::LatitudeOutOfRange(91.0))
        );
        assert_eq!(
            Coordinate::new(0.0, -181.0).validate(),
            Err(InvalidInput::LongitudeOutOfRange(-181.0))
        );
    }
}
