use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::serde::date_time;

use crate::{coordinate::Coordinate, InvalidInput, Validate};

/// A GPS fix recorded while traveling. The position is stored inline,
/// `{latitude, longitude, timestamp, ...}`, and `lat`/`lng` are read as well.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", from = "LocationSampleInput")]
pub struct LocationSample {
    #[serde(flatten)]
    pub coordinate: Coordinate,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub sequence_index: u32,
    /// reported accuracy radius in meters
    pub accuracy_m: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationSampleInput {
    #[serde(alias = "lat")]
    latitude: f64,
    #[serde(alias = "lng")]
    longitude: f64,
    #[serde(deserialize_with = "date_time::deserialize_instant")]
    timestamp: DateTime<Utc>,
    #[serde(default)]
    sequence_index: u32,
    #[serde(alias = "accuracy", default)]
    accuracy_m: Option<f64>,
}

impl From<LocationSampleInput> for LocationSample {
    fn from(input: LocationSampleInput) -> Self {
        Self {
            coordinate: Coordinate::new(input.latitude, input.longitude),
            timestamp: input.timestamp,
            sequence_index: input.sequence_index,
            accuracy_m: input.accuracy_m,
        }
    }
}

impl LocationSample {
    pub fn new(coordinate: Coordinate, timestamp: DateTime<Utc>, sequence_index: u32) -> Self {
        Self {
            coordinate,
            timestamp,
            sequence_index,
            accuracy_m: None,
        }
    }
}

impl Validate for LocationSample {
    fn validate(&self) -> Result<(), InvalidInput> {
        self.coordinate.validate()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn reads_tracker_fix() {
        let sample: LocationSample = serde_json::from_str(
            r#"{"lat": 26.9124, "lng": 75.7873, "timestamp": "2024-06-03T08:00:00.000Z", "accuracy": 14.5, "distance": 235.3}"#,
        )
        .unwrap();
        assert_eq!(sample.coordinate, Coordinate::new(26.9124, 75.7873));
        assert_eq!(
            sample.timestamp,
            Utc.with_ymd_and_hms(2024, 6, 3, 8, 0, 0).unwrap()
        );
        assert_eq!(sample.accuracy_m, Some(14.5));
        assert_eq!(sample.sequence_index, 0);
    }

    #[test]
    fn position_is_written_inline() {
        let sample = LocationSample::new(
            Coordinate::new(28.6139, 77.209),
            Utc.with_ymd_and_hms(2024, 6, 3, 6, 0, 0).unwrap(),
            3,
        );
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["latitude"], 28.6139);
        assert_eq!(json["sequenceIndex"], 3);
        assert!(json.get("accuracyM").is_none());
        let parsed: LocationSample = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, sample);
    }
}
