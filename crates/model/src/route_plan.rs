use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::{
    id::{HasId, Id},
    serde::{date, date_time},
};

use crate::{
    coordinate::{self, Coordinate},
    ExampleData, InvalidInput, Validate,
};

/// Planned start and end of the trip.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RoutePlan {
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(deserialize_with = "date::deserialize_option")]
    pub start_date: Option<NaiveDate>,
    #[serde(deserialize_with = "date::deserialize_option")]
    pub end_date: Option<NaiveDate>,
    #[serde(alias = "startCoords", deserialize_with = "coordinate::deserialize_option")]
    pub start_coordinate: Option<Coordinate>,
    #[serde(alias = "endCoords", deserialize_with = "coordinate::deserialize_option")]
    pub end_coordinate: Option<Coordinate>,
}

impl Validate for RoutePlan {
    fn validate(&self) -> Result<(), InvalidInput> {
        self.start_coordinate.validate()?;
        self.end_coordinate.validate()
    }
}

impl ExampleData for RoutePlan {
    fn example_data() -> Self {
        Self {
            start: Some("Delhi".to_owned()),
            end: Some("Ahmedabad".to_owned()),
            start_date: NaiveDate::from_ymd_opt(2024, 6, 3),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 6),
            start_coordinate: Some(Coordinate::new(28.6139, 77.2090)),
            end_coordinate: Some(Coordinate::new(23.0225, 72.5714)),
        }
    }
}

/// An intermediate stop along the route.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    #[serde(default)]
    pub id: Id<Stop>,
    pub name: String,
    pub location: Option<String>,
    #[serde(deserialize_with = "date_time::deserialize_instant_option", default)]
    pub arrival: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "date_time::deserialize_instant_option", default)]
    pub departure: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    #[serde(
        alias = "coords",
        deserialize_with = "coordinate::deserialize_option",
        default
    )]
    pub coordinate: Option<Coordinate>,
}

impl HasId for Stop {
    type IdType = u64;
}

impl Validate for Stop {
    fn validate(&self) -> Result<(), InvalidInput> {
        self.coordinate.validate()
    }
}

impl ExampleData for Stop {
    fn example_data() -> Self {
        Stop {
            id: Id::new(1717400000003),
            name: "Jaipur".to_owned(),
            location: Some("Hawa Mahal".to_owned()),
            arrival: None,
            departure: None,
            notes: None,
            coordinate: Some(Coordinate::new(26.9124, 75.7873)),
        }
    }
}
