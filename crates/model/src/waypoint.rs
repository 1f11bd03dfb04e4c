use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{coordinate::Coordinate, InvalidInput, Validate};

/// Position class of a waypoint in a route. The derived ordering is the order
/// in which kinds are chained: start, then stops, then end.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WaypointKind {
    Start,
    Stop,
    End,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    pub coordinate: Option<Coordinate>,
    pub label: String,
    pub kind: WaypointKind,
    pub sequence: u32,
}

impl Waypoint {
    pub fn new<S: Into<String>>(
        kind: WaypointKind,
        sequence: u32,
        label: S,
        coordinate: Option<Coordinate>,
    ) -> Self {
        Self {
            coordinate,
            label: label.into(),
            kind,
            sequence,
        }
    }

    pub fn start<S: Into<String>>(label: S, coordinate: Coordinate) -> Self {
        Self::new(WaypointKind::Start, 0, label, Some(coordinate))
    }

    pub fn stop<S: Into<String>>(sequence: u32, label: S, coordinate: Coordinate) -> Self {
        Self::new(WaypointKind::Stop, sequence, label, Some(coordinate))
    }

    pub fn end<S: Into<String>>(sequence: u32, label: S, coordinate: Coordinate) -> Self {
        Self::new(WaypointKind::End, sequence, label, Some(coordinate))
    }
}

impl Validate for Waypoint {
    fn validate(&self) -> Result<(), InvalidInput> {
        self.coordinate.validate()
    }
}
