use itertools::Itertools;
use model::waypoint::{Waypoint, WaypointKind};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::chain;

/// One segment of the planned route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub from: String,
    pub to: String,
    pub distance_km: f64,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub start: Option<String>,
    pub end: Option<String>,
    /// all planned stops, with or without coordinates
    pub stop_count: usize,
    pub point_count: usize,
    pub total_distance_km: f64,
    pub legs: Vec<Leg>,
}

/// Labelled legs between consecutive chained waypoints.
pub fn legs(waypoints: &[Waypoint]) -> Vec<Leg> {
    chain(waypoints)
        .into_iter()
        .tuple_windows()
        .map(|((from, from_coordinate), (to, to_coordinate))| Leg {
            from: from.label.clone(),
            to: to.label.clone(),
            distance_km: from_coordinate.distance_km(&to_coordinate),
        })
        .collect()
}

fn label_of(waypoints: &[Waypoint], kind: WaypointKind) -> Option<String> {
    waypoints
        .iter()
        .find(|waypoint| waypoint.kind == kind)
        .map(|waypoint| waypoint.label.clone())
}

pub fn summarize(waypoints: &[Waypoint]) -> RouteSummary {
    let legs = legs(waypoints);
    RouteSummary {
        start: label_of(waypoints, WaypointKind::Start),
        end: label_of(waypoints, WaypointKind::End),
        stop_count: waypoints
            .iter()
            .filter(|waypoint| waypoint.kind == WaypointKind::Stop)
            .count(),
        point_count: crate::point_count(waypoints),
        total_distance_km: legs.iter().map(|leg| leg.distance_km).sum(),
        legs,
    }
}
