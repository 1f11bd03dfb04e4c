use chrono::{TimeZone, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::{id::Id, math::sequence_number};

use crate::{
    coordinate::Coordinate,
    driver::DriverProfile,
    fuel::FuelRecord,
    location::LocationSample,
    money::{Contribution, Expense},
    route_plan::{RoutePlan, Stop},
    waypoint::{Waypoint, WaypointKind},
    ExampleData, InvalidInput, Validate,
};

/// The whole trip document as the browser front-end keeps it. It is always
/// stored and replaced as a unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct TripData {
    pub driver: DriverProfile,
    pub diesel_records: Vec<FuelRecord>,
    pub family_members: Vec<String>,
    pub contributions: Vec<Contribution>,
    pub route: RoutePlan,
    pub stops: Vec<Stop>,
    pub expenses: Vec<Expense>,
    pub location_history: Vec<LocationSample>,
}

impl TripData {
    /// Planned route as waypoints: the start, every stop in the order it was
    /// added, the end. Entries without coordinates are kept, route
    /// computations skip them.
    pub fn waypoints(&self) -> Vec<Waypoint> {
        let mut waypoints = Vec::with_capacity(self.stops.len() + 2);

        if self.route.start.is_some() || self.route.start_coordinate.is_some() {
            waypoints.push(Waypoint::new(
                WaypointKind::Start,
                0,
                self.route.start.clone().unwrap_or_else(|| "Start".to_owned()),
                self.route.start_coordinate,
            ));
        }

        waypoints.extend(self.stops.iter().zip(1..).map(|(stop, sequence)| {
            Waypoint::new(
                WaypointKind::Stop,
                sequence,
                stop.name.clone(),
                stop.coordinate,
            )
        }));

        if self.route.end.is_some() || self.route.end_coordinate.is_some() {
            waypoints.push(Waypoint::new(
                WaypointKind::End,
                sequence_number(self.stops.len()).saturating_add(1),
                self.route.end.clone().unwrap_or_else(|| "End".to_owned()),
                self.route.end_coordinate,
            ));
        }

        waypoints
    }
}

impl Validate for TripData {
    fn validate(&self) -> Result<(), InvalidInput> {
        self.driver.validate()?;
        self.diesel_records.validate()?;
        self.contributions.validate()?;
        self.route.validate()?;
        self.stops.validate()?;
        self.expenses.validate()?;
        self.location_history.validate()?;

        // samples must be in capture order
        match self
            .location_history
            .windows(2)
            .position(|pair| pair[1].timestamp < pair[0].timestamp)
        {
            Some(index) => Err(InvalidInput::LocationOutOfOrder { index: index + 1 }),
            None => Ok(()),
        }
    }
}

impl ExampleData for TripData {
    fn example_data() -> Self {
        let second_refill = FuelRecord {
            id: Id::new(1717400000004),
            odometer_km: rust_decimal::Decimal::new(48650, 0),
            liters: rust_decimal::Decimal::new(35, 0),
            cost: rust_decimal::Decimal::new(3200, 0),
            occurred_at: Utc
                .with_ymd_and_hms(2024, 6, 4, 18, 5, 0)
                .single()
                .unwrap_or_default(),
        };
        Self {
            driver: DriverProfile::example_data(),
            diesel_records: vec![FuelRecord::example_data(), second_refill],
            family_members: vec!["Asha".to_owned(), "Ravi".to_owned()],
            contributions: vec![Contribution::example_data()],
            route: RoutePlan::example_data(),
            stops: vec![Stop::example_data()],
            expenses: vec![Expense::example_data()],
            location_history: vec![
                LocationSample::new(
                    Coordinate::new(28.6139, 77.2090),
                    Utc.with_ymd_and_hms(2024, 6, 3, 6, 0, 0)
                        .single()
                        .unwrap_or_default(),
                    0,
                ),
                LocationSample::new(
                    Coordinate::new(26.9124, 75.7873),
                    Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0)
                        .single()
                        .unwrap_or_default(),
                    1,
                ),
            ],
        }
    }
}
