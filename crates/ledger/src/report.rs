use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use model::trip::TripData;
use route::RouteSummary;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    by_payer, category_shares, finances, fuel_efficiency, fuel_summary,
    location_history_distance, CategoryShare, Finances, FuelSummary,
};

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DriverSummary {
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub car_number: Option<String>,
    pub complete: bool,
    pub completion_percentage: u8,
}

/// Every figure of the printable trip report.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripReport {
    pub generated_at: DateTime<Utc>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub route: RouteSummary,
    /// length of the recorded GPS trail
    pub traveled_distance_km: f64,
    pub driver: DriverSummary,
    pub finances: Finances,
    pub fuel: FuelSummary,
    /// traveled kilometers per liter, absent until both are non-zero
    pub fuel_efficiency_km_per_liter: Option<f64>,
    pub contributions_by_member: IndexMap<String, Decimal>,
    pub expenses_by_category: Vec<CategoryShare>,
}

impl TripReport {
    pub fn generate(trip: &TripData, generated_at: DateTime<Utc>) -> Self {
        let traveled_distance_km = location_history_distance(&trip.location_history);
        let fuel = fuel_summary(&trip.diesel_records);
        let fuel_efficiency_km_per_liter = if traveled_distance_km > 0.0 {
            fuel_efficiency(traveled_distance_km, fuel.total_liters)
        } else {
            None
        };

        Self {
            generated_at,
            start_date: trip.route.start_date,
            end_date: trip.route.end_date,
            route: route::summarize(&trip.waypoints()),
            traveled_distance_km,
            driver: DriverSummary {
                name: trip.driver.name.clone(),
                mobile: trip.driver.mobile.clone(),
                car_number: trip.driver.car_number.clone(),
                complete: trip.driver.is_complete(),
                completion_percentage: trip.driver.completion_percentage(),
            },
            finances: finances(&trip.contributions, &trip.expenses),
            fuel,
            fuel_efficiency_km_per_liter,
            contributions_by_member: by_payer(&trip.contributions),
            expenses_by_category: category_shares(&trip.expenses),
        }
    }
}

#[cfg(test)]
mod tests {
    use model::{
        money::{Contribution, Expense},
        ExampleData,
    };
    use utility::id::Id;

    use super::*;

    #[test]
    fn report_of_example_trip() {
        let trip = TripData::example_data();
        let report = TripReport::generate(&trip, Utc::now());

        assert_eq!(report.route.start.as_deref(), Some("Delhi"));
        assert_eq!(report.route.end.as_deref(), Some("Ahmedabad"));
        assert_eq!(report.route.stop_count, 1);
        assert_eq!(report.route.legs.len(), 2);
        assert!(report.traveled_distance_km > 230.0 && report.traveled_distance_km < 240.0);

        assert_eq!(report.fuel.total_liters, Decimal::new(75, 0));
        assert_eq!(report.fuel.refill_count, 2);
        let efficiency = report.fuel_efficiency_km_per_liter.unwrap();
        assert!((efficiency - report.traveled_distance_km / 75.0).abs() < 1e-9);

        assert_eq!(report.finances.total_contributions, Decimal::new(5000, 0));
        assert_eq!(report.finances.total_expenses, Decimal::new(84050, 2));
        assert!(!report.finances.deficit);
        assert!(report.driver.complete);
        assert_eq!(report.driver.completion_percentage, 83);
    }

    #[test]
    fn report_of_empty_trip() {
        let report = TripReport::generate(&TripData::default(), Utc::now());
        assert_eq!(report.traveled_distance_km, 0.0);
        assert_eq!(report.route.total_distance_km, 0.0);
        assert_eq!(report.fuel.avg_price_per_liter, None);
        assert_eq!(report.fuel_efficiency_km_per_liter, None);
        assert_eq!(report.finances.balance, Decimal::ZERO);
        assert!(report.contributions_by_member.is_empty());
        assert!(report.expenses_by_category.is_empty());
        assert_eq!(report.driver.completion_percentage, 0);
    }

    #[test]
    fn no_efficiency_without_travel() {
        let mut trip = TripData::example_data();
        trip.location_history.clear();
        let report = TripReport::generate(&trip, Utc::now());
        assert!(report.fuel.avg_price_per_liter.is_some());
        assert_eq!(report.fuel_efficiency_km_per_liter, None);
    }

    #[test]
    fn members_and_categories() {
        let mut trip = TripData::example_data();
        trip.contributions.push(Contribution {
            id: Id::new(2),
            member: "Ravi".to_owned(),
            ..Contribution::example_data()
        });
        trip.contributions.push(Contribution {
            id: Id::new(3),
            ..Contribution::example_data()
        });
        trip.expenses.push(Expense {
            id: Id::new(4),
            category: "Fuel".to_owned(),
            amount: Decimal::new(3600, 0),
            ..Expense::example_data()
        });
        let report = TripReport::generate(&trip, Utc::now());
        assert_eq!(
            report.contributions_by_member.keys().collect::<Vec<_>>(),
            vec!["Asha", "Ravi"]
        );
        assert_eq!(report.contributions_by_member["Asha"], Decimal::new(10000, 0));
        assert_eq!(report.expenses_by_category.len(), 2);
        assert_eq!(report.expenses_by_category[1].category, "Fuel");
        assert!(report.finances.deficit == (report.finances.balance < Decimal::ZERO));
    }
}
