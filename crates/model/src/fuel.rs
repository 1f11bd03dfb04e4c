use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::{
    id::{HasId, Id},
    serde::date_time,
};

use crate::{
    error::{non_negative, positive},
    ExampleData, InvalidInput, Validate,
};

/// One diesel refill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FuelRecord {
    #[serde(default)]
    pub id: Id<FuelRecord>,
    #[serde(alias = "km")]
    pub odometer_km: Decimal,
    #[serde(alias = "amount")]
    pub liters: Decimal,
    pub cost: Decimal,
    #[serde(alias = "date", deserialize_with = "date_time::deserialize_instant")]
    pub occurred_at: DateTime<Utc>,
}

impl HasId for FuelRecord {
    type IdType = u64;
}

impl FuelRecord {
    /// Price paid per liter for this refill, `None` if no fuel was recorded.
    pub fn price_per_liter(&self) -> Option<Decimal> {
        if self.liters > Decimal::ZERO {
            self.cost.checked_div(self.liters)
        } else {
            None
        }
    }
}

impl Validate for FuelRecord {
    fn validate(&self) -> Result<(), InvalidInput> {
        non_negative("odometerKm", self.odometer_km)?;
        positive("liters", self.liters)?;
        non_negative("cost", self.cost)
    }
}

impl ExampleData for FuelRecord {
    fn example_data() -> Self {
        Self {
            id: Id::new(1717400000002),
            odometer_km: Decimal::new(48210, 0),
            liters: Decimal::new(40, 0),
            cost: Decimal::new(3600, 0),
            occurred_at: Utc
                .with_ymd_and_hms(2024, 6, 3, 7, 30, 0)
                .single()
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_per_liter() {
        let record = FuelRecord::example_data();
        assert_eq!(record.price_per_liter(), Some(Decimal::new(90, 0)));

        let empty = FuelRecord {
            liters: Decimal::ZERO,
            ..record
        };
        assert_eq!(empty.price_per_liter(), None);
    }

    #[test]
    fn liters_must_be_positive() {
        let mut record = FuelRecord::example_data();
        record.liters = Decimal::ZERO;
        assert!(matches!(
            record.validate(),
            Err(InvalidInput::NotPositive {
                field: "liters",
                ..
            })
        ));
        record.liters = Decimal::new(10, 0);
        record.cost = Decimal::new(-5, 0);
        assert!(matches!(
            record.validate(),
            Err(InvalidInput::Negative { field: "cost", .. })
        ));
    }

    #[test]
    fn accepts_datetime_local_input() {
        let record: FuelRecord = serde_json::from_str(
            r#"{"odometerKm": 48350, "liters": 35, "cost": 3200, "occurredAt": "2024-06-04T18:05"}"#,
        )
        .unwrap();
        assert_eq!(record.liters, Decimal::new(35, 0));
        assert_eq!(record.id.raw(), 0);
    }

    #[test]
    fn accepts_refill_form_names() {
        let record: FuelRecord = serde_json::from_str(
            r#"{"id": 1717400000002, "km": 48210, "amount": 40, "cost": 3600, "date": "2024-06-03T07:30"}"#,
        )
        .unwrap();
        assert_eq!(record.odometer_km, Decimal::new(48210, 0));
        assert_eq!(record.liters, Decimal::new(40, 0));
        assert_eq!(record.price_per_liter(), Some(Decimal::new(90, 0)));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["odometerKm"], 48210.0);
        assert!(json.get("km").is_none());
    }
}
