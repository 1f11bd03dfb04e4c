use model::fuel::FuelRecord;
use rust_decimal::{prelude::ToPrimitive, Decimal};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FuelSummary {
    pub total_cost: Decimal,
    pub total_liters: Decimal,
    /// absent while no fuel has been recorded
    pub avg_price_per_liter: Option<Decimal>,
    pub refill_count: usize,
}

pub fn fuel_summary(records: &[FuelRecord]) -> FuelSummary {
    let total_cost: Decimal = records.iter().map(|record| record.cost).sum();
    let total_liters: Decimal = records.iter().map(|record| record.liters).sum();
    let avg_price_per_liter = if total_liters > Decimal::ZERO {
        total_cost.checked_div(total_liters)
    } else {
        None
    };
    FuelSummary {
        total_cost,
        total_liters,
        avg_price_per_liter,
        refill_count: records.len(),
    }
}

/// Kilometers per liter, `None` unless some fuel was used.
pub fn fuel_efficiency(total_distance_km: f64, total_liters: Decimal) -> Option<f64> {
    if total_liters > Decimal::ZERO {
        total_liters
            .to_f64()
            .map(|liters| total_distance_km / liters)
    } else {
        None
    }
}
