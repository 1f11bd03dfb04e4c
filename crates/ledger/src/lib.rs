//! Aggregates over the money, fuel and travel records of a trip.
//!
//! Every function re-scans the records it is given; nothing is cached or
//! updated incrementally.

use indexmap::IndexMap;
use model::money::Monetary;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub mod fuel;
pub mod report;
pub mod travel;

pub use fuel::{fuel_efficiency, fuel_summary, FuelSummary};
pub use report::TripReport;
pub use travel::{location_history_distance, location_history_legs};

/// Sum of all amounts.
pub fn total_of<M: Monetary>(records: &[M]) -> Decimal {
    records.iter().map(Monetary::amount).sum()
}

/// Contributions minus expenses. Negative means the trip is in deficit.
pub fn balance<C: Monetary, E: Monetary>(contributions: &[C], expenses: &[E]) -> Decimal {
    total_of(contributions) - total_of(expenses)
}

/// Summed amount per category, in order of first appearance.
pub fn by_category<M: Monetary>(records: &[M]) -> IndexMap<String, Decimal> {
    group_sum(records, |record| record.category())
}

/// Summed amount per payer or contributing member, in order of first
/// appearance.
pub fn by_payer<M: Monetary>(records: &[M]) -> IndexMap<String, Decimal> {
    group_sum(records, |record| record.payer())
}

fn group_sum<M, F>(records: &[M], key: F) -> IndexMap<String, Decimal>
where
    M: Monetary,
    F: Fn(&M) -> &str,
{
    let mut sums: IndexMap<String, Decimal> = IndexMap::new();
    for record in records {
        let key = key(record);
        match sums.get_mut(key) {
            Some(sum) => *sum += record.amount(),
            None => {
                sums.insert(key.to_owned(), record.amount());
            }
        }
    }
    sums
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: String,
    pub amount: Decimal,
    /// percentage of the overall total, rounded to two places. Absent when
    /// the overall total is zero.
    pub share_percent: Option<Decimal>,
}

/// Per-category totals together with their share of the overall total.
pub fn category_shares<M: Monetary>(records: &[M]) -> Vec<CategoryShare> {
    let total = total_of(records);
    by_category(records)
        .into_iter()
        .map(|(category, amount)| CategoryShare {
            share_percent: share_percent(amount, total),
            category,
            amount,
        })
        .collect()
}

fn share_percent(part: Decimal, total: Decimal) -> Option<Decimal> {
    if total.is_zero() {
        return None;
    }
    part.checked_mul(Decimal::ONE_HUNDRED)?
        .checked_div(total)
        .map(|share| share.round_dp(2))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Finances {
    pub total_contributions: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub deficit: bool,
}

pub fn finances<C: Monetary, E: Monetary>(contributions: &[C], expenses: &[E]) -> Finances {
    let total_contributions = total_of(contributions);
    let total_expenses = total_of(expenses);
    let balance = total_contributions - total_expenses;
    Finances {
        total_contributions,
        total_expenses,
        balance,
        deficit: balance < Decimal::ZERO,
    }
}

/// `round(100 * present / total)` in `0..=100`, 0 when nothing is tracked.
pub fn completion_percentage(present_field_count: usize, total_field_count: usize) -> u8 {
    utility::math::rounded_percentage(present_field_count, total_field_count)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use model::money::MonetaryRecord;

    use super::*;

    fn record(category: &str, amount: i64, payer: &str) -> MonetaryRecord {
        MonetaryRecord::new(
            Decimal::new(amount, 0),
            category,
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            payer,
        )
    }

    #[test]
    fn totals() {
        let records = vec![record("Fuel", 100, "a"), record("Food", 50, "b")];
        assert_eq!(total_of(&records), Decimal::new(150, 0));
        assert_eq!(total_of::<MonetaryRecord>(&[]), Decimal::ZERO);
    }

    #[test]
    fn balance_is_contributions_minus_expenses() {
        let contributions = vec![record("Contribution", 300, "a"), record("Contribution", 200, "b")];
        let expenses = vec![record("Fuel", 100, "a"), record("Food", 50, "b")];
        assert_eq!(
            balance(&contributions, &expenses),
            total_of(&contributions) - total_of(&expenses)
        );
        assert_eq!(balance(&contributions, &expenses), Decimal::new(350, 0));

        let none: Vec<MonetaryRecord> = vec![];
        assert_eq!(balance(&none, &none), Decimal::ZERO);
        assert_eq!(balance(&none, &expenses), Decimal::new(-150, 0));
    }

    #[test]
    fn categories_are_summed() {
        let expenses = vec![
            record("Fuel", 100, "a"),
            record("Food", 50, "a"),
            record("Fuel", 25, "b"),
        ];
        let categories = by_category(&expenses);
        assert_eq!(categories.len(), 2);
        assert_eq!(categories["Fuel"], Decimal::new(125, 0));
        assert_eq!(categories["Food"], Decimal::new(50, 0));
        assert_eq!(
            categories.keys().collect::<Vec<_>>(),
            vec!["Fuel", "Food"]
        );
        assert!(by_category::<MonetaryRecord>(&[]).is_empty());
    }

    #[test]
    fn payers_are_summed() {
        let contributions = vec![
            record("Contribution", 1000, "Asha"),
            record("Contribution", 500, "Ravi"),
            record("Contribution", 250, "Asha"),
        ];
        let members = by_payer(&contributions);
        assert_eq!(members["Asha"], Decimal::new(1250, 0));
        assert_eq!(members["Ravi"], Decimal::new(500, 0));
    }

    #[test]
    fn shares_of_total() {
        let expenses = vec![
            record("Fuel", 100, "a"),
            record("Food", 50, "a"),
            record("Fuel", 25, "b"),
        ];
        let shares = category_shares(&expenses);
        assert_eq!(shares[0].category, "Fuel");
        assert_eq!(shares[0].share_percent, Some(Decimal::new(7143, 2)));
        assert_eq!(shares[1].share_percent, Some(Decimal::new(2857, 2)));

        let free = vec![record("Parking", 0, "a")];
        assert_eq!(category_shares(&free)[0].share_percent, None);
    }

    #[test]
    fn deficit_is_flagged() {
        let contributions = vec![record("Contribution", 100, "a")];
        let expenses = vec![record("Fuel", 150, "a")];
        let finances = finances(&contributions, &expenses);
        assert!(finances.deficit);
        assert_eq!(finances.balance, Decimal::new(-50, 0));
    }

    #[test]
    fn completion() {
        assert_eq!(completion_percentage(0, 6), 0);
        assert_eq!(completion_percentage(3, 6), 50);
        assert_eq!(completion_percentage(6, 6), 100);
        assert_eq!(completion_percentage(0, 0), 0);
    }
}
