use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::{
    id::{HasId, Id},
    serde::date,
};

use crate::{
    error::{non_negative, not_blank},
    ExampleData, InvalidInput, Validate,
};

pub const CONTRIBUTION_CATEGORY: &str = "Contribution";
pub const FUEL_CATEGORY: &str = "Fuel";

/// Read access shared by everything the ledger can sum up.
pub trait Monetary {
    fn amount(&self) -> Decimal;
    fn category(&self) -> &str;
    fn payer(&self) -> &str;
}

impl<T: Monetary> Monetary for &T {
    fn amount(&self) -> Decimal {
        (*self).amount()
    }

    fn category(&self) -> &str {
        (*self).category()
    }

    fn payer(&self) -> &str {
        (*self).payer()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonetaryRecord {
    pub amount: Decimal,
    pub category: String,
    #[serde(deserialize_with = "date::deserialize")]
    pub occurred_on: NaiveDate,
    pub payer: String,
}

impl MonetaryRecord {
    pub fn new<C, P>(amount: Decimal, category: C, occurred_on: NaiveDate, payer: P) -> Self
    where
        C: Into<String>,
        P: Into<String>,
    {
        Self {
            amount,
            category: category.into(),
            occurred_on,
            payer: payer.into(),
        }
    }
}

impl Monetary for MonetaryRecord {
    fn amount(&self) -> Decimal {
        self.amount
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn payer(&self) -> &str {
        &self.payer
    }
}

impl Validate for MonetaryRecord {
    fn validate(&self) -> Result<(), InvalidInput> {
        non_negative("amount", self.amount)
    }
}

/// Money a family member put into the shared trip budget.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    #[serde(default)]
    pub id: Id<Contribution>,
    pub member: String,
    pub amount: Decimal,
    #[serde(deserialize_with = "date::deserialize")]
    pub date: NaiveDate,
    pub note: Option<String>,
}

impl HasId for Contribution {
    type IdType = u64;
}

impl Monetary for Contribution {
    fn amount(&self) -> Decimal {
        self.amount
    }

    fn category(&self) -> &str {
        CONTRIBUTION_CATEGORY
    }

    fn payer(&self) -> &str {
        &self.member
    }
}

impl From<&Contribution> for MonetaryRecord {
    fn from(value: &Contribution) -> Self {
        MonetaryRecord::new(
            value.amount,
            CONTRIBUTION_CATEGORY,
            value.date,
            value.member.clone(),
        )
    }
}

impl Validate for Contribution {
    fn validate(&self) -> Result<(), InvalidInput> {
        not_blank("member", &self.member)?;
        non_negative("amount", self.amount)
    }
}

impl ExampleData for Contribution {
    fn example_data() -> Self {
        Self {
            id: Id::new(1717400000000),
            member: "Asha".to_owned(),
            amount: Decimal::new(500000, 2),
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap_or_default(),
            note: Some("advance for tolls".to_owned()),
        }
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(default)]
    pub id: Id<Expense>,
    pub category: String,
    pub amount: Decimal,
    #[serde(deserialize_with = "date::deserialize")]
    pub date: NaiveDate,
    #[serde(default = "unknown_payer")]
    pub paid_by: String,
    pub description: Option<String>,
}

fn unknown_payer() -> String {
    "Unknown".to_owned()
}

impl HasId for Expense {
    type IdType = u64;
}

impl Monetary for Expense {
    fn amount(&self) -> Decimal {
        self.amount
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn payer(&self) -> &str {
        &self.paid_by
    }
}

impl From<&Expense> for MonetaryRecord {
    fn from(value: &Expense) -> Self {
        MonetaryRecord::new(
            value.amount,
            value.category.clone(),
            value.date,
            value.paid_by.clone(),
        )
    }
}

impl Validate for Expense {
    fn validate(&self) -> Result<(), InvalidInput> {
        not_blank("category", &self.category)?;
        non_negative("amount", self.amount)
    }
}

impl ExampleData for Expense {
    fn example_data() -> Self {
        Self {
            id: Id::new(1717400000001),
            category: "Food".to_owned(),
            amount: Decimal::new(84050, 2),
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap_or_default(),
            paid_by: "Ravi".to_owned(),
            description: Some("lunch at dhaba".to_owned()),
        }
    }
}
