use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::math::rounded_percentage;

use crate::{error::non_negative, ExampleData, InvalidInput, Validate};

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DriverProfile {
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub car_number: Option<String>,
    pub current_km: Option<Decimal>,
    pub diesel_available: Option<Decimal>,
    pub image_url: Option<String>,
    pub image_public_id: Option<String>,
}

fn is_filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|value| !value.trim().is_empty())
}

impl DriverProfile {
    /// Number of fields counted by `completion_percentage`.
    pub const TRACKED_FIELDS: usize = 6;

    /// Name, mobile number and car number are all filled in.
    pub fn is_complete(&self) -> bool {
        is_filled(&self.name) && is_filled(&self.mobile) && is_filled(&self.car_number)
    }

    pub fn filled_field_count(&self) -> usize {
        [
            is_filled(&self.name),
            is_filled(&self.mobile),
            is_filled(&self.car_number),
            self.current_km.is_some(),
            self.diesel_available.is_some(),
            is_filled(&self.image_url),
        ]
        .into_iter()
        .filter(|filled| *filled)
        .count()
    }

    pub fn completion_percentage(&self) -> u8 {
        rounded_percentage(self.filled_field_count(), Self::TRACKED_FIELDS)
    }

    /// Name shown as payer of expenses the driver covers.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Driver")
    }
}

impl Validate for DriverProfile {
    fn validate(&self) -> Result<(), InvalidInput> {
        if let Some(current_km) = self.current_km {
            non_negative("currentKm", current_km)?;
        }
        if let Some(diesel_available) = self.diesel_available {
            non_negative("dieselAvailable", diesel_available)?;
        }
        Ok(())
    }
}

impl ExampleData for DriverProfile {
    fn example_data() -> Self {
        Self {
            name: Some("Ravi Kumar".to_owned()),
            mobile: Some("+91 98100 00000".to_owned()),
            car_number: Some("DL 3C AB 1234".to_owned()),
            current_km: Some(Decimal::new(48210, 0)),
            diesel_available: Some(Decimal::new(20, 0)),
            image_url: None,
            image_public_id: None,
        }
    }
}
