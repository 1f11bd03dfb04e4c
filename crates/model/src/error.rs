use std::{error, fmt};

use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub enum InvalidInput {
    Negative { field: &'static str, value: Decimal },
    NotPositive { field: &'static str, value: Decimal },
    LatitudeOutOfRange(f64),
    LongitudeOutOfRange(f64),
    Blank { field: &'static str },
    /// A location sample is older than the one stored before it.
    LocationOutOfOrder { index: usize },
}

impl error::Error for InvalidInput {}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InvalidInput::Negative { field, value } => {
                write!(f, "{} must not be negative, got {}", field, value)
            }
            InvalidInput::NotPositive { field, value } => {
                write!(f, "{} must be greater than zero, got {}", field, value)
            }
            InvalidInput::LatitudeOutOfRange(latitude) => {
                write!(f, "latitude {} is outside of [-90, 90]", latitude)
            }
            InvalidInput::LongitudeOutOfRange(longitude) => {
                write!(f, "longitude {} is outside of [-180, 180]", longitude)
            }
            InvalidInput::Blank { field } => write!(f, "{} must not be blank", field),
            InvalidInput::LocationOutOfOrder { index } => write!(
                f,
                "location sample {} is older than the sample before it",
                index
            ),
        }
    }
}

pub(crate) fn non_negative(field: &'static str, value: Decimal) -> Result<(), InvalidInput> {
    if value.is_sign_negative() && !value.is_zero() {
        Err(InvalidInput::Negative { field, value })
    } else {
        Ok(())
    }
}

pub(crate) fn positive(field: &'static str, value: Decimal) -> Result<(), InvalidInput> {
    if value > Decimal::ZERO {
        Ok(())
    } else {
        Err(InvalidInput::NotPositive { field, value })
    }
}

pub(crate) fn not_blank(field: &'static str, value: &str) -> Result<(), InvalidInput> {
    if value.trim().is_empty() {
        Err(InvalidInput::Blank { field })
    } else {
        Ok(())
    }
}
