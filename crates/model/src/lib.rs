use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use serde_with;

pub mod coordinate;
pub mod driver;
pub mod error;
pub mod fuel;
pub mod location;
pub mod money;
pub mod route_plan;
pub mod trip;
pub mod waypoint;

pub use error::InvalidInput;

pub trait ExampleData {
    fn example_data() -> Self;
}

/// Opt-in input checks. The computations never call this themselves; callers
/// that want strict behavior validate before handing records over.
pub trait Validate {
    fn validate(&self) -> Result<(), InvalidInput>;
}

impl<T: Validate> Validate for [T] {
    fn validate(&self) -> Result<(), InvalidInput> {
        self.iter().try_for_each(Validate::validate)
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<(), InvalidInput> {
        match self {
            Some(value) => value.validate(),
            None => Ok(()),
        }
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WithDistance<T> {
    pub distance_km: f64,
    #[serde(flatten)]
    pub content: T,
}

impl<T> WithDistance<T> {
    pub fn new(distance_km: f64, content: T) -> Self {
        Self {
            distance_km,
            content,
        }
    }
}
