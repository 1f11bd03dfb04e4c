use std::{error, fmt};

use model::InvalidInput;

pub mod session;
pub mod store;

pub use session::Session;
pub use store::{JsonFileStore, MemoryStore, StoreError, TripStore};

pub type Result<T> = std::result::Result<T, TrackerError>;

#[derive(Debug, Clone)]
pub enum TrackerError {
    Store(StoreError),
    InvalidInput(InvalidInput),
    NotFound { kind: &'static str, id: u64 },
    /// a location sample older than the last recorded one
    OutOfOrder,
    /// every id above the highest stored one is taken
    IdsExhausted,
}

impl error::Error for TrackerError {}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TrackerError::Store(e) => write!(f, "store error: {}", e),
            TrackerError::InvalidInput(e) => write!(f, "invalid input: {}", e),
            TrackerError::NotFound { kind, id } => {
                write!(f, "{} with id {} does not exist", kind, id)
            }
            TrackerError::OutOfOrder => write!(
                f,
                "location sample is older than the last recorded location"
            ),
            TrackerError::IdsExhausted => write!(f, "no record id left to assign"),
        }
    }
}

impl From<StoreError> for TrackerError {
    fn from(value: StoreError) -> Self {
        TrackerError::Store(value)
    }
}

impl From<InvalidInput> for TrackerError {
    fn from(value: InvalidInput) -> Self {
        TrackerError::InvalidInput(value)
    }
}
