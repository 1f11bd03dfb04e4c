use std::{
    error, fmt, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use model::trip::TripData;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
pub enum StoreError {
    Io(Arc<io::Error>),
    Json(Arc<serde_json::Error>),
}

impl error::Error for StoreError {}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "I/O error: {}", e),
            StoreError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(value: io::Error) -> Self {
        StoreError::Io(Arc::new(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        StoreError::Json(Arc::new(value))
    }
}

/// Persistence for the trip document. The document is always written as a
/// whole; the last save wins.
#[async_trait]
pub trait TripStore: Send + Sync {
    /// `None` if nothing has been saved yet.
    async fn load(&self) -> Result<Option<TripData>, StoreError>;

    async fn save(&self, trip: &TripData) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: TripStore + ?Sized> TripStore for Arc<T> {
    async fn load(&self) -> Result<Option<TripData>, StoreError> {
        (**self).load().await
    }

    async fn save(&self, trip: &TripData) -> Result<(), StoreError> {
        (**self).save(trip).await
    }
}

/// Keeps the document in memory only. Clones share the same document.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    trip: Arc<RwLock<Option<TripData>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trip(trip: TripData) -> Self {
        Self {
            trip: Arc::new(RwLock::new(Some(trip))),
        }
    }
}

#[async_trait]
impl TripStore for MemoryStore {
    async fn load(&self) -> Result<Option<TripData>, StoreError> {
        Ok(self.trip.read().await.clone())
    }

    async fn save(&self, trip: &TripData) -> Result<(), StoreError> {
        *self.trip.write().await = Some(trip.clone());
        Ok(())
    }
}

/// Stores the document as a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        staging.into()
    }
}

#[async_trait]
impl TripStore for JsonFileStore {
    async fn load(&self) -> Result<Option<TripData>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(why) if why.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(why) => Err(why.into()),
        }
    }

    async fn save(&self, trip: &TripData) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(trip)?;
        // write aside and rename, so readers never see a half written file
        let staging = self.staging_path();
        tokio::fs::write(&staging, bytes).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use model::ExampleData;

    use super::*;

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.load().await.unwrap(), None);

        let trip = TripData::example_data();
        store.save(&trip).await.unwrap();
        assert_eq!(store.clone().load().await.unwrap(), Some(trip));
    }

    #[tokio::test]
    async fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("trip.json"));
        assert_eq!(store.load().await.unwrap(), None);

        let trip = TripData::example_data();
        store.save(&trip).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.diesel_records, trip.diesel_records);
        assert_eq!(loaded.route, trip.route);
        assert!(!store.staging_path().exists());
    }

    #[tokio::test]
    async fn last_save_wins() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("trip.json"));
        store.save(&TripData::example_data()).await.unwrap();
        store.save(&TripData::default()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(TripData::default()));
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trip.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::new(path);
        assert!(matches!(store.load().await, Err(StoreError::Json(_))));
    }
}
