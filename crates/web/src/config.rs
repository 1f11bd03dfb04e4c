use std::{env, path::PathBuf};

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_STATIC_DIR: &str = "./resources/www/";

#[derive(Debug, Clone, PartialEq)]
pub struct WebConfig {
    pub bind_address: String,
    /// where the trip document is persisted, memory only if unset
    pub data_file: Option<PathBuf>,
    pub static_dir: PathBuf,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_owned(),
            data_file: None,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl WebConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();
        Self {
            bind_address: non_empty("TRIPLOG_BIND_ADDRESS").unwrap_or(defaults.bind_address),
            data_file: non_empty("TRIPLOG_DATA_FILE").map(PathBuf::from),
            static_dir: non_empty("TRIPLOG_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
        }
    }
}
