use std::sync::Arc;

use tracker::{JsonFileStore, MemoryStore, Session};
use web::{start_web_server, SharedStore, WebConfig, WebState};

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = WebConfig::from_env();

    // store
    let store: SharedStore = match &config.data_file {
        Some(path) => {
            let store = JsonFileStore::new(path);
            log::info!("persisting trip data to {}", store.path().display());
            Arc::new(store)
        }
        None => {
            log::warn!("TRIPLOG_DATA_FILE is not set, trip data is kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    // session
    let session = Session::open(store)
        .await
        .expect("could not load stored trip data.");

    // web server
    let web_future = start_web_server(
        WebState {
            session: Arc::new(session),
        },
        &config,
    );

    if let Err(why) = web_future.await {
        log::error!("web server stopped: {}", why);
    }
}
