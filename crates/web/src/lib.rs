pub use crate::common::RouteResult;
pub use crate::config::WebConfig;

use std::{path::Path, sync::Arc};

use axum::{extract::FromRef, routing::get_service, Router};
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};
use tracker::{Session, TripStore};

pub mod api;
pub mod common;
pub mod config;
pub mod hateoas;
pub mod middleware;

pub type SharedStore = Arc<dyn TripStore>;

#[derive(Clone, FromRef)]
pub struct WebState {
    pub session: Arc<Session<SharedStore>>,
}

pub async fn start_web_server(state: WebState, config: &WebConfig) -> std::io::Result<()> {
    let routes = Router::new()
        .nest_service("/api", api::routes(state))
        .fallback_service(static_content_router(&config.static_dir));

    let listener = TcpListener::bind(&config.bind_address).await?;
    log::info!("listening on {}", config.bind_address);
    axum::serve(listener, routes.into_make_service()).await?;

    Ok(())
}

fn static_content_router(static_dir: &Path) -> Router {
    let not_found = ServeFile::new(static_dir.join("error404.html"));
    Router::new().fallback_service(get_service(
        ServeDir::new(static_dir).not_found_service(not_found),
    ))
}
