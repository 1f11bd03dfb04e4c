use std::sync::Arc;

use axum::{
    routing::{get, on},
    Extension, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub mod v1;

use crate::{
    common::{route_not_found, HateoasResult, METHOD_FILTER_ALL},
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        format!("/api{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub fn routes(state: WebState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .nest_service("/v1", v1::routes(state))
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PingDto {
    service: &'static str,
    version: &'static str,
    server_time: DateTime<Utc>,
}

/// Liveness check the front-end polls before it syncs the trip document.
async fn ping(Extension(base_url): Extension<Arc<BaseUrl>>) -> HateoasResult<PingDto> {
    let pong = PingDto {
        service: "triplog",
        version: env!("CARGO_PKG_VERSION"),
        server_time: Utc::now(),
    };
    let response = hateoas::Response::builder(pong, base_url)
        .link("self", resource!("/ping"))
        .link("v1", v1::resource!(""))
        .build();
    Ok(response.json())
}
