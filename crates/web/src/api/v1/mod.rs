use std::sync::Arc;

use axum::{
    routing::{get, on},
    Extension, Router,
};
use serde::Serialize;

use crate::{
    common::{route_not_found, HateoasResult, METHOD_FILTER_ALL},
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

mod contributions;
mod data;
mod driver;
mod expenses;
mod fuel;
mod locations;
mod report;
mod route_plan;
mod stops;

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::resource!("/v1{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/", get(index))
        .nest_service("/data", data::routes(state.clone()))
        .nest_service("/members", data::member_routes(state.clone()))
        .nest_service("/driver", driver::routes(state.clone()))
        .nest_service("/route", route_plan::routes(state.clone()))
        .nest_service("/fuel", fuel::routes(state.clone()))
        .nest_service("/contributions", contributions::routes(state.clone()))
        .nest_service("/expenses", expenses::routes(state.clone()))
        .nest_service("/stops", stops::routes(state.clone()))
        .nest_service("/locations", locations::routes(state.clone()))
        .nest_service("/report", report::routes(state.clone()))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexDto {
    version: &'static str,
}

async fn index(Extension(base_url): Extension<Arc<BaseUrl>>) -> HateoasResult<IndexDto> {
    let response = hateoas::Response::builder(IndexDto { version: "v1" }, base_url)
        .link("data", data::resource!(""))
        .link("members", resource!("/members"))
        .link("driver", driver::resource!(""))
        .link("route", route_plan::resource!(""))
        .link("routeSummary", route_plan::resource!("/summary"))
        .link("fuel", fuel::resource!(""))
        .link("contributions", contributions::resource!(""))
        .link("expenses", expenses::resource!(""))
        .link("stops", stops::resource!(""))
        .link("locations", locations::resource!(""))
        .link("report", report::resource!(""))
        .build();
    Ok(response.json())
}
