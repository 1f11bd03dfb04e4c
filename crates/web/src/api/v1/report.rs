use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, on},
    Extension, Router,
};
use ledger::TripReport;

use crate::{
    common::{route_not_found, schema_no_example, HateoasResult, METHOD_FILTER_ALL},
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/report{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema_no_example::<TripReport>))
        .route("/", get(get_report))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

/// Printable trip summary, generated on every request.
async fn get_report(
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<TripReport> {
    let report = session.report().await;
    let response = hateoas::Response::builder(report, base_url)
        .link("self", resource!(""))
        .link("data", super::data::resource!(""))
        .link("route", super::route_plan::resource!("/summary"))
        .link("fuel", super::fuel::resource!("/summary"))
        .link("expenses", super::expenses::resource!("/categories"))
        .build();
    Ok(response.json())
}
