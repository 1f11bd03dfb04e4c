use std::sync::Arc;

use ::route::summary::RouteSummary;
use axum::{
    extract::{OriginalUri, State},
    http::Method,
    routing::{get, on},
    Extension, Json, Router,
};
use model::{route_plan::RoutePlan, waypoint::Waypoint, WithDistance};
use utility::let_also::LetAlso;

use crate::{
    common::{
        route_not_found, schema, schema_no_example, HateoasResult, RouteErrorResponse,
        VecResponse, METHOD_FILTER_ALL,
    },
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/route{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<RoutePlan>))
        .route("/summary/schema", get(schema_no_example::<RouteSummary>))
        .route("/", get(get_route).put(set_route))
        .route("/summary", get(get_summary))
        .route("/waypoints", get(get_waypoints))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn get_route(
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<RoutePlan> {
    let plan = session.read(|trip| trip.route.clone()).await;
    Ok(route_hateoas(plan, base_url).json())
}

async fn set_route(
    original_uri: OriginalUri,
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
    Json(plan): Json<RoutePlan>,
) -> HateoasResult<RoutePlan> {
    session
        .set_route(plan)
        .await
        .map(|plan| route_hateoas(plan, base_url).json())
        .map_err(|why| RouteErrorResponse::from_request(why, Method::PUT, &original_uri))
}

async fn get_summary(
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<RouteSummary> {
    let summary = session.route_summary().await;
    let response = hateoas::Response::builder(summary, base_url)
        .link("self", resource!("/summary"))
        .link("route", resource!(""))
        .link("waypoints", resource!("/waypoints"))
        .build();
    Ok(response.json())
}

/// Waypoints that take part in the distance chain, each with the distance
/// traveled from the start when reaching it.
async fn get_waypoints(
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<WithDistance<Waypoint>>> {
    session
        .read(|trip| {
            let waypoints = trip.waypoints();
            let cumulative = ::route::cumulative_distances(&waypoints);
            ::route::chain(&waypoints)
                .into_iter()
                .zip(cumulative)
                .map(|((waypoint, _), distance)| WithDistance::new(distance, waypoint.clone()))
                .collect::<Vec<_>>()
        })
        .await
        .let_owned(|data| {
            hateoas::Response::builder(VecResponse::new(data), base_url)
                .link("self", resource!("/waypoints"))
                .link("summary", resource!("/summary"))
                .build()
        })
        .let_owned(|response| Ok(response.json()))
}

fn route_hateoas(plan: RoutePlan, base_url: Arc<BaseUrl>) -> hateoas::Response<RoutePlan> {
    hateoas::Response::builder(plan, base_url)
        .link("self", resource!(""))
        .link("summary", resource!("/summary"))
        .link("stops", super::stops::resource!(""))
        .build()
}
