use std::sync::Arc;

use axum::{
    extract::{OriginalUri, State},
    http::Method,
    routing::{get, on},
    Extension, Json, Router,
};
use model::trip::TripData;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    common::{route_not_found, schema, HateoasResult, RouteErrorResponse, METHOD_FILTER_ALL},
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/data{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<TripData>))
        .route("/", get(export_data).put(import_data))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

pub(crate) fn member_routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(crate::common::schema_no_example::<MembersDto>))
        .route("/", get(get_members).put(set_members))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn export_data(
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<TripData> {
    let trip = session.snapshot().await;
    Ok(data_hateoas(trip, base_url).json())
}

/// Replaces the whole trip document, e.g. with a previously exported one.
async fn import_data(
    original_uri: OriginalUri,
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
    Json(trip): Json<TripData>,
) -> HateoasResult<TripData> {
    session
        .import(trip)
        .await
        .map_err(|why| RouteErrorResponse::from_request(why, Method::PUT, &original_uri))?;
    let trip = session.snapshot().await;
    Ok(data_hateoas(trip, base_url).json())
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MembersDto {
    family_members: Vec<String>,
}

async fn get_members(
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<MembersDto> {
    let family_members = session.read(|trip| trip.family_members.clone()).await;
    Ok(members_hateoas(MembersDto { family_members }, base_url).json())
}

async fn set_members(
    original_uri: OriginalUri,
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
    Json(members): Json<MembersDto>,
) -> HateoasResult<MembersDto> {
    session
        .set_family_members(members.family_members)
        .await
        .map(|family_members| members_hateoas(MembersDto { family_members }, base_url).json())
        .map_err(|why| RouteErrorResponse::from_request(why, Method::PUT, &original_uri))
}

fn data_hateoas(trip: TripData, base_url: Arc<BaseUrl>) -> hateoas::Response<TripData> {
    hateoas::Response::builder(trip, base_url)
        .link("self", resource!(""))
        .link("report", super::report::resource!(""))
        .build()
}

fn members_hateoas(members: MembersDto, base_url: Arc<BaseUrl>) -> hateoas::Response<MembersDto> {
    hateoas::Response::builder(members, base_url)
        .link("self", super::resource!("/members"))
        .link("contributions", super::contributions::resource!(""))
        .build()
}
