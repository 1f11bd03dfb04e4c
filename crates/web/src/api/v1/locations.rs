use std::sync::Arc;

use axum::{
    extract::{OriginalUri, State},
    http::Method,
    routing::{get, on},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use model::{coordinate::Coordinate, location::LocationSample, WithDistance};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::serde::date_time;

use crate::{
    common::{
        route_not_found, schema_no_example, HateoasResult, RouteErrorResponse, METHOD_FILTER_ALL,
    },
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/locations{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema_no_example::<LocationHistoryDto>))
        .route("/", get(get_location_history).post(record_location))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

#[derive(Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct LocationHistoryDto {
    traveled_distance_km: f64,
    samples: Vec<WithDistance<LocationSample>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewLocationDto {
    latitude: f64,
    longitude: f64,
    /// capture time, now if absent
    #[serde(deserialize_with = "date_time::deserialize_instant_option", default)]
    timestamp: Option<DateTime<Utc>>,
    accuracy_m: Option<f64>,
}

async fn get_location_history(
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<LocationHistoryDto> {
    let history = session
        .read(|trip| LocationHistoryDto {
            traveled_distance_km: ledger::location_history_distance(&trip.location_history),
            samples: ledger::location_history_legs(&trip.location_history)
                .into_iter()
                .map(|leg| WithDistance::new(leg.distance_km, leg.content.clone()))
                .collect(),
        })
        .await;
    let response = hateoas::Response::builder(history, base_url)
        .link("self", resource!(""))
        .link("report", super::report::resource!(""))
        .build();
    Ok(response.json())
}

async fn record_location(
    original_uri: OriginalUri,
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
    Json(location): Json<NewLocationDto>,
) -> HateoasResult<WithDistance<LocationSample>> {
    let coordinate = Coordinate::new(location.latitude, location.longitude);
    let timestamp = location.timestamp.unwrap_or_else(Utc::now);
    session
        .record_location(coordinate, timestamp, location.accuracy_m)
        .await
        .map(|sample| {
            hateoas::Response::builder(sample, base_url)
                .link("collection", resource!(""))
                .build()
                .json()
        })
        .map_err(|why| RouteErrorResponse::from_request(why, Method::POST, &original_uri))
}
