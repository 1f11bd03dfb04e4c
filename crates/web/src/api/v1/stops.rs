use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, State},
    http::Method,
    routing::{delete, get, on},
    Extension, Json, Router,
};
use model::route_plan::Stop;
use utility::{id::Id, let_also::LetAlso};

use crate::{
    common::{
        route_not_found, schema, HateoasResult, RouteErrorResponse, VecResponse,
        METHOD_FILTER_ALL,
    },
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/stops{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<Stop>))
        .route("/", get(get_stops).post(add_stop))
        .route("/:id", delete(remove_stop))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn get_stops(
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<Stop>>> {
    session
        .read(|trip| trip.stops.clone())
        .await
        .into_iter()
        .map(|stop| stop_hateoas(stop, base_url.clone()))
        .collect::<Vec<_>>()
        .let_owned(|data| Ok(VecResponse::new(data).hateoas().json()))
}

async fn add_stop(
    original_uri: OriginalUri,
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
    Json(stop): Json<Stop>,
) -> HateoasResult<Stop> {
    session
        .add_stop(stop)
        .await
        .map(|stop| stop_hateoas(stop, base_url).json())
        .map_err(|why| RouteErrorResponse::from_request(why, Method::POST, &original_uri))
}

async fn remove_stop(
    original_uri: OriginalUri,
    Path(id): Path<u64>,
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<Stop> {
    session
        .remove_stop(Id::new(id))
        .await
        .map(|stop| stop_hateoas(stop, base_url).json())
        .map_err(|why| RouteErrorResponse::from_request(why, Method::DELETE, &original_uri))
}

fn stop_hateoas(stop: Stop, base_url: Arc<BaseUrl>) -> hateoas::Response<Stop> {
    let id = stop.id;
    let map = stop.coordinate.map(|coordinate| {
        format!(
            "https://www.openstreetmap.org/?mlat={}&mlon={}",
            coordinate.latitude, coordinate.longitude
        )
    });
    hateoas::Response::builder(stop, base_url)
        .link("delete", resource!("/{}", id))
        .link("collection", resource!(""))
        .link("route", super::route_plan::resource!("/summary"))
        .link_extern_option("map", map)
        .build()
}
