use std::sync::Arc;

use axum::{
    extract::{OriginalUri, State},
    http::Method,
    routing::{get, on},
    Extension, Json, Router,
};
use model::driver::DriverProfile;
use serde::Serialize;

use crate::{
    common::{route_not_found, schema, HateoasResult, RouteErrorResponse, METHOD_FILTER_ALL},
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/driver{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<DriverProfile>))
        .route("/", get(get_driver).put(set_driver))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DriverDto {
    #[serde(flatten)]
    profile: DriverProfile,
    display_name: String,
    profile_complete: bool,
    completion_percentage: u8,
}

impl From<DriverProfile> for DriverDto {
    fn from(profile: DriverProfile) -> Self {
        Self {
            display_name: profile.display_name().to_owned(),
            profile_complete: profile.is_complete(),
            completion_percentage: profile.completion_percentage(),
            profile,
        }
    }
}

async fn get_driver(
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<DriverDto> {
    let driver = session.read(|trip| trip.driver.clone()).await;
    Ok(driver_hateoas(driver.into(), base_url).json())
}

async fn set_driver(
    original_uri: OriginalUri,
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
    Json(profile): Json<DriverProfile>,
) -> HateoasResult<DriverDto> {
    session
        .set_driver(profile)
        .await
        .map(|driver| driver_hateoas(driver.into(), base_url).json())
        .map_err(|why| RouteErrorResponse::from_request(why, Method::PUT, &original_uri))
}

fn driver_hateoas(driver: DriverDto, base_url: Arc<BaseUrl>) -> hateoas::Response<DriverDto> {
    let image_url = driver.profile.image_url.clone();
    hateoas::Response::builder(driver, base_url)
        .link("self", resource!(""))
        .link("fuel", super::fuel::resource!(""))
        .link_extern_option("image", image_url)
        .build()
}
