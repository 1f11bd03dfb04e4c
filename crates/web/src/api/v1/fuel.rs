use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, State},
    http::Method,
    routing::{delete, get, on},
    Extension, Json, Router,
};
use ledger::fuel::{fuel_summary, FuelSummary};
use model::fuel::FuelRecord;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::Serialize;
use utility::{id::Id, let_also::LetAlso};

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
        crate::api::v1::resource!("/fuel{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<FuelRecord>))
        .route("/summary/schema", get(schema_no_example::<FuelSummary>))
        .route("/", get(get_fuel_records).post(add_fuel_record))
        .route("/summary", get(get_fuel_summary))
        .route("/:id", delete(remove_fuel_record))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

/// A refill as listed, with the price it was bought at.
#[derive(Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct FuelRecordDto {
    #[serde(flatten)]
    record: FuelRecord,
    price_per_liter: Option<Decimal>,
}

impl From<FuelRecord> for FuelRecordDto {
    fn from(record: FuelRecord) -> Self {
        Self {
            price_per_liter: record.price_per_liter(),
            record,
        }
    }
}

async fn get_fuel_records(
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<FuelRecordDto>>> {
    session
        .read(|trip| trip.diesel_records.clone())
        .await
        .into_iter()
        .map(|record| fuel_record_hateoas(record, base_url.clone()))
        .collect::<Vec<_>>()
        .let_owned(|data| Ok(VecResponse::new(data).hateoas().json()))
}

/// Books a refill. The matching fuel expense is created alongside it.
async fn add_fuel_record(
    original_uri: OriginalUri,
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
    Json(record): Json<FuelRecord>,
) -> HateoasResult<FuelRecordDto> {
    session
        .add_fuel_record(record)
        .await
        .map(|record| fuel_record_hateoas(record, base_url).json())
        .map_err(|why| RouteErrorResponse::from_request(why, Method::POST, &original_uri))
}

async fn remove_fuel_record(
    original_uri: OriginalUri,
    Path(id): Path<u64>,
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<FuelRecordDto> {
    session
        .remove_fuel_record(Id::new(id))
        .await
        .map(|record| fuel_record_hateoas(record, base_url).json())
        .map_err(|why| RouteErrorResponse::from_request(why, Method::DELETE, &original_uri))
}

async fn get_fuel_summary(
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<FuelSummary> {
    let summary = session.read(|trip| fuel_summary(&trip.diesel_records)).await;
    let response = hateoas::Response::builder(summary, base_url)
        .link("self", resource!("/summary"))
        .link("records", resource!(""))
        .build();
    Ok(response.json())
}

fn fuel_record_hateoas(
    record: FuelRecord,
    base_url: Arc<BaseUrl>,
) -> hateoas::Response<FuelRecordDto> {
    let id = record.id;
    hateoas::Response::builder(FuelRecordDto::from(record), base_url)
        .link("delete", resource!("/{}", id))
        .link("collection", resource!(""))
        .link("expenses", super::expenses::resource!(""))
        .build()
}
