use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, State},
    http::Method,
    routing::{delete, get, on},
    Extension, Json, Router,
};
use indexmap::IndexMap;
use model::money::Contribution;
use rust_decimal::Decimal;
use serde::Serialize;
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
        crate::api::v1::resource!("/contributions{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<Contribution>))
        .route("/", get(get_contributions).post(add_contribution))
        .route("/by-member", get(get_by_member))
        .route("/:id", delete(remove_contribution))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn get_contributions(
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<Contribution>>> {
    session
        .read(|trip| trip.contributions.clone())
        .await
        .into_iter()
        .map(|contribution| contribution_hateoas(contribution, base_url.clone()))
        .collect::<Vec<_>>()
        .let_owned(|data| Ok(VecResponse::new(data).hateoas().json()))
}

async fn add_contribution(
    original_uri: OriginalUri,
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
    Json(contribution): Json<Contribution>,
) -> HateoasResult<Contribution> {
    session
        .add_contribution(contribution)
        .await
        .map(|contribution| contribution_hateoas(contribution, base_url).json())
        .map_err(|why| RouteErrorResponse::from_request(why, Method::POST, &original_uri))
}

async fn remove_contribution(
    original_uri: OriginalUri,
    Path(id): Path<u64>,
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<Contribution> {
    session
        .remove_contribution(Id::new(id))
        .await
        .map(|contribution| contribution_hateoas(contribution, base_url).json())
        .map_err(|why| RouteErrorResponse::from_request(why, Method::DELETE, &original_uri))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ByMemberDto {
    total: Decimal,
    members: IndexMap<String, Decimal>,
}

async fn get_by_member(
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<ByMemberDto> {
    let dto = session
        .read(|trip| ByMemberDto {
            total: ledger::total_of(&trip.contributions),
            members: ledger::by_payer(&trip.contributions),
        })
        .await;
    let response = hateoas::Response::builder(dto, base_url)
        .link("self", resource!("/by-member"))
        .link("contributions", resource!(""))
        .build();
    Ok(response.json())
}

fn contribution_hateoas(
    contribution: Contribution,
    base_url: Arc<BaseUrl>,
) -> hateoas::Response<Contribution> {
    let id = contribution.id;
    hateoas::Response::builder(contribution, base_url)
        .link("delete", resource!("/{}", id))
        .link("collection", resource!(""))
        .build()
}
