use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, State},
    http::Method,
    routing::{delete, get, on},
    Extension, Json, Router,
};
use ledger::CategoryShare;
use model::money::Expense;
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
        crate::api::v1::resource!("/expenses{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<Expense>))
        .route("/", get(get_expenses).post(add_expense))
        .route("/categories", get(get_categories))
        .route("/:id", delete(remove_expense))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn get_expenses(
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<Expense>>> {
    session
        .read(|trip| trip.expenses.clone())
        .await
        .into_iter()
        .map(|expense| expense_hateoas(expense, base_url.clone()))
        .collect::<Vec<_>>()
        .let_owned(|data| Ok(VecResponse::new(data).hateoas().json()))
}

async fn add_expense(
    original_uri: OriginalUri,
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
    Json(expense): Json<Expense>,
) -> HateoasResult<Expense> {
    session
        .add_expense(expense)
        .await
        .map(|expense| expense_hateoas(expense, base_url).json())
        .map_err(|why| RouteErrorResponse::from_request(why, Method::POST, &original_uri))
}

async fn remove_expense(
    original_uri: OriginalUri,
    Path(id): Path<u64>,
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<Expense> {
    session
        .remove_expense(Id::new(id))
        .await
        .map(|expense| expense_hateoas(expense, base_url).json())
        .map_err(|why| RouteErrorResponse::from_request(why, Method::DELETE, &original_uri))
}

/// Expense totals per category with their share of all expenses.
async fn get_categories(
    State(WebState { session }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<CategoryShare>> {
    let shares = session
        .read(|trip| ledger::category_shares(&trip.expenses))
        .await;
    let response = hateoas::Response::builder(VecResponse::new(shares), base_url)
        .link("self", resource!("/categories"))
        .link("expenses", resource!(""))
        .build();
    Ok(response.json())
}

fn expense_hateoas(expense: Expense, base_url: Arc<BaseUrl>) -> hateoas::Response<Expense> {
    let id = expense.id;
    hateoas::Response::builder(expense, base_url)
        .link("delete", resource!("/{}", id))
        .link("collection", resource!(""))
        .build()
}
