use axum::{
    extract::{OriginalUri, Query, Request},
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::MethodFilter,
    Json,
};
use model::ExampleData;
use schemars::{schema_for, schema_for_value, JsonSchema};
use serde::{Deserialize, Serialize};
use tracker::TrackerError;

use crate::hateoas;

pub type RouteResult<O> = Result<O, RouteErrorResponse>;
pub type HateoasResult<O> = RouteResult<Json<hateoas::Response<O>>>;

/// A `MethodFilter` that matches all http methods.
pub(crate) const METHOD_FILTER_ALL: MethodFilter = MethodFilter::GET
    .or(MethodFilter::POST)
    .or(MethodFilter::PATCH)
    .or(MethodFilter::PUT)
    .or(MethodFilter::DELETE);

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VecResponse<T> {
    pub total_items: usize,
    pub data: Vec<T>,
}

impl<T> VecResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            total_items: data.len(),
            data,
        }
    }

    pub fn hateoas(self) -> hateoas::Response<Self> {
        hateoas::Response::new(self)
    }
}

// - Services returning commonly used responses -

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SchemaParams {
    #[serde(default)]
    example_data: bool,
}

pub(crate) async fn schema<T: ExampleData + JsonSchema + Serialize>(
    Query(params): Query<SchemaParams>,
) -> impl IntoResponse {
    if params.example_data {
        Json(schema_for_value!(T::example_data()))
    } else {
        Json(schema_for!(T))
    }
}

pub(crate) async fn schema_no_example<T: JsonSchema>() -> impl IntoResponse {
    Json(schema_for!(T))
}

pub(crate) async fn route_not_found(
    OriginalUri(original_uri): OriginalUri,
    req: Request,
) -> impl IntoResponse {
    RouteErrorResponse::not_found(req.method(), original_uri.path())
}

// - Commonly used responses -

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteErrorResponse {
    #[serde(skip)]
    pub status_code: StatusCode,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_uri: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RouteErrorResponse {
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            http_method: None,
            requested_uri: None,
            message: None,
        }
    }

    pub fn not_found(method: &Method, uri: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND)
            .with_method(method)
            .with_uri(uri)
            .with_default_message()
    }

    pub fn with_method(mut self, method: &Method) -> Self {
        self.http_method = Some(method.to_string());
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.requested_uri = Some(uri.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_default_message(self) -> Self {
        let message = self
            .status_code
            .canonical_reason()
            .unwrap_or("unknown error");
        self.with_message(message)
    }

    /// Shorthand used by the handlers to attach the failed request.
    pub fn from_request(
        why: impl Into<RouteErrorResponse>,
        method: Method,
        uri: &OriginalUri,
    ) -> Self {
        why.into().with_method(&method).with_uri(uri.0.path())
    }
}

impl From<TrackerError> for RouteErrorResponse {
    fn from(value: TrackerError) -> Self {
        match value {
            TrackerError::InvalidInput(_) | TrackerError::OutOfOrder => {
                Self::new(StatusCode::BAD_REQUEST).with_message(value.to_string())
            }
            TrackerError::NotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND).with_message(value.to_string())
            }
            TrackerError::IdsExhausted => {
                Self::new(StatusCode::CONFLICT).with_message(value.to_string())
            }
            TrackerError::Store(why) => {
                log::error!("could not persist trip data: {}", why);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR)
                    .with_message("The trip data could not be saved.")
            }
        }
    }
}

impl IntoResponse for RouteErrorResponse {
    fn into_response(self) -> axum::response::Response {
        (self.status_code, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::{io, sync::Arc};

    use model::InvalidInput;
    use tracker::StoreError;

    use super::*;

    #[test]
    fn tracker_errors_map_to_status_codes() {
        let invalid = TrackerError::InvalidInput(InvalidInput::LatitudeOutOfRange(91.0));
        assert_eq!(
            RouteErrorResponse::from(invalid).status_code,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RouteErrorResponse::from(TrackerError::OutOfOrder).status_code,
            StatusCode::BAD_REQUEST
        );

        let missing = RouteErrorResponse::from(TrackerError::NotFound {
            kind: "expense",
            id: 7,
        });
        assert_eq!(missing.status_code, StatusCode::NOT_FOUND);
        assert_eq!(
            missing.message.as_deref(),
            Some("expense with id 7 does not exist")
        );

        let exhausted = RouteErrorResponse::from(TrackerError::IdsExhausted);
        assert_eq!(exhausted.status_code, StatusCode::CONFLICT);
        assert_eq!(
            exhausted.message.as_deref(),
            Some("no record id left to assign")
        );

        let store = TrackerError::Store(StoreError::Io(Arc::new(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "read-only",
        ))));
        assert_eq!(
            RouteErrorResponse::from(store).status_code,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_carries_request() {
        let response = RouteErrorResponse::not_found(&Method::DELETE, "/api/v1/stops/3");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["httpMethod"], "DELETE");
        assert_eq!(value["requestedUri"], "/api/v1/stops/3");
        assert_eq!(value["message"], "Not Found");
    }
}
