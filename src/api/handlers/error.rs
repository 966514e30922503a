//! Error responses shared by every handler.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::db::Id;
use crate::quiz::QueryError;

/// Error response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always false
    #[schema(example = false)]
    pub success: bool,
    /// HTTP status code
    #[schema(example = 404)]
    pub error: u16,
    /// Canonical reason phrase of the status
    #[schema(example = "Not Found")]
    pub message: String,
}

/// A failed request, rendered as an [`ErrorResponse`].
///
/// Only the status travels to the client; details stay in the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpError(pub StatusCode);

impl HttpError {
    pub fn status(&self) -> StatusCode {
        self.0
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            success: false,
            error: self.0.as_u16(),
            message: self.0.canonical_reason().unwrap_or("Unknown Error").to_string(),
        };
        (self.0, Json(body)).into_response()
    }
}

impl From<QueryError> for HttpError {
    fn from(e: QueryError) -> Self {
        let status = match &e {
            QueryError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            QueryError::NotFound { .. } => StatusCode::NOT_FOUND,
            QueryError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            QueryError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!(error = %e, "request failed");
        } else {
            debug!(error = %e, status = status.as_u16(), "request rejected");
        }

        HttpError(status)
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(error = %rejection.body_text(), "invalid JSON body");
        HttpError(StatusCode::BAD_REQUEST)
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        debug!(error = %rejection.body_text(), "invalid query string");
        HttpError(StatusCode::BAD_REQUEST)
    }
}

/// Parse an id path segment. A segment that is not an id names nothing.
pub(crate) fn parse_path_id(raw: &str) -> Result<Id, HttpError> {
    raw.trim().parse::<Id>().map_err(|_| {
        debug!(segment = raw, "path segment is not an id");
        HttpError(StatusCode::NOT_FOUND)
    })
}

/// Fallback for unknown routes.
pub async fn not_found() -> HttpError {
    HttpError(StatusCode::NOT_FOUND)
}

/// Fallback for known routes called with an unsupported method.
pub async fn method_not_allowed() -> HttpError {
    HttpError(StatusCode::METHOD_NOT_ALLOWED)
}
