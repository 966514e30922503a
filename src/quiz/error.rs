//! Query service error kinds.

use miette::Diagnostic;
use thiserror::Error;

use crate::db::DbError;

/// Errors raised by the question query service.
///
/// Each variant corresponds to one transport-level outcome; the HTTP layer
/// owns that mapping.
#[derive(Error, Diagnostic, Debug)]
pub enum QueryError {
    #[error("Bad request: {message}")]
    #[diagnostic(code(trivia::quiz::bad_request))]
    BadRequest { message: String },

    #[error("{entity_type} '{id}' not found")]
    #[diagnostic(code(trivia::quiz::not_found))]
    NotFound { entity_type: String, id: String },

    #[error("Unprocessable: {message}")]
    #[diagnostic(code(trivia::quiz::unprocessable))]
    Unprocessable { message: String },

    #[error("Internal error: {message}")]
    #[diagnostic(code(trivia::quiz::internal))]
    Internal { message: String },
}

impl QueryError {
    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        QueryError::BadRequest {
            message: message.into(),
        }
    }

    pub(crate) fn unprocessable(message: impl Into<String>) -> Self {
        QueryError::Unprocessable {
            message: message.into(),
        }
    }
}

impl From<DbError> for QueryError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { entity_type, id } => QueryError::NotFound { entity_type, id },
            other => QueryError::Internal {
                message: other.to_string(),
            },
        }
    }
}

/// Result type for query service operations.
pub type QueryResult<T> = Result<T, QueryError>;
