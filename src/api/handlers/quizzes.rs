//! Quiz handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use super::error::{ErrorResponse, HttpError};
use super::questions::QuestionResponse;
use crate::api::AppState;
use crate::db::{Database, Id};
use crate::quiz::{QuizCategory, RawInt};

/// Category a quiz draws from
#[derive(Debug, Deserialize, ToSchema)]
pub struct QuizCategoryRequest {
    /// Category id; with type "ALL" questions of this category are skipped
    #[serde(default, deserialize_with = "crate::serde_utils::lenient_id")]
    #[schema(value_type = Option<i64>, example = 0)]
    pub id: Option<Option<Id>>,
    /// Category type, or "ALL"
    #[serde(rename = "type")]
    #[schema(example = "ALL")]
    pub kind: Option<String>,
}

impl From<QuizCategoryRequest> for QuizCategory {
    fn from(req: QuizCategoryRequest) -> Self {
        Self {
            id: RawInt::from(req.id),
            kind: req.kind,
        }
    }
}

/// Quiz request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct QuizRequest {
    pub quiz_category: Option<QuizCategoryRequest>,
    /// Ids of questions already asked
    #[schema(example = json!([1, 4]))]
    pub previous_questions: Option<Vec<Id>>,
}

/// Next quiz question
#[derive(Serialize, ToSchema)]
pub struct QuizResponse {
    #[schema(example = true)]
    pub success: bool,
    /// Null once every eligible question has been asked
    pub question: Option<QuestionResponse>,
}

/// Pick the next quiz question
///
/// Returns a random question that is not in `previous_questions`.
#[utoipa::path(
    post,
    path = "/quizzes",
    tag = "quizzes",
    request_body = QuizRequest,
    responses(
        (status = 200, description = "Next question, or null when none is left", body = QuizResponse),
        (status = 400, description = "Missing or malformed quiz category", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn select_quiz_question<D: Database>(
    State(state): State<AppState<D>>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<Json<QuizResponse>, HttpError> {
    let Json(req) = payload?;
    let previous = req.previous_questions.unwrap_or_default();

    let question = state
        .service()
        .select_quiz_question(req.quiz_category.map(QuizCategory::from), &previous)
        .await?;

    Ok(Json(QuizResponse {
        success: true,
        question: question.map(QuestionResponse::from),
    }))
}
