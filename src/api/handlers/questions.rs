//! Question handlers.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};

use super::error::{ErrorResponse, HttpError, parse_path_id};
use crate::api::AppState;
use crate::db::{Database, Id, Question};
use crate::quiz::{QuestionDraft, RawInt};

// =============================================================================
// DTOs (Data Transfer Objects)
// =============================================================================

/// Question response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionResponse {
    #[schema(example = 1)]
    pub id: Id,
    #[schema(example = "What is the capital of France?")]
    pub question: String,
    #[schema(example = "Paris")]
    pub answer: String,
    /// Category id
    #[schema(example = 3)]
    pub category: Id,
    #[schema(example = 2)]
    pub difficulty: i64,
}

impl From<Question> for QuestionResponse {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question: q.question,
            answer: q.answer,
            category: q.category,
            difficulty: q.difficulty,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListQuestionsQuery {
    /// 1-based page number
    #[param(example = 1)]
    pub page: Option<usize>,
    /// Page size, defaults to the server setting
    #[param(example = 10)]
    pub per_page: Option<usize>,
}

/// One page of questions
#[derive(Serialize, ToSchema)]
pub struct QuestionPageResponse {
    #[schema(example = true)]
    pub success: bool,
    pub questions: Vec<QuestionResponse>,
    /// Total questions in the store, 0 past the last page
    #[schema(example = 19)]
    pub total_questions: usize,
    /// Category id → category type, empty past the last page
    pub categories: BTreeMap<Id, String>,
}

/// Create question request DTO
///
/// Ids may be sent as numbers or numeric strings.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateQuestionRequest {
    #[schema(example = "Which planet is known as the Red Planet?")]
    pub question: Option<String>,
    #[schema(example = "Mars")]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_utils::lenient_id")]
    #[schema(value_type = Option<i64>, example = 1)]
    pub category: Option<Option<Id>>,
    #[serde(default, deserialize_with = "crate::serde_utils::lenient_id")]
    #[schema(value_type = Option<i64>, example = 2)]
    pub difficulty: Option<Option<i64>>,
}

impl From<CreateQuestionRequest> for QuestionDraft {
    fn from(req: CreateQuestionRequest) -> Self {
        Self {
            question: req.question,
            answer: req.answer,
            category: RawInt::from(req.category),
            difficulty: RawInt::from(req.difficulty),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct CreatedResponse {
    #[schema(example = true)]
    pub success: bool,
    /// Id of the new question
    #[schema(example = 24)]
    pub created: Id,
}

#[derive(Serialize, ToSchema)]
pub struct DeletedResponse {
    #[schema(example = true)]
    pub success: bool,
    /// Id of the deleted question
    #[schema(example = 5)]
    pub deleted: Id,
}

/// Search request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchRequest {
    /// Case-insensitive substring of the question text
    #[serde(rename = "searchTerm")]
    #[schema(example = "title")]
    pub search_term: Option<String>,
}

/// Search matches
#[derive(Serialize, ToSchema)]
pub struct SearchResponse {
    #[schema(example = true)]
    pub success: bool,
    pub questions: Vec<QuestionResponse>,
    /// Number of matches
    #[schema(example = 2)]
    pub total_questions: usize,
}

// =============================================================================
// Handlers
// =============================================================================

/// List questions
///
/// Returns one page of questions in id order. A page past the end is an
/// empty page with a zero total, not an error.
#[utoipa::path(
    get,
    path = "/questions",
    tag = "questions",
    params(ListQuestionsQuery),
    responses(
        (status = 200, description = "Page of questions", body = QuestionPageResponse),
        (status = 400, description = "Invalid page parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_questions<D: Database>(
    State(state): State<AppState<D>>,
    query: Result<Query<ListQuestionsQuery>, QueryRejection>,
) -> Result<Json<QuestionPageResponse>, HttpError> {
    let Query(query) = query?;
    let page = state
        .service()
        .list_questions(query.page, query.per_page)
        .await?;

    Ok(Json(QuestionPageResponse {
        success: true,
        questions: page.questions.into_iter().map(QuestionResponse::from).collect(),
        total_questions: page.total_questions,
        categories: page.categories,
    }))
}

/// Create a question
#[utoipa::path(
    post,
    path = "/questions",
    tag = "questions",
    request_body = CreateQuestionRequest,
    responses(
        (status = 200, description = "Question created", body = CreatedResponse),
        (status = 400, description = "Missing or malformed field", body = ErrorResponse),
        (status = 422, description = "Category is not a known category id", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_question<D: Database>(
    State(state): State<AppState<D>>,
    payload: Result<Json<CreateQuestionRequest>, JsonRejection>,
) -> Result<Json<CreatedResponse>, HttpError> {
    let Json(req) = payload?;
    let created = state.service().create_question(req.into()).await?;

    Ok(Json(CreatedResponse {
        success: true,
        created,
    }))
}

/// Delete a question
#[utoipa::path(
    delete,
    path = "/questions/{id}",
    tag = "questions",
    params(
        ("id" = i64, Path, description = "Question ID")
    ),
    responses(
        (status = 200, description = "Question deleted", body = DeletedResponse),
        (status = 404, description = "Question not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_question<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, HttpError> {
    let id = parse_path_id(&id)?;
    let deleted = state.service().delete_question(id).await?;

    Ok(Json(DeletedResponse {
        success: true,
        deleted,
    }))
}

/// Search questions
///
/// Matches the term case-insensitively anywhere in the question text.
/// Results are not paginated.
#[utoipa::path(
    post,
    path = "/questions/search",
    tag = "questions",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matching questions", body = SearchResponse),
        (status = 400, description = "Missing search term", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn search_questions<D: Database>(
    State(state): State<AppState<D>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, HttpError> {
    let Json(req) = payload?;
    let results = state
        .service()
        .search_questions(req.search_term.as_deref())
        .await?;

    Ok(Json(SearchResponse {
        success: true,
        questions: results
            .questions
            .into_iter()
            .map(QuestionResponse::from)
            .collect(),
        total_questions: results.total_questions,
    }))
}
