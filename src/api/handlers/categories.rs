//! Category handlers.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use super::error::{ErrorResponse, HttpError, parse_path_id};
use super::questions::QuestionResponse;
use crate::api::AppState;
use crate::db::{Database, Id};

// =============================================================================
// DTOs
// =============================================================================

/// All categories keyed by id
#[derive(Serialize, ToSchema)]
pub struct CategoriesResponse {
    #[schema(example = true)]
    pub success: bool,
    /// Category id → category type
    #[schema(example = json!({"1": "Science", "2": "Art"}))]
    pub categories: BTreeMap<Id, String>,
}

/// Questions of a single category
#[derive(Serialize, ToSchema)]
pub struct CategoryQuestionsResponse {
    #[schema(example = true)]
    pub success: bool,
    pub questions: Vec<QuestionResponse>,
}

// =============================================================================
// Handlers
// =============================================================================

/// List all categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    responses(
        (status = 200, description = "Category id to type mapping", body = CategoriesResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_categories<D: Database>(
    State(state): State<AppState<D>>,
) -> Result<Json<CategoriesResponse>, HttpError> {
    let categories = state.service().list_categories().await?;

    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}

/// List questions of a category
///
/// Returns every question of the category in id order, without pagination.
#[utoipa::path(
    get,
    path = "/categories/{id}/questions",
    tag = "categories",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Questions of the category", body = CategoryQuestionsResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn questions_by_category<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<CategoryQuestionsResponse>, HttpError> {
    let id = parse_path_id(&id)?;
    let questions = state.service().questions_by_category(id).await?;

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions: questions.into_iter().map(QuestionResponse::from).collect(),
    }))
}
