//! Domain models for the trivia database.
//!
//! These models are storage-agnostic and represent the core entities
//! used throughout the application.

use serde::{Deserialize, Serialize};

// =============================================================================
// Query Types for Pagination and Filtering
// =============================================================================

/// Pagination options - composed into entity-specific queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    /// Maximum number of items to return.
    pub limit: Option<usize>,
    /// Number of items to skip.
    pub offset: Option<usize>,
}

/// Category membership filter for question queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Only questions whose category equals the id.
    Only(Id),
    /// Only questions whose category differs from the id.
    Except(Id),
}

/// Query for Questions - pagination + category/search/exclusion filters.
#[derive(Debug, Clone, Default)]
pub struct QuestionQuery {
    pub page: Page,
    pub category: Option<CategoryFilter>,
    /// Case-insensitive substring of the question text.
    pub search: Option<String>,
    /// Question ids that must not be returned.
    pub exclude_ids: Vec<Id>,
}

/// Result of a paginated list query.
#[derive(Debug, Clone)]
pub struct ListResult<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Total count of all matching items (before pagination).
    pub total: usize,
    /// Limit that was applied.
    pub limit: Option<usize>,
    /// Offset that was applied.
    pub offset: usize,
}

/// Integer row id used for all entities.
pub type Id = i64;

/// A labeled grouping of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Id,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A quiz item with its answer, category reference and difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: Id,
    pub question: String,
    pub answer: String,
    /// Category id. Not enforced by the store, may dangle.
    pub category: Id,
    pub difficulty: i64,
}

/// A question that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: Id,
    pub difficulty: i64,
}

impl NewQuestion {
    /// Attach the id assigned by the store.
    pub fn with_id(self, id: Id) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}
