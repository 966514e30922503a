//! Question query service.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::error::{QueryError, QueryResult};
use crate::db::{
    CategoryFilter, CategoryRepository, Database, DbError, Id, NewQuestion, Page, Question,
    QuestionQuery, QuestionRepository,
};

/// Page size used when neither the caller nor the configuration picks one.
pub const DEFAULT_QUESTIONS_PER_PAGE: usize = 10;

/// Quiz category type that selects across categories.
pub const ALL_CATEGORIES: &str = "ALL";

/// Category id → category type.
pub type CategoryMap = BTreeMap<Id, String>;

/// An integer field (category or difficulty id) as received from a client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RawInt {
    /// Absent or null.
    #[default]
    Missing,
    /// Present but not an integer.
    Malformed,
    Valid(Id),
}

impl From<Option<Option<Id>>> for RawInt {
    fn from(value: Option<Option<Id>>) -> Self {
        match value {
            None => RawInt::Missing,
            Some(None) => RawInt::Malformed,
            Some(Some(id)) => RawInt::Valid(id),
        }
    }
}

/// One page of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    /// Unfiltered question count, or 0 past the last page.
    pub total_questions: usize,
    pub categories: CategoryMap,
}

impl QuestionPage {
    /// The "no more pages" answer.
    fn past_end() -> Self {
        Self {
            questions: vec![],
            total_questions: 0,
            categories: CategoryMap::new(),
        }
    }
}

/// Search matches. `total_questions` is the number of matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

/// Category a quiz draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizCategory {
    pub id: RawInt,
    /// Category type; `"ALL"` turns the id into an exclusion.
    pub kind: Option<String>,
}

impl QuizCategory {
    pub fn is_all(&self) -> bool {
        self.kind.as_deref() == Some(ALL_CATEGORIES)
    }
}

/// Unvalidated input for a new question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: RawInt,
    pub difficulty: RawInt,
}

/// Number of pages for `total` rows. A store that fits on one page,
/// including an empty one, has exactly one page.
pub fn last_page(total: usize, per_page: usize) -> usize {
    if total <= per_page {
        1
    } else {
        total.div_ceil(per_page)
    }
}

/// Read and write operations over questions and categories.
pub struct QuestionService<D: Database> {
    db: Arc<D>,
    per_page: usize,
}

impl<D: Database> Clone for QuestionService<D> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            per_page: self.per_page,
        }
    }
}

impl<D: Database> QuestionService<D> {
    /// Create a service over the given database with the default page size.
    pub fn new(db: Arc<D>) -> Self {
        Self {
            db,
            per_page: DEFAULT_QUESTIONS_PER_PAGE,
        }
    }

    /// Override the page size used when callers do not pass one.
    ///
    /// Zero is ignored.
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        if per_page > 0 {
            self.per_page = per_page;
        }
        self
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &D {
        &self.db
    }

    /// All categories keyed by id.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> QueryResult<CategoryMap> {
        let categories = self.db.categories().list().await?;
        Ok(categories.into_iter().map(|c| (c.id, c.kind)).collect())
    }

    /// One page of questions in id order.
    ///
    /// `page` defaults to 1 and `per_page` to the configured page size. A page
    /// past the end yields an empty page with a zero total.
    #[instrument(skip(self))]
    pub async fn list_questions(
        &self,
        page: Option<usize>,
        per_page: Option<usize>,
    ) -> QueryResult<QuestionPage> {
        let page = page.unwrap_or(1);
        let per_page = per_page.unwrap_or(self.per_page);
        if page == 0 || per_page == 0 {
            return Err(QueryError::bad_request(
                "page and per_page must be positive integers",
            ));
        }

        let questions = self.db.questions();
        let total = questions.count(None).await?;

        if page > last_page(total, per_page) {
            debug!(page, per_page, total, "page past the end");
            return Ok(QuestionPage::past_end());
        }

        // page is within bounds, so the offset never exceeds total
        let query = QuestionQuery {
            page: Page {
                limit: Some(per_page.min(total)),
                offset: Some((page - 1) * per_page),
            },
            ..Default::default()
        };
        let result = questions.list(Some(&query)).await?;
        let categories = self.list_categories().await?;

        Ok(QuestionPage {
            questions: result.items,
            total_questions: total,
            categories,
        })
    }

    /// Case-insensitive substring search over question text.
    #[instrument(skip(self))]
    pub async fn search_questions(&self, term: Option<&str>) -> QueryResult<SearchResults> {
        let term = term.ok_or_else(|| QueryError::bad_request("searchTerm is required"))?;

        let query = QuestionQuery {
            search: Some(term.to_string()),
            ..Default::default()
        };
        let result = self.db.questions().list(Some(&query)).await?;

        Ok(SearchResults {
            total_questions: result.items.len(),
            questions: result.items,
        })
    }

    /// Every question of an existing category.
    #[instrument(skip(self))]
    pub async fn questions_by_category(&self, category_id: Id) -> QueryResult<Vec<Question>> {
        self.db.categories().get(category_id).await?;

        let query = QuestionQuery {
            category: Some(CategoryFilter::Only(category_id)),
            ..Default::default()
        };
        let result = self.db.questions().list(Some(&query)).await?;
        Ok(result.items)
    }

    /// Pick a random question the player has not seen yet.
    ///
    /// A concrete category restricts the pick to that category. With type
    /// `"ALL"` the pick is instead restricted to questions whose category
    /// differs from the given id; clients pass id 0 to mean any category.
    #[instrument(skip(self))]
    pub async fn select_quiz_question(
        &self,
        category: Option<QuizCategory>,
        previous_questions: &[Id],
    ) -> QueryResult<Option<Question>> {
        let category =
            category.ok_or_else(|| QueryError::bad_request("quiz_category is required"))?;

        let category_id = match category.id {
            RawInt::Valid(id) => id,
            RawInt::Missing => return Err(QueryError::bad_request("quiz_category.id is required")),
            RawInt::Malformed => {
                return Err(QueryError::bad_request(
                    "quiz_category.id must be an integer",
                ));
            }
        };

        let filter = if category.is_all() {
            CategoryFilter::Except(category_id)
        } else {
            self.db.categories().get(category_id).await?;
            CategoryFilter::Only(category_id)
        };

        let query = QuestionQuery {
            category: Some(filter),
            exclude_ids: previous_questions.to_vec(),
            ..Default::default()
        };
        let picked = self.db.questions().random(&query).await?;

        if picked.is_none() {
            debug!(category_id, "no eligible quiz question left");
        }

        Ok(picked)
    }

    /// Delete a question and return its id.
    #[instrument(skip(self))]
    pub async fn delete_question(&self, id: Id) -> QueryResult<Id> {
        self.db.questions().delete(id).await?;
        info!(id, "question deleted");
        Ok(id)
    }

    /// Validate a draft, store it, and return the new id.
    ///
    /// Missing fields are a bad request. A category that is not an id, or
    /// names no category, is unprocessable.
    #[instrument(skip(self))]
    pub async fn create_question(&self, draft: QuestionDraft) -> QueryResult<Id> {
        let question = draft
            .question
            .ok_or_else(|| QueryError::bad_request("question is required"))?;
        let answer = draft
            .answer
            .ok_or_else(|| QueryError::bad_request("answer is required"))?;
        let difficulty = match draft.difficulty {
            RawInt::Valid(difficulty) => difficulty,
            RawInt::Missing => return Err(QueryError::bad_request("difficulty is required")),
            RawInt::Malformed => {
                return Err(QueryError::bad_request("difficulty must be an integer"));
            }
        };
        let category = match draft.category {
            RawInt::Valid(id) => id,
            RawInt::Missing => return Err(QueryError::bad_request("category is required")),
            RawInt::Malformed => {
                return Err(QueryError::unprocessable("category must be a category id"));
            }
        };

        match self.db.categories().get(category).await {
            Ok(_) => {}
            Err(DbError::NotFound { .. }) => {
                return Err(QueryError::unprocessable(format!(
                    "category {} does not exist",
                    category
                )));
            }
            Err(e) => return Err(e.into()),
        }

        let created = self
            .db
            .questions()
            .create(&NewQuestion {
                question,
                answer,
                category,
                difficulty,
            })
            .await?;

        info!(id = created.id, category, "question created");
        Ok(created.id)
    }
}
