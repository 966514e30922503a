//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.
//! Every method returns a `Send` future so the traits can be used from
//! axum handlers that are generic over [`Database`].

use std::future::Future;

use crate::db::{
    DbResult,
    models::{Category, Id, ListResult, NewQuestion, Question, QuestionQuery},
};

/// Repository for Category operations.
pub trait CategoryRepository {
    /// Get a category by ID.
    fn get(&self, id: Id) -> impl Future<Output = DbResult<Category>> + Send;

    /// Get all categories, ordered by id.
    fn list(&self) -> impl Future<Output = DbResult<Vec<Category>>> + Send;
}

/// Repository for Question operations.
pub trait QuestionRepository {
    /// Insert a new question and return it with its generated id.
    fn create(&self, question: &NewQuestion) -> impl Future<Output = DbResult<Question>> + Send;

    /// Get a question by ID.
    fn get(&self, id: Id) -> impl Future<Output = DbResult<Question>> + Send;

    /// Delete a question by ID. Returns NotFound when no row was removed.
    fn delete(&self, id: Id) -> impl Future<Output = DbResult<()>> + Send;

    /// List questions matching the query, ordered by id.
    ///
    /// `total` counts every matching row regardless of the page.
    fn list(
        &self,
        query: Option<&QuestionQuery>,
    ) -> impl Future<Output = DbResult<ListResult<Question>>> + Send;

    /// Count questions matching the query's filters (the page is ignored).
    fn count(&self, query: Option<&QuestionQuery>) -> impl Future<Output = DbResult<usize>> + Send;

    /// Pick one matching question uniformly at random.
    ///
    /// The query's page is ignored.
    fn random(
        &self,
        query: &QuestionQuery,
    ) -> impl Future<Output = DbResult<Option<Question>>> + Send;
}

/// Combined database interface.
pub trait Database: Send + Sync + 'static {
    type Categories: CategoryRepository + Send + Sync;
    type Questions: QuestionRepository + Send + Sync;

    /// Run pending migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the category repository.
    fn categories(&self) -> Self::Categories;

    /// Get the question repository.
    fn questions(&self) -> Self::Questions;
}
