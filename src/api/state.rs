//! Application state for the API server.

use std::sync::Arc;

use crate::db::Database;
use crate::quiz::QuestionService;

/// Shared application state.
///
/// Generic over `D: Database`; the concrete backend is injected by the caller,
/// so every test can run against its own in-memory store.
pub struct AppState<D: Database> {
    service: QuestionService<D>,
}

// Manual Clone impl - only the Arc inside the service is cloned, not D
impl<D: Database> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl<D: Database> AppState<D> {
    /// Create a new AppState over the given database and default page size.
    pub fn new(db: D, questions_per_page: usize) -> Self {
        Self {
            service: QuestionService::new(Arc::new(db)).with_per_page(questions_per_page),
        }
    }

    /// Get a reference to the question service.
    pub fn service(&self) -> &QuestionService<D> {
        &self.service
    }
}
