//! Question retrieval and quiz selection.
//!
//! [`QuestionService`] answers every read and write the trivia API exposes:
//! paginated listing, search, per-category listing, random quiz selection,
//! creation and deletion. It is generic over [`crate::db::Database`] and
//! holds no state beyond the database handle and the default page size.

mod error;
mod service;


pub use error::{QueryError, QueryResult};
pub use service::*;
