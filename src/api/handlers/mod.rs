//! HTTP handlers.

mod categories;
mod error;
mod questions;
mod quizzes;
mod system;

#[cfg(test)]
mod questions_test;

pub use categories::*;
pub use error::*;
pub use questions::*;
pub use quizzes::*;
pub use system::*;
