//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

use sea_orm::{DbErr, SqlErr};

use crate::errors::AppError;

pub(crate) mod entities;
mod note_repository;
mod user_repository;

pub use note_repository::{NoteRepository, NoteStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use note_repository::MockNoteRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

/// Translate a unique-index violation into the duplicate conflict for
/// `field`; anything else stays a database error. The index is the
/// authoritative duplicate signal under concurrent writes.
pub(crate) fn conflict_or_db(err: DbErr, field: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict(field),
        _ => AppError::from(err),
    }
}
