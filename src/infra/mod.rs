//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and migrations
//! - Repositories for users and notes

pub mod db;
pub mod repositories;

pub use db::{Database, MigrationStatus, Migrator};
pub use repositories::{NoteRepository, NoteStore, UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockNoteRepository, MockUserRepository};
