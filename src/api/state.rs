//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::infra::{Database, NoteStore, UserStore};
use crate::services::{NoteManager, NoteService, UserManager, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Note service
    pub note_service: Arc<dyn NoteService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state wired to the database-backed stores.
    pub fn from_database(database: Arc<Database>) -> Self {
        let users: Arc<UserStore> = Arc::new(UserStore::new(database.get_connection()));
        let notes: Arc<NoteStore> = Arc::new(NoteStore::new(database.get_connection()));

        Self {
            user_service: Arc::new(UserManager::new(users.clone(), notes.clone())),
            note_service: Arc::new(NoteManager::new(notes, users)),
            database,
        }
    }

    /// Create application state with manually injected services (for tests).
    pub fn new(
        user_service: Arc<dyn UserService>,
        note_service: Arc<dyn NoteService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            user_service,
            note_service,
            database,
        }
    }
}
