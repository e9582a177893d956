//! Note repository implementation.
//!
//! The `title_norm` column mirrors `title` in case-folded form and carries
//! a unique index; writes keep it in sync and translate index violations
//! into the duplicate-title conflict.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use uuid::Uuid;

use super::conflict_or_db;
use super::entities::note::{self, ActiveModel, Entity as NoteEntity};
use crate::domain::Note;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Note repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Find note by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Note>>;

    /// Find a note whose title matches under case-folded comparison
    async fn find_by_title_folded(&self, title: &str) -> AppResult<Option<Note>>;

    /// Count notes owned by a given user
    async fn count_by_owner(&self, owner: Uuid) -> AppResult<u64>;

    /// Create a new note (not completed by default)
    async fn create(&self, owner: Uuid, title: String, text: String) -> AppResult<Note>;

    /// Overwrite all mutable fields of a note
    async fn update(
        &self,
        id: Uuid,
        owner: Uuid,
        title: String,
        text: String,
        completed: bool,
    ) -> AppResult<Note>;

    /// Delete a note unconditionally.
    /// Returns the deleted note for confirmation messages.
    async fn delete(&self, id: Uuid) -> AppResult<Note>;

    /// List all notes
    async fn list(&self) -> AppResult<Vec<Note>>;
}

/// Concrete implementation of NoteRepository
pub struct NoteStore {
    db: DatabaseConnection,
}

impl NoteStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NoteRepository for NoteStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Note>> {
        let result = NoteEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Note::from))
    }

    async fn find_by_title_folded(&self, title: &str) -> AppResult<Option<Note>> {
        let result = NoteEntity::find()
            .filter(note::Column::TitleNorm.eq(Note::fold_title(title)))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Note::from))
    }

    async fn count_by_owner(&self, owner: Uuid) -> AppResult<u64> {
        NoteEntity::find()
            .filter(note::Column::Owner.eq(owner))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn create(&self, owner: Uuid, title: String, text: String) -> AppResult<Note> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            owner: Set(owner),
            title_norm: Set(Note::fold_title(&title)),
            title: Set(title),
            text: Set(text),
            completed: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| conflict_or_db(e, "note title"))?;

        Ok(Note::from(model))
    }

    async fn update(
        &self,
        id: Uuid,
        owner: Uuid,
        title: String,
        text: String,
        completed: bool,
    ) -> AppResult<Note> {
        let note = NoteEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Note not found"))?;

        let mut active_model: ActiveModel = note.into();
        active_model.owner = Set(owner);
        active_model.title_norm = Set(Note::fold_title(&title));
        active_model.title = Set(title);
        active_model.text = Set(text);
        active_model.completed = Set(completed);
        active_model.updated_at = Set(chrono::Utc::now());

        let model = active_model
            .update(&self.db)
            .await
            .map_err(|e| conflict_or_db(e, "note title"))?;

        Ok(Note::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<Note> {
        let model = NoteEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::not_found("Note not found"))?;

        NoteEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Note::from(model))
    }

    async fn list(&self) -> AppResult<Vec<Note>> {
        let models = NoteEntity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Note::from).collect())
    }
}
