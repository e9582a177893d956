//! Note service - Handles note-related business logic.
//!
//! Orchestrates validation, the title-uniqueness guard, and the owner
//! lookup that annotates listed notes with their user's name.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Note, NoteWithOwner};
use crate::errors::{AppError, AppResult};
use crate::infra::{NoteRepository, UserRepository};
use crate::services::guards;

/// Note service trait for dependency injection.
#[async_trait]
pub trait NoteService: Send + Sync {
    /// List all notes annotated with the owning user's username;
    /// empty collection is a not-found failure
    async fn list_notes(&self) -> AppResult<Vec<NoteWithOwner>>;

    /// Create a new note, not completed by default
    async fn create_note(&self, owner: Uuid, title: String, text: String) -> AppResult<Note>;

    /// Overwrite all mutable fields of a note
    async fn update_note(
        &self,
        id: Uuid,
        owner: Uuid,
        title: String,
        text: String,
        completed: bool,
    ) -> AppResult<Note>;

    /// Delete a note unconditionally.
    /// Returns the deleted note for the confirmation message.
    async fn delete_note(&self, id: Uuid) -> AppResult<Note>;
}

/// Concrete implementation of NoteService.
pub struct NoteManager {
    notes: Arc<dyn NoteRepository>,
    users: Arc<dyn UserRepository>,
}

impl NoteManager {
    /// Create new note service instance
    pub fn new(notes: Arc<dyn NoteRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { notes, users }
    }

    fn validate_fields(title: &str, text: &str) -> AppResult<()> {
        if title.is_empty() {
            return Err(AppError::validation("Title is required"));
        }
        if text.is_empty() {
            return Err(AppError::validation("Text is required"));
        }
        Ok(())
    }
}

#[async_trait]
impl NoteService for NoteManager {
    async fn list_notes(&self) -> AppResult<Vec<NoteWithOwner>> {
        let notes = self.notes.list().await?;
        if notes.is_empty() {
            return Err(AppError::not_found("No notes found"));
        }

        // Secondary lookup per note; an orphaned owner reference is a data
        // defect surfaced as an internal failure rather than a crash
        let mut annotated = Vec::with_capacity(notes.len());
        for note in notes {
            let user = self.users.find_by_id(note.owner).await?.ok_or_else(|| {
                AppError::internal(format!(
                    "Note {} references missing user {}",
                    note.id, note.owner
                ))
            })?;
            annotated.push(NoteWithOwner {
                username: user.username,
                note,
            });
        }

        Ok(annotated)
    }

    async fn create_note(&self, owner: Uuid, title: String, text: String) -> AppResult<Note> {
        Self::validate_fields(&title, &text)?;

        let check = guards::check_title_unique(self.notes.as_ref(), &title, None).await?;
        if check.is_duplicate {
            return Err(AppError::conflict("note title"));
        }

        let note = self.notes.create(owner, title, text).await?;
        tracing::info!(note_id = %note.id, "note created");
        Ok(note)
    }

    async fn update_note(
        &self,
        id: Uuid,
        owner: Uuid,
        title: String,
        text: String,
        completed: bool,
    ) -> AppResult<Note> {
        Self::validate_fields(&title, &text)?;

        self.notes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Note not found"))?;

        let check = guards::check_title_unique(self.notes.as_ref(), &title, Some(id)).await?;
        if check.is_duplicate {
            return Err(AppError::conflict("note title"));
        }

        let note = self.notes.update(id, owner, title, text, completed).await?;
        tracing::info!(note_id = %note.id, "note updated");
        Ok(note)
    }

    async fn delete_note(&self, id: Uuid) -> AppResult<Note> {
        let note = self.notes.delete(id).await?;
        tracing::info!(note_id = %note.id, "note deleted");
        Ok(note)
    }
}
