//! Note domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Note domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    /// Owning user's id; existence is not enforced on write
    pub owner: Uuid,
    pub title: String,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Case-folded form of a title, used for uniqueness comparison
    pub fn fold_title(title: &str) -> String {
        title.to_lowercase()
    }
}

/// A note joined with its owner's username for listing
#[derive(Debug, Clone)]
pub struct NoteWithOwner {
    pub note: Note,
    pub username: String,
}

/// Note response including the owning user's display name
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NoteResponse {
    /// Unique note identifier
    #[schema(example = "6f9619ff-8b86-d011-b42d-00c04fc964ff")]
    pub id: Uuid,
    /// Owning user's id
    pub owner: Uuid,
    /// Owning user's username
    #[schema(example = "alice")]
    pub username: String,
    /// Note title (unique, case-folded comparison)
    #[schema(example = "Fix ticket #42")]
    pub title: String,
    /// Free-form note body
    pub text: String,
    /// Completion flag
    pub completed: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<NoteWithOwner> for NoteResponse {
    fn from(value: NoteWithOwner) -> Self {
        let NoteWithOwner { note, username } = value;
        Self {
            id: note.id,
            owner: note.owner,
            username,
            title: note.title,
            text: note.text,
            completed: note.completed,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}
