//! Integrity guards - read-only checks consulted before mutations.
//!
//! These are the fast-path answers; the authoritative enforcement lives in
//! the store (unique indexes on `username` and `title_norm`, transactional
//! user deletion), so a race past a guard still cannot violate an invariant.

use uuid::Uuid;

use crate::errors::AppResult;
use crate::infra::{NoteRepository, UserRepository};

/// Outcome of a uniqueness check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniquenessCheck {
    pub is_duplicate: bool,
    pub conflicting_id: Option<Uuid>,
}

impl UniquenessCheck {
    fn unique() -> Self {
        Self {
            is_duplicate: false,
            conflicting_id: None,
        }
    }

    fn duplicate_of(id: Uuid) -> Self {
        Self {
            is_duplicate: true,
            conflicting_id: Some(id),
        }
    }

    /// A match on the excluded record is a self-match, not a duplicate
    fn resolve(found: Option<Uuid>, exclude: Option<Uuid>) -> Self {
        match found {
            Some(id) if Some(id) == exclude => Self::unique(),
            Some(id) => Self::duplicate_of(id),
            None => Self::unique(),
        }
    }
}

/// Check whether `username` collides with an existing user, under exact
/// comparison, ignoring the record `exclude` (for no-op updates).
pub async fn check_username_unique(
    users: &dyn UserRepository,
    username: &str,
    exclude: Option<Uuid>,
) -> AppResult<UniquenessCheck> {
    let found = users.find_by_username(username).await?.map(|u| u.id);
    Ok(UniquenessCheck::resolve(found, exclude))
}

/// Check whether `title` collides with an existing note, under case-folded
/// comparison, ignoring the record `exclude` (for renames to the same title).
pub async fn check_title_unique(
    notes: &dyn NoteRepository,
    title: &str,
    exclude: Option<Uuid>,
) -> AppResult<UniquenessCheck> {
    let found = notes.find_by_title_folded(title).await?.map(|n| n.id);
    Ok(UniquenessCheck::resolve(found, exclude))
}

/// A user may be deleted only while no note references it as owner.
pub async fn can_delete_user(notes: &dyn NoteRepository, owner: Uuid) -> AppResult<bool> {
    Ok(notes.count_by_owner(owner).await? == 0)
}
