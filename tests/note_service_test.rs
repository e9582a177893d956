//! Note service unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use technotes::domain::{Note, User};
use technotes::errors::{AppError, AppResult};
use technotes::infra::{NoteRepository, UserRepository};
use technotes::services::{NoteManager, NoteService};

mockall::mock! {
    pub NoteRepo {}

    #[async_trait]
    impl NoteRepository for NoteRepo {
        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Note>>;
        async fn find_by_title_folded(&self, title: &str) -> AppResult<Option<Note>>;
        async fn count_by_owner(&self, owner: Uuid) -> AppResult<u64>;
        async fn create(&self, owner: Uuid, title: String, text: String) -> AppResult<Note>;
        async fn update(
            &self,
            id: Uuid,
            owner: Uuid,
            title: String,
            text: String,
            completed: bool,
        ) -> AppResult<Note>;
        async fn delete(&self, id: Uuid) -> AppResult<Note>;
        async fn list(&self) -> AppResult<Vec<Note>>;
    }
}

mockall::mock! {
    pub UserRepo {}

    #[async_trait]
    impl UserRepository for UserRepo {
        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
        async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
        async fn create(
            &self,
            username: String,
            password_hash: String,
            roles: Vec<String>,
        ) -> AppResult<User>;
        async fn update(
            &self,
            id: Uuid,
            username: String,
            roles: Vec<String>,
            active: bool,
            password_hash: Option<String>,
        ) -> AppResult<User>;
        async fn delete(&self, id: Uuid) -> AppResult<User>;
        async fn list(&self) -> AppResult<Vec<User>>;
    }
}

fn test_note(id: Uuid, owner: Uuid, title: &str) -> Note {
    Note {
        id,
        owner,
        title: title.to_string(),
        text: "text".to_string(),
        completed: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn test_user(id: Uuid, username: &str) -> User {
    User::new(id, username.to_string(), "hash".to_string())
}

fn service(notes: MockNoteRepo, users: MockUserRepo) -> NoteManager {
    NoteManager::new(Arc::new(notes), Arc::new(users))
}

#[tokio::test]
async fn test_create_note_success_defaults_incomplete() {
    let owner = Uuid::new_v4();
    let mut notes = MockNoteRepo::new();
    notes.expect_find_by_title_folded().returning(|_| Ok(None));
    notes
        .expect_create()
        .returning(|owner, title, _| Ok(test_note(Uuid::new_v4(), owner, &title)));

    let svc = service(notes, MockUserRepo::new());
    let result = svc
        .create_note(owner, "Weekly Report".to_string(), "All good".to_string())
        .await;

    let note = result.unwrap();
    assert_eq!(note.owner, owner);
    assert!(!note.completed);
}

#[tokio::test]
async fn test_create_note_duplicate_title() {
    let mut notes = MockNoteRepo::new();
    notes
        .expect_find_by_title_folded()
        .returning(|title| Ok(Some(test_note(Uuid::new_v4(), Uuid::new_v4(), title))));
    // No create expectation: reaching the store would panic

    let svc = service(notes, MockUserRepo::new());
    let result = svc
        .create_note(
            Uuid::new_v4(),
            "Weekly Report".to_string(),
            "text".to_string(),
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn test_create_note_empty_title_never_touches_store() {
    let svc = service(MockNoteRepo::new(), MockUserRepo::new());
    let result = svc
        .create_note(Uuid::new_v4(), String::new(), "text".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn test_create_note_empty_text_never_touches_store() {
    let svc = service(MockNoteRepo::new(), MockUserRepo::new());
    let result = svc
        .create_note(Uuid::new_v4(), "Title".to_string(), String::new())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn test_update_note_to_own_title_succeeds() {
    let id = Uuid::new_v4();
    let owner = Uuid::new_v4();
    let mut notes = MockNoteRepo::new();
    notes
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_note(id, Uuid::new_v4(), "Weekly Report"))));
    // The uniqueness lookup finds the note being renamed itself
    notes
        .expect_find_by_title_folded()
        .returning(move |title| Ok(Some(test_note(id, Uuid::new_v4(), title))));
    notes
        .expect_update()
        .returning(|id, owner, title, text, completed| {
            let mut note = test_note(id, owner, &title);
            note.text = text;
            note.completed = completed;
            Ok(note)
        });

    let svc = service(notes, MockUserRepo::new());
    let result = svc
        .update_note(
            id,
            owner,
            "Weekly Report".to_string(),
            "updated".to_string(),
            true,
        )
        .await;

    assert!(result.is_ok());
    assert!(result.unwrap().completed);
}

#[tokio::test]
async fn test_update_note_duplicate_title() {
    let id = Uuid::new_v4();
    let other = Uuid::new_v4();
    let mut notes = MockNoteRepo::new();
    notes
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_note(id, Uuid::new_v4(), "Old Title"))));
    notes
        .expect_find_by_title_folded()
        .returning(move |title| Ok(Some(test_note(other, Uuid::new_v4(), title))));

    let svc = service(notes, MockUserRepo::new());
    let result = svc
        .update_note(
            id,
            Uuid::new_v4(),
            "Taken Title".to_string(),
            "text".to_string(),
            false,
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn test_update_note_not_found() {
    let mut notes = MockNoteRepo::new();
    notes.expect_find_by_id().returning(|_| Ok(None));

    let svc = service(notes, MockUserRepo::new());
    let result = svc
        .update_note(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Title".to_string(),
            "text".to_string(),
            false,
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
}

#[tokio::test]
async fn test_list_notes_empty_is_not_found() {
    let mut notes = MockNoteRepo::new();
    notes.expect_list().returning(|| Ok(vec![]));

    let svc = service(notes, MockUserRepo::new());
    let result = svc.list_notes().await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
}

#[tokio::test]
async fn test_list_notes_annotates_owner_username() {
    let owner = Uuid::new_v4();
    let mut notes = MockNoteRepo::new();
    notes
        .expect_list()
        .returning(move || Ok(vec![test_note(Uuid::new_v4(), owner, "Weekly Report")]));
    let mut users = MockUserRepo::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id, "alice"))));

    let svc = service(notes, users);
    let result = svc.list_notes().await.unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].username, "alice");
    assert_eq!(result[0].note.owner, owner);
}

#[tokio::test]
async fn test_list_notes_orphaned_owner_is_internal_error() {
    let mut notes = MockNoteRepo::new();
    notes
        .expect_list()
        .returning(|| Ok(vec![test_note(Uuid::new_v4(), Uuid::new_v4(), "Orphan")]));
    let mut users = MockUserRepo::new();
    users.expect_find_by_id().returning(|_| Ok(None));

    let svc = service(notes, users);
    let result = svc.list_notes().await;

    assert!(matches!(result.unwrap_err(), AppError::Internal(_)));
}

#[tokio::test]
async fn test_delete_note_returns_deleted_note() {
    let id = Uuid::new_v4();
    let mut notes = MockNoteRepo::new();
    notes
        .expect_delete()
        .returning(|id| Ok(test_note(id, Uuid::new_v4(), "old")));

    let svc = service(notes, MockUserRepo::new());
    let result = svc.delete_note(id).await;

    assert_eq!(result.unwrap().id, id);
}

#[tokio::test]
async fn test_delete_note_not_found_propagates() {
    let mut notes = MockNoteRepo::new();
    notes
        .expect_delete()
        .returning(|_| Err(AppError::not_found("Note not found")));

    let svc = service(notes, MockUserRepo::new());
    let result = svc.delete_note(Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
}
