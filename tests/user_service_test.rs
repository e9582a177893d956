//! User service unit tests.
//!
//! Repository mocks carry no expectations for mutation methods in the
//! failure cases, so any store call past a failed check panics the test.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use technotes::domain::{Note, User};
use technotes::errors::{AppError, AppResult};
use technotes::infra::{NoteRepository, UserRepository};
use technotes::services::{UserManager, UserService};

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

fn test_user(id: Uuid, username: &str) -> User {
    User {
        id,
        username: username.to_string(),
        password_hash: "stored-hash".to_string(),
        roles: vec!["Employee".to_string()],
        active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn service(users: MockUserRepo, notes: MockNoteRepo) -> UserManager {
    UserManager::new(Arc::new(users), Arc::new(notes))
}

#[tokio::test]
async fn test_create_user_success() {
    let mut users = MockUserRepo::new();
    users.expect_find_by_username().returning(|_| Ok(None));
    users
        .expect_create()
        .withf(|username, hash, roles| {
            // Plaintext never reaches the store
            username == "alice" && hash != "SecurePass123!" && *roles == ["Employee"]
        })
        .returning(|username, hash, roles| {
            let mut user = test_user(Uuid::new_v4(), &username);
            user.password_hash = hash;
            user.roles = roles;
            Ok(user)
        });

    let svc = service(users, MockNoteRepo::new());
    let result = svc
        .create_user(
            "alice".to_string(),
            "SecurePass123!".to_string(),
            vec!["Employee".to_string()],
        )
        .await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().username, "alice");
}

#[tokio::test]
async fn test_create_user_duplicate_username() {
    let existing = Uuid::new_v4();
    let mut users = MockUserRepo::new();
    users
        .expect_find_by_username()
        .returning(move |name| Ok(Some(test_user(existing, name))));
    // No create expectation: reaching the store would panic

    let svc = service(users, MockNoteRepo::new());
    let result = svc
        .create_user(
            "alice".to_string(),
            "SecurePass123!".to_string(),
            vec!["Employee".to_string()],
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn test_create_user_empty_roles_never_touches_store() {
    let svc = service(MockUserRepo::new(), MockNoteRepo::new());
    let result = svc
        .create_user("alice".to_string(), "SecurePass123!".to_string(), vec![])
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn test_create_user_empty_password_never_touches_store() {
    let svc = service(MockUserRepo::new(), MockNoteRepo::new());
    let result = svc
        .create_user(
            "alice".to_string(),
            String::new(),
            vec!["Employee".to_string()],
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn test_create_user_unknown_role() {
    let svc = service(MockUserRepo::new(), MockNoteRepo::new());
    let result = svc
        .create_user(
            "alice".to_string(),
            "SecurePass123!".to_string(),
            vec!["Wizard".to_string()],
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn test_update_user_own_username_is_not_conflict() {
    let id = Uuid::new_v4();
    let mut users = MockUserRepo::new();
    users
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_user(id, "alice"))));
    // The uniqueness lookup finds the record being updated itself
    users
        .expect_find_by_username()
        .returning(move |name| Ok(Some(test_user(id, name))));
    users
        .expect_update()
        .returning(|id, username, roles, active, _| {
            let mut user = test_user(id, &username);
            user.roles = roles;
            user.active = active;
            Ok(user)
        });

    let svc = service(users, MockNoteRepo::new());
    let result = svc
        .update_user(
            id,
            "alice".to_string(),
            vec!["Employee".to_string()],
            true,
            None,
        )
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_update_user_duplicate_username() {
    let id = Uuid::new_v4();
    let other = Uuid::new_v4();
    let mut users = MockUserRepo::new();
    users
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_user(id, "alice"))));
    users
        .expect_find_by_username()
        .returning(move |name| Ok(Some(test_user(other, name))));

    let svc = service(users, MockNoteRepo::new());
    let result = svc
        .update_user(
            id,
            "bob".to_string(),
            vec!["Employee".to_string()],
            true,
            None,
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn test_update_user_not_found() {
    let mut users = MockUserRepo::new();
    users.expect_find_by_id().returning(|_| Ok(None));

    let svc = service(users, MockNoteRepo::new());
    let result = svc
        .update_user(
            Uuid::new_v4(),
            "alice".to_string(),
            vec!["Employee".to_string()],
            true,
            None,
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
}

#[tokio::test]
async fn test_update_without_password_keeps_stored_hash() {
    let id = Uuid::new_v4();
    let mut users = MockUserRepo::new();
    users
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_user(id, "alice"))));
    users.expect_find_by_username().returning(|_| Ok(None));
    users
        .expect_update()
        .withf(|_, _, _, _, password_hash| password_hash.is_none())
        .returning(|id, username, _, _, _| Ok(test_user(id, &username)));

    let svc = service(users, MockNoteRepo::new());
    let result = svc
        .update_user(
            id,
            "alice2".to_string(),
            vec!["Employee".to_string()],
            false,
            None,
        )
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_update_with_password_rehashes() {
    let id = Uuid::new_v4();
    let mut users = MockUserRepo::new();
    users
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_user(id, "alice"))));
    users.expect_find_by_username().returning(|_| Ok(None));
    users
        .expect_update()
        .withf(|_, _, _, _, password_hash| {
            matches!(password_hash, Some(h) if h != "NewSecurePass1")
        })
        .returning(|id, username, _, _, _| Ok(test_user(id, &username)));

    let svc = service(users, MockNoteRepo::new());
    let result = svc
        .update_user(
            id,
            "alice".to_string(),
            vec!["Employee".to_string()],
            true,
            Some("NewSecurePass1".to_string()),
        )
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_delete_user_with_notes_is_refused() {
    let mut notes = MockNoteRepo::new();
    notes.expect_count_by_owner().returning(|_| Ok(1));
    // No delete expectation on the user repo: a delete call would panic

    let svc = service(MockUserRepo::new(), notes);
    let result = svc.delete_user(Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::HasDependents(_)));
}

#[tokio::test]
async fn test_delete_user_without_notes_succeeds() {
    let id = Uuid::new_v4();
    let mut notes = MockNoteRepo::new();
    notes.expect_count_by_owner().returning(|_| Ok(0));
    let mut users = MockUserRepo::new();
    users
        .expect_delete()
        .returning(|id| Ok(test_user(id, "alice")));

    let svc = service(users, notes);
    let result = svc.delete_user(id).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().id, id);
}

#[tokio::test]
async fn test_list_users_empty_is_not_found() {
    let mut users = MockUserRepo::new();
    users.expect_list().returning(|| Ok(vec![]));

    let svc = service(users, MockNoteRepo::new());
    let result = svc.list_users().await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
}

#[tokio::test]
async fn test_list_users_success() {
    let mut users = MockUserRepo::new();
    users.expect_list().returning(|| {
        Ok(vec![
            test_user(Uuid::new_v4(), "alice"),
            test_user(Uuid::new_v4(), "bob"),
        ])
    });

    let svc = service(users, MockNoteRepo::new());
    let result = svc.list_users().await;

    assert_eq!(result.unwrap().len(), 2);
}
