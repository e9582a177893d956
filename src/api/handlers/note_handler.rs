//! Note handlers.
//!
//! Same REST shape as the user routes: record ids travel in the request
//! body for PATCH and DELETE.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::NoteResponse;
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// Note creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateNoteRequest {
    /// Owning user's id
    pub owner: Uuid,
    /// Note title, unique under case-folded comparison
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Fix ticket #42")]
    pub title: String,
    /// Free-form note body
    #[validate(length(min = 1, message = "Text is required"))]
    #[schema(example = "Replace the faulty keyboard")]
    pub text: String,
}

/// Note update request; all fields are required, `completed` included
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateNoteRequest {
    /// Id of the note to update
    pub id: Uuid,
    /// Owning user's id
    pub owner: Uuid,
    /// New title
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Fix ticket #42")]
    pub title: String,
    /// New body
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,
    /// Completion flag
    pub completed: bool,
}

/// Note deletion request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeleteNoteRequest {
    /// Id of the note to delete
    pub id: Uuid,
}

/// Create note routes
pub fn note_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(list_notes)
            .post(create_note)
            .patch(update_note)
            .delete(delete_note),
    )
}

/// List all notes with their owner's username
#[utoipa::path(
    get,
    path = "/notes",
    tag = "Notes",
    responses(
        (status = 200, description = "All notes annotated with owner usernames", body = Vec<NoteResponse>),
        (status = 404, description = "No notes found")
    )
)]
pub async fn list_notes(State(state): State<AppState>) -> AppResult<Json<Vec<NoteResponse>>> {
    let notes = state.note_service.list_notes().await?;
    Ok(Json(notes.into_iter().map(NoteResponse::from).collect()))
}

/// Create a new note
#[utoipa::path(
    post,
    path = "/notes",
    tag = "Notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Duplicate note title")
    )
)]
pub async fn create_note(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateNoteRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state
        .note_service
        .create_note(payload.owner, payload.title, payload.text)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("New note created")),
    ))
}

/// Update a note
#[utoipa::path(
    patch,
    path = "/notes",
    tag = "Notes",
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Note not found"),
        (status = 409, description = "Duplicate note title")
    )
)]
pub async fn update_note(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateNoteRequest>,
) -> AppResult<Json<MessageResponse>> {
    let note = state
        .note_service
        .update_note(
            payload.id,
            payload.owner,
            payload.title,
            payload.text,
            payload.completed,
        )
        .await?;

    Ok(Json(MessageResponse::new(format!("{} updated", note.title))))
}

/// Delete a note
#[utoipa::path(
    delete,
    path = "/notes",
    tag = "Notes",
    request_body = DeleteNoteRequest,
    responses(
        (status = 200, description = "Note deleted", body = MessageResponse),
        (status = 404, description = "Note not found")
    )
)]
pub async fn delete_note(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<DeleteNoteRequest>,
) -> AppResult<Json<MessageResponse>> {
    let note = state.note_service.delete_note(payload.id).await?;

    Ok(Json(MessageResponse::new(format!(
        "Note {} with ID {} deleted",
        note.title, note.id
    ))))
}
