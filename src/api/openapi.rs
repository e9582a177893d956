//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{note_handler, user_handler};
use crate::domain::{NoteResponse, UserResponse};
use crate::types::MessageResponse;

/// OpenAPI documentation for the techNotes API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "techNotes API",
        version = "0.1.0",
        description = "Employee notes management API with Axum and SeaORM",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3500", description = "Local development server")
    ),
    paths(
        // User endpoints
        user_handler::list_users,
        user_handler::create_user,
        user_handler::update_user,
        user_handler::delete_user,
        // Note endpoints
        note_handler::list_notes,
        note_handler::create_note,
        note_handler::update_note,
        note_handler::delete_note,
    ),
    components(
        schemas(
            // Domain types
            UserResponse,
            NoteResponse,
            MessageResponse,
            // Request types
            user_handler::CreateUserRequest,
            user_handler::UpdateUserRequest,
            user_handler::DeleteUserRequest,
            note_handler::CreateNoteRequest,
            note_handler::UpdateNoteRequest,
            note_handler::DeleteNoteRequest,
        )
    ),
    tags(
        (name = "Users", description = "User management operations"),
        (name = "Notes", description = "Note management operations")
    )
)]
pub struct ApiDoc;
