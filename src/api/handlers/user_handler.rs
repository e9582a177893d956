//! User handlers.
//!
//! Follows the original REST shape: the record id travels in the request
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
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// User creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// Login name
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "alice")]
    pub username: String,
    /// Plaintext password, hashed before storage
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// Role labels (at least one)
    #[validate(length(min = 1, message = "At least one role is required"))]
    #[schema(example = json!(["Employee"]))]
    pub roles: Vec<String>,
}

/// User update request; omitting `password` keeps the stored hash
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    /// Id of the user to update
    pub id: Uuid,
    /// New login name
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "alice")]
    pub username: String,
    /// Replacement role labels (at least one)
    #[validate(length(min = 1, message = "At least one role is required"))]
    #[schema(example = json!(["Employee", "Manager"]))]
    pub roles: Vec<String>,
    /// Whether the account may act
    pub active: bool,
    /// New plaintext password, only when changing it
    #[schema(example = "NewSecurePass123!")]
    pub password: Option<String>,
}

/// User deletion request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeleteUserRequest {
    /// Id of the user to delete
    pub id: Uuid,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(list_users)
            .post(create_user)
            .patch(update_user)
            .delete(delete_user),
    )
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users, password hashes stripped", body = Vec<UserResponse>),
        (status = 404, description = "No users found")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Duplicate username")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let user = state
        .user_service
        .create_user(payload.username, payload.password, payload.roles)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(format!(
            "New user {} created",
            user.username
        ))),
    ))
}

/// Update a user
#[utoipa::path(
    patch,
    path = "/users",
    tag = "Users",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Duplicate username")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<MessageResponse>> {
    let user = state
        .user_service
        .update_user(
            payload.id,
            payload.username,
            payload.roles,
            payload.active,
            payload.password,
        )
        .await?;

    Ok(Json(MessageResponse::new(format!(
        "{} updated",
        user.username
    ))))
}

/// Delete a user without assigned notes
#[utoipa::path(
    delete,
    path = "/users",
    tag = "Users",
    request_body = DeleteUserRequest,
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "User has assigned notes"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<DeleteUserRequest>,
) -> AppResult<Json<MessageResponse>> {
    let user = state.user_service.delete_user(payload.id).await?;

    Ok(Json(MessageResponse::new(format!(
        "Username {} with ID {} deleted",
        user.username, user.id
    ))))
}
