//! User profile handler.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::api::validate::parse_id;
use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse, Resource};
use crate::persistence::models::UserProfile;

/// `GET /api/users/{id}`: Public user profile.
///
/// # Errors
///
/// Returns `INVALID_ID`, `USER_NOT_FOUND` or a database error.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    summary = "Get a user profile",
    description = "Returns the public profile of a user. The password hash is never included.",
    params(
        ("id" = i64, Path, description = "User id"),
    ),
    responses(
        (status = 200, description = "User profile", body = UserProfile),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<UserProfile>, ApiError> {
    let id = parse_id(Some(&raw_id))?;
    let profile = state
        .store
        .get_user_profile(id)
        .await?
        .ok_or(ApiError::NotFound(Resource::User))?;
    Ok(Json(profile))
}

/// User routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/users/{id}", get(get_user))
}
