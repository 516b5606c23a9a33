//! User profile mirror endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::user::{UpsertProfile, UserProfile},
};

use super::AuthenticatedUser;

/// User listing response
#[derive(Serialize, ToSchema)]
pub struct UsersResponse {
    pub users: Vec<UserProfile>,
}

/// List all mirrored user profiles
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "All mirrored profiles", body = UsersResponse)
    )
)]
pub async fn list_users(State(state): State<crate::AppState>) -> AppResult<Json<UsersResponse>> {
    let users = state.services.users.list_users().await?;
    Ok(Json(UsersResponse { users }))
}

/// Upsert the caller's profile mirror
#[utoipa::path(
    put,
    path = "/users/me",
    tag = "users",
    request_body = UpsertProfile,
    responses(
        (status = 200, description = "Profile stored", body = UserProfile),
        (status = 400, description = "Invalid profile"),
        (status = 401, description = "No caller identity")
    )
)]
pub async fn update_my_profile(
    State(state): State<crate::AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Json(profile): Json<UpsertProfile>,
) -> AppResult<Json<UserProfile>> {
    let stored = state.services.users.upsert_profile(&user_id, profile).await?;
    Ok(Json(stored))
}
