//! User profile mirror service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{UpsertProfile, UserProfile},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all mirrored profiles
    pub async fn list_users(&self) -> AppResult<Vec<UserProfile>> {
        self.repository.users.list_all().await
    }

    /// Upsert the caller's own profile mirror
    pub async fn upsert_profile(
        &self,
        caller_id: &str,
        profile: UpsertProfile,
    ) -> AppResult<UserProfile> {
        profile
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        self.repository
            .users
            .upsert(
                caller_id,
                profile.name.trim(),
                &profile.email,
                profile.avatar_url.as_deref(),
            )
            .await
    }
}
