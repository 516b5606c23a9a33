//! User profile mirror repository for database operations

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::user::UserProfile};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all mirrored profiles
    pub async fn list_all(&self) -> AppResult<Vec<UserProfile>> {
        let users = sqlx::query_as::<_, UserProfile>("SELECT * FROM user_profiles ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    /// Insert or refresh the mirror row for an external identity
    pub async fn upsert(
        &self,
        id: &str,
        name: &str,
        email: &str,
        avatar_url: Option<&str>,
    ) -> AppResult<UserProfile> {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            INSERT INTO user_profiles (id, name, email, avatar_url)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                email = EXCLUDED.email,
                avatar_url = EXCLUDED.avatar_url,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(avatar_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }
}
