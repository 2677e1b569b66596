//! User profile lookups.

use super::models::UserProfile;
use super::store::Store;

impl Store {
    /// Fetches a user's public profile. The password column is never read.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn get_user_profile(&self, id: i64) -> Result<Option<UserProfile>, sqlx::Error> {
        sqlx::query_as::<_, UserProfile>(
            "SELECT id, email, username, name, bio, avatar, location, created_at \
             FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }
}
