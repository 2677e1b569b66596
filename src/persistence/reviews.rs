//! Review queries. Reviews are create-only.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};

use super::filters::ReviewFilter;
use super::models::{NewReview, Review};
use super::store::{Store, Table, push_page};

impl Store {
    /// Lists reviews matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn list_reviews(&self, filter: &ReviewFilter) -> Result<Vec<Review>, sqlx::Error> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM reviews WHERE 1 = 1");
        if let Some(user_id) = filter.user_id {
            qb.push(" AND user_id = ");
            qb.push_bind(user_id);
        }
        if let Some(event_id) = filter.event_id {
            qb.push(" AND event_id = ");
            qb.push_bind(event_id);
        }
        qb.push(format!(
            " ORDER BY {} {}",
            filter.sort.column(),
            filter.order.as_sql()
        ));
        push_page(&mut qb, filter.page);

        qb.build_query_as::<Review>().fetch_all(&self.pool).await
    }

    /// Returns `true` if the user exists.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn user_exists(&self, user_id: i64) -> Result<bool, sqlx::Error> {
        self.row_exists(Table::Users, user_id).await
    }

    /// Returns `true` if the event exists.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn event_exists(&self, event_id: i64) -> Result<bool, sqlx::Error> {
        self.row_exists(Table::Events, event_id).await
    }

    /// Inserts a review and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure, including foreign
    /// key violations.
    pub async fn create_review(&self, review: &NewReview) -> Result<Review, sqlx::Error> {
        let created = sqlx::query_as::<_, Review>(
            "INSERT INTO reviews (user_id, event_id, rating, content, spoiler, created_at) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(review.user_id)
        .bind(review.event_id)
        .bind(review.rating)
        .bind(&review.content)
        .bind(review.spoiler)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(
            review_id = created.id,
            event_id = created.event_id,
            rating = created.rating,
            "review created"
        );
        Ok(created)
    }
}
