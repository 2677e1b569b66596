//! Event queries.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};

use super::filters::EventFilter;
use super::models::{Event, NewEvent};
use super::store::{Store, push_page, push_search};

const SEARCH_COLUMNS: [&str; 5] = ["title", "sport", "league", "home_team", "away_team"];

/// Aggregate review figures for one event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewTally {
    /// Number of reviews.
    pub count: i64,
    /// Mean rating; `None` when there are no reviews.
    pub average_rating: Option<f64>,
}

impl Store {
    /// Lists events matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn list_events(&self, filter: &EventFilter) -> Result<Vec<Event>, sqlx::Error> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM events WHERE 1 = 1");
        if let Some(term) = &filter.search {
            push_search(&mut qb, &SEARCH_COLUMNS, term);
        }
        if let Some(sport) = &filter.sport {
            qb.push(" AND sport = ");
            qb.push_bind(sport.clone());
        }
        qb.push(format!(
            " ORDER BY {} {}",
            filter.sort.column(),
            filter.order.as_sql()
        ));
        push_page(&mut qb, filter.page);

        qb.build_query_as::<Event>().fetch_all(&self.pool).await
    }

    /// Fetches one event.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn get_event(&self, id: i64) -> Result<Option<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Inserts an event and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn create_event(&self, event: &NewEvent) -> Result<Event, sqlx::Error> {
        let created = sqlx::query_as::<_, Event>(
            "INSERT INTO events \
             (title, sport, league, date, location, home_team, away_team, score, image_url, description, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&event.title)
        .bind(&event.sport)
        .bind(&event.league)
        .bind(&event.date)
        .bind(&event.location)
        .bind(&event.home_team)
        .bind(&event.away_team)
        .bind(&event.score)
        .bind(&event.image_url)
        .bind(&event.description)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(event_id = created.id, sport = %created.sport, "event created");
        Ok(created)
    }

    /// Counts and averages the reviews of one event.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn review_tally(&self, event_id: i64) -> Result<ReviewTally, sqlx::Error> {
        let (count, average_rating) = sqlx::query_as::<_, (i64, Option<f64>)>(
            "SELECT COUNT(*), AVG(rating) FROM reviews WHERE event_id = ?",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(ReviewTally {
            count,
            average_rating,
        })
    }
}
