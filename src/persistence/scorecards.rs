//! Scorecard queries.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};

use super::filters::ScorecardFilter;
use super::models::{NewScorecard, Scorecard, ScorecardChanges};
use super::store::{Store, push_page};

impl Store {
    /// Lists scorecards matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn list_scorecards(
        &self,
        filter: &ScorecardFilter,
    ) -> Result<Vec<Scorecard>, sqlx::Error> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM scorecards WHERE 1 = 1");
        if let Some(event_id) = filter.event_id {
            qb.push(" AND event_id = ");
            qb.push_bind(event_id);
        }
        if let Some(sport) = &filter.sport {
            qb.push(" AND sport = ");
            qb.push_bind(sport.clone());
        }
        qb.push(" ORDER BY created_at DESC");
        push_page(&mut qb, filter.page);

        qb.build_query_as::<Scorecard>().fetch_all(&self.pool).await
    }

    /// Fetches one scorecard.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn get_scorecard(&self, id: i64) -> Result<Option<Scorecard>, sqlx::Error> {
        sqlx::query_as::<_, Scorecard>("SELECT * FROM scorecards WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Sport of a scorecard, or `None` if the scorecard does not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn scorecard_sport(&self, id: i64) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT sport FROM scorecards WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Inserts a scorecard and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn create_scorecard(&self, card: &NewScorecard) -> Result<Scorecard, sqlx::Error> {
        let created = sqlx::query_as::<_, Scorecard>(
            "INSERT INTO scorecards (event_id, sport, final_score, additional_data, created_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(card.event_id)
        .bind(&card.sport)
        .bind(&card.final_score)
        .bind(card.additional_data.as_ref().map(ToString::to_string))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(scorecard_id = created.id, event_id = created.event_id, "scorecard created");
        Ok(created)
    }

    /// Applies `changes` to a scorecard in a single conditional statement.
    /// Returns `None` if the scorecard does not exist.
    ///
    /// `changes` must not be empty.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn update_scorecard(
        &self,
        id: i64,
        changes: &ScorecardChanges,
    ) -> Result<Option<Scorecard>, sqlx::Error> {
        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE scorecards SET ");
        let mut set = qb.separated(", ");
        if let Some(sport) = &changes.sport {
            set.push("sport = ");
            set.push_bind_unseparated(sport.clone());
        }
        if let Some(final_score) = &changes.final_score {
            set.push("final_score = ");
            set.push_bind_unseparated(final_score.clone());
        }
        if let Some(additional_data) = &changes.additional_data {
            set.push("additional_data = ");
            set.push_bind_unseparated(additional_data.as_ref().map(ToString::to_string));
        }
        qb.push(" WHERE id = ");
        qb.push_bind(id);
        qb.push(" RETURNING *");

        qb.build_query_as::<Scorecard>()
            .fetch_optional(&self.pool)
            .await
    }

    /// Deletes a scorecard (its player stats cascade) and returns the
    /// deleted row, or `None` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn delete_scorecard(&self, id: i64) -> Result<Option<Scorecard>, sqlx::Error> {
        let deleted = sqlx::query_as::<_, Scorecard>("DELETE FROM scorecards WHERE id = ? RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        if deleted.is_some() {
            tracing::debug!(scorecard_id = id, "scorecard deleted");
        }
        Ok(deleted)
    }

    /// Returns `true` if the scorecard exists.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn scorecard_exists(&self, id: i64) -> Result<bool, sqlx::Error> {
        self.row_exists(super::store::Table::Scorecards, id).await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::persistence::filters::Page;
    use crate::persistence::models::NewEvent;
    use crate::persistence::store::test_support::memory_store;
    use serde_json::json;

    async fn seeded() -> (Store, i64) {
        let Ok(store) = memory_store().await else {
            panic!("store");
        };
        let Ok(event) = store
            .create_event(&NewEvent {
                title: "Monaco GP".to_string(),
                sport: "F1".to_string(),
                date: "2024-05-26".to_string(),
                ..NewEvent::default()
            })
            .await
        else {
            panic!("event");
        };
        (store, event.id)
    }

    #[tokio::test]
    async fn update_touches_only_given_columns() {
        let (store, event_id) = seeded().await;
        let Ok(card) = store
            .create_scorecard(&NewScorecard {
                event_id,
                sport: "F1".to_string(),
                final_score: "1st: Leclerc".to_string(),
                additional_data: Some(json!({ "laps": 78 })),
            })
            .await
        else {
            panic!("scorecard");
        };

        let changes = ScorecardChanges {
            final_score: Some("1st: Leclerc, 2nd: Piastri".to_string()),
            ..ScorecardChanges::default()
        };
        let Ok(Some(updated)) = store.update_scorecard(card.id, &changes).await else {
            panic!("update");
        };
        assert_eq!(updated.final_score, "1st: Leclerc, 2nd: Piastri");
        assert_eq!(updated.sport, "F1");
        assert_eq!(updated.additional_data.map(|d| d.0), Some(json!({ "laps": 78 })));

        let clear = ScorecardChanges {
            additional_data: Some(None),
            ..ScorecardChanges::default()
        };
        let Ok(Some(cleared)) = store.update_scorecard(card.id, &clear).await else {
            panic!("update");
        };
        assert_eq!(cleared.additional_data, None);
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_row_return_none() {
        let (store, _) = seeded().await;
        let changes = ScorecardChanges {
            sport: Some("F1".to_string()),
            ..ScorecardChanges::default()
        };
        assert!(matches!(store.update_scorecard(42, &changes).await, Ok(None)));
        assert!(matches!(store.delete_scorecard(42).await, Ok(None)));
    }

    #[tokio::test]
    async fn list_filters_by_event() {
        let (store, event_id) = seeded().await;
        for score in ["A", "B"] {
            let Ok(_) = store
                .create_scorecard(&NewScorecard {
                    event_id,
                    sport: "F1".to_string(),
                    final_score: score.to_string(),
                    additional_data: None,
                })
                .await
            else {
                panic!("scorecard");
            };
        }
        let filter = ScorecardFilter {
            event_id: Some(event_id),
            sport: None,
            page: Page {
                limit: 1,
                offset: 0,
            },
        };
        let Ok(rows) = store.list_scorecards(&filter).await else {
            panic!("query");
        };
        assert_eq!(rows.len(), 1);

        let other = ScorecardFilter {
            event_id: Some(event_id + 1),
            ..filter
        };
        let Ok(rows) = store.list_scorecards(&other).await else {
            panic!("query");
        };
        assert!(rows.is_empty());
    }
}
