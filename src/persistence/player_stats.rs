//! Player stat queries.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};

use super::filters::PlayerStatFilter;
use super::models::{NewPlayerStat, PlayerStat, PlayerStatChanges};
use super::store::{Store, Table, push_page, push_search};

const POSITION_ORDER: &str = " ORDER BY position IS NULL, position ASC, created_at DESC, id ASC";
const INSERT_SQL: &str = "INSERT INTO player_stats \
     (scorecard_id, player_name, team_name, position, stats, created_at) \
     VALUES (?, ?, ?, ?, ?, ?) RETURNING *";

impl Store {
    /// Lists player stats matching `filter`, ordered by position with
    /// unpositioned players last.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn list_player_stats(
        &self,
        filter: &PlayerStatFilter,
    ) -> Result<Vec<PlayerStat>, sqlx::Error> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM player_stats WHERE 1 = 1");
        if let Some(scorecard_id) = filter.scorecard_id {
            qb.push(" AND scorecard_id = ");
            qb.push_bind(scorecard_id);
        }
        if let Some(team_name) = &filter.team_name {
            qb.push(" AND team_name = ");
            qb.push_bind(team_name.clone());
        }
        if let Some(term) = &filter.search {
            push_search(&mut qb, &["player_name"], term);
        }
        qb.push(POSITION_ORDER);
        push_page(&mut qb, filter.page);

        qb.build_query_as::<PlayerStat>().fetch_all(&self.pool).await
    }

    /// All stat lines of one scorecard, in position order.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn stats_for_scorecard(
        &self,
        scorecard_id: i64,
    ) -> Result<Vec<PlayerStat>, sqlx::Error> {
        let sql = format!("SELECT * FROM player_stats WHERE scorecard_id = ?{POSITION_ORDER}");
        sqlx::query_as::<_, PlayerStat>(&sql)
            .bind(scorecard_id)
            .fetch_all(&self.pool)
            .await
    }

    /// Fetches one stat line.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn get_player_stat(&self, id: i64) -> Result<Option<PlayerStat>, sqlx::Error> {
        sqlx::query_as::<_, PlayerStat>("SELECT * FROM player_stats WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Sport of the scorecard a stat line belongs to, or `None` if the
    /// stat line does not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn player_stat_sport(&self, id: i64) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT s.sport FROM player_stats p \
             JOIN scorecards s ON s.id = p.scorecard_id WHERE p.id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Inserts one stat line.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn create_player_stat(&self, stat: &NewPlayerStat) -> Result<PlayerStat, sqlx::Error> {
        let created = sqlx::query_as::<_, PlayerStat>(INSERT_SQL)
            .bind(stat.scorecard_id)
            .bind(&stat.player_name)
            .bind(&stat.team_name)
            .bind(stat.position)
            .bind(stat.stats.to_string())
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!(
            player_stat_id = created.id,
            scorecard_id = created.scorecard_id,
            "player stat created"
        );
        Ok(created)
    }

    /// Inserts every stat line in one transaction. Either all rows are
    /// written or none are.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure; the transaction is
    /// rolled back.
    pub async fn create_player_stats(
        &self,
        stats: &[NewPlayerStat],
    ) -> Result<Vec<PlayerStat>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let now = Utc::now();
        let mut created = Vec::with_capacity(stats.len());
        for stat in stats {
            let row = sqlx::query_as::<_, PlayerStat>(INSERT_SQL)
                .bind(stat.scorecard_id)
                .bind(&stat.player_name)
                .bind(&stat.team_name)
                .bind(stat.position)
                .bind(stat.stats.to_string())
                .bind(now)
                .fetch_one(&mut *tx)
                .await?;
            created.push(row);
        }
        tx.commit().await?;

        tracing::debug!(count = created.len(), "player stats created in bulk");
        Ok(created)
    }

    /// Applies `changes` to a stat line in a single conditional statement.
    /// Returns `None` if the stat line does not exist.
    ///
    /// `changes` must not be empty.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn update_player_stat(
        &self,
        id: i64,
        changes: &PlayerStatChanges,
    ) -> Result<Option<PlayerStat>, sqlx::Error> {
        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE player_stats SET ");
        let mut set = qb.separated(", ");
        if let Some(player_name) = &changes.player_name {
            set.push("player_name = ");
            set.push_bind_unseparated(player_name.clone());
        }
        if let Some(team_name) = &changes.team_name {
            set.push("team_name = ");
            set.push_bind_unseparated(team_name.clone());
        }
        if let Some(position) = changes.position {
            set.push("position = ");
            set.push_bind_unseparated(position);
        }
        if let Some(stats) = &changes.stats {
            set.push("stats = ");
            set.push_bind_unseparated(stats.to_string());
        }
        qb.push(" WHERE id = ");
        qb.push_bind(id);
        qb.push(" RETURNING *");

        qb.build_query_as::<PlayerStat>()
            .fetch_optional(&self.pool)
            .await
    }

    /// Deletes a stat line and returns it, or `None` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn delete_player_stat(&self, id: i64) -> Result<Option<PlayerStat>, sqlx::Error> {
        sqlx::query_as::<_, PlayerStat>("DELETE FROM player_stats WHERE id = ? RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Returns `true` if the stat line exists.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn player_stat_exists(&self, id: i64) -> Result<bool, sqlx::Error> {
        self.row_exists(Table::PlayerStats, id).await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::persistence::filters::Page;
    use crate::persistence::models::{NewEvent, NewScorecard};
    use serde_json::json;

    use crate::persistence::store::test_support::memory_store;

    async fn scorecard(store: &Store) -> i64 {
        let Ok(event) = store
            .create_event(&NewEvent {
                title: "India vs Australia".to_string(),
                sport: "Cricket".to_string(),
                date: "2024-11-22".to_string(),
                ..NewEvent::default()
            })
            .await
        else {
            panic!("event");
        };
        let Ok(card) = store
            .create_scorecard(&NewScorecard {
                event_id: event.id,
                sport: "Cricket".to_string(),
                final_score: "IND 487/6d".to_string(),
                additional_data: None,
            })
            .await
        else {
            panic!("scorecard");
        };
        card.id
    }

    fn line(scorecard_id: i64, name: &str, position: Option<i64>) -> NewPlayerStat {
        NewPlayerStat {
            scorecard_id,
            player_name: name.to_string(),
            team_name: Some("India".to_string()),
            position,
            stats: json!({ "runsScored": 10 }),
        }
    }

    #[tokio::test]
    async fn unpositioned_players_sort_last() {
        let Ok(store) = memory_store().await else {
            panic!("store");
        };
        let card = scorecard(&store).await;
        let batch = [
            line(card, "Bumrah", None),
            line(card, "Kohli", Some(3)),
            line(card, "Jaiswal", Some(1)),
        ];
        let Ok(created) = store.create_player_stats(&batch).await else {
            panic!("bulk insert");
        };
        assert_eq!(created.len(), 3);

        let Ok(rows) = store.stats_for_scorecard(card).await else {
            panic!("query");
        };
        let names: Vec<_> = rows.iter().map(|r| r.player_name.as_str()).collect();
        assert_eq!(names, ["Jaiswal", "Kohli", "Bumrah"]);

        let filter = PlayerStatFilter {
            scorecard_id: Some(card),
            team_name: None,
            search: Some("kohl".to_string()),
            page: Page {
                limit: 50,
                offset: 0,
            },
        };
        let Ok(found) = store.list_player_stats(&filter).await else {
            panic!("query");
        };
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn bulk_insert_is_all_or_nothing() {
        let Ok(store) = memory_store().await else {
            panic!("store");
        };
        let card = scorecard(&store).await;
        let batch = [line(card, "Pant", Some(5)), line(card + 100, "Ghost", None)];
        assert!(store.create_player_stats(&batch).await.is_err());

        let Ok(rows) = store.stats_for_scorecard(card).await else {
            panic!("query");
        };
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn update_can_clear_position_and_delete_cascades() {
        let Ok(store) = memory_store().await else {
            panic!("store");
        };
        let card = scorecard(&store).await;
        let Ok(stat) = store.create_player_stat(&line(card, "Rahul", Some(2))).await else {
            panic!("insert");
        };
        assert!(matches!(
            store.player_stat_sport(stat.id).await,
            Ok(Some(ref sport)) if sport == "Cricket"
        ));

        let changes = PlayerStatChanges {
            position: Some(None),
            stats: Some(json!({ "runsScored": 84 })),
            ..PlayerStatChanges::default()
        };
        let Ok(Some(updated)) = store.update_player_stat(stat.id, &changes).await else {
            panic!("update");
        };
        assert_eq!(updated.position, None);
        assert_eq!(updated.player_name, "Rahul");
        assert_eq!(updated.stats.0, json!({ "runsScored": 84 }));

        let Ok(Some(_)) = store.delete_scorecard(card).await else {
            panic!("delete scorecard");
        };
        assert!(matches!(store.get_player_stat(stat.id).await, Ok(None)));
    }
}
