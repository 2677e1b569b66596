//! SQLite-backed store shared by all handlers.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite};

use super::filters::like_pattern;
use crate::config::ServerConfig;

/// Persistence layer over a `sqlx::SqlitePool`.
///
/// Each method issues one statement (or one transaction for bulk writes);
/// conditional updates and deletes use `RETURNING` so that existence and
/// mutation are decided atomically.
#[derive(Debug, Clone)]
pub struct Store {
    pub(super) pool: SqlitePool,
}

impl Store {
    /// Opens the database described by `config` and applies the embedded
    /// migrations.
    ///
    /// In-memory databases are pinned to one connection that never idles
    /// out, since each SQLite memory connection is a separate database.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] if the URL is invalid, the database cannot
    /// be opened, or a migration fails.
    pub async fn connect(config: &ServerConfig) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.database_max_connections.max(1))
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs));
        if config.is_in_memory() {
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::info!(url = %config.database_url, "database ready");
        Ok(Self { pool })
    }

    /// Wraps an existing pool. Migrations are assumed to have run.
    #[must_use]
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Round-trips a trivial query to check the database answers.
    ///
    /// # Errors
    ///
    /// Returns the [`sqlx::Error`] from the failed query.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await.map(|_| ())
    }

    /// Returns `true` if `table` has a row with the given id.
    pub(super) async fn row_exists(&self, table: Table, id: i64) -> Result<bool, sqlx::Error> {
        let sql = format!("SELECT id FROM {} WHERE id = ?", table.name());
        let found = sqlx::query_scalar::<_, i64>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }
}

/// Tables addressable by [`Store::row_exists`].
#[derive(Debug, Clone, Copy)]
pub(super) enum Table {
    Users,
    Events,
    Lists,
    Scorecards,
    PlayerStats,
}

impl Table {
    const fn name(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Events => "events",
            Self::Lists => "lists",
            Self::Scorecards => "scorecards",
            Self::PlayerStats => "player_stats",
        }
    }
}

/// Appends `AND (<col> LIKE ? ESCAPE '\' OR ...)` for a search term.
pub(super) fn push_search(qb: &mut QueryBuilder<'_, Sqlite>, columns: &[&str], term: &str) {
    let pattern = like_pattern(term);
    qb.push(" AND (");
    let mut clauses = qb.separated(" OR ");
    for column in columns {
        clauses.push(format!("{column} LIKE "));
        clauses.push_bind_unseparated(pattern.clone());
        clauses.push_unseparated(" ESCAPE '\\'");
    }
    qb.push(")");
}

/// Appends `LIMIT ? OFFSET ?`.
pub(super) fn push_page(qb: &mut QueryBuilder<'_, Sqlite>, page: super::filters::Page) {
    qb.push(" LIMIT ");
    qb.push_bind(page.limit);
    qb.push(" OFFSET ");
    qb.push_bind(page.offset);
}
