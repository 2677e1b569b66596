//! List and list-entry queries.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};

use super::filters::ListFilter;
use super::models::{List, ListEvent, ListedEvent, NewList, NewListEntry};
use super::store::{Store, Table, push_page, push_search};

const SEARCH_COLUMNS: [&str; 2] = ["name", "description"];

impl Store {
    /// Lists user lists matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn list_lists(&self, filter: &ListFilter) -> Result<Vec<List>, sqlx::Error> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM lists WHERE 1 = 1");
        if let Some(user_id) = filter.user_id {
            qb.push(" AND user_id = ");
            qb.push_bind(user_id);
        }
        if let Some(is_public) = filter.is_public {
            qb.push(" AND is_public = ");
            qb.push_bind(is_public);
        }
        if let Some(term) = &filter.search {
            push_search(&mut qb, &SEARCH_COLUMNS, term);
        }
        qb.push(format!(
            " ORDER BY {} {}",
            filter.sort.column(),
            filter.order.as_sql()
        ));
        push_page(&mut qb, filter.page);

        qb.build_query_as::<List>().fetch_all(&self.pool).await
    }

    /// Fetches one list.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn get_list(&self, id: i64) -> Result<Option<List>, sqlx::Error> {
        sqlx::query_as::<_, List>("SELECT * FROM lists WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Returns `true` if the list exists.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn list_exists(&self, list_id: i64) -> Result<bool, sqlx::Error> {
        self.row_exists(Table::Lists, list_id).await
    }

    /// Inserts a list and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn create_list(&self, list: &NewList) -> Result<List, sqlx::Error> {
        let created = sqlx::query_as::<_, List>(
            "INSERT INTO lists (user_id, name, description, is_public, created_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(list.user_id)
        .bind(&list.name)
        .bind(&list.description)
        .bind(list.is_public)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(list_id = created.id, user_id = created.user_id, "list created");
        Ok(created)
    }

    /// Events of a list in display order. Entries sharing an `order`
    /// value keep insertion order.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn list_entries(&self, list_id: i64) -> Result<Vec<ListedEvent>, sqlx::Error> {
        sqlx::query_as::<_, ListedEvent>(
            "SELECT le.\"order\" AS list_order, e.* \
             FROM list_events le JOIN events e ON e.id = le.event_id \
             WHERE le.list_id = ? ORDER BY le.\"order\" ASC, le.id ASC",
        )
        .bind(list_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Appends an event to a list. Without an explicit order the entry
    /// goes after the current last one, computed in the same statement.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] on database failure.
    pub async fn add_list_entry(
        &self,
        list_id: i64,
        entry: NewListEntry,
    ) -> Result<ListEvent, sqlx::Error> {
        let created = sqlx::query_as::<_, ListEvent>(
            "INSERT INTO list_events (list_id, event_id, \"order\", created_at) \
             VALUES (?, ?, COALESCE(?, (SELECT COALESCE(MAX(\"order\"), 0) + 1 \
                                        FROM list_events WHERE list_id = ?)), ?) \
             RETURNING *",
        )
        .bind(list_id)
        .bind(entry.event_id)
        .bind(entry.order)
        .bind(list_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(list_id, event_id = entry.event_id, order = created.order, "list entry added");
        Ok(created)
    }
}
