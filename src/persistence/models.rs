//! Database rows and validated write payloads.
//!
//! Row structs derive [`sqlx::FromRow`] against the snake_case columns of
//! `migrations/` and serialize with camelCase keys for the JSON API.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::types::Json;
use utoipa::ToSchema;

/// A row from the `events` table.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Auto-increment row ID.
    pub id: i64,
    /// Headline, e.g. `"Lakers vs Warriors"`.
    pub title: String,
    /// Sport name as entered.
    pub sport: String,
    /// League or competition.
    pub league: Option<String>,
    /// Date (and optionally time) the event takes place.
    pub date: String,
    /// Venue or city.
    pub location: Option<String>,
    /// Home side.
    pub home_team: Option<String>,
    /// Away side.
    pub away_team: Option<String>,
    /// Final or current score as free text.
    pub score: Option<String>,
    /// Poster image.
    pub image_url: Option<String>,
    /// Long-form description.
    pub description: Option<String>,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A row from the `reviews` table.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Auto-increment row ID.
    pub id: i64,
    /// Author.
    pub user_id: i64,
    /// Reviewed event.
    pub event_id: i64,
    /// Star rating, 1 to 5.
    pub rating: i64,
    /// Review body.
    pub content: String,
    /// Whether the body reveals the result.
    pub spoiler: bool,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A row from the `lists` table.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct List {
    /// Auto-increment row ID.
    pub id: i64,
    /// Curator.
    pub user_id: i64,
    /// List title.
    pub name: String,
    /// Optional blurb.
    pub description: Option<String>,
    /// Visible to other users.
    pub is_public: bool,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A row from the `list_events` join table.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListEvent {
    /// Auto-increment row ID.
    pub id: i64,
    /// Owning list.
    pub list_id: i64,
    /// Listed event.
    pub event_id: i64,
    /// Display position within the list.
    pub order: i64,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// An event as it appears inside a list, with its display position.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct ListedEvent {
    /// Display position within the list.
    #[serde(rename = "order")]
    pub list_order: i64,
    /// The listed event.
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub event: Event,
}

/// A row from the `scorecards` table.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Scorecard {
    /// Auto-increment row ID.
    pub id: i64,
    /// Event the scorecard summarises.
    pub event_id: i64,
    /// Sport name; selects the schema of `additional_data` and of the
    /// player stats.
    pub sport: String,
    /// Final result as free text.
    pub final_score: String,
    /// Per-sport match details.
    #[schema(value_type = Option<Object>)]
    pub additional_data: Option<Json<Value>>,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A row from the `player_stats` table.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStat {
    /// Auto-increment row ID.
    pub id: i64,
    /// Owning scorecard.
    pub scorecard_id: i64,
    /// Player or driver name.
    pub player_name: String,
    /// Team; absent for individual sports.
    pub team_name: Option<String>,
    /// Batting order, finishing position, etc. Nulls sort last.
    pub position: Option<i64>,
    /// Per-sport statistics object.
    #[schema(value_type = Object)]
    pub stats: Json<Value>,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Public projection of a `users` row. The password hash is never
/// selected.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Auto-increment row ID.
    pub id: i64,
    /// Login e-mail.
    pub email: String,
    /// Unique handle.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Profile blurb.
    pub bio: Option<String>,
    /// Avatar URL.
    pub avatar: Option<String>,
    /// Free-text location.
    pub location: Option<String>,
    /// Sign-up timestamp.
    pub created_at: DateTime<Utc>,
}

// ── Write payloads ──────────────────────────────────────────────────────

/// Validated fields for a new event. Strings are already trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct NewEvent {
    pub title: String,
    pub sport: String,
    pub date: String,
    pub league: Option<String>,
    pub location: Option<String>,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub score: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

/// Validated fields for a new review.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct NewReview {
    pub user_id: i64,
    pub event_id: i64,
    pub rating: i64,
    pub content: String,
    pub spoiler: bool,
}

/// Validated fields for a new list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct NewList {
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
}

/// Validated fields for appending an event to a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewListEntry {
    /// Event to append.
    pub event_id: i64,
    /// Explicit position; `None` appends after the current last entry.
    pub order: Option<i64>,
}

/// Validated fields for a new scorecard.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct NewScorecard {
    pub event_id: i64,
    pub sport: String,
    pub final_score: String,
    pub additional_data: Option<Value>,
}

/// Partial scorecard update. `None` leaves a column untouched;
/// `additional_data: Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(missing_docs)]
pub struct ScorecardChanges {
    pub sport: Option<String>,
    pub final_score: Option<String>,
    pub additional_data: Option<Option<Value>>,
}

impl ScorecardChanges {
    /// Returns `true` when no column would be written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sport.is_none() && self.final_score.is_none() && self.additional_data.is_none()
    }
}

/// Validated fields for a new player stat line.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct NewPlayerStat {
    pub scorecard_id: i64,
    pub player_name: String,
    pub team_name: Option<String>,
    pub position: Option<i64>,
    pub stats: Value,
}

/// Partial player stat update. Nullable columns use a nested `Option`
/// so that an explicit `null` can clear them.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(missing_docs)]
pub struct PlayerStatChanges {
    pub player_name: Option<String>,
    pub team_name: Option<Option<String>>,
    pub position: Option<Option<i64>>,
    pub stats: Option<Value>,
}

impl PlayerStatChanges {
    /// Returns `true` when no column would be written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.player_name.is_none()
            && self.team_name.is_none()
            && self.position.is_none()
            && self.stats.is_none()
    }
}
