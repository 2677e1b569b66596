//! List DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::persistence::models::{List, ListedEvent};

/// Query string of `GET /api/lists`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Only lists curated by this user.
    pub user_id: Option<String>,
    /// `true` for public lists; any other value selects private ones.
    pub is_public: Option<String>,
    /// Case-insensitive match on name and description.
    pub search: Option<String>,
    /// `createdAt` (default) or `name`.
    pub sort: Option<String>,
    /// `asc` or `desc` (default).
    pub order: Option<String>,
    /// Page size, 20 by default and at most 100.
    pub limit: Option<String>,
    /// Rows to skip.
    pub offset: Option<String>,
}

/// Request body of `POST /api/lists`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateListRequest {
    /// Curator.
    pub user_id: i64,
    /// List title.
    pub name: String,
    /// Optional blurb.
    pub description: Option<String>,
    /// Defaults to `true`.
    pub is_public: Option<bool>,
}

/// Request body of `POST /api/lists/{id}/events`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddListEventRequest {
    /// Event to append.
    pub event_id: i64,
    /// Explicit position; defaults to after the last entry.
    pub order: Option<i64>,
}

/// Response of `GET /api/lists/{id}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListDetailResponse {
    /// The list itself.
    #[serde(flatten)]
    pub list: List,
    /// Listed events in display order.
    pub events: Vec<ListedEvent>,
}
