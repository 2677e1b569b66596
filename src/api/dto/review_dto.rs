//! Review DTOs.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Query string of `GET /api/reviews`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReviewQuery {
    /// Only reviews by this user.
    pub user_id: Option<String>,
    /// Only reviews of this event.
    pub event_id: Option<String>,
    /// `createdAt` (default) or `rating`.
    pub sort: Option<String>,
    /// `asc` or `desc` (default).
    pub order: Option<String>,
    /// Page size, 20 by default and at most 100.
    pub limit: Option<String>,
    /// Rows to skip.
    pub offset: Option<String>,
}

/// Request body of `POST /api/reviews`. Ids may also be sent as numeric
/// strings.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    /// Author.
    pub user_id: i64,
    /// Reviewed event.
    pub event_id: i64,
    /// 1 to 5.
    pub rating: i64,
    /// Review text, must not be blank.
    pub content: String,
    /// Defaults to `false`.
    pub spoiler: Option<bool>,
}
