//! Event DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::persistence::ReviewTally;
use crate::persistence::models::Event;

/// Query string of `GET /api/events`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EventQuery {
    /// Fetch a single event instead of a list.
    pub id: Option<String>,
    /// Case-insensitive match on title, sport, league and team names.
    pub search: Option<String>,
    /// Exact sport name.
    pub sport: Option<String>,
    /// `date` (default), `createdAt` or `title`.
    pub sort: Option<String>,
    /// `asc` or `desc` (default).
    pub order: Option<String>,
    /// Page size, 20 by default and at most 100.
    pub limit: Option<String>,
    /// Rows to skip.
    pub offset: Option<String>,
}

/// Request body of `POST /api/events`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct CreateEventRequest {
    pub title: String,
    pub sport: String,
    /// `YYYY-MM-DD` or an ISO 8601 date-time.
    pub date: String,
    pub league: Option<String>,
    pub location: Option<String>,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub score: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

/// Review aggregate embedded in [`EventDetailResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    /// Number of reviews.
    pub count: i64,
    /// Mean rating, `null` without reviews.
    pub average_rating: Option<f64>,
}

impl From<ReviewTally> for ReviewStats {
    fn from(tally: ReviewTally) -> Self {
        Self {
            count: tally.count,
            average_rating: tally.average_rating,
        }
    }
}

/// Response of `GET /api/events/{id}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailResponse {
    /// The event itself.
    #[serde(flatten)]
    pub event: Event,
    /// Aggregate over the event's reviews.
    pub review_stats: ReviewStats,
}
