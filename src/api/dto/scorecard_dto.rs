//! Scorecard DTOs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

use crate::persistence::models::{PlayerStat, Scorecard};

/// Query string of `GET /api/scorecards`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ScorecardQuery {
    /// Fetch a single scorecard instead of a list.
    pub id: Option<String>,
    /// Only scorecards of this event.
    pub event_id: Option<String>,
    /// Exact sport name.
    pub sport: Option<String>,
    /// Page size, 20 by default and at most 100.
    pub limit: Option<String>,
    /// Rows to skip.
    pub offset: Option<String>,
}

/// Request body of `POST /api/scorecards`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateScorecardRequest {
    /// Summarised event.
    pub event_id: i64,
    /// Sport name; selects the `additionalData` schema.
    pub sport: String,
    /// Final result as free text.
    pub final_score: String,
    /// Per-sport match details.
    pub additional_data: Option<Map<String, Value>>,
}

/// Request body of `PUT /api/scorecards?id=`. At least one field is
/// required; `additionalData: null` clears the details.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct UpdateScorecardRequest {
    pub sport: Option<String>,
    pub final_score: Option<String>,
    pub additional_data: Option<Map<String, Value>>,
}

/// Response of `GET /api/scorecards/{id}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScorecardDetailResponse {
    /// The scorecard itself.
    #[serde(flatten)]
    pub scorecard: Scorecard,
    /// Player lines ordered by position, unpositioned last.
    pub player_stats: Vec<PlayerStat>,
}

/// Response of `DELETE /api/scorecards?id=`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScorecardDeletedResponse {
    /// Confirmation text.
    pub message: String,
    /// The deleted row.
    pub scorecard: Scorecard,
}
