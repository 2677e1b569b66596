//! Player stat DTOs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

use crate::persistence::models::PlayerStat;

/// Query string of `GET /api/player-stats`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PlayerStatQuery {
    /// Fetch a single stat line instead of a list.
    pub id: Option<String>,
    /// Only lines of this scorecard.
    pub scorecard_id: Option<String>,
    /// Exact team name.
    pub team_name: Option<String>,
    /// Case-insensitive match on the player name.
    pub search: Option<String>,
    /// Page size, 50 by default and at most 200.
    pub limit: Option<String>,
    /// Rows to skip.
    pub offset: Option<String>,
}

/// One stat line in a create request.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlayerStatRequest {
    /// Owning scorecard.
    pub scorecard_id: i64,
    /// Player or driver name.
    pub player_name: String,
    /// Team; omit for individual sports.
    pub team_name: Option<String>,
    /// Non-negative position.
    pub position: Option<i64>,
    /// Statistics shaped by the scorecard's sport.
    pub stats: Map<String, Value>,
}

/// Bulk create body: every line is validated before any is stored.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkPlayerStatsRequest {
    /// Lines to insert.
    pub player_stats: Vec<CreatePlayerStatRequest>,
}

/// Request body of `PUT /api/player-stats?id=`. At least one field is
/// required; `null` clears `teamName` or `position`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct UpdatePlayerStatRequest {
    pub player_name: Option<String>,
    pub team_name: Option<String>,
    pub position: Option<i64>,
    pub stats: Option<Map<String, Value>>,
}

/// Response of `DELETE /api/player-stats?id=`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatDeletedResponse {
    /// Confirmation text.
    pub message: String,
    /// The deleted row.
    pub player_stat: PlayerStat,
}
