//! Player stat handlers: list, get, single and bulk create, update, delete.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Map, Value};

use crate::api::dto::{
    BulkPlayerStatsRequest, IdParams, PlayerStatDeletedResponse, PlayerStatQuery,
    UpdatePlayerStatRequest,
};
use crate::api::validate::{JsonObject, int_filter, int_value, non_empty, parse_id, present, text_value};
use crate::app_state::AppState;
use crate::domain::{PlayerStatLine, Sport};
use crate::error::{ApiError, ErrorResponse, Resource};
use crate::persistence::Store;
use crate::persistence::filters::{Page, PlayerStatFilter};
use crate::persistence::models::{NewPlayerStat, PlayerStat, PlayerStatChanges};

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

/// `GET /api/player-stats`: List stat lines, or fetch one with `?id=`.
///
/// # Errors
///
/// Returns `INVALID_ID`, `INVALID_SCORECARD_ID`, `PLAYER_STAT_NOT_FOUND`
/// or a database error.
#[utoipa::path(
    get,
    path = "/api/player-stats",
    tag = "Player stats",
    summary = "List player stats",
    description = "Lists stat lines ordered by position (unpositioned last), then newest first. With `id` set, returns that single line.",
    params(PlayerStatQuery),
    responses(
        (status = 200, description = "Matching stat lines, or one line when `id` is given", body = Vec<PlayerStat>),
        (status = 400, description = "Malformed id or filter", body = ErrorResponse),
        (status = 404, description = "Player stat not found", body = ErrorResponse),
    )
)]
pub async fn list_player_stats(
    State(state): State<AppState>,
    Query(query): Query<PlayerStatQuery>,
) -> Result<Response, ApiError> {
    if let Some(raw_id) = non_empty(query.id) {
        let id = parse_id(Some(&raw_id))?;
        let stat = state
            .store
            .get_player_stat(id)
            .await?
            .ok_or(ApiError::NotFound(Resource::PlayerStat))?;
        return Ok(Json(stat).into_response());
    }

    let filter = PlayerStatFilter {
        scorecard_id: int_filter(
            query.scorecard_id.as_deref(),
            "INVALID_SCORECARD_ID",
            "Valid scorecardId is required",
        )?,
        team_name: non_empty(query.team_name),
        search: non_empty(query.search),
        page: Page::from_params(
            query.limit.as_deref(),
            query.offset.as_deref(),
            DEFAULT_LIMIT,
            MAX_LIMIT,
        ),
    };
    let stats = state.store.list_player_stats(&filter).await?;
    Ok(Json(stats).into_response())
}

/// `POST /api/player-stats`: Create one stat line, or many with
/// `{"playerStats": [...]}`.
///
/// A bulk request is validated in full before anything is written and is
/// then stored in one transaction.
///
/// # Errors
///
/// Returns `EMPTY_ARRAY`, a field-specific validation error (carrying the
/// failing `index` for bulk requests), `SCORECARD_NOT_FOUND`, or a
/// database error.
#[utoipa::path(
    post,
    path = "/api/player-stats",
    tag = "Player stats",
    summary = "Create player stats",
    description = "Creates a single stat line, or a batch when the body holds a `playerStats` array. `stats` is checked against the scorecard's sport.",
    request_body = BulkPlayerStatsRequest,
    responses(
        (status = 201, description = "Created line, or all created lines for a batch", body = Vec<PlayerStat>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Scorecard not found", body = ErrorResponse),
    )
)]
pub async fn create_player_stats(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<Response, ApiError> {
    let mut sports = HashMap::new();

    if let Some(Value::Array(items)) = body.get("playerStats") {
        if items.is_empty() {
            return Err(ApiError::bad_request(
                "EMPTY_ARRAY",
                "Player stats array cannot be empty",
            ));
        }
        let empty = Map::new();
        let mut batch = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let line = validated_line(&state.store, item.as_object().unwrap_or(&empty), &mut sports)
                .await
                .map_err(|err| err.at_index(index))?;
            batch.push(line);
        }
        let created = state.store.create_player_stats(&batch).await?;
        tracing::info!(count = created.len(), "player stats created");
        return Ok((StatusCode::CREATED, Json(created)).into_response());
    }

    let line = validated_line(&state.store, &body, &mut sports).await?;
    let created = state.store.create_player_stat(&line).await?;
    tracing::info!(
        player_stat_id = created.id,
        scorecard_id = created.scorecard_id,
        "player stat created"
    );
    Ok((StatusCode::CREATED, Json(created)).into_response())
}

/// `PUT /api/player-stats?id=`: Update a stat line.
///
/// # Errors
///
/// Returns `INVALID_ID`, a field-specific validation error,
/// `PLAYER_STAT_NOT_FOUND`, `NO_UPDATES`, or a database error.
#[utoipa::path(
    put,
    path = "/api/player-stats",
    tag = "Player stats",
    summary = "Update a player stat",
    description = "Updates only the provided fields. `null` clears `teamName` or `position`.",
    params(IdParams),
    request_body = UpdatePlayerStatRequest,
    responses(
        (status = 200, description = "Updated stat line", body = PlayerStat),
        (status = 400, description = "Validation failed or nothing to update", body = ErrorResponse),
        (status = 404, description = "Player stat not found", body = ErrorResponse),
    )
)]
pub async fn update_player_stat(
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
    body: Result<JsonObject, ApiError>,
) -> Result<Json<PlayerStat>, ApiError> {
    let id = parse_id(params.id.as_deref())?;
    let JsonObject(body) = body?;
    let mut changes = parse_player_stat_changes(&body)?;
    if changes.is_empty() {
        if !state.store.player_stat_exists(id).await? {
            return Err(ApiError::NotFound(Resource::PlayerStat));
        }
        return Err(ApiError::bad_request("NO_UPDATES", "No valid fields to update"));
    }

    if let Some(stats) = changes.stats.take() {
        let sport = state
            .store
            .player_stat_sport(id)
            .await?
            .ok_or(ApiError::NotFound(Resource::PlayerStat))?;
        changes.stats = Some(stat_line(&sport, &stats)?);
    }

    let updated = state
        .store
        .update_player_stat(id, &changes)
        .await?
        .ok_or(ApiError::NotFound(Resource::PlayerStat))?;
    tracing::info!(player_stat_id = id, "player stat updated");
    Ok(Json(updated))
}

/// `DELETE /api/player-stats?id=`: Delete a stat line.
///
/// # Errors
///
/// Returns `INVALID_ID`, `PLAYER_STAT_NOT_FOUND` or a database error.
#[utoipa::path(
    delete,
    path = "/api/player-stats",
    tag = "Player stats",
    summary = "Delete a player stat",
    params(IdParams),
    responses(
        (status = 200, description = "Player stat deleted", body = PlayerStatDeletedResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Player stat not found", body = ErrorResponse),
    )
)]
pub async fn delete_player_stat(
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
) -> Result<Json<PlayerStatDeletedResponse>, ApiError> {
    let id = parse_id(params.id.as_deref())?;
    let player_stat = state
        .store
        .delete_player_stat(id)
        .await?
        .ok_or(ApiError::NotFound(Resource::PlayerStat))?;
    tracing::info!(player_stat_id = id, "player stat deleted");
    Ok(Json(PlayerStatDeletedResponse {
        message: "Player stat deleted successfully".to_string(),
        player_stat,
    }))
}

/// Player stat routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/player-stats",
        get(list_player_stats)
            .post(create_player_stats)
            .put(update_player_stat)
            .delete(delete_player_stat),
    )
}

/// Validates one stat line body, resolves its scorecard's sport (cached in
/// `sports` across a batch) and checks `stats` against that sport.
async fn validated_line(
    store: &Store,
    body: &Map<String, Value>,
    sports: &mut HashMap<i64, String>,
) -> Result<NewPlayerStat, ApiError> {
    let mut line = parse_new_player_stat(body)?;
    let sport = match sports.get(&line.scorecard_id) {
        Some(sport) => sport.clone(),
        None => {
            let sport = store
                .scorecard_sport(line.scorecard_id)
                .await?
                .ok_or(ApiError::NotFound(Resource::Scorecard))?;
            sports.insert(line.scorecard_id, sport.clone());
            sport
        }
    };
    line.stats = stat_line(&sport, &line.stats)?;
    Ok(line)
}

/// Validates `stats` against the schema of `sport` and returns the
/// normalised object to store.
///
/// # Errors
///
/// Returns `INVALID_STATS` describing the mismatch.
pub fn stat_line(sport: &str, stats: &Value) -> Result<Value, ApiError> {
    PlayerStatLine::parse(Sport::recognize(sport), stats)
        .map(|line| line.to_value())
        .map_err(|err| ApiError::bad_request("INVALID_STATS", format!("stats {err}")))
}

/// Validates the shape of a stat line create body. `stats` is only checked
/// to be an object here.
///
/// # Errors
///
/// Returns the first failing field's error.
pub fn parse_new_player_stat(body: &Map<String, Value>) -> Result<NewPlayerStat, ApiError> {
    let scorecard_id = present(body, "scorecardId")
        .and_then(int_value)
        .ok_or_else(|| {
            ApiError::bad_request("INVALID_SCORECARD_ID", "Valid scorecardId is required")
        })?;
    let player_name = present(body, "playerName")
        .and_then(text_value)
        .ok_or_else(|| ApiError::bad_request("INVALID_PLAYER_NAME", "Valid playerName is required"))?;
    let stats = present(body, "stats")
        .filter(|v| v.is_object())
        .cloned()
        .ok_or_else(invalid_stats)?;
    let team_name = body.get("teamName").map(team_name).transpose()?.flatten();
    let position = body.get("position").map(position).transpose()?.flatten();

    Ok(NewPlayerStat {
        scorecard_id,
        player_name,
        team_name,
        position,
        stats,
    })
}

/// Validates a stat line update body.
///
/// # Errors
///
/// Returns the first failing field's error.
pub fn parse_player_stat_changes(
    body: &Map<String, Value>,
) -> Result<PlayerStatChanges, ApiError> {
    let mut changes = PlayerStatChanges::default();
    if let Some(value) = body.get("playerName") {
        changes.player_name = Some(text_value(value).ok_or_else(|| {
            ApiError::bad_request("INVALID_PLAYER_NAME", "Valid playerName is required")
        })?);
    }
    if let Some(value) = body.get("teamName") {
        changes.team_name = Some(team_name(value)?);
    }
    if let Some(value) = body.get("position") {
        changes.position = Some(position(value)?);
    }
    if let Some(value) = body.get("stats") {
        if !value.is_object() {
            return Err(invalid_stats());
        }
        changes.stats = Some(value.clone());
    }
    Ok(changes)
}

fn team_name(value: &Value) -> Result<Option<String>, ApiError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.trim().to_string()).filter(|s| !s.is_empty())),
        _ => Err(ApiError::bad_request(
            "INVALID_TEAM_NAME",
            "Valid teamName is required",
        )),
    }
}

fn position(value: &Value) -> Result<Option<i64>, ApiError> {
    if value.is_null() {
        return Ok(None);
    }
    int_value(value)
        .filter(|p| *p >= 0)
        .map(Some)
        .ok_or_else(|| ApiError::bad_request("INVALID_POSITION", "Valid position is required"))
}

fn invalid_stats() -> ApiError {
    ApiError::bad_request("INVALID_STATS", "Valid stats object is required")
}
