//! Scorecard handlers: list, get, create, update, delete.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Map, Value};

use crate::api::dto::{
    CreateScorecardRequest, IdParams, ScorecardDeletedResponse, ScorecardDetailResponse,
    ScorecardQuery, UpdateScorecardRequest,
};
use crate::api::handlers::player_stats::stat_line;
use crate::api::validate::{JsonObject, int_filter, int_value, non_empty, parse_id, present, text_value};
use crate::app_state::AppState;
use crate::domain::{MatchDetails, Sport};
use crate::error::{ApiError, ErrorResponse, Resource};
use crate::persistence::filters::{Page, ScorecardFilter};
use crate::persistence::models::{NewScorecard, Scorecard, ScorecardChanges};

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

/// `GET /api/scorecards`: List scorecards, or fetch one with `?id=`.
///
/// # Errors
///
/// Returns `INVALID_ID`, `INVALID_EVENT_ID`, `SCORECARD_NOT_FOUND` or a
/// database error.
#[utoipa::path(
    get,
    path = "/api/scorecards",
    tag = "Scorecards",
    summary = "List scorecards",
    description = "Lists scorecards newest first, optionally filtered by event and sport. With `id` set, returns that single scorecard.",
    params(ScorecardQuery),
    responses(
        (status = 200, description = "Matching scorecards, or one scorecard when `id` is given", body = Vec<Scorecard>),
        (status = 400, description = "Malformed id or filter", body = ErrorResponse),
        (status = 404, description = "Scorecard not found", body = ErrorResponse),
    )
)]
pub async fn list_scorecards(
    State(state): State<AppState>,
    Query(query): Query<ScorecardQuery>,
) -> Result<Response, ApiError> {
    if let Some(raw_id) = non_empty(query.id) {
        let id = parse_id(Some(&raw_id))?;
        let scorecard = state
            .store
            .get_scorecard(id)
            .await?
            .ok_or(ApiError::NotFound(Resource::Scorecard))?;
        return Ok(Json(scorecard).into_response());
    }

    let filter = ScorecardFilter {
        event_id: int_filter(
            query.event_id.as_deref(),
            "INVALID_EVENT_ID",
            "Valid eventId is required",
        )?,
        sport: non_empty(query.sport),
        page: Page::from_params(
            query.limit.as_deref(),
            query.offset.as_deref(),
            DEFAULT_LIMIT,
            MAX_LIMIT,
        ),
    };
    let scorecards = state.store.list_scorecards(&filter).await?;
    Ok(Json(scorecards).into_response())
}

/// `GET /api/scorecards/{id}`: Scorecard with its player stats.
///
/// # Errors
///
/// Returns `INVALID_ID`, `SCORECARD_NOT_FOUND` or a database error.
#[utoipa::path(
    get,
    path = "/api/scorecards/{id}",
    tag = "Scorecards",
    summary = "Get scorecard details",
    description = "Returns one scorecard with its player stat lines ordered by position, unpositioned players last.",
    params(
        ("id" = i64, Path, description = "Scorecard id"),
    ),
    responses(
        (status = 200, description = "Scorecard details", body = ScorecardDetailResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Scorecard not found", body = ErrorResponse),
    )
)]
pub async fn get_scorecard(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ScorecardDetailResponse>, ApiError> {
    let id = parse_id(Some(&raw_id))?;
    let scorecard = state
        .store
        .get_scorecard(id)
        .await?
        .ok_or(ApiError::NotFound(Resource::Scorecard))?;
    let player_stats = state.store.stats_for_scorecard(id).await?;
    Ok(Json(ScorecardDetailResponse {
        scorecard,
        player_stats,
    }))
}

/// `POST /api/scorecards`: Create a scorecard.
///
/// # Errors
///
/// Returns a field-specific validation error, `EVENT_NOT_FOUND`, or a
/// database error.
#[utoipa::path(
    post,
    path = "/api/scorecards",
    tag = "Scorecards",
    summary = "Create a scorecard",
    description = "Stores the result of an event. `additionalData` is checked against the sport's match-details schema.",
    request_body = CreateScorecardRequest,
    responses(
        (status = 201, description = "Scorecard created", body = Scorecard),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn create_scorecard(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, ApiError> {
    let card = parse_new_scorecard(&body)?;
    if !state.store.event_exists(card.event_id).await? {
        return Err(ApiError::NotFound(Resource::Event));
    }
    let created = state.store.create_scorecard(&card).await?;
    tracing::info!(
        scorecard_id = created.id,
        event_id = created.event_id,
        sport = %created.sport,
        "scorecard created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /api/scorecards?id=`: Update a scorecard.
///
/// # Errors
///
/// Returns `INVALID_ID`, a field-specific validation error,
/// `SCORECARD_NOT_FOUND`, `NO_UPDATES_PROVIDED`, `INVALID_STATS` when a
/// stored stat line does not fit a new sport, or a database error.
#[utoipa::path(
    put,
    path = "/api/scorecards",
    tag = "Scorecards",
    summary = "Update a scorecard",
    description = "Updates only the provided fields. `additionalData: null` clears the match details. Changing `sport` re-checks the stored match details and every player stat line against the new sport.",
    params(IdParams),
    request_body = UpdateScorecardRequest,
    responses(
        (status = 200, description = "Updated scorecard", body = Scorecard),
        (status = 400, description = "Validation failed or nothing to update", body = ErrorResponse),
        (status = 404, description = "Scorecard not found", body = ErrorResponse),
    )
)]
pub async fn update_scorecard(
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
    body: Result<JsonObject, ApiError>,
) -> Result<Json<Scorecard>, ApiError> {
    let id = parse_id(params.id.as_deref())?;
    let JsonObject(body) = body?;
    let mut changes = parse_scorecard_changes(&body)?;
    if changes.is_empty() {
        if !state.store.scorecard_exists(id).await? {
            return Err(ApiError::NotFound(Resource::Scorecard));
        }
        return Err(ApiError::bad_request(
            "NO_UPDATES_PROVIDED",
            "No valid fields provided for update",
        ));
    }

    let sport_changed = changes.sport.is_some();
    let data_sent = matches!(changes.additional_data, Some(Some(_)));
    if sport_changed || data_sent {
        let current = state
            .store
            .get_scorecard(id)
            .await?
            .ok_or(ApiError::NotFound(Resource::Scorecard))?;
        let sport = changes.sport.clone().unwrap_or(current.sport);

        // Details sent with the request win over the stored ones; an
        // explicit null clears them and needs no check.
        let details = match changes.additional_data.take() {
            Some(Some(data)) => Some(data),
            Some(None) => {
                changes.additional_data = Some(None);
                None
            }
            None => current.additional_data.map(|stored| stored.0),
        };
        if let Some(data) = details {
            changes.additional_data = Some(Some(match_details(&sport, &data)?));
        }

        if sport_changed {
            for stat in state.store.stats_for_scorecard(id).await? {
                stat_line(&sport, &stat.stats.0).map_err(|err| {
                    ApiError::bad_request(
                        "INVALID_STATS",
                        format!("player stat {} does not fit {sport}: {err}", stat.id),
                    )
                })?;
            }
        }
    }

    let updated = state
        .store
        .update_scorecard(id, &changes)
        .await?
        .ok_or(ApiError::NotFound(Resource::Scorecard))?;
    tracing::info!(scorecard_id = id, "scorecard updated");
    Ok(Json(updated))
}

/// `DELETE /api/scorecards?id=`: Delete a scorecard and its player stats.
///
/// # Errors
///
/// Returns `INVALID_ID`, `SCORECARD_NOT_FOUND` or a database error.
#[utoipa::path(
    delete,
    path = "/api/scorecards",
    tag = "Scorecards",
    summary = "Delete a scorecard",
    description = "Deletes the scorecard; its player stat lines are removed with it.",
    params(IdParams),
    responses(
        (status = 200, description = "Scorecard deleted", body = ScorecardDeletedResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Scorecard not found", body = ErrorResponse),
    )
)]
pub async fn delete_scorecard(
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
) -> Result<Json<ScorecardDeletedResponse>, ApiError> {
    let id = parse_id(params.id.as_deref())?;
    let scorecard = state
        .store
        .delete_scorecard(id)
        .await?
        .ok_or(ApiError::NotFound(Resource::Scorecard))?;
    tracing::info!(scorecard_id = id, "scorecard deleted");
    Ok(Json(ScorecardDeletedResponse {
        message: "Scorecard deleted successfully".to_string(),
        scorecard,
    }))
}

/// Scorecard routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/scorecards",
            get(list_scorecards)
                .post(create_scorecard)
                .put(update_scorecard)
                .delete(delete_scorecard),
        )
        .route("/scorecards/{id}", get(get_scorecard))
}

/// Validates `data` against the match-details schema of `sport` and
/// returns the normalised object to store.
///
/// # Errors
///
/// Returns `INVALID_ADDITIONAL_DATA` describing the mismatch.
pub fn match_details(sport: &str, data: &Value) -> Result<Value, ApiError> {
    MatchDetails::parse(Sport::recognize(sport), data)
        .map(|details| details.to_value())
        .map_err(|err| ApiError::bad_request("INVALID_ADDITIONAL_DATA", format!("additionalData {err}")))
}

/// Validates a scorecard create body, including its match details.
///
/// # Errors
///
/// Returns the first failing field's error.
pub fn parse_new_scorecard(body: &Map<String, Value>) -> Result<NewScorecard, ApiError> {
    let event_id = present(body, "eventId")
        .ok_or_else(|| ApiError::bad_request("MISSING_REQUIRED_FIELDS", "eventId is required"))?;
    let event_id = int_value(event_id).ok_or_else(|| {
        ApiError::bad_request("INVALID_EVENT_ID", "eventId must be a valid integer")
    })?;
    let sport = present(body, "sport").and_then(text_value).ok_or_else(|| {
        ApiError::bad_request(
            "MISSING_REQUIRED_FIELDS",
            "sport is required and must be a non-empty string",
        )
    })?;
    let final_score = present(body, "finalScore").and_then(text_value).ok_or_else(|| {
        ApiError::bad_request(
            "MISSING_REQUIRED_FIELDS",
            "finalScore is required and must be a non-empty string",
        )
    })?;
    let additional_data = present(body, "additionalData")
        .map(|data| match_details(&sport, data))
        .transpose()?;

    Ok(NewScorecard {
        event_id,
        sport,
        final_score,
        additional_data,
    })
}

/// Validates a scorecard update body. `additionalData` is only checked to
/// be an object here; the sport schema is applied once the sport is known.
///
/// # Errors
///
/// Returns the first failing field's error.
pub fn parse_scorecard_changes(body: &Map<String, Value>) -> Result<ScorecardChanges, ApiError> {
    let mut changes = ScorecardChanges::default();
    if let Some(value) = body.get("sport") {
        changes.sport = Some(text_value(value).ok_or_else(|| {
            ApiError::bad_request("INVALID_SPORT", "sport must be a non-empty string")
        })?);
    }
    if let Some(value) = body.get("finalScore") {
        changes.final_score = Some(text_value(value).ok_or_else(|| {
            ApiError::bad_request("INVALID_FINAL_SCORE", "finalScore must be a non-empty string")
        })?);
    }
    if let Some(value) = body.get("additionalData") {
        changes.additional_data = Some(match value {
            Value::Null => None,
            Value::Object(_) => Some(value.clone()),
            _ => {
                return Err(ApiError::bad_request(
                    "INVALID_ADDITIONAL_DATA",
                    "additionalData must be a valid JSON object or null",
                ));
            }
        });
    }
    Ok(changes)
}
