//! Event handlers: list, get, create.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Map, Value};

use crate::api::dto::{CreateEventRequest, EventDetailResponse, EventQuery};
use crate::api::validate::{
    JsonObject, is_valid_date, non_empty, optional_text, parse_id, present, text_value,
};
use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse, Resource};
use crate::persistence::filters::{EventFilter, EventSort, Page, SortOrder};
use crate::persistence::models::{Event, NewEvent};

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

/// `GET /api/events`: List events, or fetch one with `?id=`.
///
/// # Errors
///
/// Returns `INVALID_ID`, `EVENT_NOT_FOUND` or a database error.
#[utoipa::path(
    get,
    path = "/api/events",
    tag = "Events",
    summary = "List events",
    description = "Searches, filters, sorts and paginates events. With `id` set, returns that single event instead.",
    params(EventQuery),
    responses(
        (status = 200, description = "Matching events, or one event when `id` is given", body = Vec<Event>),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventQuery>,
) -> Result<Response, ApiError> {
    if let Some(raw_id) = non_empty(query.id) {
        let id = parse_id(Some(&raw_id))?;
        let event = state
            .store
            .get_event(id)
            .await?
            .ok_or(ApiError::NotFound(Resource::Event))?;
        return Ok(Json(event).into_response());
    }

    let filter = EventFilter {
        search: non_empty(query.search),
        sport: non_empty(query.sport),
        sort: EventSort::from_param(query.sort.as_deref()),
        order: SortOrder::from_param(query.order.as_deref()),
        page: Page::from_params(
            query.limit.as_deref(),
            query.offset.as_deref(),
            DEFAULT_LIMIT,
            MAX_LIMIT,
        ),
    };
    let events = state.store.list_events(&filter).await?;
    Ok(Json(events).into_response())
}

/// `GET /api/events/{id}`: Event with its review aggregate.
///
/// # Errors
///
/// Returns `INVALID_ID`, `EVENT_NOT_FOUND` or a database error.
#[utoipa::path(
    get,
    path = "/api/events/{id}",
    tag = "Events",
    summary = "Get event details",
    description = "Returns one event together with its review count and average rating.",
    params(
        ("id" = i64, Path, description = "Event id"),
    ),
    responses(
        (status = 200, description = "Event details", body = EventDetailResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<EventDetailResponse>, ApiError> {
    let id = parse_id(Some(&raw_id))?;
    let event = state
        .store
        .get_event(id)
        .await?
        .ok_or(ApiError::NotFound(Resource::Event))?;
    let tally = state.store.review_tally(id).await?;

    Ok(Json(EventDetailResponse {
        event,
        review_stats: tally.into(),
    }))
}

/// `POST /api/events`: Create an event.
///
/// # Errors
///
/// Returns a field-specific validation error or a database error.
#[utoipa::path(
    post,
    path = "/api/events",
    tag = "Events",
    summary = "Create an event",
    description = "Validates and stores a new event. Text fields are trimmed; blank optional fields are stored as null.",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Validation failed", body = ErrorResponse),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, ApiError> {
    let new_event = parse_new_event(&body)?;
    let event = state.store.create_event(&new_event).await?;
    tracing::info!(event_id = event.id, title = %event.title, "event created");
    Ok((StatusCode::CREATED, Json(event)))
}

/// Event routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/events/{id}", get(get_event))
}

/// Validates an event body.
///
/// # Errors
///
/// Returns the first failing field's error.
pub fn parse_new_event(body: &Map<String, Value>) -> Result<NewEvent, ApiError> {
    let title = present(body, "title").and_then(text_value).ok_or_else(|| {
        ApiError::bad_request(
            "INVALID_TITLE",
            "Title is required and must be a non-empty string",
        )
    })?;
    let sport = present(body, "sport").and_then(text_value).ok_or_else(|| {
        ApiError::bad_request(
            "INVALID_SPORT",
            "Sport is required and must be a non-empty string",
        )
    })?;
    let date = present(body, "date").and_then(text_value).ok_or_else(|| {
        ApiError::bad_request("INVALID_DATE", "Date is required and must be a valid string")
    })?;
    if !is_valid_date(&date) {
        return Err(ApiError::bad_request(
            "INVALID_DATE_FORMAT",
            "Date must be a valid date string",
        ));
    }

    Ok(NewEvent {
        title,
        sport,
        date,
        league: optional_text(body, "league", "INVALID_LEAGUE")?,
        location: optional_text(body, "location", "INVALID_LOCATION")?,
        home_team: optional_text(body, "homeTeam", "INVALID_HOME_TEAM")?,
        away_team: optional_text(body, "awayTeam", "INVALID_AWAY_TEAM")?,
        score: optional_text(body, "score", "INVALID_SCORE")?,
        image_url: optional_text(body, "imageUrl", "INVALID_IMAGE_URL")?,
        description: optional_text(body, "description", "INVALID_DESCRIPTION")?,
    })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn code_of(body: Value) -> Option<&'static str> {
        parse_new_event(&object(body)).err().and_then(|e| e.error_code())
    }

    #[test]
    fn required_fields_are_checked_in_order() {
        assert_eq!(code_of(json!({})), Some("INVALID_TITLE"));
        assert_eq!(code_of(json!({ "title": "  " })), Some("INVALID_TITLE"));
        assert_eq!(code_of(json!({ "title": "Derby" })), Some("INVALID_SPORT"));
        assert_eq!(
            code_of(json!({ "title": "Derby", "sport": "Soccer" })),
            Some("INVALID_DATE")
        );
        assert_eq!(
            code_of(json!({ "title": "Derby", "sport": "Soccer", "date": "someday" })),
            Some("INVALID_DATE_FORMAT")
        );
    }

    #[test]
    fn optional_fields_are_trimmed_and_blank_means_null() {
        let Ok(event) = parse_new_event(&object(json!({
            "title": "  El Clasico ",
            "sport": "Soccer",
            "date": "2024-10-26T20:00:00Z",
            "homeTeam": " Real Madrid ",
            "awayTeam": "",
            "league": null,
        }))) else {
            panic!("valid body rejected");
        };
        assert_eq!(event.title, "El Clasico");
        assert_eq!(event.home_team.as_deref(), Some("Real Madrid"));
        assert_eq!(event.away_team, None);
        assert_eq!(event.league, None);
    }

    #[test]
    fn non_string_optional_field_is_rejected() {
        assert_eq!(
            code_of(json!({ "title": "T", "sport": "F1", "date": "2024-05-26", "score": 1 })),
            Some("INVALID_SCORE")
        );
    }
}
