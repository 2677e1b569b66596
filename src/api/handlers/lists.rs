//! List handlers: list, get with entries, create, append an event.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Map, Value};

use crate::api::dto::{AddListEventRequest, CreateListRequest, ListDetailResponse, ListQuery};
use crate::api::validate::{
    JsonObject, flag_value, int_filter, int_value, non_empty, optional_text, parse_id, present,
    text_value,
};
use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse, Resource};
use crate::persistence::filters::{ListFilter, ListSort, Page, SortOrder};
use crate::persistence::models::{List, ListEvent, NewList, NewListEntry};

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

/// `GET /api/lists`: List user lists.
///
/// # Errors
///
/// Returns `INVALID_USER_ID` for a malformed filter, or a database error.
#[utoipa::path(
    get,
    path = "/api/lists",
    tag = "Lists",
    summary = "List lists",
    description = "Filters lists by curator and visibility, with free-text search on name and description.",
    params(ListQuery),
    responses(
        (status = 200, description = "Matching lists", body = Vec<List>),
        (status = 400, description = "Malformed filter", body = ErrorResponse),
    )
)]
pub async fn list_lists(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<List>>, ApiError> {
    let filter = ListFilter {
        user_id: int_filter(
            query.user_id.as_deref(),
            "INVALID_USER_ID",
            "userId must be a valid integer",
        )?,
        is_public: non_empty(query.is_public).map(|raw| raw == "true"),
        search: non_empty(query.search),
        sort: ListSort::from_param(query.sort.as_deref()),
        order: SortOrder::from_param(query.order.as_deref()),
        page: Page::from_params(
            query.limit.as_deref(),
            query.offset.as_deref(),
            DEFAULT_LIMIT,
            MAX_LIMIT,
        ),
    };
    Ok(Json(state.store.list_lists(&filter).await?))
}

/// `GET /api/lists/{id}`: A list with its events in display order.
///
/// # Errors
///
/// Returns `INVALID_ID`, `LIST_NOT_FOUND` or a database error.
#[utoipa::path(
    get,
    path = "/api/lists/{id}",
    tag = "Lists",
    summary = "Get list details",
    description = "Returns one list and its events ordered by their position in the list.",
    params(
        ("id" = i64, Path, description = "List id"),
    ),
    responses(
        (status = 200, description = "List details", body = ListDetailResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "List not found", body = ErrorResponse),
    )
)]
pub async fn get_list(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ListDetailResponse>, ApiError> {
    let id = parse_id(Some(&raw_id))?;
    let list = state
        .store
        .get_list(id)
        .await?
        .ok_or(ApiError::NotFound(Resource::List))?;
    let events = state.store.list_entries(id).await?;
    Ok(Json(ListDetailResponse { list, events }))
}

/// `POST /api/lists`: Create a list.
///
/// # Errors
///
/// Returns a field-specific validation error, `USER_NOT_FOUND`, or a
/// database error.
#[utoipa::path(
    post,
    path = "/api/lists",
    tag = "Lists",
    summary = "Create a list",
    description = "Creates an empty list for an existing user. Lists are public unless `isPublic` is false.",
    request_body = CreateListRequest,
    responses(
        (status = 201, description = "List created", body = List),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn create_list(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, ApiError> {
    let new_list = parse_new_list(&body)?;
    if !state.store.user_exists(new_list.user_id).await? {
        return Err(ApiError::NotFound(Resource::User));
    }
    let list = state.store.create_list(&new_list).await?;
    tracing::info!(list_id = list.id, user_id = list.user_id, "list created");
    Ok((StatusCode::CREATED, Json(list)))
}

/// `POST /api/lists/{id}/events`: Append an event to a list.
///
/// # Errors
///
/// Returns `INVALID_ID`, a field-specific validation error,
/// `LIST_NOT_FOUND` / `EVENT_NOT_FOUND`, or a database error.
#[utoipa::path(
    post,
    path = "/api/lists/{id}/events",
    tag = "Lists",
    summary = "Add an event to a list",
    description = "Appends an event to the list. Without `order` it goes after the current last entry.",
    params(
        ("id" = i64, Path, description = "List id"),
    ),
    request_body = AddListEventRequest,
    responses(
        (status = 201, description = "Entry created", body = ListEvent),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "List or event not found", body = ErrorResponse),
    )
)]
pub async fn add_list_event(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, ApiError> {
    let list_id = parse_id(Some(&raw_id))?;
    let entry = parse_list_entry(&body)?;
    if !state.store.list_exists(list_id).await? {
        return Err(ApiError::NotFound(Resource::List));
    }
    if !state.store.event_exists(entry.event_id).await? {
        return Err(ApiError::NotFound(Resource::Event));
    }
    let created = state.store.add_list_entry(list_id, entry).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/lists", get(list_lists).post(create_list))
        .route("/lists/{id}", get(get_list))
        .route("/lists/{id}/events", post(add_list_event))
}

/// Validates a list body.
///
/// # Errors
///
/// Returns the first failing field's error.
pub fn parse_new_list(body: &Map<String, Value>) -> Result<NewList, ApiError> {
    let user_id = present(body, "userId")
        .ok_or_else(|| ApiError::bad_request("MISSING_USER_ID", "userId is required"))?;
    let name = present(body, "name").and_then(text_value).ok_or_else(|| {
        ApiError::bad_request(
            "INVALID_NAME",
            "name is required and must be a non-empty string",
        )
    })?;
    let user_id = int_value(user_id).ok_or_else(|| {
        ApiError::bad_request("INVALID_USER_ID", "userId must be a valid integer")
    })?;
    let is_public = match present(body, "isPublic") {
        None => true,
        Some(value) => flag_value(value).ok_or_else(|| {
            ApiError::bad_request("INVALID_IS_PUBLIC", "isPublic must be a boolean")
        })?,
    };

    Ok(NewList {
        user_id,
        name,
        description: optional_text(body, "description", "INVALID_DESCRIPTION")?,
        is_public,
    })
}

/// Validates a list-entry body.
///
/// # Errors
///
/// Returns the first failing field's error.
pub fn parse_list_entry(body: &Map<String, Value>) -> Result<NewListEntry, ApiError> {
    let event_id = present(body, "eventId")
        .ok_or_else(|| ApiError::bad_request("MISSING_EVENT_ID", "eventId is required"))?;
    let event_id = int_value(event_id).ok_or_else(|| {
        ApiError::bad_request("INVALID_EVENT_ID", "eventId must be a valid integer")
    })?;
    let order = present(body, "order")
        .map(|value| {
            int_value(value)
                .ok_or_else(|| ApiError::bad_request("INVALID_ORDER", "order must be an integer"))
        })
        .transpose()?;
    Ok(NewListEntry { event_id, order })
}
