//! Review handlers: list and create. Reviews cannot be edited or deleted.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Map, Value};

use crate::api::dto::{CreateReviewRequest, ReviewQuery};
use crate::api::validate::{JsonObject, flag_value, int_filter, int_value, present};
use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse, Resource};
use crate::persistence::filters::{Page, ReviewFilter, ReviewSort, SortOrder};
use crate::persistence::models::{NewReview, Review};

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

/// `GET /api/reviews`: List reviews.
///
/// # Errors
///
/// Returns `INVALID_USER_ID` / `INVALID_EVENT_ID` for malformed filters,
/// or a database error.
#[utoipa::path(
    get,
    path = "/api/reviews",
    tag = "Reviews",
    summary = "List reviews",
    description = "Filters reviews by author and/or event, sorted by creation time or rating.",
    params(ReviewQuery),
    responses(
        (status = 200, description = "Matching reviews", body = Vec<Review>),
        (status = 400, description = "Malformed filter", body = ErrorResponse),
    )
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(query): Query<ReviewQuery>,
) -> Result<Json<Vec<Review>>, ApiError> {
    let filter = ReviewFilter {
        user_id: int_filter(
            query.user_id.as_deref(),
            "INVALID_USER_ID",
            "Valid userId is required",
        )?,
        event_id: int_filter(
            query.event_id.as_deref(),
            "INVALID_EVENT_ID",
            "Valid eventId is required",
        )?,
        sort: ReviewSort::from_param(query.sort.as_deref()),
        order: SortOrder::from_param(query.order.as_deref()),
        page: Page::from_params(
            query.limit.as_deref(),
            query.offset.as_deref(),
            DEFAULT_LIMIT,
            MAX_LIMIT,
        ),
    };
    Ok(Json(state.store.list_reviews(&filter).await?))
}

/// `POST /api/reviews`: Submit a review.
///
/// # Errors
///
/// Returns a field-specific validation error, `USER_NOT_FOUND` /
/// `EVENT_NOT_FOUND`, or a database error.
#[utoipa::path(
    post,
    path = "/api/reviews",
    tag = "Reviews",
    summary = "Create a review",
    description = "Stores a 1-5 star review of an event. The author and the event must exist.",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "User or event not found", body = ErrorResponse),
    )
)]
pub async fn create_review(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, ApiError> {
    let new_review = parse_new_review(&body)?;
    if !state.store.user_exists(new_review.user_id).await? {
        return Err(ApiError::NotFound(Resource::User));
    }
    if !state.store.event_exists(new_review.event_id).await? {
        return Err(ApiError::NotFound(Resource::Event));
    }

    let review = state.store.create_review(&new_review).await?;
    tracing::info!(
        review_id = review.id,
        event_id = review.event_id,
        "review created"
    );
    Ok((StatusCode::CREATED, Json(review)))
}

/// Review routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/reviews", get(list_reviews).post(create_review))
}

/// Validates a review body. Presence of every required field is checked
/// before any field's format.
///
/// # Errors
///
/// Returns the first failing field's error.
pub fn parse_new_review(body: &Map<String, Value>) -> Result<NewReview, ApiError> {
    let user_id = required(body, "userId", "MISSING_USER_ID")?;
    let event_id = required(body, "eventId", "MISSING_EVENT_ID")?;
    let rating = required(body, "rating", "MISSING_RATING")?;
    let content = required(body, "content", "MISSING_CONTENT")?;

    let user_id = int_value(user_id)
        .ok_or_else(|| ApiError::bad_request("INVALID_USER_ID", "Valid userId is required"))?;
    let event_id = int_value(event_id)
        .ok_or_else(|| ApiError::bad_request("INVALID_EVENT_ID", "Valid eventId is required"))?;
    let rating = int_value(rating)
        .filter(|r| (1..=5).contains(r))
        .ok_or_else(|| ApiError::bad_request("INVALID_RATING", "Rating must be between 1 and 5"))?;
    let content = content
        .as_str()
        .ok_or_else(|| ApiError::bad_request("INVALID_CONTENT", "content must be a string"))?
        .trim();
    if content.is_empty() {
        return Err(ApiError::bad_request("EMPTY_CONTENT", "content cannot be empty"));
    }
    let spoiler = match present(body, "spoiler") {
        None => false,
        Some(value) => flag_value(value).ok_or_else(|| {
            ApiError::bad_request("INVALID_SPOILER", "spoiler must be a boolean")
        })?,
    };

    Ok(NewReview {
        user_id,
        event_id,
        rating,
        content: content.to_string(),
        spoiler,
    })
}

fn required<'a>(
    body: &'a Map<String, Value>,
    key: &str,
    code: &'static str,
) -> Result<&'a Value, ApiError> {
    present(body, key)
        .filter(|v| v.as_str() != Some(""))
        .ok_or_else(|| ApiError::bad_request(code, format!("{key} is required")))
}
