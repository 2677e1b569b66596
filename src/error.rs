//! API error type with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type for every handler. Each variant
//! maps to an HTTP status code and a machine-readable `code` string in the
//! JSON error body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// { "error": "Rating must be between 1 and 5", "code": "INVALID_RATING" }
/// ```
///
/// Internal failures carry no `code`; bulk validation failures also carry
/// the `index` of the offending element.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Machine-readable error code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Position of the failing element in a bulk request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

/// Resource kinds that can be reported as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// A sports event.
    Event,
    /// A user-curated list.
    List,
    /// An event scorecard.
    Scorecard,
    /// A per-player statistics line.
    PlayerStat,
    /// A user profile.
    User,
}

impl Resource {
    /// Human-readable resource name used in messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Event => "Event",
            Self::List => "List",
            Self::Scorecard => "Scorecard",
            Self::PlayerStat => "Player stat",
            Self::User => "User",
        }
    }

    /// The `<RESOURCE>_NOT_FOUND` code for this resource.
    #[must_use]
    pub const fn not_found_code(self) -> &'static str {
        match self {
            Self::Event => "EVENT_NOT_FOUND",
            Self::List => "LIST_NOT_FOUND",
            Self::Scorecard => "SCORECARD_NOT_FOUND",
            Self::PlayerStat => "PLAYER_STAT_NOT_FOUND",
            Self::User => "USER_NOT_FOUND",
        }
    }
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant          | HTTP Status               |
/// |------------------|---------------------------|
/// | `BadRequest`     | 400 Bad Request           |
/// | `InvalidItem`    | 400 Bad Request           |
/// | `MalformedBody`  | 400 Bad Request           |
/// | `NotFound`       | 404 Not Found             |
/// | `Database`       | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request validation failed.
    #[error("{message}")]
    BadRequest {
        /// Machine-readable code such as `INVALID_RATING`.
        code: &'static str,
        /// Human-readable message.
        message: String,
    },

    /// An element of a bulk request failed validation.
    #[error("{message} for player stat at index {index}")]
    InvalidItem {
        /// Position of the element in the request array.
        index: usize,
        /// Machine-readable code of the underlying failure.
        code: &'static str,
        /// Human-readable message of the underlying failure.
        message: String,
    },

    /// The request body is not valid JSON.
    #[error("Request body must be valid JSON: {0}")]
    MalformedBody(String),

    /// The referenced row does not exist.
    #[error("{} not found", .0.label())]
    NotFound(Resource),

    /// Storage engine failure.
    #[error("Internal server error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    /// Builds a [`ApiError::BadRequest`] with the given code and message.
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    /// Rewraps a validation failure as a failure of element `index` of a
    /// bulk request. Other variants pass through unchanged.
    #[must_use]
    pub fn at_index(self, index: usize) -> Self {
        match self {
            Self::BadRequest { code, message } => Self::InvalidItem {
                index,
                code,
                message,
            },
            Self::NotFound(resource) => Self::InvalidItem {
                index,
                code: resource.not_found_code(),
                message: format!("{} not found", resource.label()),
            },
            other => other,
        }
    }

    /// Returns the machine-readable code for this error, if any.
    #[must_use]
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::BadRequest { code, .. } | Self::InvalidItem { code, .. } => Some(*code),
            Self::MalformedBody(_) => Some("INVALID_JSON"),
            Self::NotFound(resource) => Some(resource.not_found_code()),
            Self::Database(_) => None,
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } | Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidItem { code, .. } if code.ends_with("_NOT_FOUND") => {
                StatusCode::NOT_FOUND
            }
            Self::InvalidItem { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let index = match &self {
            Self::InvalidItem { index, .. } => Some(*index),
            _ => None,
        };
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.error_code().map(str::to_string),
            index,
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
