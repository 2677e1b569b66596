//! DTOs shared by several resources.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// `?id=` selector used by the query-addressed endpoints.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdParams {
    /// Row id.
    pub id: Option<String>,
}

/// Service health, returned by `GET /health`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `"healthy"`, or `"degraded"` when the database does not answer.
    pub status: String,
    /// `"ok"` or `"unreachable"`.
    pub database: String,
    /// Current server time (RFC 3339).
    pub timestamp: String,
    /// Crate version.
    pub version: String,
}
