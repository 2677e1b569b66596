//! REST API layer: route handlers, DTOs, request validation and the
//! OpenAPI document.
//!
//! Resource endpoints are mounted under `/api`; `/health` sits at the root.

pub mod dto;
pub mod handlers;
pub mod validate;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::error::ErrorResponse;

/// OpenAPI document for every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "scoreboxd API",
        description = "Catalogue, review and list sports events; read scorecards and player statistics."
    ),
    paths(
        handlers::events::list_events,
        handlers::events::get_event,
        handlers::events::create_event,
        handlers::reviews::list_reviews,
        handlers::reviews::create_review,
        handlers::lists::list_lists,
        handlers::lists::get_list,
        handlers::lists::create_list,
        handlers::lists::add_list_event,
        handlers::scorecards::list_scorecards,
        handlers::scorecards::get_scorecard,
        handlers::scorecards::create_scorecard,
        handlers::scorecards::update_scorecard,
        handlers::scorecards::delete_scorecard,
        handlers::player_stats::list_player_stats,
        handlers::player_stats::create_player_stats,
        handlers::player_stats::update_player_stat,
        handlers::player_stats::delete_player_stat,
        handlers::users::get_user,
        handlers::system::health_handler,
    ),
    components(schemas(ErrorResponse)),
    tags(
        (name = "Events", description = "Sports events"),
        (name = "Reviews", description = "Star reviews of events"),
        (name = "Lists", description = "User-curated event lists"),
        (name = "Scorecards", description = "Event results and match details"),
        (name = "Player stats", description = "Per-player statistics of a scorecard"),
        (name = "Users", description = "Public user profiles"),
        (name = "System", description = "Health checks"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
///
/// With the `swagger-ui` feature, the interactive docs are served at
/// `/swagger-ui` and the raw document at `/api-docs/openapi.json`.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/events",
            "/api/events/{id}",
            "/api/reviews",
            "/api/lists/{id}/events",
            "/api/scorecards",
            "/api/player-stats",
            "/api/users/{id}",
            "/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn error_schema_is_registered() {
        let doc = ApiDoc::openapi();
        let registered = doc
            .components
            .as_ref()
            .is_some_and(|c| c.schemas.contains_key("ErrorResponse"));
        assert!(registered);
    }
}
