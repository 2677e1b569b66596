//! REST endpoint handlers organized by resource.

pub mod events;
pub mod lists;
pub mod player_stats;
pub mod reviews;
pub mod scorecards;
pub mod system;
pub mod users;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(events::routes())
        .merge(reviews::routes())
        .merge(lists::routes())
        .merge(scorecards::routes())
        .merge(player_stats::routes())
        .merge(users::routes())
}
