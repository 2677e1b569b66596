//! Persistence layer: SQLite catalogue store.
//!
//! [`Store`] wraps a `sqlx::SqlitePool`; its query methods are split by
//! resource across the submodules. Row types live in [`models`] and the
//! typed list filters in [`filters`].

mod events;
pub mod filters;
mod lists;
pub mod models;
mod player_stats;
mod reviews;
mod scorecards;
mod store;
mod users;

pub use events::ReviewTally;
pub use store::Store;
