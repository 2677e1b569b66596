//! Domain layer: sports, event dates and per-sport statistics schemas.
//!
//! This module contains the server-side domain model that sits beneath the
//! storage rows: the [`Sport`] discriminator and the tagged unions that
//! give `stats` and `additionalData` payloads a concrete shape per sport.

pub mod date;
pub mod sport;
pub mod stats;

pub use date::parse_event_date;
pub use sport::Sport;
pub use stats::{MatchDetails, PlayerStatLine, StatsError};
