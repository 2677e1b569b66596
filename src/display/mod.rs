//! Presentation helpers shared by clients of the API.
//!
//! Everything here is pure: functions over the JSON records the API
//! returns, plus the [`Typewriter`] state machine that drives the rotating
//! search placeholder. Nothing depends on a rendering layer.

mod card;
mod motion;
mod scoreboard;

pub use card::{card_image, fallback_image, is_upcoming, time_ago};
pub use motion::{Phase, Typewriter, TypewriterTiming, stagger_delay};
pub use scoreboard::{INDIVIDUAL, TeamGroup, group_by_team, order_by_position};
