//! Data Transfer Objects for query strings, documented request bodies and
//! composite responses.
//!
//! Query parameters are all deserialized as strings so that malformed
//! numbers reach the handlers and can be reported (or defaulted) per field
//! instead of failing the whole extractor.

pub mod common_dto;
pub mod event_dto;
pub mod list_dto;
pub mod player_stat_dto;
pub mod review_dto;
pub mod scorecard_dto;

pub use common_dto::*;
pub use event_dto::*;
pub use list_dto::*;
pub use player_stat_dto::*;
pub use review_dto::*;
pub use scorecard_dto::*;
