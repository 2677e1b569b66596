//! # scoreboxd
//!
//! REST API for cataloguing sports events, reviewing them, curating lists
//! of them, and recording scorecards with per-player statistics.
//!
//! Every resource is a thin layer over one SQLite table; the interesting
//! logic is request validation (one error code per failing field),
//! the per-sport statistics schemas, and the presentation helpers shared
//! with clients.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST handlers + validation (api/)
//!     │
//!     ├── Sport schemas, event dates (domain/)
//!     │
//!     └── SQLite store (persistence/)
//!
//! Presentation helpers (display/) sit beside the stack and only read
//! the records the API returns.
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod display;
pub mod domain;
pub mod error;
pub mod persistence;
