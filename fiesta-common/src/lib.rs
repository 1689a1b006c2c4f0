//! # Fiesta Common Library
//!
//! Shared code for the fiesta roster service:
//! - Roster model, ordered writer/reader and status toggles
//! - Bulk-import text parser
//! - Key-value store abstraction (Redis and in-memory backends)
//! - Announcement and mini-game high score stores
//! - Event bus and SSE helpers
//! - Admin session token helpers
//! - Configuration loading

pub mod announcement;
pub mod auth;
pub mod config;
pub mod error;
pub mod events;
pub mod highscore;
pub mod import;
pub mod roster;
pub mod sse;
pub mod store;
pub mod time;
pub mod uuid_utils;

pub use error::{Error, Result};
pub use events::{EventBus, FiestaEvent};
pub use roster::{RosterEntry, RosterService};
pub use store::{KvStore, SharedStore};
