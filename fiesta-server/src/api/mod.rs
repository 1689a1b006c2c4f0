//! HTTP API handlers for fiesta-server

pub mod announcement;
pub mod auth;
pub mod buildinfo;
pub mod health;
pub mod highscore;
pub mod members;
pub mod sse;
pub mod ui;

pub use announcement::{get_announcement, update_announcement};
pub use auth::{admin_middleware, login, logout, session_status};
pub use buildinfo::get_build_info;
pub use health::health_routes;
pub use highscore::{get_high_score, reset_high_score, submit_score};
pub use members::{add_member, clear_members, import_members, list_members, toggle_member};
pub use sse::event_stream;
pub use ui::{serve_app_js, serve_index};
