//! fiesta-server library - roster HTTP service
//!
//! Exposes the router and shared state so integration tests can drive the
//! real handlers against an in-memory store.

use axum::Router;
use fiesta_common::announcement::AnnouncementStore;
use fiesta_common::highscore::HighScoreStore;
use fiesta_common::store::{Keys, SharedStore};
use fiesta_common::{EventBus, RosterService};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod seed;

pub use error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub roster: RosterService,
    pub announcement: AnnouncementStore,
    pub high_scores: HighScoreStore,
    /// Change notifications streamed to `/events`
    pub events: EventBus,
    /// Admin password; `None` disables admin authentication
    pub admin_password: Option<Arc<str>>,
    /// Mark the session cookie `Secure` (served over HTTPS)
    pub secure_cookies: bool,
    /// Backend name reported by the health endpoint
    pub store_backend: &'static str,
}

impl AppState {
    /// Create new application state around one shared store handle
    pub fn new(store: SharedStore, keys: Keys, admin_password: Option<String>) -> Self {
        let events = EventBus::default();
        let store_backend = store.backend_tag();
        Self {
            roster: RosterService::new(store.clone(), keys.clone(), events.clone()),
            announcement: AnnouncementStore::new(store.clone(), keys.clone(), events.clone()),
            high_scores: HighScoreStore::new(store, keys, events.clone()),
            events,
            admin_password: admin_password
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(Arc::from),
            secure_cookies: false,
            store_backend,
        }
    }

    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }

    /// Whether admin routes require a session cookie
    pub fn auth_required(&self) -> bool {
        self.admin_password.is_some()
    }
}

/// Build application router
///
/// Reads and the mini-game submission are public; everything under
/// `/api/admin/` except the session endpoints goes through the admin
/// session check.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{get, post, put};

    let admin = Router::new()
        .route(
            "/api/admin/members",
            post(api::add_member).delete(api::clear_members),
        )
        .route("/api/admin/members/import", post(api::import_members))
        .route("/api/admin/members/:id/toggle", post(api::toggle_member))
        .route("/api/admin/announcement", put(api::update_announcement))
        .route("/api/admin/highscore/reset", post(api::reset_high_score))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::admin_middleware,
        ));

    let public = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/events", get(api::event_stream))
        .route("/api/buildinfo", get(api::get_build_info))
        .route("/api/members", get(api::list_members))
        .route("/api/announcement", get(api::get_announcement))
        .route(
            "/api/highscore",
            get(api::get_high_score).post(api::submit_score),
        )
        .route("/api/admin/login", post(api::login))
        .route("/api/admin/logout", post(api::logout))
        .route("/api/admin/session", get(api::session_status))
        .merge(api::health_routes());

    Router::new()
        .merge(admin)
        .merge(public)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
