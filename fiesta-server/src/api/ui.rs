//! Roster page and admin panel assets
//!
//! Both files are embedded at build time. The page references the script
//! with the build hash in its query string, so the script can be cached
//! for a long time while the page itself is always revalidated.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

const INDEX_HTML: &str = include_str!("../ui/index.html");
const APP_JS: &str = include_str!("../ui/app.js");

/// Placeholder in the page replaced by the build hash
const BUILD_MARKER: &str = "__BUILD__";

const SCRIPT_MAX_AGE: &str = "public, max-age=604800";

fn index_page() -> String {
    INDEX_HTML.replace(BUILD_MARKER, env!("GIT_HASH"))
}

/// GET /
pub async fn serve_index() -> Response {
    (
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/html; charset=utf-8"),
            ),
            (header::CACHE_CONTROL, HeaderValue::from_static("no-cache")),
        ],
        index_page(),
    )
        .into_response()
}

/// GET /static/app.js
pub async fn serve_app_js() -> Response {
    (
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/javascript; charset=utf-8"),
            ),
            (header::CACHE_CONTROL, HeaderValue::from_static(SCRIPT_MAX_AGE)),
            (
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ),
        ],
        APP_JS,
    )
        .into_response()
}
