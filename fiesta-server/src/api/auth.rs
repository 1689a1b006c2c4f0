//! Admin session handling
//!
//! The admin logs in with the configured password and receives an HttpOnly
//! cookie holding a session token derived from it. Protected routes check
//! that cookie. With no password configured, every route is open.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use fiesta_common::auth::{
    cookie_value, login_cookie, logout_cookie, password_matches, session_token, token_is_valid,
    AUTH_COOKIE_NAME,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::{ApiError, ApiResult, AppState};

/// Wrong password message shown on the login form
pub const WRONG_PASSWORD: &str = "Contraseña incorrecta";

/// True when the request carries a valid admin session cookie, or when
/// authentication is disabled
fn has_admin_session(state: &AppState, headers: &HeaderMap) -> bool {
    let Some(password) = state.admin_password.as_deref() else {
        return true;
    };
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|raw| cookie_value(raw, AUTH_COOKIE_NAME))
        .any(|token| token_is_valid(token, password))
}

/// Admin session middleware
///
/// Returns 401 Unauthorized unless the session cookie is valid.
///
/// **Note:** This is applied to admin routes only.
/// Login, logout and session status are public.
pub async fn admin_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !has_admin_session(&state, request.headers()) {
        warn!(path = %request.uri().path(), "Rejected admin request without session");
        return Err(ApiError::Unauthorized("No autorizado".to_string()));
    }

    Ok(next.run(request).await)
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// POST /api/admin/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Response> {
    let Some(password) = state.admin_password.as_deref() else {
        return Ok(Json(json!({ "success": true })).into_response());
    };

    if !password_matches(&body.password, password) {
        warn!("Failed admin login attempt");
        return Err(ApiError::Unauthorized(WRONG_PASSWORD.to_string()));
    }

    let cookie = login_cookie(&session_token(password), state.secure_cookies);
    let cookie = HeaderValue::from_str(&cookie)
        .map_err(|e| ApiError::Internal(format!("Invalid cookie header: {}", e)))?;
    info!("Admin logged in");

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "success": true })),
    )
        .into_response())
}

/// POST /api/admin/logout
pub async fn logout() -> ApiResult<Response> {
    let cookie = HeaderValue::from_str(&logout_cookie())
        .map_err(|e| ApiError::Internal(format!("Invalid cookie header: {}", e)))?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "success": true })),
    )
        .into_response())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub authenticated: bool,
    pub auth_required: bool,
}

/// GET /api/admin/session
pub async fn session_status(State(state): State<AppState>, headers: HeaderMap) -> Json<SessionStatus> {
    Json(SessionStatus {
        authenticated: has_admin_session(&state, &headers),
        auth_required: state.auth_required(),
    })
}
