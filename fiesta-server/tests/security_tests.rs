//! Security tests for fiesta-server
//!
//! Tests security-critical features:
//! - Admin routes reject requests without a valid session cookie
//! - Wrong passwords and forged cookies are refused
//! - Login, session status and logout cookie handling
//! - Oversized request bodies are refused before reaching the roster

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use fiesta_common::auth::{session_token, AUTH_COOKIE_NAME};
use fiesta_common::store::{Keys, MemoryStore};
use fiesta_server::{build_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

const PASSWORD: &str = "sardinas-2024";

/// Test helper: Create app with admin auth enabled
fn setup_app_with_auth() -> Router {
    let state = AppState::new(
        Arc::new(MemoryStore::new()),
        Keys::default(),
        Some(PASSWORD.to_string()),
    );
    build_router(state)
}

fn json_request(method: &str, uri: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

/// Test helper: Log in and return the `name=value` cookie pair
async fn login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/login",
            json!({ "password": PASSWORD }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.contains("HttpOnly"));
    set_cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn test_admin_routes_require_session() {
    let app = setup_app_with_auth();

    let requests = vec![
        json_request(
            "POST",
            "/api/admin/members/import",
            json!({ "text": "Ana Torres XL" }),
            None,
        ),
        json_request(
            "POST",
            "/api/admin/members",
            json!({ "givenName": "Ana", "surname1": "Gil", "size": "M" }),
            None,
        ),
        json_request("DELETE", "/api/admin/members", json!({}), None),
        json_request(
            "PUT",
            "/api/admin/announcement",
            json!({ "text": "hola" }),
            None,
        ),
        json_request("POST", "/api/admin/highscore/reset", json!({}), None),
    ];

    for request in requests {
        let uri = request.uri().to_string();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
        assert!(body_json(response).await["error"].is_string());
    }

    // Nothing was written
    let response = app
        .oneshot(get_request("/api/members", None))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["members"], json!([]));
}

#[tokio::test]
async fn test_public_routes_do_not_require_session() {
    let app = setup_app_with_auth();

    for uri in ["/health", "/api/members", "/api/announcement", "/api/highscore"] {
        let response = app.clone().oneshot(get_request(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
    }
}

#[tokio::test]
async fn test_wrong_password_rejected() {
    let app = setup_app_with_auth();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admin/login",
            json!({ "password": "boquerones" }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(body_json(response).await["error"], "Contraseña incorrecta");
}

#[tokio::test]
async fn test_forged_cookie_rejected() {
    let app = setup_app_with_auth();
    let forged = format!("{}={}", AUTH_COOKIE_NAME, session_token("otra-clave"));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admin/members/import",
            json!({ "text": "Ana Torres XL" }),
            Some(&forged),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_grants_admin_access() {
    let app = setup_app_with_auth();
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(get_request("/api/admin/session", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(
        body_json(response).await,
        json!({ "authenticated": true, "authRequired": true })
    );

    // Cookie alongside unrelated cookies still counts
    let mixed = format!("tema=oscuro; {}", cookie);
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/members/import",
            json!({ "text": "1. Ana Torres XL\n2. Luis Gómez M" }),
            Some(&mixed),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["count"], 2);
}

#[tokio::test]
async fn test_session_status_and_logout() {
    let app = setup_app_with_auth();

    let response = app
        .clone()
        .oneshot(get_request("/api/admin/session", None))
        .await
        .unwrap();
    assert_eq!(
        body_json(response).await,
        json!({ "authenticated": false, "authRequired": true })
    );

    let response = app
        .oneshot(json_request("POST", "/api/admin/logout", json!({}), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.starts_with(&format!("{}=;", AUTH_COOKIE_NAME)));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_auth_disabled_without_password() {
    let state = AppState::new(Arc::new(MemoryStore::new()), Keys::default(), None);
    let app = build_router(state);

    let response = app
        .clone()
        .oneshot(get_request("/api/admin/session", None))
        .await
        .unwrap();
    assert_eq!(
        body_json(response).await,
        json!({ "authenticated": true, "authRequired": false })
    );

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admin/members/import",
            json!({ "text": "Ana Torres XL" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_padded_password_logs_in_and_session_holds() {
    let state = AppState::new(
        Arc::new(MemoryStore::new()),
        Keys::default(),
        Some(format!("  {}\n", PASSWORD)),
    );
    let app = build_router(state);

    for submitted in [PASSWORD.to_string(), format!(" {} ", PASSWORD)] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/admin/login",
                json!({ "password": submitted }),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{:?}", submitted);
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        let cookie = set_cookie.split(';').next().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/admin/members/import",
                json!({ "text": "Ana Torres XL" }),
                Some(&cookie),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_blank_password_disables_auth() {
    let state = AppState::new(
        Arc::new(MemoryStore::new()),
        Keys::default(),
        Some("   ".to_string()),
    );
    let response = build_router(state)
        .oneshot(get_request("/api/admin/session", None))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["authRequired"], json!(false));
}

/// Bodies over the default 2MB extractor limit never reach the parser
#[tokio::test]
async fn test_oversized_import_rejected() {
    let app = setup_app_with_auth();
    let cookie = login(&app).await;

    let huge = "Ana Torres XL\n".repeat(200_000);
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admin/members/import",
            json!({ "text": huge }),
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
