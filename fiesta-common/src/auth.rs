//! Admin session token helpers
//!
//! The admin panel is protected by a single shared password. A successful
//! login stores a session token in a cookie; the token is the SHA-256 of a
//! fixed domain tag plus the password, so changing the password invalidates
//! every issued cookie.
//!
//! # Pure Functions
//!
//! No HTTP framework dependencies here; the server wraps these in axum
//! middleware.

use sha2::{Digest, Sha256};

/// Cookie name carrying the admin session token
pub const AUTH_COOKIE_NAME: &str = "fiesta_auth";

/// Cookie lifetime (one week)
pub const AUTH_COOKIE_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 7;

const TOKEN_DOMAIN_TAG: &str = "fiesta-admin-session:v1:";

/// Calculate the session token for a password
///
/// # Examples
///
/// ```
/// use fiesta_common::auth::session_token;
///
/// let token = session_token("secreto");
/// assert_eq!(token.len(), 64);
/// assert_eq!(token, session_token("secreto"));
/// ```
pub fn session_token(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(TOKEN_DOMAIN_TAG.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Check a submitted password against the configured one
///
/// Surrounding whitespace is ignored on both sides, matching how the
/// configured password is read.
pub fn password_matches(submitted: &str, configured: &str) -> bool {
    constant_time_eq(
        session_token(submitted.trim()).as_bytes(),
        session_token(configured.trim()).as_bytes(),
    )
}

/// Check a presented cookie token against the configured password
pub fn token_is_valid(token: &str, configured_password: &str) -> bool {
    constant_time_eq(
        token.as_bytes(),
        session_token(configured_password).as_bytes(),
    )
}

/// Extract one cookie value from a raw `Cookie` header
pub fn cookie_value<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key.trim() == name).then(|| value.trim())
    })
}

/// `Set-Cookie` value establishing an admin session
pub fn login_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        AUTH_COOKIE_NAME, token, AUTH_COOKIE_MAX_AGE_SECS
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value removing the admin session
pub fn logout_cookie() -> String {
    format!(
        "{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0",
        AUTH_COOKIE_NAME
    )
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_depends_on_password() {
        assert_ne!(session_token("a"), session_token("b"));
    }

    #[test]
    fn test_password_matches() {
        assert!(password_matches("fiesta2025", "fiesta2025"));
        assert!(!password_matches("fiesta2024", "fiesta2025"));
        assert!(!password_matches("", "fiesta2025"));
    }

    #[test]
    fn test_password_surrounding_whitespace_ignored() {
        assert!(password_matches(" clave ", "clave"));
        assert!(password_matches("clave", " clave\n"));
        assert!(!password_matches("cla ve", "clave"));
    }

    #[test]
    fn test_token_is_valid() {
        let token = session_token("clave");
        assert!(token_is_valid(&token, "clave"));
        assert!(!token_is_valid(&token, "otra"));
        assert!(!token_is_valid("true", "clave"));
    }

    #[test]
    fn test_cookie_value_parsing() {
        let header = "theme=dark; fiesta_auth=abc123 ; other=1";
        assert_eq!(cookie_value(header, AUTH_COOKIE_NAME), Some("abc123"));
        assert_eq!(cookie_value(header, "theme"), Some("dark"));
        assert_eq!(cookie_value(header, "missing"), None);
        assert_eq!(cookie_value("", AUTH_COOKIE_NAME), None);
    }

    #[test]
    fn test_login_and_logout_cookies() {
        let cookie = login_cookie("tok", true);
        assert!(cookie.starts_with("fiesta_auth=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=604800"));
        assert!(cookie.ends_with("; Secure"));

        assert!(!login_cookie("tok", false).contains("Secure"));
        assert!(logout_cookie().contains("Max-Age=0"));
    }
}
