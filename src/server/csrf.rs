//! CSRF protection via double-submit cookie.
//!
//! `GET /api/csrf` mints a random token and sets it as the `csrf_token`
//! cookie. Mutating requests must echo the same token in the `x-csrf-token`
//! header; requests where the two disagree are rejected.

use axum::extract::Request;
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rand::Rng;
use serde::Serialize;

use super::error::ApiError;

const CSRF_COOKIE: &str = "csrf_token";
const CSRF_HEADER: &str = "x-csrf-token";

/// Response for the token endpoint.
#[derive(Serialize)]
struct CsrfResponse {
    csrf_token: String,
}

/// GET /api/csrf - mint a token and hand it out as both cookie and body.
pub async fn issue_token() -> impl IntoResponse {
    let token = generate_token();
    let cookie = format!("{}={}; Path=/; SameSite=Lax", CSRF_COOKIE, token);

    (
        [(header::SET_COOKIE, cookie)],
        Json(CsrfResponse { csrf_token: token }),
    )
}

/// Rejects mutating requests whose header token does not match the cookie.
pub async fn require_token(request: Request, next: Next) -> Result<Response, ApiError> {
    if request.method().is_safe() {
        return Ok(next.run(request).await);
    }

    let cookie_token = request
        .headers()
        .get(header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| cookie_value(h, CSRF_COOKIE))
        .map(str::to_string);

    let header_token = request
        .headers()
        .get(CSRF_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    match (cookie_token, header_token) {
        (Some(cookie), Some(header)) if !cookie.is_empty() && cookie == header => {
            Ok(next.run(request).await)
        }
        _ => Err(ApiError::CsrfRejected),
    }
}

/// Generates a secure random token.
///
/// Returns 32 random bytes encoded as base64url (no padding).
fn generate_token() -> String {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Extracts a named value from a `Cookie` header.
fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token_format() {
        let token = generate_token();

        // Should be base64url, 43 characters (32 bytes)
        assert_eq!(token.len(), 43);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_generate_token_unique() {
        assert_ne!(generate_token(), generate_token());
    }

    #[test]
    fn test_cookie_value_found() {
        let header = "session=abc; csrf_token=xyz; theme=dark";
        assert_eq!(cookie_value(header, "csrf_token"), Some("xyz"));
    }

    #[test]
    fn test_cookie_value_missing() {
        assert_eq!(cookie_value("session=abc", "csrf_token"), None);
        assert_eq!(cookie_value("", "csrf_token"), None);
    }

    #[test]
    fn test_cookie_value_first_match_wins() {
        let header = "csrf_token=first; csrf_token=second";
        assert_eq!(cookie_value(header, "csrf_token"), Some("first"));
    }
}
