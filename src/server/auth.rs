//! Bearer-token authentication backed by the config file.
//!
//! Session management lives outside this service: the config file maps
//! long-lived API keys to user ids, and the middleware attaches the matching
//! [`AuthUser`] to the request.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use std::collections::HashMap;

use super::error::ApiError;
use super::AppState;
use crate::config::Config;

/// Authenticated user info, added to request extensions after auth
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

/// API key store - maps key -> AuthUser
#[derive(Debug, Default)]
pub struct ApiKeyStore {
    keys: HashMap<String, AuthUser>,
}

impl ApiKeyStore {
    /// Build the store from configured API keys
    pub fn from_config(config: &Config) -> Self {
        let mut keys = HashMap::new();
        for entry in &config.api_keys {
            keys.insert(
                entry.key.clone(),
                AuthUser {
                    user_id: entry.user_id.clone(),
                },
            );
        }
        if keys.is_empty() {
            tracing::warn!("No API keys configured - all authenticated requests will fail");
        } else {
            tracing::info!("Loaded {} API key(s)", keys.len());
        }
        Self { keys }
    }

    /// Validate an API key and return the associated user
    pub fn validate(&self, key: &str) -> Option<AuthUser> {
        self.keys.get(key).cloned()
    }
}

/// Authentication middleware
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let api_key = match auth_header {
        Some(h) if h.starts_with("Bearer ") => h[7..].to_string(),
        Some(_) => {
            return Err(ApiError::Unauthorized(
                "Authorization header must use Bearer scheme".to_string(),
            ));
        }
        None => {
            return Err(ApiError::Unauthorized(
                "Authorization header required".to_string(),
            ));
        }
    };

    match state.api_keys.validate(&api_key) {
        Some(user) => {
            // Add user info to request extensions
            request.extensions_mut().insert(user);
            Ok(next.run(request).await)
        }
        None => Err(ApiError::Unauthorized("Invalid API key".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiKeyEntry;

    fn store_with(entries: &[(&str, &str)]) -> ApiKeyStore {
        let config = Config {
            api_keys: entries
                .iter()
                .map(|(key, user_id)| ApiKeyEntry {
                    key: key.to_string(),
                    user_id: user_id.to_string(),
                })
                .collect(),
            ..Config::default()
        };
        ApiKeyStore::from_config(&config)
    }

    #[test]
    fn test_validate_known_key() {
        let store = store_with(&[("alice-key", "alice")]);

        let user = store.validate("alice-key").unwrap();
        assert_eq!(user.user_id, "alice");
    }

    #[test]
    fn test_validate_unknown_key() {
        let store = store_with(&[("alice-key", "alice")]);

        assert!(store.validate("bogus").is_none());
    }

    #[test]
    fn test_empty_store() {
        let store = ApiKeyStore::from_config(&Config::default());

        assert!(store.validate("anything").is_none());
    }
}
