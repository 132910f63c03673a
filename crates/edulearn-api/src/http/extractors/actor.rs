//! Request actor extractor.
//!
//! Reads an API key from:
//! - `Authorization: Bearer <key>` header
//! - `X-API-Key: <key>` header
//!
//! No key means an anonymous viewer. A key that does not resolve is rejected
//! with 401 rather than downgraded to anonymous.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use edulearn_core::repository::api_key::ApiKeyRepository;
use edulearn_types::actor::Actor;

use crate::http::error::AppError;
use crate::state::AppState;

/// The actor making the request, possibly anonymous.
#[derive(Debug, Clone)]
pub struct Viewer(pub Actor);

impl Viewer {
    /// Email of the authenticated actor, or 401 for anonymous requests.
    pub fn require_authenticated(&self) -> Result<&str, AppError> {
        self.0.email.as_deref().ok_or_else(|| {
            AppError::Unauthorized(
                "Authentication required. Provide an API key via 'Authorization: Bearer <key>' or 'X-API-Key: <key>' header.".to_string(),
            )
        })
    }
}

impl FromRequestParts<AppState> for Viewer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(api_key) = extract_api_key(parts)? else {
            return Ok(Viewer(Actor::anonymous()));
        };

        let actor = state
            .api_keys
            .resolve(&api_key)
            .await
            .map_err(|e| AppError::Internal(format!("Database error: {e}")))?;

        match actor {
            Some(actor) => Ok(Viewer(actor)),
            None => Err(AppError::Unauthorized("Invalid API key.".to_string())),
        }
    }
}

/// Extract the API key from request headers, if any was sent.
fn extract_api_key(parts: &Parts) -> Result<Option<String>, AppError> {
    // Try Authorization: Bearer <key>
    if let Some(auth) = parts.headers.get("authorization") {
        let auth_str = auth.to_str().map_err(|_| {
            AppError::Unauthorized("Invalid Authorization header encoding".to_string())
        })?;
        if let Some(key) = auth_str.strip_prefix("Bearer ") {
            return non_empty(key);
        }
    }

    // Try X-API-Key header
    if let Some(key) = parts.headers.get("x-api-key") {
        let key_str = key.to_str().map_err(|_| {
            AppError::Unauthorized("Invalid X-API-Key header encoding".to_string())
        })?;
        return non_empty(key_str);
    }

    Ok(None)
}

fn non_empty(key: &str) -> Result<Option<String>, AppError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(AppError::Unauthorized("Empty API key".to_string()));
    }
    Ok(Some(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    use crate::state::test_state;

    fn parts_with(header: Option<(&str, &str)>) -> Parts {
        let mut builder = Request::builder().uri("/api/courses/");
        if let Some((name, value)) = header {
            builder = builder.header(name, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_no_header_is_anonymous() {
        let (state, _dir) = test_state().await;
        let mut parts = parts_with(None);
        let Viewer(actor) = Viewer::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(actor, Actor::anonymous());
    }

    #[tokio::test]
    async fn test_bearer_and_x_api_key_resolve() {
        let (state, _dir) = test_state().await;
        let staff_key = state.api_keys.issue("grace@example.com", true).await.unwrap();
        let user_key = state.api_keys.issue("ada@example.com", false).await.unwrap();

        let bearer = format!("Bearer {staff_key}");
        let mut parts = parts_with(Some(("authorization", &bearer)));
        let Viewer(actor) = Viewer::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(actor, Actor::staff("grace@example.com"));

        let mut parts = parts_with(Some(("x-api-key", &user_key)));
        let Viewer(actor) = Viewer::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(actor, Actor::user("ada@example.com"));
    }

    #[tokio::test]
    async fn test_unknown_key_is_unauthorized() {
        let (state, _dir) = test_state().await;
        let mut parts = parts_with(Some(("x-api-key", "edl_nope")));
        let err = Viewer::from_request_parts(&mut parts, &state).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_require_authenticated() {
        assert!(Viewer(Actor::anonymous()).require_authenticated().is_err());
        assert_eq!(
            Viewer(Actor::user("ada@example.com"))
                .require_authenticated()
                .unwrap(),
            "ada@example.com"
        );
    }
}
