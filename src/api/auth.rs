// =============================================================================
// Session Authentication — Axum Extractor
// =============================================================================
//
// Extracts a Bearer token from the `Authorization` header and resolves it
// against the in-memory session store.
//
// Usage as an Axum extractor:
//
//   async fn handler(session: AuthSession, ...) { ... }
//
// If the token is missing or unknown, the extractor short-circuits the
// request with a 401 response before the handler body executes.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::app_state::AppState;

/// Pull the Bearer token out of an `Authorization` header, if present.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Axum extractor that resolves the presented session token to a user id.
///
/// Yields the authenticated user's id. If resolution fails a 401 response
/// is returned immediately.
pub struct AuthSession {
    pub user_id: String,
}

/// Rejection type returned when authentication fails.
pub struct AuthRejection {
    status: StatusCode,
    message: &'static str,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.message,
        });
        (self.status, axum::Json(body)).into_response()
    }
}

impl FromRequestParts<Arc<AppState>> for AuthSession {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(&parts.headers) else {
            return Err(AuthRejection {
                status: StatusCode::UNAUTHORIZED,
                message: "Not authenticated",
            });
        };

        match state.sessions.user_id(token) {
            Some(user_id) => Ok(AuthSession { user_id }),
            None => {
                warn!("unknown session token presented");
                Err(AuthRejection {
                    status: StatusCode::UNAUTHORIZED,
                    message: "Not authenticated",
                })
            }
        }
    }
}
