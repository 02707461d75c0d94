// Authentication middleware for protected routes

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::auth::{error::AuthError, token::Authorization};

/// Identity resolved from a validated bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
}

/// Extract the bearer token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;

    if value.is_empty() {
        return Err(AuthError::MissingHeader);
    }

    match value.split_once(' ') {
        Some(("Bearer", token)) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MalformedHeader),
    }
}

/// Rejects requests without a valid bearer token
///
/// On success the resolved `AuthenticatedUser` is stored in the request
/// extensions before the request is passed on.
pub async fn require_auth(
    State(auth): State<Arc<dyn Authorization>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let endpoint = request.uri().path().to_string();

    let token = bearer_token(request.headers()).map_err(|e| {
        warn!("Rejected request to {}: {}", endpoint, e);
        e
    })?;

    let username = auth.validate_jwt(token).map_err(|e| {
        warn!("Rejected token for {}: {}", endpoint, e);
        e
    })?;

    debug!("Authenticated {} for {}", username, endpoint);
    request
        .extensions_mut()
        .insert(AuthenticatedUser { username });

    Ok(next.run(request).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AuthError::MissingHeader)
    }
}
