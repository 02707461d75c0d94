// Authentication error types

use axum::response::{IntoResponse, Response};

use crate::error::ApiError;

/// Authentication errors raised by the token service and the auth middleware
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("authorization header missing")]
    MissingHeader,

    #[error("authorization header format must be Bearer {{token}}")]
    MalformedHeader,

    #[error("invalid token")]
    InvalidToken,

    #[error("token has expired")]
    ExpiredToken,

    #[error("error generating token: {0}")]
    TokenGeneration(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
