// Error handling module for the user management API
// Maps domain errors onto HTTP statuses and the response envelope

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, error, warn};

use crate::auth::AuthError;
use crate::models::ApiResponse;
use crate::users::UserError;

pub const INVALID_BODY_MSG: &str = "invalid body params";
pub const INVALID_QUERY_PARAMS_MSG: &str = "invalid query params";
pub const INVALID_CREDENTIALS_MSG: &str = "invalid credentials";

/// Main error type for the API
/// All handlers return Result<T, ApiError>
#[derive(Debug)]
pub enum ApiError {
    /// Request body failed field validation
    /// Maps to HTTP 400 Bad Request with the field errors as `data`
    ValidationError(validator::ValidationErrors),

    /// Malformed or rejected input
    /// Maps to HTTP 400 Bad Request
    BadRequest(String),

    /// Authentication failures
    /// Maps to HTTP 401 Unauthorized
    Unauthorized(String),

    /// Maps to HTTP 404 Not Found
    NotFound(String),

    /// Maps to HTTP 409 Conflict
    Conflict(String),

    /// Internal server errors
    /// Maps to HTTP 500; `detail` is logged, only `message` reaches the client
    InternalError { message: String, detail: String },
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to the response envelope, logging at a level matching severity
    fn to_envelope(&self) -> ApiResponse<serde_json::Value> {
        let status = self.status_code();
        match self {
            ApiError::ValidationError(errors) => {
                debug!("Validation error: {:?}", errors);
                ApiResponse::new(
                    status,
                    INVALID_BODY_MSG,
                    serde_json::to_value(errors).ok(),
                )
            }
            ApiError::BadRequest(message) => {
                debug!("Bad request: {}", message);
                ApiResponse::new(status, message.clone(), None)
            }
            ApiError::Unauthorized(message) => {
                warn!("Unauthorized access attempt: {}", message);
                ApiResponse::new(status, message.clone(), None)
            }
            ApiError::NotFound(message) => {
                debug!("Resource not found: {}", message);
                ApiResponse::new(status, message.clone(), None)
            }
            ApiError::Conflict(message) => {
                warn!("Conflict error: {}", message);
                ApiResponse::new(status, message.clone(), None)
            }
            ApiError::InternalError { message, detail } => {
                error!("Internal error: {}", detail);
                ApiResponse::new(status, message.clone(), None)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.to_envelope().into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match &err {
            UserError::NotFound => ApiError::NotFound(err.to_string()),
            UserError::AlreadyExists => ApiError::Conflict(err.to_string()),
            UserError::InvalidEmail | UserError::InvalidPassword => {
                ApiError::BadRequest(err.to_string())
            }
            UserError::InvalidCredentials => ApiError::Unauthorized(INVALID_CREDENTIALS_MSG.to_string()),
            UserError::Storage { context, .. } => ApiError::InternalError {
                message: context.to_string(),
                detail: err.to_string(),
            },
            UserError::PasswordHash(_) => ApiError::InternalError {
                message: "error processing password".to_string(),
                detail: err.to_string(),
            },
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match &err {
            AuthError::TokenGeneration(_) => ApiError::InternalError {
                message: "error generating token".to_string(),
                detail: err.to_string(),
            },
            _ => ApiError::Unauthorized(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!("Rejected request body: {}", rejection.body_text());
        ApiError::BadRequest(INVALID_BODY_MSG.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(errors)
    }
}
