use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

/// Uniform response envelope used for every JSON response
///
/// `data` is serialized as `null` when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            data,
        }
    }

    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::OK, message, Some(data))
    }
}

impl ApiResponse<()> {
    /// Envelope carrying only a status and a message
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, message, None)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_data_serializes_as_null() {
        let body = serde_json::to_value(ApiResponse::message(StatusCode::OK, "done")).unwrap();
        assert_eq!(body, json!({"status": 200, "message": "done", "data": null}));
    }

    #[test]
    fn test_data_is_embedded() {
        let body = serde_json::to_value(ApiResponse::ok("found", json!({"id": 1}))).unwrap();
        assert_eq!(body["data"]["id"], 1);
        assert_eq!(body["status"], 200);
    }
}
