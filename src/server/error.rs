//! HTTP error responses

use crate::error::CategorizerError;
use axum::{http::StatusCode, response::IntoResponse, Json};
use log::error;
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Categorizer(CategorizerError),
    InternalServer(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::Categorizer(e) => write!(f, "{}", e),
            ApiError::InternalServer(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl From<CategorizerError> for ApiError {
    fn from(err: CategorizerError) -> Self {
        ApiError::Categorizer(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Categorizer(CategorizerError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            ApiError::Categorizer(_) | ApiError::InternalServer(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message shown to the user, without the error-kind prefix
    pub fn message(&self) -> String {
        match self {
            ApiError::BadRequest(msg) | ApiError::InternalServer(msg) => msg.clone(),
            ApiError::Categorizer(CategorizerError::InvalidInput(msg)) => msg.clone(),
            ApiError::Categorizer(e) => e.to_string(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Categorizer(e) => e.code(),
            ApiError::InternalServer(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let body = ErrorResponse {
            error: self.message(),
            code: self.code().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_is_bad_request() {
        let err: ApiError = CategorizerError::InvalidInput("missing".to_string()).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "missing");
        assert_eq!(err.code(), "INVALID_INPUT");
    }

    #[test]
    fn test_other_errors_are_server_errors() {
        let err: ApiError = CategorizerError::ModelLoading("bad".to_string()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "MODEL_LOADING_ERROR");
    }
}
