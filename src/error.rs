use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotFound(String),
    // `cause` only goes to the logs.
    #[error("{message}")]
    StorageFailure { message: String, cause: String },
}

impl ApiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::InvalidInput(message.into())
    }

    pub fn storage(message: &str, cause: impl ToString) -> Self {
        ApiError::StorageFailure {
            message: message.to_string(),
            cause: cause.to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::StorageFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::StorageFailure { message, cause } => {
                tracing::error!("{}: {}", message, cause);
            }
            other => tracing::info!("Rejected movie request: {}", other),
        }
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.to_string()
        }))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    UploadFailure(String),
}

impl ResponseError for UploadError {
    fn status_code(&self) -> StatusCode {
        match self {
            UploadError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            UploadError::UploadFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            UploadError::UploadFailure(message) => tracing::error!("Upload error: {}", message),
            UploadError::InvalidInput(message) => tracing::info!("Rejected upload: {}", message),
        }
        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "error": self.to_string()
        }))
    }
}
