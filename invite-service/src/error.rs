use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::warn;
use thiserror::Error;

use nourishplate_shared::email::EmailError;
use nourishplate_shared::store::StoreError;
use nourishplate_shared::token::TokenError;

pub type Result<T> = std::result::Result<T, AppError>;

/// Service error taxonomy. Every variant renders as the structured
/// `{success:false, error}` body; nothing propagates past a handler.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    InvalidToken(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unexpected(String),
}

impl AppError {
    pub fn bad_request(message: String) -> Self {
        AppError::Validation(message)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Upstream(_) | AppError::InvalidToken(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(serde_json::json!({
            "success": false,
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            // Lookup details stay in the logs; the caller gets a generic
            // user-visible message.
            StoreError::NotFound(detail) => {
                warn!("Store lookup failed: {}", detail);
                AppError::NotFound("Invitation not found or no longer valid".to_string())
            }
            StoreError::Conflict(message) => AppError::Conflict(message),
            StoreError::Internal(message) => AppError::Unexpected(message),
        }
    }
}

impl From<EmailError> for AppError {
    fn from(e: EmailError) -> Self {
        match e {
            EmailError::Validation(message) => AppError::Validation(message),
            EmailError::Upstream(message) => AppError::Upstream(message),
            EmailError::Unexpected(message) => AppError::Unexpected(message),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(_: TokenError) -> Self {
        AppError::InvalidToken("Invalid or malformed invitation link".to_string())
    }
}
