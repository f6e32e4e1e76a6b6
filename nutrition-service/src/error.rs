use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// The generation endpoints degrade instead of failing, so the only error
/// this service answers with is input validation.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
}

impl AppError {
    pub fn bad_request(message: String) -> Self {
        AppError::Validation(message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "success": false,
            "error": self.to_string(),
        }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}
