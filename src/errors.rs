use axum::http::StatusCode;
use axum::response::IntoResponse;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Db(#[from] mongodb::error::Error),
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// Rejections for the stock-add form. Malformed input and out-of-range values
// stay distinct variants even though both surface the same user notice.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Symbol cannot be empty")]
    EmptySymbol,
    #[error("{field} must be a number")]
    Malformed { field: &'static str },
    #[error("{field} must be greater than zero")]
    OutOfRange { field: &'static str },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
            AppError::Db(e) => {
                error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
            AppError::Session(e) => {
                error!("Session error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
