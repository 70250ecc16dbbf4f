//! Request-level error handling.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Everything that can go wrong while handling a request.
///
/// There is no recovery path anywhere in the service: a failed session store
/// access or a failed insert aborts the request. The client sees the host
/// framework's default fault response, a bare `500 Internal Server Error`.
#[derive(Debug, Error)]
pub enum AppError {
    /// The session store failed to load or persist session values.
    #[error("session store: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// A database insert failed.
    #[error("database: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request aborted");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}
