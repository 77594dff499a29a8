use std::io;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("Files path is not a directory")]
    NotADirectory,
    #[error("Path is not a file")]
    NotAFile,
    #[error("Invalid filename")]
    InvalidIdentifier,
    #[error("Permission denied")]
    PermissionDenied(#[source] io::Error),
    #[error("Internal I/O error")]
    Io(#[source] io::Error),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config_error",
            AppError::NotFound(_) => "not_found",
            AppError::NotADirectory => "not_a_directory",
            AppError::NotAFile => "not_a_file",
            AppError::InvalidIdentifier => "invalid_identifier",
            AppError::PermissionDenied(_) => "permission_denied",
            AppError::Io(_) => "io_error",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::NotADirectory => StatusCode::BAD_REQUEST,
            AppError::NotAFile => StatusCode::BAD_REQUEST,
            AppError::InvalidIdentifier => StatusCode::BAD_REQUEST,
            AppError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::PermissionDenied(source) | AppError::Io(source) => {
                error!(kind = self.kind(), error = %source, "filesystem failure");
            }
            _ => {}
        }

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.kind(),
            "detail": self.to_string()
        }))
    }
}

pub fn io_error(err: io::Error) -> AppError {
    match err.kind() {
        io::ErrorKind::PermissionDenied => AppError::PermissionDenied(err),
        _ => AppError::Io(err),
    }
}

pub(crate) fn is_missing(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

pub fn join_error(err: tokio::task::JoinError) -> AppError {
    AppError::Io(io::Error::other(err.to_string()))
}
