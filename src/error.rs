use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug)]
pub enum FileServerError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to render listing: {0}")]
    Render(String),
}

impl IntoResponse for FileServerError {
    fn into_response(self) -> Response {
        // Bodies stay empty so filesystem details never reach the client.
        match &self {
            FileServerError::NotFound(path) => {
                debug!("Not found: {}", path);
                StatusCode::NOT_FOUND.into_response()
            }
            FileServerError::Io(_) | FileServerError::Render(_) => {
                error!("Request failed: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
