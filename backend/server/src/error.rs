use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};
use whois::WhoisError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Record not found")]
    NotFound,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Remote data source error: {0}")]
    Remote(WhoisError),

    #[error("Render error: {0}")]
    Render(#[from] minijinja::Error),
}

impl From<WhoisError> for AppError {
    fn from(error: WhoisError) -> Self {
        match error {
            WhoisError::NotFound => AppError::NotFound,
            WhoisError::InvalidParameter(value) => AppError::InvalidParameter(value),
            other => AppError::Remote(other),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            AppError::Remote(_) => StatusCode::BAD_GATEWAY,
            AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // details stay in the log
        let message = match &self {
            AppError::NotFound => "Student not found",
            AppError::InvalidParameter(_) => "Invalid request",
            AppError::Remote(_) => "The roster is unavailable right now",
            AppError::Render(_) => "Something went wrong",
        };

        if status.is_server_error() {
            error!("{self}");
        } else {
            warn!("{self}");
        }

        (status, message).into_response()
    }
}
