use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use pharmacure_service::ServiceError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{message}")]
    BadRequest {
        message: &'static str,
        details: Option<String>,
    },

    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: ServiceError,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn bad_request(message: &'static str) -> Self {
        Self::BadRequest {
            message,
            details: None,
        }
    }

    pub fn bad_request_with(message: &'static str, details: impl ToString) -> Self {
        Self::BadRequest {
            message,
            details: Some(details.to_string()),
        }
    }

    /// Classify a service failure: rejected input is a client error, anything
    /// else is reported under `context`.
    pub fn from_service(err: ServiceError, invalid: &'static str, context: &'static str) -> Self {
        if err.is_validation() {
            Self::bad_request_with(invalid, err)
        } else {
            Self::Storage {
                context,
                source: err,
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Storage { .. } | Self::Config(_) | Self::Io(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// JSON error payload: `{"error": "...", "details": "..."}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::BadRequest { message, details } => ErrorBody {
                error: message.to_string(),
                details,
            },
            Self::Storage { context, source } => {
                error!(error = %source, "{context}");
                ErrorBody {
                    error: context.to_string(),
                    details: Some(source.to_string()),
                }
            }
            other => {
                error!(error = %other, "request failed");
                ErrorBody {
                    error: "Internal server error".to_string(),
                    details: Some(other.to_string()),
                }
            }
        };
        (status, Json(body)).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
