//! Error types for every layer of the service.
//!
//! Domain errors ([`ValidationError`], [`ShortenError`], [`ResolveError`],
//! [`ProviderError`], [`StoreError`]) are plain `thiserror` enums. The HTTP
//! layer converts them into [`AppError`], which renders as
//! `{"error": "<message>", "code": "<code>"}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Reasons a candidate URL is refused before any link is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("URL is too long. Please use URL that is shorter than 1024 characters.")]
    TooLong,

    #[error("The given URL doesn't seem to be a valid URL.")]
    MalformedUrl,

    #[error("This website is not allowed.")]
    Forbidden,
}

/// Storage failures. Never shown verbatim to clients.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("stored endpoint for link {id} cannot be decoded")]
    CorruptedEndpoint { id: i64 },
}

/// Failures of the shorten operation.
#[derive(Debug, thiserror::Error)]
pub enum ShortenError {
    #[error("Too many links created from this address. Please retry later.")]
    RateLimited,

    #[error(
        "The website exceeded the maximum of links that can be created. \
         We may be experiencing bot spam issues. Please wait a few minutes before retrying."
    )]
    CapacityExceeded,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    InvalidBody(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Failures of the resolve operation.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("The given link is invalid. The link contains invalid characters.")]
    InvalidToken,

    #[error("The given link seems to be expired or never existed.")]
    NotFoundOrExpired,

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Failures while fetching the forbidden websites list.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Unable to recover bad websites list: file is unavailable ({0})")]
    Unavailable(String),

    #[error("Unable to recover bad websites list: file is corrupted ({0})")]
    Corrupted(String),
}

impl ProviderError {
    /// Short machine-readable kind, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Unavailable(_) => "unavailable",
            ProviderError::Corrupted(_) => "corrupted",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

/// HTTP-facing error.
#[derive(Debug)]
pub enum AppError {
    Validation { message: String },
    RateLimited { message: String },
    Unavailable { message: String },
    NotFound { message: String },
    Unauthorized { message: String },
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    fn parts(&self) -> (StatusCode, &'static str, &str) {
        match self {
            AppError::Validation { message } => {
                (StatusCode::BAD_REQUEST, "validation_error", message)
            }
            AppError::RateLimited { message } => {
                (StatusCode::TOO_MANY_REQUESTS, "rate_limited", message)
            }
            AppError::Unavailable { message } => {
                (StatusCode::SERVICE_UNAVAILABLE, "capacity_exceeded", message)
            }
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, "not_found", message),
            AppError::Unauthorized { message } => {
                (StatusCode::UNAUTHORIZED, "unauthorized", message)
            }
            AppError::Internal { message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.parts().0
    }

    pub fn to_error_body(&self) -> ErrorBody {
        let (_, code, message) = self.parts();
        ErrorBody {
            error: message.to_string(),
            code,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(self.to_error_body())).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        tracing::error!(error = %e, "Storage failure");
        AppError::internal("An unexpected error occurred")
    }
}

impl From<ShortenError> for AppError {
    fn from(e: ShortenError) -> Self {
        match e {
            ShortenError::RateLimited => AppError::RateLimited {
                message: e.to_string(),
            },
            ShortenError::CapacityExceeded => AppError::Unavailable {
                message: e.to_string(),
            },
            ShortenError::Validation(_) | ShortenError::InvalidBody(_) => {
                AppError::bad_request(e.to_string())
            }
            ShortenError::Storage(inner) => inner.into(),
        }
    }
}
