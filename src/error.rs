use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

pub type AppResult<T> = std::result::Result<T, AppError>;
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Outcomes of paste store operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AppError {
    #[error("content is empty")]
    EmptyContent,
    #[error("not found")]
    NotFound,
    #[error("no free slug found after {attempts} attempts")]
    Exhausted { attempts: u32 },
    #[error("invalid slug configuration: {0}")]
    InvalidSlugConfig(&'static str),
    #[error("database error")]
    Database {
        #[source]
        source: sqlx::Error,
    },
}

impl From<sqlx::Error> for AppError {
    fn from(source: sqlx::Error) -> Self {
        match source {
            sqlx::Error::RowNotFound => AppError::NotFound,
            _ => AppError::Database { source },
        }
    }
}

/// Errors surfaced over HTTP.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
    #[error("not found")]
    NotFound,
    #[error("content required")]
    ContentRequired,
    #[error("could not allocate a paste id, try again")]
    Exhausted,
    #[error("internal error")]
    Internal { source: AppError },
}

impl From<AppError> for ApiError {
    fn from(source: AppError) -> Self {
        match source {
            AppError::NotFound => ApiError::NotFound,
            AppError::EmptyContent => ApiError::ContentRequired,
            AppError::Exhausted { .. } => ApiError::Exhausted,
            _ => ApiError::Internal { source },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::ContentRequired => StatusCode::BAD_REQUEST,
            ApiError::Exhausted => StatusCode::BAD_REQUEST,
            ApiError::Internal { source } => {
                error!("request failed: {source:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status_code, format!("{self}")).into_response()
    }
}

/// Whether a database error is a uniqueness violation.
///
/// SQLite reports `SQLITE_CONSTRAINT_UNIQUE` (2067) and
/// `SQLITE_CONSTRAINT_PRIMARYKEY` (1555) as extended result codes; Postgres
/// uses SQLSTATE 23505.
pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    let sqlx::Error::Database(db_error) = error else {
        return false;
    };

    match db_error.code().as_deref() {
        Some("2067") | Some("1555") | Some("23505") => true,
        _ => db_error.message().contains("UNIQUE constraint failed"),
    }
}
