use thiserror::Error as ThisError;
use warp::{http::StatusCode, reject::Reject};

/// Every failure a request can end in. The variant decides the HTTP status.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn invalid_request(info: impl Into<String>) -> Self {
        Self::InvalidRequest(info.into())
    }

    pub fn unauthorized(info: impl Into<String>) -> Self {
        Self::Unauthorized(info.into())
    }

    pub fn forbidden(info: impl Into<String>) -> Self {
        Self::Forbidden(info.into())
    }

    pub fn not_found(info: impl Into<String>) -> Self {
        Self::NotFound(info.into())
    }

    pub fn internal(info: impl Into<String>) -> Self {
        Self::Internal(info.into())
    }
}

impl Reject for Error {}

pub struct QueryError {
    info: String,
}

impl QueryError {
    pub fn new(info: String) -> Self {
        Self { info }
    }
}

impl From<sqlx::Error> for QueryError {
    fn from(value: sqlx::Error) -> Self {
        Self::new(value.to_string())
    }
}

impl From<QueryError> for Error {
    fn from(value: QueryError) -> Self {
        log::error!("Query failed: {}", value.info);
        Error::Internal(value.info)
    }
}

pub struct CacheError {
    info: String,
}

impl From<redis::RedisError> for CacheError {
    fn from(value: redis::RedisError) -> Self {
        Self {
            info: format!("{:?} - {:?}", value.kind(), value.detail()),
        }
    }
}

impl From<CacheError> for Error {
    fn from(value: CacheError) -> Self {
        Error::Internal(value.info)
    }
}
