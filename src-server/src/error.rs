use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quotedesk_core::customers::CustomerError;
use quotedesk_core::errors::{Error as CoreError, ErrorCategory};
use quotedesk_core::products::ProductError;
use quotedesk_core::quotations::QuotationError;
use quotedesk_core::regions::RegionError;
use quotedesk_core::users::UserError;
use serde::Serialize;
use thiserror::Error;

#[allow(dead_code)]
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("Not Found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
    // Surface the underlying error message to help debugging during development
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Core(e) => {
                let status = match e.category() {
                    ErrorCategory::NotFound => StatusCode::NOT_FOUND,
                    ErrorCategory::InvalidData => StatusCode::BAD_REQUEST,
                    ErrorCategory::Duplicate => StatusCode::CONFLICT,
                    ErrorCategory::Database => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.to_string())
            }
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            ApiError::Internal(reason) => (StatusCode::INTERNAL_SERVER_ERROR, reason.clone()),
            ApiError::Anyhow(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<QuotationError> for ApiError {
    fn from(err: QuotationError) -> Self {
        ApiError::Core(err.into())
    }
}

impl From<CustomerError> for ApiError {
    fn from(err: CustomerError) -> Self {
        ApiError::Core(err.into())
    }
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        ApiError::Core(err.into())
    }
}

impl From<RegionError> for ApiError {
    fn from(err: RegionError) -> Self {
        ApiError::Core(err.into())
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        ApiError::Core(err.into())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}
