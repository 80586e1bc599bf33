use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Custom error type for quotation-related operations
#[derive(Debug, Error)]
pub enum QuotationError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Duplicate: {0}")]
    Duplicate(String),
}

pub type Result<T> = std::result::Result<T, QuotationError>;

impl From<DieselError> for QuotationError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => QuotationError::NotFound("Record not found".to_string()),
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                QuotationError::Duplicate(info.message().to_string())
            }
            _ => QuotationError::DatabaseError(err.to_string()),
        }
    }
}

impl From<r2d2::Error> for QuotationError {
    fn from(err: r2d2::Error) -> Self {
        QuotationError::DatabaseError(err.to_string())
    }
}
