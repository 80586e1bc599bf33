use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Custom error type for product-related operations
#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Duplicate: {0}")]
    Duplicate(String),
}

pub type Result<T> = std::result::Result<T, ProductError>;

impl From<DieselError> for ProductError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => ProductError::NotFound("Record not found".to_string()),
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                ProductError::Duplicate(info.message().to_string())
            }
            _ => ProductError::DatabaseError(err.to_string()),
        }
    }
}

impl From<r2d2::Error> for ProductError {
    fn from(err: r2d2::Error) -> Self {
        ProductError::DatabaseError(err.to_string())
    }
}
