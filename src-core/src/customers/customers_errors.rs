use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Custom error type for customer-related operations
#[derive(Debug, Error)]
pub enum CustomerError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Duplicate: {0}")]
    Duplicate(String),
}

pub type Result<T> = std::result::Result<T, CustomerError>;

impl From<DieselError> for CustomerError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => CustomerError::NotFound("Record not found".to_string()),
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                CustomerError::Duplicate(info.message().to_string())
            }
            _ => CustomerError::DatabaseError(err.to_string()),
        }
    }
}

impl From<r2d2::Error> for CustomerError {
    fn from(err: r2d2::Error) -> Self {
        CustomerError::DatabaseError(err.to_string())
    }
}
