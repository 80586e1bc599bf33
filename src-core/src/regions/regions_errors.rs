use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Custom error type for region-related operations
#[derive(Debug, Error)]
pub enum RegionError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Duplicate: {0}")]
    Duplicate(String),
}

pub type Result<T> = std::result::Result<T, RegionError>;

impl From<DieselError> for RegionError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RegionError::NotFound("Record not found".to_string()),
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                RegionError::Duplicate(info.message().to_string())
            }
            _ => RegionError::DatabaseError(err.to_string()),
        }
    }
}

impl From<r2d2::Error> for RegionError {
    fn from(err: r2d2::Error) -> Self {
        RegionError::DatabaseError(err.to_string())
    }
}
