use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for product price operations
#[derive(Debug, Error)]
pub enum ProductPriceError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, ProductPriceError>;

impl From<DieselError> for ProductPriceError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => ProductPriceError::NotFound("Record not found".to_string()),
            _ => ProductPriceError::DatabaseError(err.to_string()),
        }
    }
}

impl From<r2d2::Error> for ProductPriceError {
    fn from(err: r2d2::Error) -> Self {
        ProductPriceError::DatabaseError(err.to_string())
    }
}
