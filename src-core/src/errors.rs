use diesel::result::Error as DieselError;
use thiserror::Error;

use crate::customers::CustomerError;
use crate::product_prices::ProductPriceError;
use crate::products::ProductError;
use crate::quotations::QuotationError;
use crate::regions::RegionError;
use crate::users::UserError;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the backend
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(String),

    #[error("Quotation error: {0}")]
    Quotation(#[from] QuotationError),

    #[error("Product price error: {0}")]
    ProductPrice(#[from] ProductPriceError),

    #[error("Customer error: {0}")]
    Customer(#[from] CustomerError),

    #[error("Product error: {0}")]
    Product(#[from] ProductError),

    #[error("Region error: {0}")]
    Region(#[from] RegionError),

    #[error("User error: {0}")]
    User(#[from] UserError),
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(#[from] diesel::result::ConnectionError),

    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(#[from] r2d2::Error),

    #[error("Database query failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Database migration failed: {0}")]
    MigrationFailed(String),
}

/// Coarse category used by callers that map errors onto a wire protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    InvalidData,
    Duplicate,
    Database,
}

impl Error {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Database(_) => ErrorCategory::Database,
            Error::Validation(_) => ErrorCategory::InvalidData,
            Error::Quotation(e) => match e {
                QuotationError::NotFound(_) => ErrorCategory::NotFound,
                QuotationError::InvalidData(_) => ErrorCategory::InvalidData,
                QuotationError::Duplicate(_) => ErrorCategory::Duplicate,
                QuotationError::DatabaseError(_) => ErrorCategory::Database,
            },
            Error::ProductPrice(e) => match e {
                ProductPriceError::NotFound(_) => ErrorCategory::NotFound,
                ProductPriceError::DatabaseError(_) => ErrorCategory::Database,
            },
            Error::Customer(e) => match e {
                CustomerError::NotFound(_) => ErrorCategory::NotFound,
                CustomerError::InvalidData(_) => ErrorCategory::InvalidData,
                CustomerError::Duplicate(_) => ErrorCategory::Duplicate,
                CustomerError::DatabaseError(_) => ErrorCategory::Database,
            },
            Error::Product(e) => match e {
                ProductError::NotFound(_) => ErrorCategory::NotFound,
                ProductError::InvalidData(_) => ErrorCategory::InvalidData,
                ProductError::Duplicate(_) => ErrorCategory::Duplicate,
                ProductError::DatabaseError(_) => ErrorCategory::Database,
            },
            Error::Region(e) => match e {
                RegionError::NotFound(_) => ErrorCategory::NotFound,
                RegionError::InvalidData(_) => ErrorCategory::InvalidData,
                RegionError::Duplicate(_) => ErrorCategory::Duplicate,
                RegionError::DatabaseError(_) => ErrorCategory::Database,
            },
            Error::User(e) => match e {
                UserError::NotFound(_) => ErrorCategory::NotFound,
                UserError::InvalidData(_) => ErrorCategory::InvalidData,
                UserError::Duplicate(_) => ErrorCategory::Duplicate,
                UserError::DatabaseError(_) => ErrorCategory::Database,
            },
        }
    }
}

impl From<DieselError> for Error {
    fn from(err: DieselError) -> Self {
        Error::Database(DatabaseError::QueryFailed(err))
    }
}

impl From<r2d2::Error> for Error {
    fn from(e: r2d2::Error) -> Self {
        Error::Database(DatabaseError::PoolCreationFailed(e))
    }
}

impl From<diesel::result::ConnectionError> for Error {
    fn from(e: diesel::result::ConnectionError) -> Self {
        Error::Database(DatabaseError::ConnectionFailed(e))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Validation(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(err.to_string())
    }
}
