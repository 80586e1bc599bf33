pub(crate) mod product_prices_errors;
pub(crate) mod product_prices_model;
pub(crate) mod product_prices_repository;

pub use product_prices_errors::{ProductPriceError, Result};
pub use product_prices_model::{ProductPrice, ProductPriceDB};
pub use product_prices_repository::ProductPriceRepository;
