pub(crate) mod products_errors;
pub(crate) mod products_model;
pub(crate) mod products_repository;
pub(crate) mod products_service;
pub(crate) mod products_traits;

pub use products_errors::{ProductError, Result};
pub use products_model::{NewProduct, Product, ProductDB, ProductFilter, ProductUpdate};
pub use products_repository::ProductRepository;
pub use products_service::ProductService;
pub use products_traits::ProductServiceTrait;
