pub(crate) mod customers_errors;
pub(crate) mod customers_model;
pub(crate) mod customers_repository;
pub(crate) mod customers_service;
pub(crate) mod customers_traits;

pub use customers_errors::{CustomerError, Result};
pub use customers_model::{Customer, CustomerDB, CustomerUpdate, NewCustomer};
pub use customers_repository::CustomerRepository;
pub use customers_service::CustomerService;
pub use customers_traits::CustomerServiceTrait;
