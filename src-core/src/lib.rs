pub mod db;
pub mod errors;
pub mod ids;
pub mod schema;

pub mod customers;
pub mod product_prices;
pub mod products;
pub mod quotations;
pub mod regions;
pub mod users;

pub use errors::{Error, Result};
