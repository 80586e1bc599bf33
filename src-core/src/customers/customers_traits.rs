use async_trait::async_trait;

use super::customers_model::{Customer, CustomerUpdate, NewCustomer};
use crate::customers::Result;

/// Trait defining the contract for customer service operations.
#[async_trait]
pub trait CustomerServiceTrait: Send + Sync {
    async fn create(&self, new_customer: NewCustomer) -> Result<Customer>;
    fn retrieve(&self, customer_id: &str) -> Result<Customer>;
    fn list(&self) -> Result<Vec<Customer>>;
    async fn update(&self, customer_id: String, update: CustomerUpdate) -> Result<Customer>;
    fn delete(&self, customer_id: &str) -> Result<()>;
}
