use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::customers::{CustomerError, Result};
use crate::db::{get_connection, DbPool, DbTransactionExecutor};

use super::customers_model::{Customer, CustomerUpdate, NewCustomer};
use super::customers_repository::CustomerRepository;
use super::customers_traits::CustomerServiceTrait;

/// Service for managing customers
pub struct CustomerService {
    pool: Arc<DbPool>,
    repository: CustomerRepository,
}

impl CustomerService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self {
            pool,
            repository: CustomerRepository::new(),
        }
    }
}

#[async_trait]
impl CustomerServiceTrait for CustomerService {
    async fn create(&self, new_customer: NewCustomer) -> Result<Customer> {
        new_customer.validate()?;
        debug!("Creating customer {}", new_customer.email);

        self.pool
            .execute(|conn| self.repository.create(conn, &new_customer))
    }

    fn retrieve(&self, customer_id: &str) -> Result<Customer> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| CustomerError::DatabaseError(e.to_string()))?;
        self.repository.get_by_id(&mut conn, customer_id)
    }

    fn list(&self) -> Result<Vec<Customer>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| CustomerError::DatabaseError(e.to_string()))?;
        self.repository.list(&mut conn)
    }

    async fn update(&self, customer_id: String, update: CustomerUpdate) -> Result<Customer> {
        self.pool
            .execute(|conn| self.repository.update(conn, &customer_id, &update))
    }

    /// Idempotent: deleting an unknown customer is a no-op.
    fn delete(&self, customer_id: &str) -> Result<()> {
        self.pool
            .execute(|conn| self.repository.soft_delete(conn, customer_id))
    }
}
