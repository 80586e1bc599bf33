use std::sync::Arc;

use async_trait::async_trait;

use crate::db::{get_connection, DbPool, DbTransactionExecutor};
use crate::products::{ProductError, Result};

use super::products_model::{NewProduct, Product, ProductFilter, ProductUpdate};
use super::products_repository::ProductRepository;
use super::products_traits::ProductServiceTrait;

/// Service for managing products
pub struct ProductService {
    pool: Arc<DbPool>,
    repository: ProductRepository,
}

impl ProductService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self {
            pool,
            repository: ProductRepository::new(),
        }
    }
}

#[async_trait]
impl ProductServiceTrait for ProductService {
    async fn create(&self, new_product: NewProduct) -> Result<Product> {
        new_product.validate()?;
        self.pool
            .execute(|conn| self.repository.create(conn, &new_product))
    }

    fn retrieve(&self, product_id: &str) -> Result<Product> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| ProductError::DatabaseError(e.to_string()))?;
        self.repository.get_by_id(&mut conn, product_id)
    }

    fn list(&self, filter: ProductFilter) -> Result<Vec<Product>> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| ProductError::DatabaseError(e.to_string()))?;
        self.repository.list(&mut conn, &filter)
    }

    fn list_brands(&self) -> Result<Vec<String>> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| ProductError::DatabaseError(e.to_string()))?;
        self.repository.list_brands(&mut conn)
    }

    async fn update(&self, product_id: String, update: ProductUpdate) -> Result<Product> {
        self.pool
            .execute(|conn| self.repository.update(conn, &product_id, &update))
    }

    fn delete(&self, product_id: &str) -> Result<()> {
        self.pool
            .execute(|conn| self.repository.soft_delete(conn, product_id))
    }

    async fn add_additional_hardware(
        &self,
        product_parent_id: String,
        product_additions_id: String,
    ) -> Result<()> {
        if product_parent_id == product_additions_id {
            return Err(ProductError::InvalidData(
                "A product cannot be additional hardware of itself".to_string(),
            ));
        }

        self.pool.execute(|conn| {
            let parent = self.repository.find_row(conn, &product_parent_id)?;
            if parent.is_none() {
                return Err(ProductError::InvalidData("Invalid product ID".to_string()));
            }
            let addition = self.repository.find_row(conn, &product_additions_id)?;
            if addition.is_none() {
                return Err(ProductError::InvalidData("Invalid product ID".to_string()));
            }

            self.repository
                .insert_additional_hardware(conn, &product_parent_id, &product_additions_id)
        })
    }

    fn list_additional_hardware(&self, product_parent_id: &str) -> Result<Vec<Product>> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| ProductError::DatabaseError(e.to_string()))?;
        self.repository
            .list_additional_hardware(&mut conn, product_parent_id)
    }
}
