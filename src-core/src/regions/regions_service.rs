use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::db::{get_connection, DbPool, DbTransactionExecutor};
use crate::product_prices::{ProductPrice, ProductPriceRepository};
use crate::products::ProductRepository;
use crate::regions::{RegionError, Result};

use super::regions_model::{NewRegion, Region, RegionUpdate};
use super::regions_repository::RegionRepository;
use super::regions_traits::RegionServiceTrait;

/// Service for managing regions and their product prices
pub struct RegionService {
    pool: Arc<DbPool>,
    repository: RegionRepository,
    product_repository: ProductRepository,
    product_price_repository: ProductPriceRepository,
}

impl RegionService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self {
            pool,
            repository: RegionRepository::new(),
            product_repository: ProductRepository::new(),
            product_price_repository: ProductPriceRepository::new(),
        }
    }
}

#[async_trait]
impl RegionServiceTrait for RegionService {
    async fn create(&self, new_region: NewRegion) -> Result<Region> {
        new_region.validate()?;
        self.pool
            .execute(|conn| self.repository.create(conn, &new_region))
    }

    fn retrieve(&self, region_id: &str) -> Result<Region> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| RegionError::DatabaseError(e.to_string()))?;
        self.repository.get_by_id(&mut conn, region_id)
    }

    fn list(&self) -> Result<Vec<Region>> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| RegionError::DatabaseError(e.to_string()))?;
        self.repository.list(&mut conn)
    }

    async fn update(&self, region_id: String, update: RegionUpdate) -> Result<Region> {
        self.pool
            .execute(|conn| self.repository.update(conn, &region_id, &update))
    }

    fn delete(&self, region_id: &str) -> Result<()> {
        self.pool
            .execute(|conn| self.repository.soft_delete(conn, region_id))
    }

    /// Sets the unit price of a product within a region. A positive price
    /// creates or updates the mapping; zero or below removes it.
    async fn set_product_price(
        &self,
        region_id: String,
        product_id: String,
        price: i64,
    ) -> Result<Region> {
        debug!(
            "Setting price of product {} in region {} to {}",
            product_id, region_id, price
        );

        self.pool.execute(|conn| {
            let product = self
                .product_repository
                .find_row(conn, &product_id)
                .map_err(|e| RegionError::DatabaseError(e.to_string()))?;
            if product.is_none() {
                return Err(RegionError::InvalidData("Invalid product ID".to_string()));
            }

            let region = self.repository.find_row(conn, &region_id)?;
            if region.is_none() {
                return Err(RegionError::InvalidData("Invalid region ID".to_string()));
            }

            if price > 0 {
                self.product_price_repository
                    .upsert(conn, &product_id, &region_id, price)
                    .map_err(|e| RegionError::DatabaseError(e.to_string()))?;
            } else {
                self.product_price_repository
                    .delete_by_product_and_region(conn, &product_id, &region_id)
                    .map_err(|e| RegionError::DatabaseError(e.to_string()))?;
            }

            self.repository.get_by_id(conn, &region_id)
        })
    }

    fn list_product_prices(&self, region_id: &str) -> Result<Vec<ProductPrice>> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| RegionError::DatabaseError(e.to_string()))?;
        self.product_price_repository
            .list_by_region(&mut conn, region_id)
            .map_err(|e| RegionError::DatabaseError(e.to_string()))
    }
}
