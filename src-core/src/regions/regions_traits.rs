use async_trait::async_trait;

use super::regions_model::{NewRegion, Region, RegionUpdate};
use crate::product_prices::ProductPrice;
use crate::regions::Result;

/// Trait defining the contract for region service operations.
#[async_trait]
pub trait RegionServiceTrait: Send + Sync {
    async fn create(&self, new_region: NewRegion) -> Result<Region>;
    fn retrieve(&self, region_id: &str) -> Result<Region>;
    fn list(&self) -> Result<Vec<Region>>;
    async fn update(&self, region_id: String, update: RegionUpdate) -> Result<Region>;
    fn delete(&self, region_id: &str) -> Result<()>;
    async fn set_product_price(
        &self,
        region_id: String,
        product_id: String,
        price: i64,
    ) -> Result<Region>;
    fn list_product_prices(&self, region_id: &str) -> Result<Vec<ProductPrice>>;
}
