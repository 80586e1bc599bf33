use async_trait::async_trait;

use super::products_model::{NewProduct, Product, ProductFilter, ProductUpdate};
use crate::products::Result;

/// Trait defining the contract for product service operations.
#[async_trait]
pub trait ProductServiceTrait: Send + Sync {
    async fn create(&self, new_product: NewProduct) -> Result<Product>;
    fn retrieve(&self, product_id: &str) -> Result<Product>;
    fn list(&self, filter: ProductFilter) -> Result<Vec<Product>>;
    fn list_brands(&self) -> Result<Vec<String>>;
    async fn update(&self, product_id: String, update: ProductUpdate) -> Result<Product>;
    fn delete(&self, product_id: &str) -> Result<()>;
    async fn add_additional_hardware(
        &self,
        product_parent_id: String,
        product_additions_id: String,
    ) -> Result<()>;
    fn list_additional_hardware(&self, product_parent_id: &str) -> Result<Vec<Product>>;
}
