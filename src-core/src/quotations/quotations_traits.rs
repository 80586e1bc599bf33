use async_trait::async_trait;

use super::quotations_model::{FindQuotationConfig, NewQuotation, Quotation, QuotationFilter};
use crate::quotations::Result;

/// Trait defining the contract for quotation service operations.
#[async_trait]
pub trait QuotationServiceTrait: Send + Sync {
    async fn create(&self, input: NewQuotation) -> Result<Quotation>;
    fn retrieve(&self, quotation_id: &str, config: FindQuotationConfig) -> Result<Quotation>;
    fn list(&self, filter: QuotationFilter, config: FindQuotationConfig) -> Result<Vec<Quotation>>;
    fn list_and_count(
        &self,
        filter: QuotationFilter,
        config: FindQuotationConfig,
        region_scope: Option<String>,
    ) -> Result<(Vec<Quotation>, i64)>;
    fn delete(&self, quotation_id: &str) -> Result<()>;
}
