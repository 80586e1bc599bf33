use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::db::{get_connection, DbConnection, DbPool, DbTransactionExecutor};
use crate::product_prices::ProductPriceRepository;
use crate::quotations::{QuotationError, Result};

use super::quotations_model::{
    FindQuotationConfig, NewQuotation, PricedLine, Quotation, QuotationFilter,
};
use super::quotations_repository::QuotationRepository;
use super::quotations_traits::QuotationServiceTrait;

/// Service orchestrating quotation aggregates: price resolution, persistence
/// and relation-aware reads. Every write runs inside one transaction.
pub struct QuotationService {
    pool: Arc<DbPool>,
    repository: QuotationRepository,
    product_price_repository: ProductPriceRepository,
}

impl QuotationService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self {
            pool,
            repository: QuotationRepository::new(),
            product_price_repository: ProductPriceRepository::new(),
        }
    }

    /// Splits the free-text term off the structured filter, mirroring how
    /// list queries are prepared before hitting the repository.
    fn prepare_list_query(filter: QuotationFilter) -> (Option<String>, QuotationFilter) {
        let mut filter = filter;
        let q = filter.q.take();
        (q, filter)
    }

    /// Converts requested lines into persistable ones by looking up the
    /// region-scoped unit price per product. Lines (and children) without a
    /// matching price are dropped silently; a child referencing its parent's
    /// product is excluded outright.
    fn resolve_prices(
        &self,
        conn: &mut DbConnection,
        input: &NewQuotation,
    ) -> Result<Vec<PricedLine>> {
        let mut priced_lines = Vec::new();
        let Some(line_inputs) = &input.quotation_lines else {
            return Ok(priced_lines);
        };

        for item in line_inputs {
            let price = self
                .product_price_repository
                .find_by_product_and_region(conn, &item.product_id, &input.region_id)
                .map_err(|e| QuotationError::DatabaseError(e.to_string()))?;

            let Some(price) = price else {
                debug!(
                    "No price for product {} in region {}, dropping line",
                    item.product_id, input.region_id
                );
                continue;
            };

            let mut line = PricedLine {
                product_id: item.product_id.clone(),
                volume: item.volume,
                unit_price: price.price,
                child_product: Vec::new(),
            };

            if let Some(children) = &item.child_product {
                for child in children {
                    if child.product_id == item.product_id {
                        continue;
                    }

                    let child_price = self
                        .product_price_repository
                        .find_by_product_and_region(conn, &child.product_id, &input.region_id)
                        .map_err(|e| QuotationError::DatabaseError(e.to_string()))?;

                    let Some(child_price) = child_price else {
                        debug!(
                            "No price for child product {} in region {}, dropping child line",
                            child.product_id, input.region_id
                        );
                        continue;
                    };

                    line.child_product.push(PricedLine {
                        product_id: child.product_id.clone(),
                        volume: child.volume,
                        unit_price: child_price.price,
                        child_product: Vec::new(),
                    });
                }
            }

            priced_lines.push(line);
        }

        Ok(priced_lines)
    }
}

#[async_trait]
impl QuotationServiceTrait for QuotationService {
    async fn create(&self, input: NewQuotation) -> Result<Quotation> {
        input.validate()?;
        debug!("Creating quotation {}", input.code);

        self.pool.execute(|conn| {
            let priced_lines = self.resolve_prices(conn, &input)?;
            let quotation_id = self.repository.insert(conn, &input, &priced_lines)?;

            // Fresh read of the persisted aggregate; the caller decides which
            // relations to expand afterwards.
            let filter = QuotationFilter {
                id: Some(vec![quotation_id.clone()]),
                ..Default::default()
            };
            self.repository
                .find_one_with_relations(conn, &[], &filter, &FindQuotationConfig::default())?
                .ok_or_else(|| {
                    QuotationError::NotFound(format!(
                        "Quotation with id: {} was not found",
                        quotation_id
                    ))
                })
        })
    }

    fn retrieve(&self, quotation_id: &str, config: FindQuotationConfig) -> Result<Quotation> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| QuotationError::DatabaseError(e.to_string()))?;

        let filter = QuotationFilter {
            id: Some(vec![quotation_id.to_string()]),
            ..Default::default()
        };
        let relations = config.relations.clone();

        self.repository
            .find_one_with_relations(&mut conn, &relations, &filter, &config)?
            .ok_or_else(|| {
                QuotationError::NotFound(format!(
                    "Quotation with id: {} was not found",
                    quotation_id
                ))
            })
    }

    fn list(&self, filter: QuotationFilter, config: FindQuotationConfig) -> Result<Vec<Quotation>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| QuotationError::DatabaseError(e.to_string()))?;

        let (q, filter) = Self::prepare_list_query(filter);
        let relations = config.relations.clone();

        if let Some(q) = q {
            let (quotations, _) = self.repository.free_text_search_and_count(
                &mut conn,
                &q,
                &filter,
                &config,
                &relations,
            )?;
            return Ok(quotations);
        }

        self.repository
            .find_with_relations(&mut conn, &relations, &filter, &config)
    }

    fn list_and_count(
        &self,
        filter: QuotationFilter,
        config: FindQuotationConfig,
        region_scope: Option<String>,
    ) -> Result<(Vec<Quotation>, i64)> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| QuotationError::DatabaseError(e.to_string()))?;

        let (q, mut filter) = Self::prepare_list_query(filter);
        if let Some(region_id) = region_scope {
            if !region_id.is_empty() {
                filter.region_id = Some(region_id);
            }
        }
        let relations = config.relations.clone();

        if let Some(q) = q {
            return self.repository.free_text_search_and_count(
                &mut conn,
                &q,
                &filter,
                &config,
                &relations,
            );
        }

        self.repository
            .find_with_relations_and_count(&mut conn, &relations, &filter, &config)
    }

    /// Idempotent: deleting a missing or already-deleted quotation is a
    /// no-op. Otherwise the aggregate and its line tree are soft-deleted.
    fn delete(&self, quotation_id: &str) -> Result<()> {
        self.pool.execute(|conn| {
            let existing = self.repository.find_row_by_id(conn, quotation_id, false)?;
            if existing.is_none() {
                return Ok(());
            }

            self.repository.soft_delete(conn, quotation_id)
        })
    }
}
