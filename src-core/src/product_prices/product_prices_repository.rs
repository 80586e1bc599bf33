use chrono::Utc;
use diesel::prelude::*;

use crate::db::DbConnection;
use crate::ids::generate_entity_id;
use crate::product_prices::Result;
use crate::schema::product_prices;

use super::product_prices_model::{ProductPrice, ProductPriceDB};

/// Repository for the region-scoped unit price table.
pub struct ProductPriceRepository;

impl ProductPriceRepository {
    pub fn new() -> Self {
        Self
    }

    /// Exact-match lookup; `None` means "no price in this region".
    pub fn find_by_product_and_region(
        &self,
        conn: &mut DbConnection,
        product_id: &str,
        region_id: &str,
    ) -> Result<Option<ProductPrice>> {
        Ok(product_prices::table
            .filter(product_prices::product_id.eq(product_id))
            .filter(product_prices::region_id.eq(region_id))
            .filter(product_prices::deleted_at.is_null())
            .first::<ProductPriceDB>(conn)
            .optional()?
            .map(ProductPrice::from))
    }

    pub fn list_by_region(
        &self,
        conn: &mut DbConnection,
        region_id: &str,
    ) -> Result<Vec<ProductPrice>> {
        Ok(product_prices::table
            .filter(product_prices::region_id.eq(region_id))
            .filter(product_prices::deleted_at.is_null())
            .order(product_prices::product_id.asc())
            .load::<ProductPriceDB>(conn)?
            .into_iter()
            .map(ProductPrice::from)
            .collect())
    }

    /// Creates or updates the price row for the (product, region) pair.
    pub fn upsert(
        &self,
        conn: &mut DbConnection,
        product_id: &str,
        region_id: &str,
        price: i64,
    ) -> Result<ProductPrice> {
        let now = Utc::now().naive_utc();

        let existing = product_prices::table
            .filter(product_prices::product_id.eq(product_id))
            .filter(product_prices::region_id.eq(region_id))
            .filter(product_prices::deleted_at.is_null())
            .first::<ProductPriceDB>(conn)
            .optional()?;

        if let Some(mut row) = existing {
            row.price = price;
            row.updated_at = now;
            diesel::update(product_prices::table.find(&row.id))
                .set(&row)
                .execute(conn)?;
            return Ok(row.into());
        }

        let row = ProductPriceDB {
            id: generate_entity_id("prod_price"),
            product_id: product_id.to_string(),
            region_id: region_id.to_string(),
            price,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        diesel::insert_into(product_prices::table)
            .values(&row)
            .execute(conn)?;
        Ok(row.into())
    }

    /// Removes the price row for the pair, if one exists.
    pub fn delete_by_product_and_region(
        &self,
        conn: &mut DbConnection,
        product_id: &str,
        region_id: &str,
    ) -> Result<usize> {
        Ok(diesel::delete(
            product_prices::table
                .filter(product_prices::product_id.eq(product_id))
                .filter(product_prices::region_id.eq(region_id)),
        )
        .execute(conn)?)
    }
}
