use chrono::Utc;
use diesel::prelude::*;

use crate::db::DbConnection;
use crate::ids::generate_entity_id;
use crate::products::{ProductError, Result};
use crate::schema::{product_additional_hardware, products};

use super::products_model::{
    NewProduct, Product, ProductAdditionalHardwareDB, ProductDB, ProductFilter, ProductUpdate,
};

/// Repository for managing product rows and the additional-hardware links.
pub struct ProductRepository;

impl ProductRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn create(&self, conn: &mut DbConnection, new_product: &NewProduct) -> Result<Product> {
        let now = Utc::now().naive_utc();
        let row = ProductDB {
            id: generate_entity_id("prod"),
            title: new_product.title.clone(),
            brand: new_product.brand.clone(),
            description: new_product.description.clone(),
            metadata: serialize_metadata(&new_product.metadata)?,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        diesel::insert_into(products::table)
            .values(&row)
            .execute(conn)?;

        Ok(row.into())
    }

    pub fn get_by_id(&self, conn: &mut DbConnection, product_id: &str) -> Result<Product> {
        self.find_row(conn, product_id)?
            .map(Product::from)
            .ok_or_else(|| {
                ProductError::NotFound(format!("Product with id {} not found", product_id))
            })
    }

    pub fn find_row(&self, conn: &mut DbConnection, product_id: &str) -> Result<Option<ProductDB>> {
        Ok(products::table
            .filter(products::id.eq(product_id))
            .filter(products::deleted_at.is_null())
            .first::<ProductDB>(conn)
            .optional()?)
    }

    pub fn list(&self, conn: &mut DbConnection, filter: &ProductFilter) -> Result<Vec<Product>> {
        let mut query = products::table
            .filter(products::deleted_at.is_null())
            .into_boxed();

        if let Some(brand) = &filter.brand {
            query = query.filter(products::brand.eq(brand.clone()));
        }
        if let Some(q) = &filter.q {
            query = query.filter(products::title.like(format!("%{}%", q)));
        }

        query
            .order(products::title.asc())
            .load::<ProductDB>(conn)
            .map(|rows| rows.into_iter().map(Product::from).collect())
            .map_err(ProductError::from)
    }

    /// Distinct brand values of live products.
    pub fn list_brands(&self, conn: &mut DbConnection) -> Result<Vec<String>> {
        Ok(products::table
            .filter(products::deleted_at.is_null())
            .filter(products::brand.is_not_null())
            .select(products::brand)
            .distinct()
            .order(products::brand.asc())
            .load::<Option<String>>(conn)?
            .into_iter()
            .flatten()
            .collect())
    }

    pub fn update(
        &self,
        conn: &mut DbConnection,
        product_id: &str,
        update: &ProductUpdate,
    ) -> Result<Product> {
        let mut row = self.find_row(conn, product_id)?.ok_or_else(|| {
            ProductError::NotFound(format!("Product with id {} not found", product_id))
        })?;

        if let Some(title) = &update.title {
            row.title = title.clone();
        }
        if let Some(brand) = &update.brand {
            row.brand = Some(brand.clone());
        }
        if let Some(description) = &update.description {
            row.description = Some(description.clone());
        }
        if update.metadata.is_some() {
            row.metadata = serialize_metadata(&update.metadata)?;
        }
        row.updated_at = Utc::now().naive_utc();

        diesel::update(products::table.find(&row.id))
            .set(&row)
            .execute(conn)?;

        Ok(row.into())
    }

    pub fn soft_delete(&self, conn: &mut DbConnection, product_id: &str) -> Result<()> {
        let now = Utc::now().naive_utc();
        diesel::update(
            products::table
                .filter(products::id.eq(product_id))
                .filter(products::deleted_at.is_null()),
        )
        .set((products::deleted_at.eq(now), products::updated_at.eq(now)))
        .execute(conn)?;
        Ok(())
    }

    pub fn insert_additional_hardware(
        &self,
        conn: &mut DbConnection,
        product_parent_id: &str,
        product_additions_id: &str,
    ) -> Result<()> {
        let now = Utc::now().naive_utc();
        let row = ProductAdditionalHardwareDB {
            id: generate_entity_id("prod_additions"),
            product_parent_id: product_parent_id.to_string(),
            product_additions_id: product_additions_id.to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        diesel::insert_into(product_additional_hardware::table)
            .values(&row)
            .execute(conn)?;
        Ok(())
    }

    /// Products linked to the given parent as additional hardware.
    pub fn list_additional_hardware(
        &self,
        conn: &mut DbConnection,
        product_parent_id: &str,
    ) -> Result<Vec<Product>> {
        let addition_ids: Vec<String> = product_additional_hardware::table
            .filter(product_additional_hardware::product_parent_id.eq(product_parent_id))
            .filter(product_additional_hardware::deleted_at.is_null())
            .select(product_additional_hardware::product_additions_id)
            .load::<String>(conn)?;

        Ok(products::table
            .filter(products::id.eq_any(addition_ids))
            .filter(products::deleted_at.is_null())
            .order(products::title.asc())
            .load::<ProductDB>(conn)?
            .into_iter()
            .map(Product::from)
            .collect())
    }
}

fn serialize_metadata(metadata: &Option<serde_json::Value>) -> Result<Option<String>> {
    match metadata {
        Some(value) => serde_json::to_string(value)
            .map(Some)
            .map_err(|e| ProductError::InvalidData(e.to_string())),
        None => Ok(None),
    }
}
