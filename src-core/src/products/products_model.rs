use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Domain model representing a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Database model for products
#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct ProductDB {
    pub id: String,
    pub title: String,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

/// Link row marking a product as purchasable alongside a parent product.
#[derive(Queryable, Selectable, Identifiable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::product_additional_hardware)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProductAdditionalHardwareDB {
    pub id: String,
    pub product_parent_id: String,
    pub product_additions_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

/// Input model for creating a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<JsonValue>,
}

impl NewProduct {
    pub fn validate(&self) -> crate::products::Result<()> {
        if self.title.trim().is_empty() {
            return Err(crate::products::ProductError::InvalidData(
                "Title cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Input model for updating a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<JsonValue>,
}

/// Structured filter for product listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilter {
    pub q: Option<String>,
    pub brand: Option<String>,
}

fn parse_metadata(raw: Option<String>) -> Option<JsonValue> {
    raw.and_then(|m| serde_json::from_str(&m).ok())
}

impl From<ProductDB> for Product {
    fn from(db: ProductDB) -> Self {
        Self {
            id: db.id,
            title: db.title,
            brand: db.brand,
            description: db.description,
            metadata: parse_metadata(db.metadata),
            created_at: DateTime::from_naive_utc_and_offset(db.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(db.updated_at, Utc),
            deleted_at: db
                .deleted_at
                .map(|d| DateTime::from_naive_utc_and_offset(d, Utc)),
        }
    }
}
