use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A (product, region) -> unit price mapping. Quotation lines resolve their
/// prices against these rows at creation time; there is no later re-pricing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPrice {
    pub id: String,
    pub product_id: String,
    pub region_id: String,
    pub price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for product prices
#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::product_prices)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProductPriceDB {
    pub id: String,
    pub product_id: String,
    pub region_id: String,
    pub price: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

impl From<ProductPriceDB> for ProductPrice {
    fn from(db: ProductPriceDB) -> Self {
        Self {
            id: db.id,
            product_id: db.product_id,
            region_id: db.region_id,
            price: db.price,
            created_at: DateTime::from_naive_utc_and_offset(db.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(db.updated_at, Utc),
        }
    }
}
