use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Domain model representing a customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub metadata: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Database model for customers
#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::customers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct CustomerDB {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub metadata: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

/// Input model for creating a customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCustomer {
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub metadata: Option<JsonValue>,
}

impl NewCustomer {
    pub fn validate(&self) -> crate::customers::Result<()> {
        if self.email.trim().is_empty() {
            return Err(crate::customers::CustomerError::InvalidData(
                "Email cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Input model for updating a customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub metadata: Option<JsonValue>,
}

fn parse_metadata(raw: Option<String>) -> Option<JsonValue> {
    raw.and_then(|m| serde_json::from_str(&m).ok())
}

impl From<CustomerDB> for Customer {
    fn from(db: CustomerDB) -> Self {
        Self {
            id: db.id,
            email: db.email,
            name: db.name,
            phone: db.phone,
            company: db.company,
            metadata: parse_metadata(db.metadata),
            created_at: DateTime::from_naive_utc_and_offset(db.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(db.updated_at, Utc),
            deleted_at: db
                .deleted_at
                .map(|d| DateTime::from_naive_utc_and_offset(d, Utc)),
        }
    }
}
