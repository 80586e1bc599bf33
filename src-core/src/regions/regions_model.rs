use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Domain model representing a sales region
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
    pub currency_code: Option<String>,
    pub metadata: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Database model for regions
#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::regions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct RegionDB {
    pub id: String,
    pub name: String,
    pub currency_code: Option<String>,
    pub metadata: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

/// Input model for creating a region
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRegion {
    pub name: String,
    pub currency_code: Option<String>,
    pub metadata: Option<JsonValue>,
}

impl NewRegion {
    pub fn validate(&self) -> crate::regions::Result<()> {
        if self.name.trim().is_empty() {
            return Err(crate::regions::RegionError::InvalidData(
                "Name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Input model for updating a region
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionUpdate {
    pub name: Option<String>,
    pub currency_code: Option<String>,
    pub metadata: Option<JsonValue>,
}

fn parse_metadata(raw: Option<String>) -> Option<JsonValue> {
    raw.and_then(|m| serde_json::from_str(&m).ok())
}

impl From<RegionDB> for Region {
    fn from(db: RegionDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            currency_code: db.currency_code,
            metadata: parse_metadata(db.metadata),
            created_at: DateTime::from_naive_utc_and_offset(db.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(db.updated_at, Utc),
            deleted_at: db
                .deleted_at
                .map(|d| DateTime::from_naive_utc_and_offset(d, Utc)),
        }
    }
}
