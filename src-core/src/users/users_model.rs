use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::regions::Region;

/// Role of a backend user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    SaleMan,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::SaleMan => "sale_man",
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "sale_man" => Ok(UserRole::SaleMan),
            _ => Err(format!("Unknown user role: {}", s)),
        }
    }
}

/// Domain model representing a user. The password hash never leaves the
/// persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub role: UserRole,
    pub metadata: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    /// Regions this user may sell into. Populated on reads that hydrate the
    /// assignment, `None` otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<Region>>,
}

/// Database model for users
#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub role: String,
    pub password_hash: Option<String>,
    pub api_token: Option<String>,
    pub metadata: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

/// Join row for the user <-> region assignment
#[derive(Queryable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::user_region)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRegionDB {
    pub user_id: String,
    pub region_id: String,
}

/// Input model for creating a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<UserRole>,
    pub password: Option<String>,
    pub regions: Option<Vec<String>>,
    pub metadata: Option<JsonValue>,
}

/// Input model for updating a user. The email is read-only once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<UserRole>,
    pub regions: Option<Vec<String>>,
    pub metadata: Option<JsonValue>,
}

fn parse_metadata(raw: Option<String>) -> Option<JsonValue> {
    raw.and_then(|m| serde_json::from_str(&m).ok())
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id,
            email: db.email,
            name: db.name,
            phone: db.phone,
            role: UserRole::from_str(&db.role).unwrap_or(UserRole::SaleMan),
            metadata: parse_metadata(db.metadata),
            created_at: DateTime::from_naive_utc_and_offset(db.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(db.updated_at, Utc),
            deleted_at: db
                .deleted_at
                .map(|d| DateTime::from_naive_utc_and_offset(d, Utc)),
            regions: None,
        }
    }
}

/// Validates and normalizes an email address. Matching is intentionally
/// loose; the authoritative check is the unique index on live rows.
pub fn validate_email(email: &str) -> crate::users::Result<String> {
    let trimmed = email.trim();
    let parts: Vec<&str> = trimmed.split('@').collect();
    let valid = parts.len() == 2
        && !parts[0].is_empty()
        && parts[1].contains('.')
        && !parts[1].starts_with('.')
        && !parts[1].ends_with('.');

    if !valid {
        return Err(crate::users::UserError::InvalidData(format!(
            "{} is not a valid email",
            email
        )));
    }

    Ok(trimmed.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_and_normalizes_valid_emails() {
        assert_eq!(
            validate_email("Sales@Example.COM").unwrap(),
            "sales@example.com"
        );
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in ["", "no-at-sign", "a@b", "a@.com", "@example.com"] {
            assert!(validate_email(email).is_err(), "accepted {:?}", email);
        }
    }

    #[test]
    fn role_round_trips_through_str() {
        assert_eq!(UserRole::from_str("admin").unwrap(), UserRole::Admin);
        assert_eq!(UserRole::SaleMan.as_str(), "sale_man");
        assert!(UserRole::from_str("intern").is_err());
    }
}
