use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::customers::Customer;
use crate::quotations::quotations_constants::DEFAULT_PAGE_SIZE;
use crate::regions::Region;
use crate::users::User;

/// Domain model representing a quotation aggregate. Relation fields are
/// `None` unless the read that produced this value hydrated them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quotation {
    pub id: String,
    pub sale_persion_id: Option<String>,
    pub customer_id: Option<String>,
    pub region_id: Option<String>,
    pub title: String,
    pub code: String,
    pub date: Option<NaiveDate>,
    pub heading: Option<String>,
    pub condition: Option<String>,
    pub payment_term: Option<String>,
    pub delivery_lead_time: Option<String>,
    pub warranty: Option<String>,
    pub install_support: Option<String>,
    pub appendix_a: Option<String>,
    pub appendix_b: Option<String>,
    pub metadata: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_persion: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quotation_lines: Option<Vec<QuotationLine>>,
}

/// One priced product entry within a quotation. `child_product` holds the
/// bundled lines nested under this one, when that relation was requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotationLine {
    pub id: String,
    pub quotation_id: Option<String>,
    pub parent_line_id: Option<String>,
    pub product_id: String,
    pub volume: i32,
    pub unit_price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_product: Option<Vec<QuotationLine>>,
}

/// Database model for quotations
#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::quotations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct QuotationDB {
    pub id: String,
    pub sale_persion_id: Option<String>,
    pub customer_id: Option<String>,
    pub region_id: Option<String>,
    pub title: String,
    pub code: String,
    pub date: Option<NaiveDate>,
    pub heading: Option<String>,
    pub condition: Option<String>,
    pub payment_term: Option<String>,
    pub delivery_lead_time: Option<String>,
    pub warranty: Option<String>,
    pub install_support: Option<String>,
    pub appendix_a: Option<String>,
    pub appendix_b: Option<String>,
    pub metadata: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

/// Database model for quotation lines. Top-level lines carry the
/// `quotation_id`; child lines carry `parent_line_id` instead.
#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::quotation_lines)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct QuotationLineDB {
    pub id: String,
    pub quotation_id: Option<String>,
    pub parent_line_id: Option<String>,
    pub product_id: String,
    pub volume: i32,
    pub unit_price: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

/// Input model for creating a quotation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuotation {
    pub sale_persion_id: String,
    pub customer_id: String,
    pub region_id: String,
    pub code: String,
    pub title: String,
    pub heading: String,
    pub condition: String,
    pub payment_term: String,
    pub delivery_lead_time: String,
    pub date: String,
    pub warranty: String,
    pub install_support: String,
    pub appendix_a: String,
    pub appendix_b: String,
    pub quotation_lines: Option<Vec<NewQuotationLine>>,
    pub metadata: Option<JsonValue>,
}

/// Requested line; the unit price is resolved server-side, never supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuotationLine {
    pub product_id: String,
    pub volume: i32,
    pub child_product: Option<Vec<NewQuotationChildLine>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuotationChildLine {
    pub product_id: String,
    pub volume: i32,
}

impl NewQuotation {
    pub fn validate(&self) -> crate::quotations::Result<()> {
        let required = [
            ("sale_persion_id", &self.sale_persion_id),
            ("customer_id", &self.customer_id),
            ("region_id", &self.region_id),
            ("code", &self.code),
            ("title", &self.title),
            ("heading", &self.heading),
            ("condition", &self.condition),
            ("payment_term", &self.payment_term),
            ("delivery_lead_time", &self.delivery_lead_time),
            ("date", &self.date),
            ("warranty", &self.warranty),
            ("install_support", &self.install_support),
            ("appendix_a", &self.appendix_a),
            ("appendix_b", &self.appendix_b),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(crate::quotations::QuotationError::InvalidData(format!(
                    "{} cannot be empty",
                    field
                )));
            }
        }

        self.parse_date()?;

        if let Some(lines) = &self.quotation_lines {
            if lines.is_empty() {
                return Err(crate::quotations::QuotationError::InvalidData(
                    "quotation_lines must contain at least 1 element".to_string(),
                ));
            }
            for line in lines {
                if line.volume < 1 {
                    return Err(crate::quotations::QuotationError::InvalidData(
                        "volume must be at least 1".to_string(),
                    ));
                }
                if let Some(children) = &line.child_product {
                    for child in children {
                        if child.volume < 1 {
                            return Err(crate::quotations::QuotationError::InvalidData(
                                "volume must be at least 1".to_string(),
                            ));
                        }
                    }
                }
            }
        }

        Ok(())
    }

    pub fn parse_date(&self) -> crate::quotations::Result<NaiveDate> {
        if let Ok(date) = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d") {
            return Ok(date);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.date) {
            return Ok(dt.date_naive());
        }
        Err(crate::quotations::QuotationError::InvalidData(format!(
            "Invalid date format: {}. Expected ISO 8601/RFC3339 or YYYY-MM-DD",
            self.date
        )))
    }
}

/// A line request with its region price resolved, ready to persist.
#[derive(Debug, Clone)]
pub struct PricedLine {
    pub product_id: String,
    pub volume: i32,
    pub unit_price: i64,
    pub child_product: Vec<PricedLine>,
}

/// Structured filter for quotation queries
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuotationFilter {
    pub q: Option<String>,
    pub id: Option<Vec<String>>,
    pub code: Option<String>,
    pub title: Option<String>,
    pub sale_persion_id: Option<String>,
    pub customer_id: Option<String>,
    pub region_id: Option<String>,
    pub created_at: Option<DateComparison>,
    pub updated_at: Option<DateComparison>,
}

/// Range predicates for a timestamp column
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateComparison {
    pub gt: Option<DateTime<Utc>>,
    pub gte: Option<DateTime<Utc>>,
    pub lt: Option<DateTime<Utc>>,
    pub lte: Option<DateTime<Utc>>,
}

/// Model for sorting quotations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sort {
    pub id: String,
    pub desc: bool,
}

/// Query configuration: relations to hydrate, pagination window, ordering.
/// `select` is honored by callers as a response projection; rows are always
/// loaded in full.
#[derive(Debug, Clone)]
pub struct FindQuotationConfig {
    pub relations: Vec<String>,
    pub select: Vec<String>,
    pub skip: i64,
    pub take: i64,
    pub order: Option<Sort>,
    pub with_deleted: bool,
}

impl Default for FindQuotationConfig {
    fn default() -> Self {
        Self {
            relations: Vec::new(),
            select: Vec::new(),
            skip: 0,
            take: DEFAULT_PAGE_SIZE,
            order: None,
            with_deleted: false,
        }
    }
}

fn parse_metadata(raw: Option<String>) -> Option<JsonValue> {
    raw.and_then(|m| serde_json::from_str(&m).ok())
}

impl From<QuotationDB> for Quotation {
    fn from(db: QuotationDB) -> Self {
        Self {
            id: db.id,
            sale_persion_id: db.sale_persion_id,
            customer_id: db.customer_id,
            region_id: db.region_id,
            title: db.title,
            code: db.code,
            date: db.date,
            heading: db.heading,
            condition: db.condition,
            payment_term: db.payment_term,
            delivery_lead_time: db.delivery_lead_time,
            warranty: db.warranty,
            install_support: db.install_support,
            appendix_a: db.appendix_a,
            appendix_b: db.appendix_b,
            metadata: parse_metadata(db.metadata),
            created_at: DateTime::from_naive_utc_and_offset(db.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(db.updated_at, Utc),
            deleted_at: db
                .deleted_at
                .map(|d| DateTime::from_naive_utc_and_offset(d, Utc)),
            sale_persion: None,
            customer: None,
            region: None,
            quotation_lines: None,
        }
    }
}

impl From<QuotationLineDB> for QuotationLine {
    fn from(db: QuotationLineDB) -> Self {
        Self {
            id: db.id,
            quotation_id: db.quotation_id,
            parent_line_id: db.parent_line_id,
            product_id: db.product_id,
            volume: db.volume,
            unit_price: db.unit_price,
            created_at: DateTime::from_naive_utc_and_offset(db.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(db.updated_at, Utc),
            child_product: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_input() -> NewQuotation {
        NewQuotation {
            sale_persion_id: "usr_1".to_string(),
            customer_id: "cus_1".to_string(),
            region_id: "reg_1".to_string(),
            code: "Q-2024-001".to_string(),
            title: "Server room fit-out".to_string(),
            heading: "Offer".to_string(),
            condition: "Standard terms".to_string(),
            payment_term: "Net 30".to_string(),
            delivery_lead_time: "6 weeks".to_string(),
            date: "2024-06-18".to_string(),
            warranty: "24 months".to_string(),
            install_support: "Included".to_string(),
            appendix_a: "A".to_string(),
            appendix_b: "B".to_string(),
            quotation_lines: Some(vec![NewQuotationLine {
                product_id: "prod_1".to_string(),
                volume: 2,
                child_product: None,
            }]),
            metadata: None,
        }
    }

    #[test]
    fn validate_accepts_complete_input() {
        assert!(base_input().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_required_field() {
        let mut input = base_input();
        input.code = "  ".to_string();
        assert!(input.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_volume() {
        let mut input = base_input();
        input.quotation_lines.as_mut().unwrap()[0].volume = 0;
        assert!(input.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_line_array() {
        let mut input = base_input();
        input.quotation_lines = Some(Vec::new());
        assert!(input.validate().is_err());
    }

    #[test]
    fn validate_allows_absent_lines() {
        let mut input = base_input();
        input.quotation_lines = None;
        assert!(input.validate().is_ok());
    }

    #[test]
    fn parse_date_accepts_both_formats() {
        let mut input = base_input();
        assert_eq!(
            input.parse_date().unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 18).unwrap()
        );
        input.date = "2024-06-18T09:30:00+02:00".to_string();
        assert!(input.parse_date().is_ok());
        input.date = "18/06/2024".to_string();
        assert!(input.parse_date().is_err());
    }
}
