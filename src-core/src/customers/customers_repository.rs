use chrono::Utc;
use diesel::prelude::*;

use crate::customers::{CustomerError, Result};
use crate::db::DbConnection;
use crate::ids::generate_entity_id;
use crate::schema::customers;

use super::customers_model::{Customer, CustomerDB, CustomerUpdate, NewCustomer};

/// Repository for managing customer rows. Connections are passed in by the
/// caller so reads and transactional writes share the same code paths.
pub struct CustomerRepository;

impl CustomerRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn create(&self, conn: &mut DbConnection, new_customer: &NewCustomer) -> Result<Customer> {
        let now = Utc::now().naive_utc();
        let row = CustomerDB {
            id: generate_entity_id("cus"),
            email: new_customer.email.clone(),
            name: new_customer.name.clone(),
            phone: new_customer.phone.clone(),
            company: new_customer.company.clone(),
            metadata: serialize_metadata(&new_customer.metadata)?,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        diesel::insert_into(customers::table)
            .values(&row)
            .execute(conn)?;

        Ok(row.into())
    }

    pub fn get_by_id(&self, conn: &mut DbConnection, customer_id: &str) -> Result<Customer> {
        customers::table
            .filter(customers::id.eq(customer_id))
            .filter(customers::deleted_at.is_null())
            .first::<CustomerDB>(conn)
            .optional()?
            .map(Customer::from)
            .ok_or_else(|| {
                CustomerError::NotFound(format!("Customer with id {} not found", customer_id))
            })
    }

    pub fn find_row(&self, conn: &mut DbConnection, customer_id: &str) -> Result<Option<CustomerDB>> {
        Ok(customers::table
            .filter(customers::id.eq(customer_id))
            .filter(customers::deleted_at.is_null())
            .first::<CustomerDB>(conn)
            .optional()?)
    }

    pub fn list(&self, conn: &mut DbConnection) -> Result<Vec<Customer>> {
        customers::table
            .filter(customers::deleted_at.is_null())
            .order(customers::created_at.desc())
            .load::<CustomerDB>(conn)
            .map(|rows| rows.into_iter().map(Customer::from).collect())
            .map_err(CustomerError::from)
    }

    pub fn update(
        &self,
        conn: &mut DbConnection,
        customer_id: &str,
        update: &CustomerUpdate,
    ) -> Result<Customer> {
        let mut row = self.find_row(conn, customer_id)?.ok_or_else(|| {
            CustomerError::NotFound(format!("Customer with id {} not found", customer_id))
        })?;

        if let Some(email) = &update.email {
            row.email = email.clone();
        }
        if let Some(name) = &update.name {
            row.name = Some(name.clone());
        }
        if let Some(phone) = &update.phone {
            row.phone = Some(phone.clone());
        }
        if let Some(company) = &update.company {
            row.company = Some(company.clone());
        }
        if update.metadata.is_some() {
            row.metadata = serialize_metadata(&update.metadata)?;
        }
        row.updated_at = Utc::now().naive_utc();

        diesel::update(customers::table.find(&row.id))
            .set(&row)
            .execute(conn)?;

        Ok(row.into())
    }

    /// Soft-deletes a customer. Missing ids are a no-op.
    pub fn soft_delete(&self, conn: &mut DbConnection, customer_id: &str) -> Result<()> {
        let now = Utc::now().naive_utc();
        diesel::update(
            customers::table
                .filter(customers::id.eq(customer_id))
                .filter(customers::deleted_at.is_null()),
        )
        .set((
            customers::deleted_at.eq(now),
            customers::updated_at.eq(now),
        ))
        .execute(conn)?;
        Ok(())
    }
}

fn serialize_metadata(metadata: &Option<serde_json::Value>) -> Result<Option<String>> {
    match metadata {
        Some(value) => serde_json::to_string(value)
            .map(Some)
            .map_err(|e| CustomerError::InvalidData(e.to_string())),
        None => Ok(None),
    }
}
