use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use async_trait::async_trait;
use chrono::Utc;
use log::debug;

use crate::db::{get_connection, DbPool, DbTransactionExecutor};
use crate::ids::generate_entity_id;
use crate::regions::RegionRepository;
use crate::users::{UserError, Result};

use super::users_model::{validate_email, NewUser, User, UserDB, UserRole, UserUpdate};
use super::users_repository::UserRepository;
use super::users_traits::UserServiceTrait;

/// Service for managing users
pub struct UserService {
    pool: Arc<DbPool>,
    repository: UserRepository,
    region_repository: RegionRepository,
}

impl UserService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self {
            pool,
            repository: UserRepository::new(),
            region_repository: RegionRepository::new(),
        }
    }

    fn hash_password(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| UserError::InvalidData(format!("Failed to hash password: {}", e)))
    }

    fn verify_password(password: &str, stored_hash: &str) -> bool {
        match PasswordHash::new(stored_hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// Resolves the requested region ids against live regions. An assignment
    /// that matches nothing at all is rejected as invalid input.
    fn validate_regions(
        &self,
        conn: &mut crate::db::DbConnection,
        region_ids: &[String],
    ) -> Result<Vec<String>> {
        let found = self
            .region_repository
            .find_by_ids(conn, region_ids)
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if found.is_empty() {
            return Err(UserError::InvalidData("Regions invalid".to_string()));
        }

        Ok(found.into_iter().map(|r| r.id).collect())
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn create(&self, new_user: NewUser) -> Result<User> {
        let email = validate_email(&new_user.email)?;
        debug!("Creating user {}", email);

        let password_hash = match &new_user.password {
            Some(password) => Some(Self::hash_password(password)?),
            None => None,
        };

        self.pool.execute(|conn| {
            let region_ids = match &new_user.regions {
                Some(ids) => Some(self.validate_regions(conn, ids)?),
                None => None,
            };

            let now = Utc::now().naive_utc();
            let row = UserDB {
                id: generate_entity_id("usr"),
                email: email.clone(),
                name: new_user.name.clone(),
                phone: new_user.phone.clone(),
                role: new_user.role.unwrap_or(UserRole::SaleMan).as_str().to_string(),
                password_hash: password_hash.clone(),
                api_token: None,
                metadata: serialize_metadata(&new_user.metadata)?,
                created_at: now,
                updated_at: now,
                deleted_at: None,
            };

            self.repository.insert(conn, &row)?;
            if let Some(region_ids) = &region_ids {
                self.repository.set_regions(conn, &row.id, region_ids)?;
            }

            let users = self.repository.attach_regions(conn, vec![row])?;
            Ok(users.into_iter().next().expect("inserted user"))
        })
    }

    fn retrieve(&self, user_id: &str) -> Result<User> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| UserError::DatabaseError(e.to_string()))?;
        let row = self.repository.find_row(&mut conn, user_id)?.ok_or_else(|| {
            UserError::NotFound(format!("User with id: {} was not found", user_id))
        })?;
        let users = self.repository.attach_regions(&mut conn, vec![row])?;
        Ok(users.into_iter().next().expect("fetched user"))
    }

    fn retrieve_by_email(&self, email: &str) -> Result<User> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| UserError::DatabaseError(e.to_string()))?;
        let normalized = email.to_lowercase();
        let row = self
            .repository
            .find_row_by_email(&mut conn, &normalized)?
            .ok_or_else(|| {
                UserError::NotFound(format!("User with email: {} was not found", email))
            })?;
        let users = self.repository.attach_regions(&mut conn, vec![row])?;
        Ok(users.into_iter().next().expect("fetched user"))
    }

    fn list(&self) -> Result<Vec<User>> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| UserError::DatabaseError(e.to_string()))?;
        let rows = self.repository.list_rows(&mut conn)?;
        self.repository.attach_regions(&mut conn, rows)
    }

    fn filter(&self, query: &str) -> Result<Vec<User>> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| UserError::DatabaseError(e.to_string()))?;
        let rows = self.repository.filter_rows(&mut conn, query)?;
        self.repository.attach_regions(&mut conn, rows)
    }

    async fn update(&self, user_id: String, update: UserUpdate) -> Result<User> {
        self.pool.execute(|conn| {
            let mut row = self.repository.find_row(conn, &user_id)?.ok_or_else(|| {
                UserError::NotFound(format!("User with id: {} was not found", user_id))
            })?;

            if let Some(name) = &update.name {
                row.name = Some(name.clone());
            }
            if let Some(phone) = &update.phone {
                row.phone = Some(phone.clone());
            }
            if let Some(role) = update.role {
                row.role = role.as_str().to_string();
            }
            if update.metadata.is_some() {
                row.metadata = serialize_metadata(&update.metadata)?;
            }
            row.updated_at = Utc::now().naive_utc();

            self.repository.update_row(conn, &row)?;

            if let Some(region_ids) = &update.regions {
                let validated = self.validate_regions(conn, region_ids)?;
                self.repository.set_regions(conn, &row.id, &validated)?;
            }

            let users = self.repository.attach_regions(conn, vec![row])?;
            Ok(users.into_iter().next().expect("updated user"))
        })
    }

    async fn change_password(
        &self,
        user_id: String,
        old_password: String,
        new_password: String,
    ) -> Result<()> {
        if new_password.trim().is_empty() {
            return Err(UserError::InvalidData(
                "Password cannot be empty".to_string(),
            ));
        }

        let new_hash = Self::hash_password(&new_password)?;

        self.pool.execute(|conn| {
            let mut row = self.repository.find_row(conn, &user_id)?.ok_or_else(|| {
                UserError::NotFound(format!("User with id: {} was not found", user_id))
            })?;

            let current_hash = row.password_hash.as_deref().unwrap_or_default();
            if !Self::verify_password(&old_password, current_hash) {
                return Err(UserError::InvalidData("Invalid password".to_string()));
            }

            row.password_hash = Some(new_hash.clone());
            row.updated_at = Utc::now().naive_utc();
            self.repository.update_row(conn, &row)
        })
    }

    /// Idempotent: deleting an unknown user is a no-op.
    fn delete(&self, user_id: &str) -> Result<()> {
        self.pool
            .execute(|conn| self.repository.soft_delete(conn, user_id))
    }
}

fn serialize_metadata(metadata: &Option<serde_json::Value>) -> Result<Option<String>> {
    match metadata {
        Some(value) => serde_json::to_string(value)
            .map(Some)
            .map_err(|e| UserError::InvalidData(e.to_string())),
        None => Ok(None),
    }
}
