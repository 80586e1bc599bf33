use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;

use crate::db::DbConnection;
use crate::regions::{Region, RegionDB};
use crate::schema::{regions, user_region, users};
use crate::users::Result;

use super::users_model::{User, UserDB, UserRegionDB};

/// Repository for managing user rows and their region assignments.
pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn insert(&self, conn: &mut DbConnection, row: &UserDB) -> Result<()> {
        diesel::insert_into(users::table).values(row).execute(conn)?;
        Ok(())
    }

    pub fn find_row(&self, conn: &mut DbConnection, user_id: &str) -> Result<Option<UserDB>> {
        Ok(users::table
            .filter(users::id.eq(user_id))
            .filter(users::deleted_at.is_null())
            .first::<UserDB>(conn)
            .optional()?)
    }

    pub fn find_row_by_email(&self, conn: &mut DbConnection, email: &str) -> Result<Option<UserDB>> {
        Ok(users::table
            .filter(users::email.eq(email))
            .filter(users::deleted_at.is_null())
            .first::<UserDB>(conn)
            .optional()?)
    }

    pub fn list_rows(&self, conn: &mut DbConnection) -> Result<Vec<UserDB>> {
        Ok(users::table
            .filter(users::deleted_at.is_null())
            .order(users::created_at.desc())
            .load::<UserDB>(conn)?)
    }

    /// Name OR email contains, case-insensitively.
    pub fn filter_rows(&self, conn: &mut DbConnection, query: &str) -> Result<Vec<UserDB>> {
        let pattern = format!("%{}%", query);
        Ok(users::table
            .filter(users::deleted_at.is_null())
            .filter(
                users::name
                    .like(pattern.clone())
                    .or(users::email.like(pattern)),
            )
            .order(users::created_at.desc())
            .load::<UserDB>(conn)?)
    }

    pub fn update_row(&self, conn: &mut DbConnection, row: &UserDB) -> Result<()> {
        diesel::update(users::table.find(&row.id))
            .set(row)
            .execute(conn)?;
        Ok(())
    }

    pub fn soft_delete(&self, conn: &mut DbConnection, user_id: &str) -> Result<()> {
        let now = Utc::now().naive_utc();
        diesel::update(
            users::table
                .filter(users::id.eq(user_id))
                .filter(users::deleted_at.is_null()),
        )
        .set((users::deleted_at.eq(now), users::updated_at.eq(now)))
        .execute(conn)?;
        Ok(())
    }

    /// Replaces the user's region assignment with the given set.
    pub fn set_regions(
        &self,
        conn: &mut DbConnection,
        user_id: &str,
        region_ids: &[String],
    ) -> Result<()> {
        diesel::delete(user_region::table.filter(user_region::user_id.eq(user_id)))
            .execute(conn)?;

        let rows: Vec<UserRegionDB> = region_ids
            .iter()
            .map(|region_id| UserRegionDB {
                user_id: user_id.to_string(),
                region_id: region_id.clone(),
            })
            .collect();

        if !rows.is_empty() {
            diesel::insert_into(user_region::table)
                .values(&rows)
                .execute(conn)?;
        }

        Ok(())
    }

    /// Converts rows into domain users with their regions populated, in one
    /// join query keyed back by user id.
    pub fn attach_regions(&self, conn: &mut DbConnection, rows: Vec<UserDB>) -> Result<Vec<User>> {
        let user_ids: Vec<String> = rows.iter().map(|u| u.id.clone()).collect();

        let mut regions_by_user: HashMap<String, Vec<Region>> = HashMap::new();
        if !user_ids.is_empty() {
            let assignment: Vec<(String, RegionDB)> = user_region::table
                .inner_join(regions::table.on(regions::id.eq(user_region::region_id)))
                .filter(user_region::user_id.eq_any(&user_ids))
                .filter(regions::deleted_at.is_null())
                .select((user_region::user_id, RegionDB::as_select()))
                .load::<(String, RegionDB)>(conn)?;

            for (user_id, region) in assignment {
                regions_by_user
                    .entry(user_id)
                    .or_default()
                    .push(region.into());
            }
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let mut user: User = row.into();
                user.regions = Some(regions_by_user.remove(&user.id).unwrap_or_default());
                user
            })
            .collect())
    }
}
