use chrono::Utc;
use diesel::prelude::*;

use crate::db::DbConnection;
use crate::ids::generate_entity_id;
use crate::regions::{RegionError, Result};
use crate::schema::regions;

use super::regions_model::{NewRegion, Region, RegionDB, RegionUpdate};

/// Repository for managing region rows.
pub struct RegionRepository;

impl RegionRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn create(&self, conn: &mut DbConnection, new_region: &NewRegion) -> Result<Region> {
        let now = Utc::now().naive_utc();
        let row = RegionDB {
            id: generate_entity_id("reg"),
            name: new_region.name.clone(),
            currency_code: new_region
                .currency_code
                .as_ref()
                .map(|c| c.to_lowercase()),
            metadata: serialize_metadata(&new_region.metadata)?,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        diesel::insert_into(regions::table)
            .values(&row)
            .execute(conn)?;

        Ok(row.into())
    }

    pub fn get_by_id(&self, conn: &mut DbConnection, region_id: &str) -> Result<Region> {
        self.find_row(conn, region_id)?
            .map(Region::from)
            .ok_or_else(|| {
                RegionError::NotFound(format!("Region with id {} not found", region_id))
            })
    }

    pub fn find_row(&self, conn: &mut DbConnection, region_id: &str) -> Result<Option<RegionDB>> {
        Ok(regions::table
            .filter(regions::id.eq(region_id))
            .filter(regions::deleted_at.is_null())
            .first::<RegionDB>(conn)
            .optional()?)
    }

    pub fn find_by_ids(&self, conn: &mut DbConnection, region_ids: &[String]) -> Result<Vec<Region>> {
        Ok(regions::table
            .filter(regions::id.eq_any(region_ids))
            .filter(regions::deleted_at.is_null())
            .load::<RegionDB>(conn)?
            .into_iter()
            .map(Region::from)
            .collect())
    }

    pub fn list(&self, conn: &mut DbConnection) -> Result<Vec<Region>> {
        regions::table
            .filter(regions::deleted_at.is_null())
            .order(regions::name.asc())
            .load::<RegionDB>(conn)
            .map(|rows| rows.into_iter().map(Region::from).collect())
            .map_err(RegionError::from)
    }

    pub fn update(
        &self,
        conn: &mut DbConnection,
        region_id: &str,
        update: &RegionUpdate,
    ) -> Result<Region> {
        let mut row = self.find_row(conn, region_id)?.ok_or_else(|| {
            RegionError::NotFound(format!("Region with id {} not found", region_id))
        })?;

        if let Some(name) = &update.name {
            row.name = name.clone();
        }
        if let Some(currency_code) = &update.currency_code {
            row.currency_code = Some(currency_code.to_lowercase());
        }
        if update.metadata.is_some() {
            row.metadata = serialize_metadata(&update.metadata)?;
        }
        row.updated_at = Utc::now().naive_utc();

        diesel::update(regions::table.find(&row.id))
            .set(&row)
            .execute(conn)?;

        Ok(row.into())
    }

    pub fn soft_delete(&self, conn: &mut DbConnection, region_id: &str) -> Result<()> {
        let now = Utc::now().naive_utc();
        diesel::update(
            regions::table
                .filter(regions::id.eq(region_id))
                .filter(regions::deleted_at.is_null()),
        )
        .set((regions::deleted_at.eq(now), regions::updated_at.eq(now)))
        .execute(conn)?;
        Ok(())
    }
}

fn serialize_metadata(metadata: &Option<serde_json::Value>) -> Result<Option<String>> {
    match metadata {
        Some(value) => serde_json::to_string(value)
            .map(Some)
            .map_err(|e| RegionError::InvalidData(e.to_string())),
        None => Ok(None),
    }
}
