pub(crate) mod regions_errors;
pub(crate) mod regions_model;
pub(crate) mod regions_repository;
pub(crate) mod regions_service;
pub(crate) mod regions_traits;

pub use regions_errors::{RegionError, Result};
pub use regions_model::{NewRegion, Region, RegionDB, RegionUpdate};
pub use regions_repository::RegionRepository;
pub use regions_service::RegionService;
pub use regions_traits::RegionServiceTrait;
