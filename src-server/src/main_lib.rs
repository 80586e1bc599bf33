use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use quotedesk_core::customers::{CustomerService, CustomerServiceTrait};
use quotedesk_core::db;
use quotedesk_core::products::{ProductService, ProductServiceTrait};
use quotedesk_core::quotations::{QuotationService, QuotationServiceTrait};
use quotedesk_core::regions::{RegionService, RegionServiceTrait};
use quotedesk_core::users::{UserService, UserServiceTrait};

use crate::config::Config;

pub struct AppState {
    pub quotation_service: Arc<dyn QuotationServiceTrait>,
    pub customer_service: Arc<dyn CustomerServiceTrait>,
    pub product_service: Arc<dyn ProductServiceTrait>,
    pub region_service: Arc<dyn RegionServiceTrait>,
    pub user_service: Arc<dyn UserServiceTrait>,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    // Keep DATABASE_URL aligned with QD_DB_PATH so the core picks the right file
    std::env::set_var("DATABASE_URL", &config.db_path);
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;

    Ok(Arc::new(AppState {
        quotation_service: Arc::new(QuotationService::new(pool.clone())),
        customer_service: Arc::new(CustomerService::new(pool.clone())),
        product_service: Arc::new(ProductService::new(pool.clone())),
        region_service: Arc::new(RegionService::new(pool.clone())),
        user_service: Arc::new(UserService::new(pool)),
    }))
}
