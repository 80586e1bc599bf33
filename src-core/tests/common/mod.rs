use std::sync::Arc;

use quotedesk_core::customers::{Customer, CustomerRepository, NewCustomer};
use quotedesk_core::db::{self, DbPool};
use quotedesk_core::product_prices::ProductPriceRepository;
use quotedesk_core::products::{NewProduct, Product, ProductRepository};
use quotedesk_core::regions::{NewRegion, Region, RegionRepository};
use quotedesk_core::users::{User, UserDB, UserRepository, UserRole};
use tempfile::TempDir;

pub struct TestDb {
    pub pool: Arc<DbPool>,
    _dir: TempDir,
}

pub fn setup_test_db() -> TestDb {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = db::init(dir.path().to_str().unwrap()).expect("Failed to initialize database");
    let pool = db::create_pool(&db_path).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run migrations");
    TestDb { pool, _dir: dir }
}

pub fn seed_region(pool: &Arc<DbPool>, name: &str) -> Region {
    let mut conn = pool.get().expect("connection");
    RegionRepository::new()
        .create(
            &mut conn,
            &NewRegion {
                name: name.to_string(),
                currency_code: Some("EUR".to_string()),
                metadata: None,
            },
        )
        .expect("seed region")
}

pub fn seed_product(pool: &Arc<DbPool>, title: &str) -> Product {
    let mut conn = pool.get().expect("connection");
    ProductRepository::new()
        .create(
            &mut conn,
            &NewProduct {
                title: title.to_string(),
                brand: None,
                description: None,
                metadata: None,
            },
        )
        .expect("seed product")
}

pub fn seed_price(pool: &Arc<DbPool>, product_id: &str, region_id: &str, price: i64) {
    let mut conn = pool.get().expect("connection");
    ProductPriceRepository::new()
        .upsert(&mut conn, product_id, region_id, price)
        .expect("seed price");
}

pub fn seed_customer(pool: &Arc<DbPool>, email: &str) -> Customer {
    let mut conn = pool.get().expect("connection");
    CustomerRepository::new()
        .create(
            &mut conn,
            &NewCustomer {
                email: email.to_string(),
                name: Some("Test customer".to_string()),
                phone: None,
                company: None,
                metadata: None,
            },
        )
        .expect("seed customer")
}

pub fn seed_user(pool: &Arc<DbPool>, email: &str) -> User {
    let mut conn = pool.get().expect("connection");
    let now = chrono::Utc::now().naive_utc();
    let row = UserDB {
        id: quotedesk_core::ids::generate_entity_id("usr"),
        email: email.to_string(),
        name: Some("Test seller".to_string()),
        phone: None,
        role: UserRole::SaleMan.as_str().to_string(),
        password_hash: None,
        api_token: None,
        metadata: None,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    };
    UserRepository::new()
        .insert(&mut conn, &row)
        .expect("seed user");
    row.into()
}
