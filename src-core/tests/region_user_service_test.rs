mod common;

use quotedesk_core::product_prices::ProductPriceRepository;
use quotedesk_core::regions::{RegionError, RegionService, RegionServiceTrait};
use quotedesk_core::users::{NewUser, UserError, UserService, UserServiceTrait, UserUpdate};

use common::{seed_product, seed_region, setup_test_db};

fn new_user(email: &str, regions: Option<Vec<String>>) -> NewUser {
    NewUser {
        email: email.to_string(),
        name: Some("Pat Seller".to_string()),
        phone: None,
        role: None,
        password: Some("hunter2hunter2".to_string()),
        regions,
        metadata: None,
    }
}

#[tokio::test]
async fn set_product_price_upserts_then_removes() {
    let db = setup_test_db();
    let service = RegionService::new(db.pool.clone());
    let region = seed_region(&db.pool, "West");
    let product = seed_product(&db.pool, "Tape library");

    service
        .set_product_price(region.id.clone(), product.id.clone(), 500)
        .await
        .expect("create price");
    service
        .set_product_price(region.id.clone(), product.id.clone(), 650)
        .await
        .expect("update price");

    let mut conn = db.pool.get().expect("connection");
    let price = ProductPriceRepository::new()
        .find_by_product_and_region(&mut conn, &product.id, &region.id)
        .expect("lookup")
        .expect("price exists");
    assert_eq!(price.price, 650);
    drop(conn);

    // Zero or below removes the mapping.
    service
        .set_product_price(region.id.clone(), product.id.clone(), 0)
        .await
        .expect("remove price");

    let mut conn = db.pool.get().expect("connection");
    let price = ProductPriceRepository::new()
        .find_by_product_and_region(&mut conn, &product.id, &region.id)
        .expect("lookup");
    assert!(price.is_none());
}

#[tokio::test]
async fn set_product_price_validates_references() {
    let db = setup_test_db();
    let service = RegionService::new(db.pool.clone());
    let region = seed_region(&db.pool, "East");
    let product = seed_product(&db.pool, "Patch panel");

    let result = service
        .set_product_price(region.id.clone(), "prod_missing".to_string(), 10)
        .await;
    assert!(matches!(result, Err(RegionError::InvalidData(_))));

    let result = service
        .set_product_price("reg_missing".to_string(), product.id, 10)
        .await;
    assert!(matches!(result, Err(RegionError::InvalidData(_))));
}

#[tokio::test]
async fn user_create_attaches_validated_regions() {
    let db = setup_test_db();
    let service = UserService::new(db.pool.clone());
    let region = seed_region(&db.pool, "North");

    let user = service
        .create(new_user("Seller@Example.com", Some(vec![region.id.clone()])))
        .await
        .expect("create user");

    assert_eq!(user.email, "seller@example.com");
    let regions = user.regions.expect("regions hydrated");
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].id, region.id);
}

#[tokio::test]
async fn user_create_rejects_unresolvable_regions() {
    let db = setup_test_db();
    let service = UserService::new(db.pool.clone());

    let result = service
        .create(new_user("nobody@example.com", Some(vec!["reg_missing".to_string()])))
        .await;
    assert!(matches!(result, Err(UserError::InvalidData(_))));
}

#[tokio::test]
async fn user_create_rejects_duplicate_email() {
    let db = setup_test_db();
    let service = UserService::new(db.pool.clone());

    service
        .create(new_user("dup@example.com", None))
        .await
        .expect("first create");
    let result = service.create(new_user("dup@example.com", None)).await;
    assert!(matches!(result, Err(UserError::Duplicate(_))));
}

#[tokio::test]
async fn user_filter_matches_name_or_email() {
    let db = setup_test_db();
    let service = UserService::new(db.pool.clone());

    service
        .create(new_user("alice@example.com", None))
        .await
        .expect("create");
    service
        .create(new_user("bob@elsewhere.net", None))
        .await
        .expect("create");

    let by_email = service.filter("elsewhere").expect("filter");
    assert_eq!(by_email.len(), 1);
    assert_eq!(by_email[0].email, "bob@elsewhere.net");

    // Both seeded users share the same display name.
    let by_name = service.filter("Pat Sel").expect("filter");
    assert_eq!(by_name.len(), 2);
}

#[tokio::test]
async fn change_password_verifies_the_old_one() {
    let db = setup_test_db();
    let service = UserService::new(db.pool.clone());

    let user = service
        .create(new_user("pw@example.com", None))
        .await
        .expect("create");

    let result = service
        .change_password(user.id.clone(), "wrong".to_string(), "newpassword1".to_string())
        .await;
    assert!(matches!(result, Err(UserError::InvalidData(_))));

    service
        .change_password(
            user.id.clone(),
            "hunter2hunter2".to_string(),
            "newpassword1".to_string(),
        )
        .await
        .expect("change with correct old password");

    // The new password is now the one that verifies.
    service
        .change_password(
            user.id.clone(),
            "newpassword1".to_string(),
            "finalpassword".to_string(),
        )
        .await
        .expect("change again with rotated password");
}

#[tokio::test]
async fn user_update_reassigns_regions() {
    let db = setup_test_db();
    let service = UserService::new(db.pool.clone());
    let first = seed_region(&db.pool, "R1");
    let second = seed_region(&db.pool, "R2");

    let user = service
        .create(new_user("move@example.com", Some(vec![first.id.clone()])))
        .await
        .expect("create");

    let updated = service
        .update(
            user.id.clone(),
            UserUpdate {
                name: None,
                phone: None,
                role: None,
                regions: Some(vec![second.id.clone()]),
                metadata: None,
            },
        )
        .await
        .expect("update");

    let regions = updated.regions.expect("regions hydrated");
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].id, second.id);
}
