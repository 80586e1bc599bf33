mod common;

use quotedesk_core::quotations::{
    FindQuotationConfig, NewQuotation, NewQuotationChildLine, NewQuotationLine, QuotationError,
    QuotationFilter, QuotationService, QuotationServiceTrait, DEFAULT_QUOTATION_RELATIONS,
};

use common::{seed_customer, seed_price, seed_product, seed_region, seed_user, setup_test_db};

fn quotation_input(
    sale_persion_id: &str,
    customer_id: &str,
    region_id: &str,
    code: &str,
    lines: Option<Vec<NewQuotationLine>>,
) -> NewQuotation {
    NewQuotation {
        sale_persion_id: sale_persion_id.to_string(),
        customer_id: customer_id.to_string(),
        region_id: region_id.to_string(),
        code: code.to_string(),
        title: format!("Offer {}", code),
        heading: "Offer".to_string(),
        condition: "Standard terms".to_string(),
        payment_term: "Net 30".to_string(),
        delivery_lead_time: "6 weeks".to_string(),
        date: "2024-06-18".to_string(),
        warranty: "24 months".to_string(),
        install_support: "On-site".to_string(),
        appendix_a: "Appendix A".to_string(),
        appendix_b: "Appendix B".to_string(),
        quotation_lines: lines,
        metadata: None,
    }
}

fn line(product_id: &str, volume: i32) -> NewQuotationLine {
    NewQuotationLine {
        product_id: product_id.to_string(),
        volume,
        child_product: None,
    }
}

fn relations() -> Vec<String> {
    DEFAULT_QUOTATION_RELATIONS
        .iter()
        .map(|r| r.to_string())
        .collect()
}

struct Fixture {
    db: common::TestDb,
    service: QuotationService,
    sale_persion_id: String,
    customer_id: String,
    region_id: String,
}

fn fixture() -> Fixture {
    let db = setup_test_db();
    let service = QuotationService::new(db.pool.clone());
    let region = seed_region(&db.pool, "North");
    let customer = seed_customer(&db.pool, "buyer@example.com");
    let user = seed_user(&db.pool, "seller@example.com");
    Fixture {
        service,
        sale_persion_id: user.id,
        customer_id: customer.id,
        region_id: region.id,
        db,
    }
}

#[tokio::test]
async fn create_resolves_unit_price_and_volume() {
    let f = fixture();
    let product = seed_product(&f.db.pool, "Rack server");
    seed_price(&f.db.pool, &product.id, &f.region_id, 100);

    let created = f
        .service
        .create(quotation_input(
            &f.sale_persion_id,
            &f.customer_id,
            &f.region_id,
            "Q-100",
            Some(vec![line(&product.id, 2)]),
        ))
        .await
        .expect("create");

    assert!(created.id.starts_with("quot_"));

    let config = FindQuotationConfig {
        relations: relations(),
        ..Default::default()
    };
    let quotation = f.service.retrieve(&created.id, config).expect("retrieve");
    let lines = quotation.quotation_lines.expect("lines hydrated");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].product_id, product.id);
    assert_eq!(lines[0].volume, 2);
    assert_eq!(lines[0].unit_price, 100);
}

#[tokio::test]
async fn create_drops_lines_without_a_region_price() {
    let f = fixture();
    let product = seed_product(&f.db.pool, "Unpriced switch");
    // no price row for this region

    let created = f
        .service
        .create(quotation_input(
            &f.sale_persion_id,
            &f.customer_id,
            &f.region_id,
            "Q-101",
            Some(vec![line(&product.id, 3)]),
        ))
        .await
        .expect("create still succeeds");

    let config = FindQuotationConfig {
        relations: relations(),
        ..Default::default()
    };
    let quotation = f.service.retrieve(&created.id, config).expect("retrieve");
    assert_eq!(quotation.quotation_lines.expect("lines hydrated").len(), 0);
}

#[tokio::test]
async fn create_prices_children_independently() {
    let f = fixture();
    let parent = seed_product(&f.db.pool, "Chassis");
    let addition = seed_product(&f.db.pool, "Rail kit");
    seed_price(&f.db.pool, &parent.id, &f.region_id, 100);
    seed_price(&f.db.pool, &addition.id, &f.region_id, 40);

    let mut parent_line = line(&parent.id, 1);
    parent_line.child_product = Some(vec![NewQuotationChildLine {
        product_id: addition.id.clone(),
        volume: 2,
    }]);

    let created = f
        .service
        .create(quotation_input(
            &f.sale_persion_id,
            &f.customer_id,
            &f.region_id,
            "Q-102",
            Some(vec![parent_line]),
        ))
        .await
        .expect("create");

    let config = FindQuotationConfig {
        relations: relations(),
        ..Default::default()
    };
    let quotation = f.service.retrieve(&created.id, config).expect("retrieve");
    let lines = quotation.quotation_lines.expect("lines hydrated");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].unit_price, 100);

    let children = lines[0].child_product.as_ref().expect("children hydrated");
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].product_id, addition.id);
    assert_eq!(children[0].volume, 2);
    assert_eq!(children[0].unit_price, 40);
}

#[tokio::test]
async fn create_excludes_self_referencing_children() {
    let f = fixture();
    let product = seed_product(&f.db.pool, "Firewall");
    seed_price(&f.db.pool, &product.id, &f.region_id, 250);

    let mut parent_line = line(&product.id, 1);
    parent_line.child_product = Some(vec![NewQuotationChildLine {
        product_id: product.id.clone(),
        volume: 1,
    }]);

    let created = f
        .service
        .create(quotation_input(
            &f.sale_persion_id,
            &f.customer_id,
            &f.region_id,
            "Q-103",
            Some(vec![parent_line]),
        ))
        .await
        .expect("create");

    let config = FindQuotationConfig {
        relations: relations(),
        ..Default::default()
    };
    let quotation = f.service.retrieve(&created.id, config).expect("retrieve");
    let lines = quotation.quotation_lines.expect("lines hydrated");
    assert_eq!(lines.len(), 1, "parent line persists");
    assert_eq!(
        lines[0].child_product.as_ref().expect("children hydrated").len(),
        0,
        "self-referencing child is excluded"
    );
}

#[tokio::test]
async fn create_drops_unpriced_children_but_keeps_priced_ones() {
    let f = fixture();
    let parent = seed_product(&f.db.pool, "Storage array");
    let priced_addition = seed_product(&f.db.pool, "Expansion shelf");
    let unpriced_addition = seed_product(&f.db.pool, "Unpriced cable kit");
    seed_price(&f.db.pool, &parent.id, &f.region_id, 900);
    seed_price(&f.db.pool, &priced_addition.id, &f.region_id, 120);

    let mut parent_line = line(&parent.id, 1);
    parent_line.child_product = Some(vec![
        NewQuotationChildLine {
            product_id: priced_addition.id.clone(),
            volume: 1,
        },
        NewQuotationChildLine {
            product_id: unpriced_addition.id.clone(),
            volume: 1,
        },
    ]);

    let created = f
        .service
        .create(quotation_input(
            &f.sale_persion_id,
            &f.customer_id,
            &f.region_id,
            "Q-104",
            Some(vec![parent_line]),
        ))
        .await
        .expect("create");

    let config = FindQuotationConfig {
        relations: relations(),
        ..Default::default()
    };
    let quotation = f.service.retrieve(&created.id, config).expect("retrieve");
    let lines = quotation.quotation_lines.expect("lines hydrated");
    let children = lines[0].child_product.as_ref().expect("children hydrated");
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].product_id, priced_addition.id);
}

#[tokio::test]
async fn retrieve_hydrates_belongs_to_relations() {
    let f = fixture();
    let product = seed_product(&f.db.pool, "Router");
    seed_price(&f.db.pool, &product.id, &f.region_id, 60);

    let created = f
        .service
        .create(quotation_input(
            &f.sale_persion_id,
            &f.customer_id,
            &f.region_id,
            "Q-105",
            Some(vec![line(&product.id, 1)]),
        ))
        .await
        .expect("create");

    // The bare create result has no relations hydrated.
    assert!(created.quotation_lines.is_none());

    let config = FindQuotationConfig {
        relations: relations(),
        ..Default::default()
    };
    let quotation = f.service.retrieve(&created.id, config).expect("retrieve");
    assert_eq!(quotation.customer.expect("customer").id, f.customer_id);
    assert_eq!(
        quotation.sale_persion.expect("sale_persion").id,
        f.sale_persion_id
    );
    assert_eq!(quotation.region.expect("region").id, f.region_id);
}

#[tokio::test]
async fn deleted_quotations_are_hidden_and_delete_is_idempotent() {
    let f = fixture();
    let product = seed_product(&f.db.pool, "Access point");
    seed_price(&f.db.pool, &product.id, &f.region_id, 30);

    let created = f
        .service
        .create(quotation_input(
            &f.sale_persion_id,
            &f.customer_id,
            &f.region_id,
            "Q-106",
            Some(vec![line(&product.id, 1)]),
        ))
        .await
        .expect("create");

    f.service.delete(&created.id).expect("delete");

    let result = f
        .service
        .retrieve(&created.id, FindQuotationConfig::default());
    assert!(matches!(result, Err(QuotationError::NotFound(_))));

    // Second delete is a no-op, not an error.
    f.service.delete(&created.id).expect("second delete");
    f.service.delete("quot_missing").expect("unknown id");
}

#[tokio::test]
async fn free_text_search_is_case_insensitive_and_supersedes_filters() {
    let f = fixture();

    f.service
        .create(quotation_input(
            &f.sale_persion_id,
            &f.customer_id,
            &f.region_id,
            "ABC-2024",
            None,
        ))
        .await
        .expect("create first");
    f.service
        .create(quotation_input(
            &f.sale_persion_id,
            &f.customer_id,
            &f.region_id,
            "XYZ-2024",
            None,
        ))
        .await
        .expect("create second");

    let filter = QuotationFilter {
        q: Some("abc".to_string()),
        // Exact-match filters on the searched columns are superseded by the
        // free-text term.
        code: Some("XYZ-2024".to_string()),
        ..Default::default()
    };
    let (results, count) = f
        .service
        .list_and_count(filter, FindQuotationConfig::default(), None)
        .expect("search");

    assert_eq!(count, 1);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].code, "ABC-2024");
}

#[tokio::test]
async fn list_and_count_paginates_newest_first() {
    let f = fixture();

    for code in ["Q-1", "Q-2", "Q-3"] {
        f.service
            .create(quotation_input(
                &f.sale_persion_id,
                &f.customer_id,
                &f.region_id,
                code,
                None,
            ))
            .await
            .expect("create");
        // created_at is the sort key; keep the inserts strictly ordered.
        std::thread::sleep(std::time::Duration::from_millis(5));
    }

    let config = FindQuotationConfig {
        take: 2,
        ..Default::default()
    };
    let (results, count) = f
        .service
        .list_and_count(QuotationFilter::default(), config, None)
        .expect("list");

    assert_eq!(count, 3);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].code, "Q-3");
    assert_eq!(results[1].code, "Q-2");
}

#[tokio::test]
async fn list_and_count_scopes_by_region() {
    let f = fixture();
    let other_region = seed_region(&f.db.pool, "South");

    f.service
        .create(quotation_input(
            &f.sale_persion_id,
            &f.customer_id,
            &f.region_id,
            "Q-NORTH",
            None,
        ))
        .await
        .expect("create north");
    f.service
        .create(quotation_input(
            &f.sale_persion_id,
            &f.customer_id,
            &other_region.id,
            "Q-SOUTH",
            None,
        ))
        .await
        .expect("create south");

    let (results, count) = f
        .service
        .list_and_count(
            QuotationFilter::default(),
            FindQuotationConfig::default(),
            Some(f.region_id.clone()),
        )
        .expect("list");

    assert_eq!(count, 1);
    assert_eq!(results[0].code, "Q-NORTH");

    // An empty scope means no scoping at all.
    let (_, count) = f
        .service
        .list_and_count(
            QuotationFilter::default(),
            FindQuotationConfig::default(),
            Some(String::new()),
        )
        .expect("list unscoped");
    assert_eq!(count, 2);
}

#[tokio::test]
async fn create_rejects_invalid_input() {
    let f = fixture();

    let mut input = quotation_input(
        &f.sale_persion_id,
        &f.customer_id,
        &f.region_id,
        "Q-107",
        Some(vec![]),
    );
    let result = f.service.create(input.clone()).await;
    assert!(matches!(result, Err(QuotationError::InvalidData(_))));

    input.quotation_lines = None;
    input.date = "not-a-date".to_string();
    let result = f.service.create(input).await;
    assert!(matches!(result, Err(QuotationError::InvalidData(_))));
}
