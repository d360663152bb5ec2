//! Integration tests for the full checkout path, against an isolated
//! in-memory SQLite database with the real migrations applied.

use chrono::{Duration, Utc};
use trapitos_core::{CartLine, DiscountSource, PaymentMethod};
use trapitos_db::{Database, DbConfig};
use trapitos_engine::{SaleEngine, SaleError, SaleRequest};

async fn test_db() -> Database {
    Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database")
}

/// One product ("Denim Jacket", $100.00) with one variant holding the given
/// stock. Returns the variant id.
async fn seed_variant(db: &Database, stock: i64) -> i64 {
    let product_id = db
        .catalog()
        .create_product("Denim Jacket", Some("outerwear"), 10000)
        .await
        .unwrap();
    db.catalog()
        .create_variant(product_id, "M", "indigo", stock)
        .await
        .unwrap()
}

/// Adds a promotion on the variant's product, active today.
async fn seed_active_discount(db: &Database, variant_id: i64, bps: i64) {
    let variant = db.catalog().get_variant(variant_id).await.unwrap().unwrap();
    let today = Utc::now().date_naive();
    db.discounts()
        .create(
            variant.product_id,
            bps,
            today - Duration::days(1),
            today + Duration::days(1),
        )
        .await
        .unwrap();
}

fn request(lines: Vec<CartLine>) -> SaleRequest {
    SaleRequest {
        clerk_id: 1,
        customer_id: None,
        payment_method: PaymentMethod::Cash,
        lines,
    }
}

fn line(variant_id: i64, quantity: i64, price_cents: i64, manual_bps: i64) -> CartLine {
    CartLine {
        variant_id,
        quantity,
        unit_price_cents: price_cents,
        manual_discount_bps: manual_bps,
    }
}

async fn stock_of(db: &Database, variant_id: i64) -> i64 {
    db.catalog()
        .get_variant(variant_id)
        .await
        .unwrap()
        .unwrap()
        .stock_on_hand
}

// =============================================================================
// Success paths
// =============================================================================

#[tokio::test]
async fn automatic_discount_applies_and_stock_decrements() {
    let db = test_db().await;
    let variant_id = seed_variant(&db, 10).await;
    seed_active_discount(&db, variant_id, 2000).await; // 20% off

    let engine = SaleEngine::new(db.clone());
    let receipt = engine
        .process_sale(&request(vec![line(variant_id, 2, 10000, 0)]))
        .await
        .unwrap();

    // 2 × $100.00 at 20% off = $160.00
    assert_eq!(receipt.total_cents, 16000);
    assert_eq!(receipt.message, "Sale recorded. Total: $160.00");
    assert_eq!(stock_of(&db, variant_id).await, 8);

    let sale = db.sales().get_sale(receipt.sale_id).await.unwrap().unwrap();
    assert_eq!(sale.total_cents, 16000);
    assert_eq!(sale.clerk_id, 1);

    let lines = db.sales().get_lines(receipt.sale_id).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].unit_price_cents, 8000);
    assert_eq!(lines[0].discount_cents, 2000);
    assert_eq!(lines[0].discount_source, DiscountSource::Automatic);
}

#[tokio::test]
async fn manual_discount_overrides_automatic() {
    let db = test_db().await;
    let variant_id = seed_variant(&db, 10).await;
    seed_active_discount(&db, variant_id, 2000).await;

    let engine = SaleEngine::new(db.clone());
    let receipt = engine
        .process_sale(&request(vec![line(variant_id, 2, 10000, 5000)]))
        .await
        .unwrap();

    // Manual 50% replaces the 20% promotion: 2 × $50.00
    assert_eq!(receipt.total_cents, 10000);

    let lines = db.sales().get_lines(receipt.sale_id).await.unwrap();
    assert_eq!(lines[0].discount_source, DiscountSource::Manual);
    assert_eq!(lines[0].unit_price_cents, 5000);
}

#[tokio::test]
async fn undiscounted_multi_line_sale() {
    let db = test_db().await;
    let v1 = seed_variant(&db, 5).await;
    let product_id = db
        .catalog()
        .create_product("Canvas Belt", Some("accessories"), 1499)
        .await
        .unwrap();
    let v2 = db
        .catalog()
        .create_variant(product_id, "One Size", "tan", 3)
        .await
        .unwrap();

    let engine = SaleEngine::new(db.clone());
    let receipt = engine
        .process_sale(&request(vec![
            line(v1, 1, 10000, 0),
            line(v2, 2, 1499, 0),
        ]))
        .await
        .unwrap();

    assert_eq!(receipt.total_cents, 12998);
    assert_eq!(stock_of(&db, v1).await, 4);
    assert_eq!(stock_of(&db, v2).await, 1);

    let lines = db.sales().get_lines(receipt.sale_id).await.unwrap();
    assert_eq!(lines.len(), 2);
    assert!(lines
        .iter()
        .all(|l| l.discount_source == DiscountSource::None));
}

#[tokio::test]
async fn zero_quantity_lines_are_skipped() {
    let db = test_db().await;
    let variant_id = seed_variant(&db, 10).await;

    let engine = SaleEngine::new(db.clone());
    let receipt = engine
        .process_sale(&request(vec![
            line(variant_id, 0, 10000, 0),
            line(variant_id, 1, 10000, 0),
        ]))
        .await
        .unwrap();

    assert_eq!(receipt.total_cents, 10000);
    assert_eq!(stock_of(&db, variant_id).await, 9);
    assert_eq!(db.sales().get_lines(receipt.sale_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn cart_of_only_skipped_lines_commits_an_empty_ticket() {
    let db = test_db().await;
    let variant_id = seed_variant(&db, 10).await;

    // The skip rule is per line: a cart that skips everything still goes
    // through checkout and leaves a zero-total header with no lines.
    let engine = SaleEngine::new(db.clone());
    let receipt = engine
        .process_sale(&request(vec![
            line(variant_id, 0, 10000, 0),
            line(variant_id, -2, 10000, 0),
        ]))
        .await
        .unwrap();

    assert_eq!(receipt.total_cents, 0);
    assert_eq!(stock_of(&db, variant_id).await, 10);

    let sale = db.sales().get_sale(receipt.sale_id).await.unwrap().unwrap();
    assert_eq!(sale.total_cents, 0);
    assert!(db.sales().get_lines(receipt.sale_id).await.unwrap().is_empty());
}

// =============================================================================
// Rejections before any write
// =============================================================================

#[tokio::test]
async fn empty_cart_is_rejected() {
    let db = test_db().await;
    let engine = SaleEngine::new(db);

    let err = engine.process_sale(&request(vec![])).await.unwrap_err();
    assert!(matches!(err, SaleError::EmptyCart));
    assert_eq!(err.to_string(), "The cart is empty");
}

#[tokio::test]
async fn missing_clerk_is_rejected() {
    let db = test_db().await;
    let variant_id = seed_variant(&db, 10).await;
    let engine = SaleEngine::new(db.clone());

    let mut req = request(vec![line(variant_id, 1, 10000, 0)]);
    req.clerk_id = 0;

    let err = engine.process_sale(&req).await.unwrap_err();
    assert!(matches!(err, SaleError::MissingClerk));
    assert_eq!(stock_of(&db, variant_id).await, 10);
}

#[tokio::test]
async fn negative_unit_price_is_rejected() {
    let db = test_db().await;
    let variant_id = seed_variant(&db, 10).await;
    let engine = SaleEngine::new(db.clone());

    let err = engine
        .process_sale(&request(vec![line(variant_id, 1, -500, 0)]))
        .await
        .unwrap_err();
    assert!(matches!(err, SaleError::InvalidLine { .. }));
}

#[tokio::test]
async fn manual_discount_above_hundred_percent_aborts() {
    let db = test_db().await;
    let variant_id = seed_variant(&db, 10).await;
    let engine = SaleEngine::new(db.clone());

    let err = engine
        .process_sale(&request(vec![line(variant_id, 1, 10000, 15000)]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SaleError::InvalidDiscount { bps: 15000, .. }
    ));
    assert_eq!(stock_of(&db, variant_id).await, 10);
}

// =============================================================================
// Atomicity
// =============================================================================

#[tokio::test]
async fn oversell_rolls_back_everything() {
    let db = test_db().await;
    let variant_id = seed_variant(&db, 10).await;
    let engine = SaleEngine::new(db.clone());

    let err = engine
        .process_sale(&request(vec![line(variant_id, 1000, 10000, 0)]))
        .await
        .unwrap_err();
    assert!(matches!(err, SaleError::InsufficientStock { .. }));

    // Nothing committed: stock untouched, no header, no lines
    assert_eq!(stock_of(&db, variant_id).await, 10);
    assert!(db.sales().get_sale(1).await.unwrap().is_none());
    assert!(db.sales().get_lines(1).await.unwrap().is_empty());
}

#[tokio::test]
async fn failing_second_line_discards_the_first() {
    let db = test_db().await;
    let v1 = seed_variant(&db, 10).await;
    let product_id = db
        .catalog()
        .create_product("Basic Tee", Some("shirts"), 1999)
        .await
        .unwrap();
    let v2 = db
        .catalog()
        .create_variant(product_id, "S", "white", 1)
        .await
        .unwrap();

    let engine = SaleEngine::new(db.clone());
    let err = engine
        .process_sale(&request(vec![
            line(v1, 2, 10000, 0), // would succeed alone
            line(v2, 5, 1999, 0),  // exceeds stock of 1
        ]))
        .await
        .unwrap_err();
    assert!(matches!(err, SaleError::InsufficientStock { variant_id } if variant_id == v2));

    // The first line's decrement is rolled back with everything else
    assert_eq!(stock_of(&db, v1).await, 10);
    assert_eq!(stock_of(&db, v2).await, 1);
    assert!(db.sales().get_sale(1).await.unwrap().is_none());
}

#[tokio::test]
async fn unknown_variant_reports_insufficient_stock() {
    let db = test_db().await;
    let engine = SaleEngine::new(db.clone());

    let err = engine
        .process_sale(&request(vec![line(999, 1, 10000, 0)]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SaleError::InsufficientStock { variant_id: 999 }
    ));
}

#[tokio::test]
async fn expired_promotion_does_not_apply() {
    let db = test_db().await;
    let variant_id = seed_variant(&db, 10).await;

    let variant = db.catalog().get_variant(variant_id).await.unwrap().unwrap();
    let today = Utc::now().date_naive();
    db.discounts()
        .create(
            variant.product_id,
            9000,
            today - Duration::days(30),
            today - Duration::days(10),
        )
        .await
        .unwrap();

    let engine = SaleEngine::new(db.clone());
    let receipt = engine
        .process_sale(&request(vec![line(variant_id, 1, 10000, 0)]))
        .await
        .unwrap();

    assert_eq!(receipt.total_cents, 10000);
    let lines = db.sales().get_lines(receipt.sale_id).await.unwrap();
    assert_eq!(lines[0].discount_source, DiscountSource::None);
}

#[tokio::test]
async fn selling_exact_stock_reaches_zero() {
    let db = test_db().await;
    let variant_id = seed_variant(&db, 3).await;
    let engine = SaleEngine::new(db.clone());

    engine
        .process_sale(&request(vec![line(variant_id, 3, 10000, 0)]))
        .await
        .unwrap();

    assert_eq!(stock_of(&db, variant_id).await, 0);
}
