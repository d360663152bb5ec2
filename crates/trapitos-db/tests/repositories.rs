//! Integration tests for the repository layer, against an isolated
//! in-memory SQLite database with the real migrations applied.

use chrono::{Duration, Utc};
use trapitos_db::repository::discount::DiscountRepository;
use trapitos_db::{Database, DbConfig};

async fn test_db() -> Database {
    Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database")
}

#[tokio::test]
async fn catalog_roundtrip() {
    let db = test_db().await;
    let catalog = db.catalog();

    let product_id = catalog
        .create_product("Basic Tee", Some("shirts"), 1999)
        .await
        .unwrap();
    let variant_id = catalog
        .create_variant(product_id, "M", "black", 12)
        .await
        .unwrap();

    let inventory = catalog.list_inventory().await.unwrap();
    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory[0].variant_id, variant_id);
    assert_eq!(inventory[0].name, "Basic Tee");
    assert_eq!(inventory[0].stock_on_hand, 12);
    assert_eq!(inventory[0].base_price_cents, 1999);

    catalog.set_stock(variant_id, 30).await.unwrap();
    let variant = catalog.get_variant(variant_id).await.unwrap().unwrap();
    assert_eq!(variant.stock_on_hand, 30);

    catalog.update_price(product_id, 2499).await.unwrap();
    let inventory = catalog.list_inventory().await.unwrap();
    assert_eq!(inventory[0].base_price_cents, 2499);
}

#[tokio::test]
async fn deactivated_product_leaves_inventory() {
    let db = test_db().await;
    let catalog = db.catalog();

    let product_id = catalog.create_product("Old Line", None, 500).await.unwrap();
    catalog
        .create_variant(product_id, "S", "white", 3)
        .await
        .unwrap();

    catalog.deactivate_product(product_id).await.unwrap();
    assert!(catalog.list_inventory().await.unwrap().is_empty());
}

#[tokio::test]
async fn set_stock_on_unknown_variant_is_not_found() {
    let db = test_db().await;
    let err = db.catalog().set_stock(999, 5).await.unwrap_err();
    assert!(matches!(err, trapitos_db::DbError::NotFound { .. }));
}

#[tokio::test]
async fn active_discount_picks_largest_in_window() {
    let db = test_db().await;
    let catalog = db.catalog();
    let discounts = db.discounts();

    let product_id = catalog
        .create_product("Denim Jacket", Some("outerwear"), 10000)
        .await
        .unwrap();
    let variant_id = catalog
        .create_variant(product_id, "M", "indigo", 10)
        .await
        .unwrap();

    let today = Utc::now().date_naive();

    // Overlapping windows: the larger percentage wins
    discounts
        .create(product_id, 1000, today - Duration::days(5), today + Duration::days(5))
        .await
        .unwrap();
    discounts
        .create(product_id, 2000, today - Duration::days(1), today + Duration::days(1))
        .await
        .unwrap();
    // Expired window, must be ignored
    discounts
        .create(product_id, 9000, today - Duration::days(30), today - Duration::days(10))
        .await
        .unwrap();

    let mut conn = db.pool().acquire().await.unwrap();
    let bps = DiscountRepository::active_discount_bps(&mut conn, variant_id, today)
        .await
        .unwrap();
    assert_eq!(bps, 2000);
}

#[tokio::test]
async fn no_discount_means_zero() {
    let db = test_db().await;
    let catalog = db.catalog();

    let product_id = catalog.create_product("Canvas Belt", None, 1499).await.unwrap();
    let variant_id = catalog
        .create_variant(product_id, "One Size", "tan", 8)
        .await
        .unwrap();

    let today = Utc::now().date_naive();
    let bps = db
        .discounts()
        .active_for_variant(variant_id, today)
        .await
        .unwrap();
    assert_eq!(bps, 0);
}

#[tokio::test]
async fn customer_roundtrip() {
    let db = test_db().await;
    let customers = db.customers();

    let id = customers
        .register("Maria Lopez", Some("555-0101"), None, None)
        .await
        .unwrap();

    let found = customers.find_by_phone("555-0101").await.unwrap().unwrap();
    assert_eq!(found.id, id);
    assert_eq!(found.full_name, "Maria Lopez");

    assert_eq!(customers.list_active().await.unwrap().len(), 1);

    customers.deactivate(id).await.unwrap();
    assert!(customers.find_by_phone("555-0101").await.unwrap().is_none());
    assert!(customers.list_active().await.unwrap().is_empty());
}
