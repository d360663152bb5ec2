//! # Seed Data Generator
//!
//! Populates the database with a demo clothing catalog for development.
//!
//! ## Usage
//! ```bash
//! cargo run -p trapitos-db --bin seed
//!
//! # Specify database path
//! cargo run -p trapitos-db --bin seed -- --db ./data/trapitos.db
//! ```
//!
//! Creates products with size/color variants and stock, a couple of
//! promotion windows, and a few customers.

use chrono::{Duration, Utc};
use std::env;
use trapitos_db::{Database, DbConfig};

/// (name, category, price_cents, sizes, colors)
const PRODUCTS: &[(&str, &str, i64, &[&str], &[&str])] = &[
    ("Basic Tee", "shirts", 1999, &["S", "M", "L", "XL"], &["white", "black", "navy"]),
    ("Oxford Shirt", "shirts", 4599, &["S", "M", "L"], &["white", "sky blue"]),
    ("Slim Jeans", "pants", 6999, &["28", "30", "32", "34"], &["indigo", "black"]),
    ("Chino Pants", "pants", 5499, &["30", "32", "34"], &["khaki", "olive"]),
    ("Denim Jacket", "outerwear", 10000, &["S", "M", "L"], &["indigo"]),
    ("Wool Cardigan", "outerwear", 8499, &["S", "M", "L"], &["gray", "camel"]),
    ("Summer Dress", "dresses", 7299, &["XS", "S", "M"], &["floral", "red"]),
    ("Canvas Belt", "accessories", 1499, &["One Size"], &["tan", "black"]),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./trapitos_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Trapitos POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./trapitos_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Trapitos POS Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected, migrations applied");

    let existing = db.catalog().list_inventory().await?;
    if !existing.is_empty() {
        println!("⚠ Database already has {} inventory rows", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    let catalog = db.catalog();
    let mut variant_count = 0;
    let mut first_product_id = None;

    for (seed, (name, category, price_cents, sizes, colors)) in PRODUCTS.iter().enumerate() {
        let product_id = catalog
            .create_product(name, Some(category), *price_cents)
            .await?;
        first_product_id.get_or_insert(product_id);

        for size in sizes.iter() {
            for (color_idx, color) in colors.iter().enumerate() {
                // Deterministic but varied stock, 4..=15
                let stock = 4 + ((seed * 7 + color_idx * 3) % 12) as i64;
                catalog
                    .create_variant(product_id, size, color, stock)
                    .await?;
                variant_count += 1;
            }
        }
    }

    println!("✓ {} products, {} variants", PRODUCTS.len(), variant_count);

    // A couple of running promotions on the first product
    if let Some(product_id) = first_product_id {
        let today = Utc::now().date_naive();
        let discounts = db.discounts();
        discounts
            .create(product_id, 2000, today - Duration::days(3), today + Duration::days(11))
            .await?;
        discounts
            .create(product_id, 1000, today - Duration::days(30), today - Duration::days(10))
            .await?;
        println!("✓ 2 promotion windows (one active, one expired)");
    }

    let customers = db.customers();
    customers
        .register("Maria Fernanda Lopez", Some("555-0101"), None, Some("12 Juniper St"))
        .await?;
    customers
        .register("Diego Ramirez", Some("555-0102"), Some("diego@example.com"), None)
        .await?;
    println!("✓ 2 customers");

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
