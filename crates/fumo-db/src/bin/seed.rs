//! # Seed Data Generator
//!
//! Fills an empty item store with sample rows for development.
//!
//! ## Usage
//! ```bash
//! # 100 rows (default)
//! cargo run -p fumo-db --bin seed
//!
//! # Custom amount and path
//! cargo run -p fumo-db --bin seed -- --count 1000 --db ./db/fumo.sqlite
//! ```
//!
//! Rows match the in-memory sample repository: `SKU1`/`Metadata 1` through
//! `SKU{n}`/`Metadata {n}`.

use fumo_core::{Metadata, SAMPLE_SIZE};
use fumo_db::{Database, DbConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count = SAMPLE_SIZE;
    let mut db_path = String::from("./db/fumo.sqlite");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse()?;
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Fumo Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of rows to generate (default: {})", SAMPLE_SIZE);
                println!("  -d, --db <PATH>    Database file path (default: ./db/fumo.sqlite)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Database: {}", db_path);
    println!("Rows:     {}", count);

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let items = db.items();

    let existing = items.count().await?;
    if existing > 0 {
        println!("Database already has {} rows, skipping seed.", existing);
        return Ok(());
    }

    let start = std::time::Instant::now();
    let mut generated = 0;

    for n in 1..=count {
        let sku = format!("SKU{}", n);
        if let Err(e) = items.insert(&sku, &Metadata::text(format!("Metadata {}", n))).await {
            eprintln!("Failed to insert {}: {}", sku, e);
            continue;
        }
        generated += 1;
    }

    println!("Generated {} rows in {:?}", generated, start.elapsed());
    db.close().await;

    Ok(())
}
