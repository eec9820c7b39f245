//! Writes `sample_trades.csv`, a synthetic transactions file in the layout
//! the dashboard reads, so it can be tried without the real dataset.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

const ROWS: usize = 15_000;
const SEED: u64 = 42;
const OUTPUT_PATH: &str = "sample_trades.csv";

const COUNTRIES: [&str; 8] = [
    "Chile", "Germany", "India", "Japan", "Kenya", "Mexico", "Norway", "Vietnam",
];
const SHIPPING_METHODS: [&str; 3] = ["Air", "Land", "Sea"];

/// Category → products sold in it, with a base unit price.
const CATALOGUE: [(&str, &[&str], f64); 5] = [
    ("Electronics", &["laptop", "phone", "camera"], 420.0),
    ("Clothing", &["jacket", "shirt", "shoes"], 45.0),
    ("Furniture", &["chair", "table", "sofa"], 260.0),
    ("Machinery", &["pump", "drill", "lathe"], 900.0),
    ("Toys", &["puzzle", "doll", "kite"], 18.0),
];

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Row<'a> {
    #[serde(rename = "Transaction_ID")]
    transaction_id: String,
    country: &'a str,
    product: &'a str,
    #[serde(rename = "Import_Export")]
    import_export: &'a str,
    quantity: u32,
    value: f64,
    date: String,
    category: &'a str,
    weight: f64,
    #[serde(rename = "Shipping_Method")]
    shipping_method: &'a str,
}

fn main() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(SEED);
    let first_day = NaiveDate::from_ymd_opt(2019, 1, 1).context("invalid start date")?;

    let mut writer = csv::Writer::from_path(OUTPUT_PATH)
        .with_context(|| format!("creating {OUTPUT_PATH}"))?;

    for i in 0..ROWS {
        let (category, products, unit_price) = CATALOGUE[rng.gen_range(0..CATALOGUE.len())];
        let quantity: u32 = rng.gen_range(1..=500);
        let weight = quantity as f64 * rng.gen_range(0.2..4.0);
        // prices drift by up to ±40% around the category base
        let value = quantity as f64 * unit_price * rng.gen_range(0.6..1.4) / 10.0;
        let date = first_day + Duration::days(rng.gen_range(0..5 * 365));

        let row = Row {
            transaction_id: format!("TX-{i:06}"),
            country: COUNTRIES.choose(&mut rng).copied().unwrap_or("Chile"),
            product: products.choose(&mut rng).copied().unwrap_or("item"),
            import_export: if rng.gen_bool(0.5) { "Import" } else { "Export" },
            quantity,
            value: (value * 100.0).round() / 100.0,
            date: date.format("%d-%m-%Y").to_string(),
            category,
            weight: (weight * 100.0).round() / 100.0,
            shipping_method: SHIPPING_METHODS.choose(&mut rng).copied().unwrap_or("Sea"),
        };
        writer.serialize(&row).context("writing row")?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {ROWS} transactions to {OUTPUT_PATH}");
    Ok(())
}
