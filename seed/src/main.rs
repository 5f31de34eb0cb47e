//! Seeds the hosted store's `menu_items` table from the menu below.
//!
//! Insert-or-merge on the dish name, so rerunning after a price change
//! updates rows in place and never duplicates. Items not listed here are
//! left untouched; pull a dish off the menu by flipping its
//! `is_available` column in the store, not by deleting the row.

use std::env;

use anyhow::{Context, Result};
use store::{NewMenuItem, Store};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const MENU: &[(&str, &str, f64)] = &[
    ("starters", "Veg Manchurian Dry", 120.0),
    ("starters", "Gobi 65", 130.0),
    ("starters", "Paneer Tikka", 160.0),
    ("starters", "Chicken 65", 180.0),
    ("starters", "Chicken Lollipop (6 pcs)", 200.0),
    ("starters", "Fish Fingers", 220.0),
    ("mainCourse", "Veg Thali", 140.0),
    ("mainCourse", "Dal Tadka", 100.0),
    ("mainCourse", "Paneer Butter Masala", 170.0),
    ("mainCourse", "Butter Chicken", 200.0),
    ("mainCourse", "Chicken Curry", 180.0),
    ("mainCourse", "Mutton Rogan Josh", 250.0),
    ("mainCourse", "Egg Curry", 130.0),
    ("mainCourse", "Chapati (per piece)", 15.0),
    ("mainCourse", "Butter Naan", 25.0),
    ("biryani", "Veg Biryani", 140.0),
    ("biryani", "Egg Biryani", 150.0),
    ("biryani", "Chicken Dum Biryani", 200.0),
    ("biryani", "Mutton Biryani", 250.0),
    ("biryani", "Boneless Chicken Biryani", 230.0),
    ("biryani", "Special Family Chicken Biryani", 500.0),
    ("chinese", "Veg Noodles", 120.0),
    ("chinese", "Chicken Noodles", 150.0),
    ("chinese", "Veg Fried Rice", 130.0),
    ("chinese", "Chicken Fried Rice", 160.0),
    ("chinese", "Schezwan Fried Rice (Veg)", 140.0),
    ("chinese", "Schezwan Fried Rice (Chicken)", 170.0),
    ("chinese", "Chilli Chicken (Dry/Gravy)", 180.0),
    ("desserts", "Gulab Jamun (2 pcs)", 40.0),
    ("desserts", "Ice Cream (Vanilla/Strawberry)", 60.0),
    ("desserts", "Double Ka Meetha", 70.0),
    ("desserts", "Qubani Ka Meetha", 80.0),
    ("drinks", "Mineral Water (500 ml)", 20.0),
    ("drinks", "Soft Drinks (Coke/Pepsi)", 40.0),
    ("drinks", "Sweet Lassi", 50.0),
    ("drinks", "Masala Chaas", 40.0),
    ("drinks", "Fresh Lime Soda", 50.0),
    ("drinks", "Filter Coffee", 30.0),
    ("drinks", "Tea", 20.0),
];

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let store_url =
        env::var("STORE_URL").unwrap_or_else(|_| "http://localhost:54321".to_string());
    let store_key = env::var("STORE_API_KEY").context("STORE_API_KEY is not set")?;
    let store = Store::new(&store_url, &store_key);

    let rows: Vec<NewMenuItem> = MENU
        .iter()
        .map(|(category, name, price)| NewMenuItem {
            name: name.to_string(),
            category: category.to_string(),
            price: *price,
            description: None,
            is_available: true,
        })
        .collect();

    store
        .upsert_menu_items(&rows)
        .await
        .context("Menu upsert failed")?;

    info!("Seeded {} menu items", rows.len());
    Ok(())
}
