use std::env;

use reqwest::Client;
use serde_json::{json, Value};

// Walks the customer path against a running server: browse the menu,
// build a cart, check out. Manual tool, so unwraps are fine.
#[tokio::main]
async fn main() {
    let base = env::var("SERVER_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let http = Client::new();

    let menu: Value = http
        .get(format!("{base}/menu"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let sections = menu["sections"].as_array().unwrap();
    println!("Menu has {} sections", sections.len());

    let item_id = sections[0]["items"][0]["id"].as_str().unwrap();
    let item_name = sections[0]["items"][0]["name"].as_str().unwrap();
    println!("Ordering: {item_name}");

    let cart: Value = http
        .post(format!("{base}/cart"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let cart_id = cart["cart_id"].as_str().unwrap();
    println!("Cart: {cart_id}");

    let cart: Value = http
        .post(format!("{base}/cart/{cart_id}/items"))
        .json(&json!({ "item_id": item_id }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    println!("Cart total after add: {}", cart["total"]);

    let cart: Value = http
        .patch(format!("{base}/cart/{cart_id}/items/{item_id}"))
        .json(&json!({ "quantity": 2 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    println!("Cart total at quantity 2: {}", cart["total"]);

    let receipt: Value = http
        .post(format!("{base}/orders"))
        .json(&json!({
            "cart_id": cart_id,
            "name": "Tester",
            "phone": "9999999999",
            "notes": "end to end run",
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    println!("Placed order {}", receipt["order_number"]);

    let cart: Value = http
        .get(format!("{base}/cart/{cart_id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    println!("Cart total after checkout: {}", cart["total"]);
}
