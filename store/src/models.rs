//! Row types for the four tables the application touches.
//!
//! Field names match the store's column names, so no serde renames are
//! needed. `New*` types are the insert payloads; the store fills in `id`,
//! `order_number`, and `created_at` on its side.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub description: Option<String>,
    pub is_available: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewMenuItem {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub description: Option<String>,
    pub is_available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub address: Option<String>,
}

/// Closed set of order states. Transitions are unconstrained: the admin
/// path may set any value from any value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "preparing" => Some(Self::Preparing),
            "ready" => Some(Self::Ready),
            "delivered" => Some(Self::Delivered),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    /// Server-assigned, unique, human-facing. Opaque to the client.
    pub order_number: String,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub phone_number: String,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    pub customer_id: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub phone_number: String,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
    pub total_amount: f64,
    pub status: OrderStatus,
}

/// Snapshot of one cart line at submission time. Does not track later
/// changes to the menu item it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub item_name: String,
    pub item_category: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_price: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewOrderItem {
    pub order_id: String,
    pub item_name: String,
    pub item_category: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_price: f64,
}

/// An order row with its `order_items` embedded by the store's
/// nested-resource select.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_accepts_every_state() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn status_parse_rejects_junk() {
        assert_eq!(OrderStatus::parse("shipped"), None);
        assert_eq!(OrderStatus::parse("Pending"), None);
        assert_eq!(OrderStatus::parse(""), None);
    }

    #[test]
    fn status_serializes_lowercase() {
        let body = serde_json::to_string(&OrderStatus::Preparing).unwrap();
        assert_eq!(body, "\"preparing\"");
    }

    #[test]
    fn order_with_items_deserializes_embedded_rows() {
        let body = serde_json::json!({
            "id": "o1",
            "order_number": "ORD-1042",
            "customer_id": "c1",
            "customer_name": "Asha",
            "customer_email": null,
            "phone_number": "9999999999",
            "delivery_address": null,
            "notes": null,
            "total_amount": 400.0,
            "status": "pending",
            "created_at": "2026-08-01T12:00:00Z",
            "order_items": [{
                "item_name": "Chicken Dum Biryani",
                "item_category": "biryani",
                "quantity": 2,
                "unit_price": 200.0,
                "total_price": 400.0
            }]
        });

        let row: OrderWithItems = serde_json::from_value(body).unwrap();
        assert_eq!(row.order.order_number, "ORD-1042");
        assert_eq!(row.order.status, OrderStatus::Pending);
        assert_eq!(row.order_items.len(), 1);
        assert_eq!(row.order_items[0].total_price, 400.0);
    }
}
