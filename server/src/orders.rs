//! # Order Submission
//!
//! The checkout path. Everything local is validated before the first
//! external call; after that the flow is three sequential inserts against
//! the hosted store:
//!
//! 1. Resolve the customer — exact-email lookup when an email was given,
//!    otherwise (or on no match) a fresh `customers` row.
//! 2. Insert the `orders` row with status `pending`, the cart total, and
//!    the submitted customer fields denormalized onto it. The store
//!    assigns `order_number`.
//! 3. Insert one `order_items` row per cart line, prices snapshotted at
//!    submission time.
//!
//! There is no rollback: if a later insert fails, rows created by earlier
//! steps survive or not at the store's discretion. The cart is only
//! cleared once every insert has landed.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use store::{Customer, NewCustomer, NewOrder, NewOrderItem, Order, OrderStatus, Store, StoreError};
use uuid::Uuid;

use crate::cart::{Cart, Carts};
use crate::error::AppError;

/// The table operations checkout needs, as a seam so the flow can run
/// against an in-memory store in tests.
#[async_trait]
pub trait OrderTables: Send + Sync {
    async fn customer_by_email(&self, email: &str) -> Result<Option<Customer>, StoreError>;
    async fn insert_customer(&self, new: NewCustomer) -> Result<Customer, StoreError>;
    async fn insert_order(&self, new: NewOrder) -> Result<Order, StoreError>;
    async fn insert_order_items(&self, rows: Vec<NewOrderItem>) -> Result<(), StoreError>;
}

#[async_trait]
impl OrderTables for Store {
    async fn customer_by_email(&self, email: &str) -> Result<Option<Customer>, StoreError> {
        Store::customer_by_email(self, email).await
    }

    async fn insert_customer(&self, new: NewCustomer) -> Result<Customer, StoreError> {
        Store::insert_customer(self, &new).await
    }

    async fn insert_order(&self, new: NewOrder) -> Result<Order, StoreError> {
        Store::insert_order(self, &new).await
    }

    async fn insert_order_items(&self, rows: Vec<NewOrderItem>) -> Result<(), StoreError> {
        Store::insert_order_items(self, &rows).await
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OrderReceipt {
    pub order_id: String,
    pub order_number: String,
}

/// Runs the submission flow for the cart behind `cart_id`, clearing it on
/// success. The cart is untouched on any failure.
pub async fn submit_order(
    tables: &dyn OrderTables,
    carts: &Carts,
    cart_id: Uuid,
    info: &CustomerInfo,
) -> Result<OrderReceipt, AppError> {
    let cart = carts
        .with(cart_id, |cart| cart.clone())
        .ok_or(AppError::CartNotFound)?;

    let receipt = place_order(tables, &cart, info).await?;
    carts.with(cart_id, Cart::clear);
    Ok(receipt)
}

pub async fn place_order(
    tables: &dyn OrderTables,
    cart: &Cart,
    info: &CustomerInfo,
) -> Result<OrderReceipt, AppError> {
    if cart.is_empty() {
        return Err(AppError::EmptyCart);
    }

    let name = info.name.trim();
    let phone = info.phone.trim();
    if name.is_empty() || phone.is_empty() {
        return Err(AppError::MissingCustomerInfo);
    }

    // A blank email field means no email was supplied.
    let email = info
        .email
        .as_deref()
        .map(str::trim)
        .filter(|email| !email.is_empty());

    let existing = match email {
        Some(email) => tables
            .customer_by_email(email)
            .await
            .map_err(AppError::OrderSubmission)?,
        None => None,
    };

    let customer = match existing {
        Some(customer) => customer,
        None => tables
            .insert_customer(NewCustomer {
                name: name.to_string(),
                email: email.map(str::to_string),
                phone: phone.to_string(),
                address: info.address.clone(),
            })
            .await
            .map_err(AppError::OrderSubmission)?,
    };

    let order = tables
        .insert_order(NewOrder {
            customer_id: customer.id,
            customer_name: name.to_string(),
            customer_email: email.map(str::to_string),
            phone_number: phone.to_string(),
            delivery_address: info.address.clone(),
            notes: info.notes.clone(),
            total_amount: cart.total(),
            status: OrderStatus::Pending,
        })
        .await
        .map_err(AppError::OrderSubmission)?;

    let items: Vec<NewOrderItem> = cart
        .lines()
        .iter()
        .map(|line| NewOrderItem {
            order_id: order.id.clone(),
            item_name: line.name.clone(),
            item_category: line.category.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            total_price: line.unit_price * line.quantity as f64,
        })
        .collect();

    tables
        .insert_order_items(items)
        .await
        .map_err(AppError::OrderSubmission)?;

    Ok(OrderReceipt {
        order_id: order.id,
        order_number: order.order_number,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::Utc;
    use store::MenuItem;

    use super::*;

    /// In-memory stand-in for the hosted tables. Records every insert and
    /// can be told to fail a given step.
    #[derive(Default)]
    struct FakeTables {
        customers: Mutex<Vec<Customer>>,
        orders: Mutex<Vec<Order>>,
        order_items: Mutex<Vec<NewOrderItem>>,
        lookups: Mutex<Vec<String>>,
        fail_order_insert: bool,
    }

    impl FakeTables {
        fn with_customer(self, id: &str, email: &str) -> Self {
            self.customers.lock().unwrap().push(Customer {
                id: id.to_string(),
                name: "Existing".to_string(),
                email: Some(email.to_string()),
                phone: "1234567890".to_string(),
                address: None,
            });
            self
        }

        fn call_count(&self) -> usize {
            self.lookups.lock().unwrap().len()
                + self.customers.lock().unwrap().len()
                + self.orders.lock().unwrap().len()
                + self.order_items.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl OrderTables for FakeTables {
        async fn customer_by_email(&self, email: &str) -> Result<Option<Customer>, StoreError> {
            self.lookups.lock().unwrap().push(email.to_string());
            Ok(self
                .customers
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.email.as_deref() == Some(email))
                .cloned())
        }

        async fn insert_customer(&self, new: NewCustomer) -> Result<Customer, StoreError> {
            let customer = Customer {
                id: format!("cust-{}", self.customers.lock().unwrap().len() + 1),
                name: new.name,
                email: new.email,
                phone: new.phone,
                address: new.address,
            };
            self.customers.lock().unwrap().push(customer.clone());
            Ok(customer)
        }

        async fn insert_order(&self, new: NewOrder) -> Result<Order, StoreError> {
            if self.fail_order_insert {
                return Err(StoreError::Status {
                    status: 503,
                    body: "down".to_string(),
                });
            }
            let order = Order {
                id: format!("order-{}", self.orders.lock().unwrap().len() + 1),
                order_number: "ORD-1042".to_string(),
                customer_id: new.customer_id,
                customer_name: new.customer_name,
                customer_email: new.customer_email,
                phone_number: new.phone_number,
                delivery_address: new.delivery_address,
                notes: new.notes,
                total_amount: new.total_amount,
                status: new.status,
                created_at: Utc::now(),
            };
            self.orders.lock().unwrap().push(order.clone());
            Ok(order)
        }

        async fn insert_order_items(&self, rows: Vec<NewOrderItem>) -> Result<(), StoreError> {
            self.order_items.lock().unwrap().extend(rows);
            Ok(())
        }
    }

    fn menu_item(id: &str, price: f64) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: format!("Item {id}"),
            category: "biryani".to_string(),
            price,
            description: None,
            is_available: true,
        }
    }

    fn info(name: &str, phone: &str) -> CustomerInfo {
        CustomerInfo {
            name: name.to_string(),
            phone: phone.to_string(),
            email: None,
            address: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn empty_cart_fails_before_any_store_call() {
        let tables = FakeTables::default();
        let cart = Cart::default();

        let result = place_order(&tables, &cart, &info("Asha", "9999999999")).await;
        assert!(matches!(result, Err(AppError::EmptyCart)));
        assert_eq!(tables.call_count(), 0);
    }

    #[tokio::test]
    async fn blank_name_or_phone_fails_before_any_store_call() {
        let tables = FakeTables::default();
        let mut cart = Cart::default();
        cart.add_item(&menu_item("b3", 200.0));

        let result = place_order(&tables, &cart, &info("   ", "9999999999")).await;
        assert!(matches!(result, Err(AppError::MissingCustomerInfo)));

        let result = place_order(&tables, &cart, &info("Asha", "")).await;
        assert!(matches!(result, Err(AppError::MissingCustomerInfo)));
        assert_eq!(tables.call_count(), 0);
    }

    #[tokio::test]
    async fn happy_path_snapshots_totals_and_clears_the_cart() {
        let tables = FakeTables::default();
        let carts = Carts::new();
        let cart_id = carts.create();
        carts.with(cart_id, |cart| {
            cart.add_item(&menu_item("b3", 200.0));
            cart.update_quantity("b3", 2);
        });

        let receipt = submit_order(&tables, &carts, cart_id, &info("Asha", "9999999999"))
            .await
            .unwrap();
        assert_eq!(receipt.order_number, "ORD-1042");

        let orders = tables.orders.lock().unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].total_amount, 400.0);
        assert_eq!(orders[0].status, OrderStatus::Pending);
        assert_eq!(orders[0].customer_name, "Asha");

        let items = tables.order_items.lock().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].total_price, 400.0);
        assert_eq!(items[0].order_id, orders[0].id);

        // No email supplied, so no lookup and a fresh customer row.
        assert!(tables.lookups.lock().unwrap().is_empty());
        assert_eq!(tables.customers.lock().unwrap().len(), 1);

        assert_eq!(carts.with(cart_id, |cart| cart.is_empty()), Some(true));
    }

    #[tokio::test]
    async fn matching_email_reuses_the_customer() {
        let tables = FakeTables::default().with_customer("cust-7", "asha@example.com");
        let mut cart = Cart::default();
        cart.add_item(&menu_item("b3", 200.0));

        let mut customer = info("Asha", "9999999999");
        customer.email = Some("asha@example.com".to_string());

        place_order(&tables, &cart, &customer).await.unwrap();

        assert_eq!(tables.lookups.lock().unwrap().len(), 1);
        assert_eq!(tables.customers.lock().unwrap().len(), 1);
        assert_eq!(tables.orders.lock().unwrap()[0].customer_id, "cust-7");
    }

    #[tokio::test]
    async fn unmatched_email_creates_a_customer_with_it() {
        let tables = FakeTables::default();
        let mut cart = Cart::default();
        cart.add_item(&menu_item("b3", 200.0));

        let mut customer = info("Asha", "9999999999");
        customer.email = Some("new@example.com".to_string());

        place_order(&tables, &cart, &customer).await.unwrap();

        assert_eq!(tables.lookups.lock().unwrap().len(), 1);
        let customers = tables.customers.lock().unwrap();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].email.as_deref(), Some("new@example.com"));
    }

    #[tokio::test]
    async fn blank_email_means_no_lookup() {
        let tables = FakeTables::default();
        let mut cart = Cart::default();
        cart.add_item(&menu_item("b3", 200.0));

        let mut customer = info("Asha", "9999999999");
        customer.email = Some("   ".to_string());

        place_order(&tables, &cart, &customer).await.unwrap();

        assert!(tables.lookups.lock().unwrap().is_empty());
        assert_eq!(tables.customers.lock().unwrap()[0].email, None);
    }

    #[tokio::test]
    async fn store_failure_aborts_and_keeps_the_cart() {
        let tables = FakeTables {
            fail_order_insert: true,
            ..FakeTables::default()
        };
        let carts = Carts::new();
        let cart_id = carts.create();
        carts.with(cart_id, |cart| cart.add_item(&menu_item("b3", 200.0)));

        let result = submit_order(&tables, &carts, cart_id, &info("Asha", "9999999999")).await;
        assert!(matches!(result, Err(AppError::OrderSubmission(_))));

        // The customer row from step 2 survives; there is no rollback.
        assert_eq!(tables.customers.lock().unwrap().len(), 1);
        assert!(tables.order_items.lock().unwrap().is_empty());
        assert_eq!(carts.with(cart_id, |cart| cart.is_empty()), Some(false));
    }

    #[tokio::test]
    async fn unknown_cart_handle_is_not_found() {
        let tables = FakeTables::default();
        let carts = Carts::new();

        let result =
            submit_order(&tables, &carts, Uuid::new_v4(), &info("Asha", "9999999999")).await;
        assert!(matches!(result, Err(AppError::CartNotFound)));
    }
}
