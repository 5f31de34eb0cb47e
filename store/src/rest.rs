//! # Row Queries
//!
//! The store's REST interface maps one URL segment per table and encodes
//! filters as query pairs:
//!
//! - `GET  /rest/v1/{table}?select=*&col=eq.value&order=col.asc`
//! - `POST /rest/v1/{table}` with a JSON row (array for bulk), returning
//!   the created rows when asked via `Prefer: return=representation`
//! - `PATCH /rest/v1/{table}?id=eq.value` with the changed columns
//!
//! Every call carries the project api key; reads and writes here run with
//! that key's table grants. Joined reads use the embedded-resource select
//! (`select=*,order_items(...)`).
//!
//! No timeouts are configured; a hung call hangs the caller's request.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use tracing::debug;

use crate::error::StoreError;
use crate::models::{
    Customer, MenuItem, NewCustomer, NewMenuItem, NewOrder, NewOrderItem, Order, OrderStatus,
    OrderWithItems,
};

const ORDER_ITEM_COLUMNS: &str = "item_name,item_category,quantity,unit_price,total_price";

pub struct Store {
    http: Client,
    base_url: String,
    api_key: String,
}

impl Store {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Rows from `menu_items` that are offerable right now, ordered by
    /// name, optionally narrowed to one category.
    pub async fn available_menu_items(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<MenuItem>, StoreError> {
        let mut query = vec![
            ("select", "*".to_string()),
            ("is_available", "eq.true".to_string()),
            ("order", "name.asc".to_string()),
        ];
        if let Some(category) = category {
            query.push(("category", format!("eq.{category}")));
        }
        self.rows("menu_items", &query).await
    }

    /// One `menu_items` row by id, available or not.
    pub async fn menu_item_by_id(&self, id: &str) -> Result<Option<MenuItem>, StoreError> {
        let query = [
            ("select", "*".to_string()),
            ("id", format!("eq.{id}")),
            ("limit", "1".to_string()),
        ];
        let rows: Vec<MenuItem> = self.rows("menu_items", &query).await?;
        Ok(rows.into_iter().next())
    }

    pub async fn customer_by_email(&self, email: &str) -> Result<Option<Customer>, StoreError> {
        let query = [
            ("select", "*".to_string()),
            ("email", format!("eq.{email}")),
            ("limit", "1".to_string()),
        ];
        let rows: Vec<Customer> = self.rows("customers", &query).await?;
        Ok(rows.into_iter().next())
    }

    pub async fn insert_customer(&self, new: &NewCustomer) -> Result<Customer, StoreError> {
        self.insert_returning("customers", new).await
    }

    pub async fn insert_order(&self, new: &NewOrder) -> Result<Order, StoreError> {
        self.insert_returning("orders", new).await
    }

    /// Bulk insert, one row per cart line. Nothing comes back; the rows
    /// are never read except through the order join.
    pub async fn insert_order_items(&self, rows: &[NewOrderItem]) -> Result<(), StoreError> {
        let response = self
            .request(Method::POST, "order_items")
            .json(rows)
            .send()
            .await?;
        ok_empty(response).await
    }

    /// Orders newest-first with their items embedded, optionally filtered
    /// to one status.
    pub async fn orders_with_items(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderWithItems>, StoreError> {
        let mut query = vec![
            ("select", format!("*,order_items({ORDER_ITEM_COLUMNS})")),
            ("order", "created_at.desc".to_string()),
        ];
        if let Some(status) = status {
            query.push(("status", format!("eq.{status}")));
        }
        self.rows("orders", &query).await
    }

    /// The single mutation the application performs on an order after
    /// creation.
    pub async fn update_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<(), StoreError> {
        let response = self
            .request(Method::PATCH, "orders")
            .query(&[("id", format!("eq.{order_id}"))])
            .json(&json!({ "status": status }))
            .send()
            .await?;
        ok_empty(response).await
    }

    /// Seeding path: insert-or-merge on the dish name.
    pub async fn upsert_menu_items(&self, rows: &[NewMenuItem]) -> Result<(), StoreError> {
        let response = self
            .request(Method::POST, "menu_items")
            .query(&[("on_conflict", "name")])
            .header("Prefer", "resolution=merge-duplicates")
            .json(rows)
            .send()
            .await?;
        ok_empty(response).await
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let url = format!("{}/rest/v1/{table}", self.base_url);
        debug!("{method} {url}");
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn rows<T, Q>(&self, table: &str, query: &Q) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self
            .request(Method::GET, table)
            .query(query)
            .send()
            .await?;
        ok_json(response).await
    }

    async fn insert_returning<T, B>(&self, table: &str, body: &B) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let response = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        let rows: Vec<T> = ok_json(response).await?;
        rows.into_iter().next().ok_or(StoreError::EmptyReply)
    }
}

async fn ok_json<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(StoreError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json().await?)
}

async fn ok_empty(response: Response) -> Result<(), StoreError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(StoreError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(())
}
