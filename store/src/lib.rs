//! # Hosted Store
//!
//! Client for the hosted backend service that owns all persistence.
//!
//! The service exposes two surfaces we consume:
//! - A row-level REST interface over the tables `menu_items`, `customers`,
//!   `orders`, and `order_items`. No SQL travels over the wire, only
//!   filtered/ordered row reads and single-row inserts/updates.
//! - An auth subsystem: password sign-in, sign-up with profile metadata,
//!   sign-out, and a current-session fetch.
//!
//! Both are opaque collaborators. The store assigns `id`, `order_number`,
//! and `created_at` on insert; the client treats them as server-generated
//! and never predicts them.

pub mod auth;
pub mod error;
pub mod models;
pub mod rest;

pub use auth::{AuthClient, AuthUser, Session, UserMetadata};
pub use error::StoreError;
pub use models::{
    Customer, MenuItem, NewCustomer, NewMenuItem, NewOrder, NewOrderItem, Order, OrderItem,
    OrderStatus, OrderWithItems,
};
pub use rest::Store;
