//! # Carts
//!
//! In-memory only. A cart belongs to one browsing session, addressed by a
//! minted handle, and never touches the external store.
//!
//! - Lines are insertion-ordered and keyed by menu item id (unique).
//! - A quantity can never rest at zero: dropping to zero removes the line.
//! - The derived total is always `sum(unit_price * quantity)`.
//!
//! Carts live in the registry until checkout clears them or the sweeper
//! drops handles idle past the configured age.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::Serialize;
use store::MenuItem;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub id: String,
    pub name: String,
    pub unit_price: f64,
    pub category: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Repeated adds of the same item accumulate quantity.
    pub fn add_item(&mut self, item: &MenuItem) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == item.id) {
            line.quantity += 1;
            return;
        }
        self.lines.push(CartLine {
            id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.price,
            category: item.category.clone(),
            quantity: 1,
        });
    }

    /// Sets (not increments) the quantity. Zero or below removes the
    /// line; an absent id is a no-op.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == id) {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    pub fn remove_item(&mut self, id: &str) {
        self.lines.retain(|line| line.id != id);
    }

    pub fn total(&self) -> f64 {
        self.lines
            .iter()
            .map(|line| line.unit_price * line.quantity as f64)
            .sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn quantity_of(&self, id: &str) -> u32 {
        self.lines
            .iter()
            .find(|line| line.id == id)
            .map(|line| line.quantity)
            .unwrap_or(0)
    }

    /// Total item count across lines, the cart-badge number.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

struct Entry {
    cart: Cart,
    touched: Instant,
}

/// Registry of live carts keyed by handle. All mutations to one cart
/// serialize under the registry lock, so cart operations cannot race each
/// other.
#[derive(Default)]
pub struct Carts {
    inner: Mutex<HashMap<Uuid, Entry>>,
}

impl Carts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.lock().unwrap().insert(
            id,
            Entry {
                cart: Cart::default(),
                touched: Instant::now(),
            },
        );
        id
    }

    /// Runs `f` against the cart behind `id`, refreshing its idle clock.
    /// `None` when the handle is unknown or already swept.
    pub fn with<R>(&self, id: Uuid, f: impl FnOnce(&mut Cart) -> R) -> Option<R> {
        let mut inner = self.inner.lock().unwrap();
        let entry = inner.get_mut(&id)?;
        entry.touched = Instant::now();
        Some(f(&mut entry.cart))
    }

    /// Drops carts idle past `idle`, returning how many went.
    pub fn sweep(&self, idle: Duration) -> usize {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.len();
        inner.retain(|_, entry| entry.touched.elapsed() < idle);
        before - inner.len()
    }
}
