//! Client-side shopping cart.

use std::{
    cell::RefCell,
    collections::HashMap,
    io,
    path::PathBuf,
};

use thiserror::Error;

use crate::{
    dto::orders::CreateOrderRequest,
    models::{LineItem, Product},
    store::write_replace,
};

pub const CART_KEY: &str = "gift_store_cart";

#[derive(Debug, Error)]
pub enum CartError {
    #[error("failed to encode cart")]
    Encode(#[from] serde_json::Error),

    #[error("failed to persist cart")]
    Persist(#[from] io::Error),
}

pub trait CartStorage {
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
}

impl<S: CartStorage + ?Sized> CartStorage for &S {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        (**self).set(key, value)
    }
}

#[derive(Debug, Clone)]
pub struct FileCartStorage {
    dir: PathBuf,
}

impl FileCartStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl CartStorage for FileCartStorage {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        write_replace(&self.dir, &self.path(key), value.as_bytes())
    }
}

#[derive(Debug, Default)]
pub struct MemoryCartStorage {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryCartStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryCartStorage {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct CheckoutDetails {
    pub customer_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: String,
    pub notes: Option<String>,
}

pub struct Cart<S: CartStorage> {
    storage: S,
    items: Vec<LineItem>,
}

impl<S: CartStorage> Cart<S> {
    /// Restores the cart from `storage`; starts empty if the slot is missing
    /// or holds something that is not a cart.
    pub fn load(storage: S) -> Self {
        let items: Vec<LineItem> = match storage.get(CART_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "stored cart is corrupt, starting empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "stored cart unreadable, starting empty");
                Vec::new()
            }
        };
        Self { storage, items }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds `quantity` of `product`, merging into an existing line for the
    /// same id. A quantity of 0 adds one.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        let quantity = quantity.max(1);
        match self.items.iter_mut().find(|item| item.id == product.id) {
            Some(existing) => {
                existing.quantity = existing.effective_quantity().saturating_add(quantity);
            }
            None => self.items.push(LineItem::snapshot(product, quantity)),
        }
        self.persist()
    }

    pub fn remove(&mut self, id: &str) -> Result<(), CartError> {
        self.items.retain(|item| item.id != id);
        self.persist()
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(LineItem::line_total).sum()
    }

    pub fn count(&self) -> u32 {
        self.items.iter().map(LineItem::effective_quantity).sum()
    }

    pub fn clear(&mut self) -> Result<(), CartError> {
        self.items.clear();
        self.persist()
    }

    pub fn checkout_request(&self, details: CheckoutDetails) -> CreateOrderRequest {
        CreateOrderRequest {
            customer_name: details.customer_name,
            phone: details.phone,
            email: details.email,
            address: details.address,
            notes: details.notes,
            items: self.items.clone(),
            total: self.total(),
        }
    }

    fn persist(&self) -> Result<(), CartError> {
        let raw = serde_json::to_string(&self.items)?;
        self.storage.set(CART_KEY, &raw)?;
        Ok(())
    }
}
