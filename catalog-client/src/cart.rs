//! Shopping cart
//!
//! [`CartHandle`] is the application-wide cart. Create one at startup and
//! pass clones to whatever needs it.

use std::sync::Arc;

use parking_lot::RwLock;
use rust_decimal::Decimal;
use shared::Product;

#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub product_id: String,
    pub name: String,
    /// Display price at the time the product was added
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl CartItem {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Add one unit of `product`; returns the new quantity
    pub fn add(&mut self, product: &Product) -> u32 {
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            item.quantity += 1;
            return item.quantity;
        }
        self.items.push(CartItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.display_price(),
            quantity: 1,
        });
        1
    }

    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        self.items.len() != before
    }

    /// Set the quantity of an item already in the cart; zero removes it
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(product_id);
        }
        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.items.iter().any(|i| i.product_id == product_id)
    }

    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.items
            .iter()
            .find(|i| i.product_id == product_id)
            .map_or(0, |i| i.quantity)
    }

    /// Total number of units
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Cloneable handle to the shared cart
#[derive(Debug, Clone, Default)]
pub struct CartHandle {
    inner: Arc<RwLock<Cart>>,
}

impl CartHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, product: &Product) -> u32 {
        let quantity = self.inner.write().add(product);
        tracing::debug!(product = %product.id, quantity, "added to cart");
        quantity
    }

    pub fn remove(&self, product_id: &str) -> bool {
        self.inner.write().remove(product_id)
    }

    pub fn set_quantity(&self, product_id: &str, quantity: u32) -> bool {
        self.inner.write().set_quantity(product_id, quantity)
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.inner.read().contains(product_id)
    }

    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.inner.read().quantity_of(product_id)
    }

    pub fn item_count(&self) -> u32 {
        self.inner.read().item_count()
    }

    pub fn total(&self) -> Decimal {
        self.inner.read().total()
    }

    pub fn clear(&self) {
        self.inner.write().clear()
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> Cart {
        self.inner.read().clone()
    }
}
