//! Product Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EntityRef;

fn default_true() -> bool {
    true
}

/// Product entity as returned by the listing API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Discount in percent (e.g., 15 = 15% off)
    #[serde(default, with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    /// Discounted price computed server-side, when available
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub discount_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<EntityRef>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            discount: Decimal::ZERO,
            discount_price: None,
            category: None,
            brand: None,
            tags: Vec::new(),
            image: None,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn has_discount(&self) -> bool {
        self.discount > Decimal::ZERO
    }

    /// Price shown to the customer.
    ///
    /// Prefers the server-computed `discount_price`, otherwise applies the
    /// percentage discount to `price`.
    pub fn display_price(&self) -> Decimal {
        if let Some(discounted) = self.discount_price {
            return discounted;
        }
        if !self.has_discount() {
            return self.price;
        }
        self.price - self.price * self.discount / Decimal::ONE_HUNDRED
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().and_then(EntityRef::name)
    }

    pub fn brand_name(&self) -> Option<&str> {
        self.brand.as_ref().and_then(EntityRef::name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_price_without_discount() {
        let product = Product::new("p1", "Phone", Decimal::new(49999, 2));
        assert_eq!(product.display_price(), Decimal::new(49999, 2));
    }

    #[test]
    fn test_display_price_applies_percentage() {
        let mut product = Product::new("p1", "Phone", Decimal::from(200));
        product.discount = Decimal::from(15);
        assert_eq!(product.display_price(), Decimal::from(170));
    }

    #[test]
    fn test_display_price_prefers_server_value() {
        let mut product = Product::new("p1", "Phone", Decimal::from(200));
        product.discount = Decimal::from(15);
        product.discount_price = Some(Decimal::new(16999, 2));
        assert_eq!(product.display_price(), Decimal::new(16999, 2));
    }

    #[test]
    fn test_deserialize_wire_product() {
        let json = r#"{
            "_id": "p1",
            "name": "Laptop",
            "description": "Thin and light",
            "price": 1299.5,
            "discount": 10,
            "category": {"_id": "c1", "name": "Computers"},
            "brand": "b1",
            "tags": ["sale"],
            "createdAt": "2024-03-01T10:00:00.000Z"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, "p1");
        assert_eq!(product.price, Decimal::new(12995, 1));
        assert_eq!(product.category_name(), Some("Computers"));
        assert_eq!(product.brand.as_ref().map(EntityRef::id), Some("b1"));
        assert_eq!(product.brand_name(), None);
        assert!(product.is_active);
    }
}
