//! Cart Item Model

use super::product::Product;
use serde::{Deserialize, Serialize};

/// Cart line, unique per (user, product)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CartItem {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Cart line joined with its product, as returned by the cart and
/// checkout APIs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub item: CartItem,
    pub product: Product,
}

impl CartLine {
    /// Line subtotal using the tier-resolved unit price
    pub fn subtotal(&self) -> f64 {
        self.product.effective_price(self.item.quantity) * self.item.quantity as f64
    }

    /// Line weight in grams
    pub fn total_weight(&self) -> i64 {
        self.product.weight * self.item.quantity
    }
}

/// Add-to-cart payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartAdd {
    pub product_id: i64,
    pub quantity: i64,
}

/// Cart summary returned by `GET /api/cart`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSummary {
    pub items: Vec<CartLine>,
    pub subtotal: f64,
    pub total_weight: i64,
    pub total_items: i64,
}

impl CartSummary {
    /// Build the summary from joined cart lines
    pub fn from_lines(items: Vec<CartLine>) -> Self {
        let subtotal = items.iter().map(CartLine::subtotal).sum();
        let total_weight = items.iter().map(CartLine::total_weight).sum();
        let total_items = items.iter().map(|l| l.item.quantity).sum();
        Self {
            items,
            subtotal,
            total_weight,
            total_items,
        }
    }
}
