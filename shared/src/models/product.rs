//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
///
/// Tiered prices are only honored when set and strictly positive. The
/// quantity-5 tier takes priority over the quantity-3 tier, which takes
/// priority over the base price.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_3_items: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_5_items: Option<f64>,
    pub stock: i64,
    /// Weight in grams
    pub weight: i64,
    pub last_price_update: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Product {
    /// Unit price for the given purchase quantity after resolving tiers
    pub fn effective_price(&self, quantity: i64) -> f64 {
        if quantity >= 5 {
            if let Some(p5) = self.price_5_items.filter(|p| *p > 0.0) {
                return p5;
            }
        }
        if quantity >= 3 {
            if let Some(p3) = self.price_3_items.filter(|p| *p > 0.0) {
                return p3;
            }
        }
        self.price
    }
}

/// Update payload for the product fields this subsystem owns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPrices {
    pub price: f64,
    pub price_3_items: Option<f64>,
    pub price_5_items: Option<f64>,
}
