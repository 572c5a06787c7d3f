//! Order Item Model

use serde::{Deserialize, Serialize};

/// Order line with the unit price snapshotted at purchase time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    /// Product name at purchase time, for display after catalog edits
    pub product_name: String,
    pub quantity: i64,
    /// Tier-resolved unit price at purchase time, never recalculated
    pub price_at_purchase: f64,
    pub created_at: i64,
}

impl OrderItem {
    /// Line subtotal
    pub fn subtotal(&self) -> f64 {
        self.price_at_purchase * self.quantity as f64
    }
}
