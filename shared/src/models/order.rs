//! Order Model

use serde::{Deserialize, Serialize};

use super::order_item::OrderItem;
use super::payment_proof::PaymentProof;

/// Order fulfillment status
///
/// The nominal flow is pending → processing → shipped → completed with
/// cancelled reachable at any point. Admin edits overwrite the value
/// directly; no transition table is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Completed,
    Cancelled,
}

/// Payment status, driven by proof upload and admin verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum PaymentStatus {
    Pending,
    Uploaded,
    Verified,
    Failed,
}

/// Shipping method chosen at checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum ShippingMethod {
    /// Customer picks the order up at the store
    Pickup,
    /// Local ride-hail delivery, arranged out of band
    Ojol,
    /// Third-party courier with a quoted shipping cost
    Courier,
}

/// Order entity
///
/// `total_price` and `shipping_address` are snapshots captured at
/// checkout; later product price or user address edits never change
/// past orders. Orders are soft-deleted, never hard-deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub order_number: String,
    pub user_id: i64,
    pub total_price: f64,
    pub shipping_cost: f64,
    pub courier: Option<String>,
    pub courier_service: Option<String>,
    pub tracking_number: Option<String>,
    pub status: OrderStatus,
    pub shipping_method: ShippingMethod,
    pub shipping_address: String,
    pub payment_status: PaymentStatus,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,

    // -- Relations (populated by application code, skipped by FromRow) --
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub payment_proofs: Vec<PaymentProof>,
}

impl Order {
    /// Total price plus shipping cost
    pub fn grand_total(&self) -> f64 {
        self.total_price + self.shipping_cost
    }
}

/// Generate an order number: `GSM-<YYYYMMDD>-<5 uppercase alnum>`.
///
/// Not guaranteed globally unique; collisions are possible and unchecked.
pub fn generate_order_number() -> String {
    use rand::Rng;
    const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let date = chrono::Local::now().format("%Y%m%d");
    let mut rng = rand::thread_rng();
    let suffix: String = (0..5)
        .map(|_| CHARS[rng.gen_range(0..CHARS.len())] as char)
        .collect();
    format!("GSM-{date}-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_number_shape() {
        let number = generate_order_number();
        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "GSM");
        assert_eq!(parts[1].len(), 8);
        assert!(parts[1].bytes().all(|b| b.is_ascii_digit()));
        assert_eq!(parts[2].len(), 5);
        assert!(parts[2]
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Processing).unwrap(),
            "\"processing\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Uploaded).unwrap(),
            "\"uploaded\""
        );
        assert_eq!(
            serde_json::to_string(&ShippingMethod::Ojol).unwrap(),
            "\"ojol\""
        );
    }
}
