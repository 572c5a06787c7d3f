//! Order creation and checkout preview

use crate::db::repository::{cart, order, product};
use crate::services::notifier::{LineSummary, Notification, Notifier};
use crate::services::shipping::{QuoteRequest, ShippingRates};
use shared::models::{
    CartLine, CartSummary, Order, OrderItem, OrderStatus, PaymentStatus, ShippingMethod, User,
    generate_order_number,
};
use shared::util::{now_millis, snowflake_id};
use shared::{AppError, AppResult};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Checkout request as accepted by `POST /api/checkout`
#[derive(Debug, Clone, serde::Deserialize)]
pub struct PlaceOrder {
    pub shipping_method: ShippingMethod,
    pub courier: Option<String>,
    pub courier_service: Option<String>,
    /// Caller-supplied cost, used only when the rate provider has no
    /// quote for the route
    pub shipping_cost: Option<f64>,
    pub notes: Option<String>,
}

/// Pure-read preview for the checkout page
#[derive(Debug, Clone, serde::Serialize)]
pub struct CheckoutPreview {
    #[serde(flatten)]
    pub cart: CartSummary,
    pub has_address: bool,
}

/// Successful checkout result
#[derive(Debug, Clone, serde::Serialize)]
pub struct CheckoutReceipt {
    pub order_id: i64,
    pub order_number: String,
    pub subtotal: f64,
    pub shipping_cost: f64,
    pub total: f64,
    /// Address as shown on the confirmation: the stored snapshot plus
    /// the customer phone
    pub shipping_address: String,
}

/// The order engine. Owns its stores and outbound queue by injection;
/// no process-wide singletons.
#[derive(Clone)]
pub struct CheckoutEngine {
    pool: SqlitePool,
    notifier: Notifier,
    rates: Arc<dyn ShippingRates>,
}

impl CheckoutEngine {
    pub fn new(pool: SqlitePool, notifier: Notifier, rates: Arc<dyn ShippingRates>) -> Self {
        Self {
            pool,
            notifier,
            rates,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub(crate) fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Checkout preview: cart lines with tier-resolved subtotal, total
    /// weight and address completeness. Side-effect free.
    pub async fn prepare(&self, user: &User) -> AppResult<CheckoutPreview> {
        let lines = cart::find_lines(&self.pool, user.id).await?;
        if lines.is_empty() {
            return Err(AppError::cart_empty());
        }
        Ok(CheckoutPreview {
            cart: CartSummary::from_lines(lines),
            has_address: user.has_complete_address(),
        })
    }

    /// Turn the user's cart into an order.
    ///
    /// Preconditions are checked in a fixed order before any mutation:
    /// missing courier, incomplete address, empty cart. The mutation
    /// itself (order row, order lines, stock decrements, cart clear)
    /// is a single transaction; any failure rolls back everything.
    pub async fn place_order(&self, user: &User, req: &PlaceOrder) -> AppResult<CheckoutReceipt> {
        let courier = req
            .courier
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());

        if req.shipping_method == ShippingMethod::Courier {
            if courier.is_none() {
                return Err(AppError::missing_courier());
            }
            if !user.has_complete_address() {
                return Err(AppError::incomplete_address());
            }
        }

        // Precondition read; the transaction re-reads below
        let lines = cart::find_lines(&self.pool, user.id).await?;
        if lines.is_empty() {
            return Err(AppError::cart_empty());
        }

        let shipping_cost = self.resolve_shipping_cost(user, req, courier, &lines).await?;

        let mut tx = crate::db::begin_write(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to begin checkout: {e}")))?;

        // Re-read inside the transaction: these are the prices and
        // quantities the order snapshots
        let lines = cart::find_lines_tx(&mut tx, user.id).await?;
        if lines.is_empty() {
            return Err(AppError::cart_empty());
        }

        let subtotal: f64 = lines.iter().map(CartLine::subtotal).sum();
        let now = now_millis();

        let order_row = Order {
            id: snowflake_id(),
            order_number: generate_order_number(),
            user_id: user.id,
            total_price: subtotal,
            shipping_cost,
            courier: courier.map(str::to_string),
            courier_service: req
                .courier_service
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            tracking_number: None,
            status: OrderStatus::Pending,
            shipping_method: req.shipping_method,
            shipping_address: user.full_address(),
            payment_status: PaymentStatus::Pending,
            notes: req
                .notes
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            created_at: now,
            updated_at: now,
            items: Vec::new(),
            payment_proofs: Vec::new(),
        };

        order::insert_tx(&mut tx, &order_row).await?;

        for line in &lines {
            let item = OrderItem {
                id: snowflake_id(),
                order_id: order_row.id,
                product_id: line.product.id,
                product_name: line.product.name.clone(),
                quantity: line.item.quantity,
                price_at_purchase: line.product.effective_price(line.item.quantity),
                created_at: now,
            };
            order::insert_item_tx(&mut tx, &item).await?;

            // Conditional decrement: zero rows affected means another
            // checkout took the stock first; abort the whole order
            let decremented =
                product::decrement_stock(&mut tx, line.product.id, line.item.quantity).await?;
            if !decremented {
                return Err(AppError::insufficient_stock(line.product.id));
            }
        }

        cart::clear_tx(&mut tx, user.id).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit checkout: {e}")))?;

        let receipt = CheckoutReceipt {
            order_id: order_row.id,
            order_number: order_row.order_number.clone(),
            subtotal,
            shipping_cost,
            total: order_row.grand_total(),
            shipping_address: display_address(&order_row.shipping_address, user.phone.as_deref()),
        };

        tracing::info!(
            order_number = %receipt.order_number,
            user_id = user.id,
            total = receipt.total,
            "Order created"
        );

        self.notifier.publish(Notification::OrderPlaced {
            order_id: order_row.id,
            order_number: order_row.order_number,
            customer_name: user.name.clone(),
            customer_email: user.email.clone(),
            customer_phone: user.phone.clone(),
            shipping_address: receipt.shipping_address.clone(),
            lines: lines
                .iter()
                .map(|line| LineSummary {
                    product_name: line.product.name.clone(),
                    quantity: line.item.quantity,
                    unit_price: line.product.effective_price(line.item.quantity),
                    subtotal: line.subtotal(),
                })
                .collect(),
            subtotal,
            shipping_cost,
            grand_total: receipt.total,
        });

        Ok(receipt)
    }

    /// Shipping cost: 0 for pickup/ojol; for courier the server-side
    /// quote wins over the caller-supplied figure.
    async fn resolve_shipping_cost(
        &self,
        user: &User,
        req: &PlaceOrder,
        courier: Option<&str>,
        lines: &[CartLine],
    ) -> AppResult<f64> {
        match req.shipping_method {
            ShippingMethod::Pickup | ShippingMethod::Ojol => Ok(0.0),
            ShippingMethod::Courier => {
                // courier presence was validated above
                let courier = courier.unwrap_or_default();
                let weight: i64 = lines.iter().map(CartLine::total_weight).sum();
                let quote_req = QuoteRequest {
                    courier,
                    service: req.courier_service.as_deref(),
                    city_id: user.city_id.as_deref(),
                    weight,
                };
                match self.rates.quote(&quote_req).await? {
                    Some(quoted) => {
                        if let Some(supplied) = req.shipping_cost {
                            if (supplied - quoted).abs() > f64::EPSILON {
                                tracing::warn!(
                                    user_id = user.id,
                                    supplied,
                                    quoted,
                                    "Client shipping cost differs from server quote, using quote"
                                );
                            }
                        }
                        Ok(quoted)
                    }
                    None => {
                        let supplied = req.shipping_cost.unwrap_or(0.0);
                        tracing::warn!(
                            user_id = user.id,
                            courier,
                            supplied,
                            "No server-side shipping quote for route, trusting client cost"
                        );
                        Ok(supplied)
                    }
                }
            }
        }
    }
}

/// Confirmation display variant of the stored address
fn display_address(stored: &str, phone: Option<&str>) -> String {
    match phone.filter(|p| !p.is_empty()) {
        Some(phone) => format!("{stored} (Telp: {phone})"),
        None => stored.to_string(),
    }
}
