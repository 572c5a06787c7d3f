//! Checkout / Order Engine
//!
//! The one subsystem with multi-step invariants: cart → order creation →
//! stock decrement → payment upload → admin verification. Order creation
//! runs inside a single SQLite transaction with a conditional stock
//! guard; everything after the commit is fire-and-forget through the
//! notification queue.

mod engine;
mod payments;

pub use engine::{CheckoutEngine, CheckoutPreview, CheckoutReceipt, PlaceOrder};
