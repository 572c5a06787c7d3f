//! Pricing Module
//!
//! Bulk price adjustment math and its batch runner. Per-line effective
//! prices live on [`shared::models::Product`]; this module owns the
//! admin-triggered percentage adjustment that rewrites the catalog.

mod adjuster;
mod bulk;

pub use adjuster::{AdjustedPrices, ROUNDING_UNIT, adjust_prices};
pub use bulk::{BulkAdjustOutcome, run_bulk_adjustment};
