//! Price Adjustment Calculator
//!
//! Applies a percentage delta to a product's base and tier prices,
//! rounds each result up to the rounding unit, then clamps the tiers so
//! the discount ladder stays strictly monotonic:
//! `price_5_items < price_3_items < price`.

use shared::models::Product;

/// Prices are rounded up to the next multiple of this unit (IDR)
pub const ROUNDING_UNIT: f64 = 500.0;

/// Round a price up to the next multiple of [`ROUNDING_UNIT`]
fn beautify(price: f64) -> f64 {
    (price / ROUNDING_UNIT).ceil() * ROUNDING_UNIT
}

/// The recalculated price columns for one product
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustedPrices {
    pub price: f64,
    pub price_3_items: Option<f64>,
    pub price_5_items: Option<f64>,
}

/// Compute the adjusted prices for one product.
///
/// Unset or non-positive tiers stay unset. Tier clamps after rounding:
/// - tier 3 capped at `price - ROUNDING_UNIT`
/// - tier 5 capped at `tier3 - ROUNDING_UNIT`, or `price - 2×ROUNDING_UNIT`
///   when tier 3 is absent
pub fn adjust_prices(product: &Product, percentage: f64) -> AdjustedPrices {
    let factor = 1.0 + percentage / 100.0;
    let new_price = beautify(product.price * factor);

    let new_price3 = product.price_3_items.filter(|p| *p > 0.0).map(|p3| {
        let rounded = beautify(p3 * factor);
        if rounded >= new_price {
            new_price - ROUNDING_UNIT
        } else {
            rounded
        }
    });

    let new_price5 = product.price_5_items.filter(|p| *p > 0.0).map(|p5| {
        let rounded = beautify(p5 * factor);
        match new_price3 {
            Some(p3) if rounded >= p3 => p3 - ROUNDING_UNIT,
            Some(_) => rounded,
            None if rounded >= new_price => new_price - 2.0 * ROUNDING_UNIT,
            None => rounded,
        }
    });

    AdjustedPrices {
        price: new_price,
        price_3_items: new_price3,
        price_5_items: new_price5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: f64, p3: Option<f64>, p5: Option<f64>) -> Product {
        Product {
            id: 1,
            name: "Busi NGK".into(),
            price,
            price_3_items: p3,
            price_5_items: p5,
            stock: 10,
            weight: 100,
            last_price_update: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_rounds_up_to_unit() {
        // 10000 * 1.03 = 10300 → 10500
        let adjusted = adjust_prices(&product(10_000.0, None, None), 3.0);
        assert_eq!(adjusted.price, 10_500.0);
    }

    #[test]
    fn test_negative_percentage() {
        // 10000 * 0.9 = 9000, already a multiple of 500
        let adjusted = adjust_prices(&product(10_000.0, None, None), -10.0);
        assert_eq!(adjusted.price, 9_000.0);
    }

    #[test]
    fn test_tiers_scaled_and_monotonic() {
        let adjusted = adjust_prices(&product(10_000.0, Some(9_000.0), Some(8_000.0)), 10.0);
        // 11000 / 9900→10000 / 8800→9000
        assert_eq!(adjusted.price, 11_000.0);
        assert_eq!(adjusted.price_3_items, Some(10_000.0));
        assert_eq!(adjusted.price_5_items, Some(9_000.0));

        let p3 = adjusted.price_3_items.unwrap();
        let p5 = adjusted.price_5_items.unwrap();
        assert!(p5 < p3 && p3 < adjusted.price);
    }

    #[test]
    fn test_tier3_clamped_below_base() {
        // Rounding pushes both to the same multiple; tier 3 must drop a unit
        let adjusted = adjust_prices(&product(10_100.0, Some(10_000.0), None), 0.0);
        assert_eq!(adjusted.price, 10_500.0);
        assert_eq!(adjusted.price_3_items, Some(10_000.0));
    }

    #[test]
    fn test_tier5_clamped_below_tier3() {
        let adjusted = adjust_prices(&product(10_000.0, Some(9_100.0), Some(9_050.0)), 0.0);
        // tier3 → 9500, tier5 rounds to 9500 too → clamped to 9000
        assert_eq!(adjusted.price_3_items, Some(9_500.0));
        assert_eq!(adjusted.price_5_items, Some(9_000.0));
    }

    #[test]
    fn test_tier5_without_tier3_clamped_below_base() {
        let adjusted = adjust_prices(&product(10_000.0, None, Some(9_900.0)), 0.0);
        // tier5 rounds to 10000 == base → clamped two units under base
        assert_eq!(adjusted.price, 10_000.0);
        assert_eq!(adjusted.price_5_items, Some(9_000.0));
    }

    #[test]
    fn test_unset_tiers_stay_unset() {
        let adjusted = adjust_prices(&product(10_000.0, Some(0.0), None), 25.0);
        assert_eq!(adjusted.price_3_items, None);
        assert_eq!(adjusted.price_5_items, None);
    }

    #[test]
    fn test_monotonicity_holds_across_inputs() {
        // Property sweep: ladder stays strictly monotonic wherever both
        // tiers survive the adjustment
        for base in [1_000.0, 9_999.0, 55_555.0, 125_000.0] {
            for pct in [-50.0, -10.0, 0.0, 3.0, 12.5, 100.0] {
                let p = product(base, Some(base * 0.9), Some(base * 0.8));
                let adjusted = adjust_prices(&p, pct);
                if let (Some(p3), Some(p5)) = (adjusted.price_3_items, adjusted.price_5_items) {
                    assert!(
                        p5 < p3 && p3 < adjusted.price,
                        "ladder violated for base={base} pct={pct}: {adjusted:?}"
                    );
                }
            }
        }
    }
}
