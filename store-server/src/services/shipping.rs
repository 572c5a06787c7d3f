//! Shipping Rate Lookup
//!
//! Checkout must not trust a caller-supplied shipping cost, so courier
//! orders quote the injected [`ShippingRates`] provider server-side. The
//! HTTP client against the real rate provider lives outside this crate;
//! this is the seam it plugs into.

use async_trait::async_trait;
use shared::AppResult;
use std::collections::HashMap;

/// A quote request for one courier route
#[derive(Debug, Clone)]
pub struct QuoteRequest<'a> {
    pub courier: &'a str,
    pub service: Option<&'a str>,
    /// Destination city id from the user's stored address
    pub city_id: Option<&'a str>,
    /// Total parcel weight in grams
    pub weight: i64,
}

/// Server-side shipping cost source
#[async_trait]
pub trait ShippingRates: Send + Sync {
    /// Quote the cost for a route. `Ok(None)` means the provider has no
    /// rate for this route and the caller may fall back.
    async fn quote(&self, req: &QuoteRequest<'_>) -> AppResult<Option<f64>>;
}

/// Provider-less fallback: never quotes, so checkout keeps the
/// caller-supplied cost (logged at WARN by the engine).
#[derive(Debug, Default, Clone)]
pub struct NoRates;

#[async_trait]
impl ShippingRates for NoRates {
    async fn quote(&self, _req: &QuoteRequest<'_>) -> AppResult<Option<f64>> {
        Ok(None)
    }
}

/// Fixed per-courier rate table: cost = base + per_kg × ceil(weight/1kg).
///
/// Useful for tests and for stores with negotiated flat rates.
#[derive(Debug, Default, Clone)]
pub struct StaticRates {
    rates: HashMap<String, (f64, f64)>,
}

impl StaticRates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a courier with a base cost and a per-kilogram cost
    pub fn with_rate(mut self, courier: &str, base: f64, per_kg: f64) -> Self {
        self.rates.insert(courier.to_lowercase(), (base, per_kg));
        self
    }
}

#[async_trait]
impl ShippingRates for StaticRates {
    async fn quote(&self, req: &QuoteRequest<'_>) -> AppResult<Option<f64>> {
        let Some((base, per_kg)) = self.rates.get(&req.courier.to_lowercase()) else {
            return Ok(None);
        };
        let kilos = (req.weight as f64 / 1000.0).ceil().max(1.0);
        Ok(Some(base + per_kg * kilos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_rates_quote() {
        let rates = StaticRates::new().with_rate("jne", 9_000.0, 2_000.0);
        let req = QuoteRequest {
            courier: "JNE",
            service: Some("REG"),
            city_id: Some("23"),
            weight: 1_500,
        };
        // 9000 + 2000 * ceil(1.5kg)
        assert_eq!(rates.quote(&req).await.unwrap(), Some(13_000.0));
    }

    #[tokio::test]
    async fn test_unknown_courier_has_no_quote() {
        let rates = StaticRates::new().with_rate("jne", 9_000.0, 2_000.0);
        let req = QuoteRequest {
            courier: "sicepat",
            service: None,
            city_id: None,
            weight: 400,
        };
        assert_eq!(rates.quote(&req).await.unwrap(), None);
    }
}
