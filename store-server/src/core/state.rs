//! Server state: dependency-injected services shared by all handlers

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::checkout::CheckoutEngine;
use crate::core::Config;
use crate::db::DbService;
use crate::server::JwtService;
use crate::server::middleware::RateLimiter;
use crate::services::notifier::{LogSink, Notifier, NotifierService};
use crate::services::shipping::{NoRates, ShippingRates};

/// Shared server state.
///
/// Everything here is cheap to clone (pool and services are
/// reference-counted). There are no process-wide singletons: handlers
/// and the checkout engine receive their stores through this struct.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Access token service
    pub jwt_service: Arc<JwtService>,
    /// Per-IP request throttle
    pub rate_limiter: Arc<RateLimiter>,
    /// The order engine
    pub checkout: CheckoutEngine,
}

impl ServerState {
    /// Compose the state from already-built parts (tests inject their
    /// own pool, sink and rate provider here)
    pub fn new(
        config: Config,
        pool: SqlitePool,
        notifier: Notifier,
        rates: Arc<dyn ShippingRates>,
    ) -> Self {
        let jwt_service = Arc::new(JwtService::new(&config.jwt_secret));
        let rate_limiter = Arc::new(RateLimiter::new(config.rate_limit_per_minute));
        let checkout = CheckoutEngine::new(pool.clone(), notifier, rates);
        Self {
            config,
            pool,
            jwt_service,
            rate_limiter,
            checkout,
        }
    }

    /// Full initialization: work directory layout, database and
    /// migrations, notification worker.
    ///
    /// Returns the state plus the [`NotifierService`] whose worker the
    /// caller must keep alive (and shut down on exit).
    pub async fn initialize(config: &Config) -> anyhow::Result<(Self, NotifierService)> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_dir().join("store.db");
        let db = DbService::new(&db_path.to_string_lossy()).await?;

        let notifier_service = NotifierService::start(Arc::new(LogSink));
        let state = Self::new(
            config.clone(),
            db.pool,
            notifier_service.notifier(),
            Arc::new(NoRates),
        );
        Ok((state, notifier_service))
    }
}
