//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::{
    config::StoreConfig,
    database::{self, Db},
    domain::{
        carts::{CachedCartsService, CartsService, PgCartsRepository},
        checkout::{CheckoutService, SessionCheckoutService},
        orders::{OrdersService, PgOrdersRepository, StoredOrdersService},
    },
    sessions::{CacheError, ExpiringStore, KeyValueStore, RedisStore},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run database migrations")]
    Migration(#[source] sqlx::migrate::MigrateError),

    #[error("failed to connect to session store")]
    Cache(#[source] CacheError),
}

/// Services wired to the configured stores.
#[derive(Clone)]
pub struct AppContext {
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub checkout: Arc<dyn CheckoutService>,
    db: Db,
}

impl AppContext {
    /// Connect to `PostgreSQL` and Redis and build the services on top of them.
    ///
    /// # Errors
    ///
    /// Returns an error when either store cannot be reached.
    pub async fn from_config(config: &StoreConfig) -> Result<Self, AppInitError> {
        let pool = database::connect(&config.database_url)
            .await
            .map_err(AppInitError::Database)?;

        let store = RedisStore::connect(&config.redis_url)
            .await
            .map_err(AppInitError::Cache)?;

        info!("connected to stores");

        Ok(Self::from_parts(Db::new(pool), Arc::new(store), config))
    }

    /// Build the services over already-connected stores.
    #[must_use]
    pub fn from_parts(db: Db, store: Arc<dyn KeyValueStore>, config: &StoreConfig) -> Self {
        let sessions = ExpiringStore::new(
            store.clone(),
            config.session_prefix.clone(),
            config.session_ttl_seconds,
        );

        let cart_cache = ExpiringStore::new(
            store,
            config.cart_cache_prefix.clone(),
            config.cart_cache_ttl_seconds,
        );

        let carts: Arc<dyn CartsService> = Arc::new(CachedCartsService::new(
            Arc::new(PgCartsRepository::new(db.clone())),
            cart_cache.clone(),
        ));

        let orders: Arc<dyn OrdersService> = Arc::new(StoredOrdersService::new(Arc::new(
            PgOrdersRepository::new(db.clone()),
        )));

        let checkout = Arc::new(SessionCheckoutService::new(
            carts.clone(),
            orders.clone(),
            sessions,
            cart_cache,
        ));

        Self {
            carts,
            orders,
            checkout,
            db,
        }
    }

    /// Apply pending database migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if any migration fails.
    pub async fn migrate(&self) -> Result<(), AppInitError> {
        database::migrate(self.db.pool())
            .await
            .map_err(AppInitError::Migration)
    }

    /// Release the database pool.
    pub async fn close(&self) {
        self.db.close().await;
    }
}
