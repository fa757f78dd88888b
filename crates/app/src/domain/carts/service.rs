//! Carts service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, warn};

use crate::{
    domain::carts::{
        errors::CartsServiceError,
        models::{Cart, CartUpdate, CartUuid, CartsFilter, NewCart},
        repository::CartsRepository,
    },
    sessions::ExpiringStore,
};

/// Carts backed by a durable repository with a cache-aside read path.
#[derive(Clone)]
pub struct CachedCartsService {
    repository: Arc<dyn CartsRepository>,
    cache: ExpiringStore<Cart>,
}

impl CachedCartsService {
    #[must_use]
    pub fn new(repository: Arc<dyn CartsRepository>, cache: ExpiringStore<Cart>) -> Self {
        Self { repository, cache }
    }

    async fn ensure_exists(&self, cart: CartUuid) -> Result<(), CartsServiceError> {
        if self.repository.cart_exists(cart).await? {
            Ok(())
        } else {
            Err(CartsServiceError::NotFound)
        }
    }

    async fn invalidate(&self, cart: CartUuid) {
        if let Err(error) = self.cache.destroy(&cart.to_string()).await {
            warn!(cart_uuid = %cart, error = %error, "failed to invalidate cached cart");
        }
    }
}

impl Debug for CachedCartsService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CachedCartsService")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CartsService for CachedCartsService {
    async fn get_cart(&self, cart: CartUuid) -> Result<Cart, CartsServiceError> {
        let key = cart.to_string();

        match self.cache.get(&key).await {
            Ok(Some(cached)) => {
                debug!(cart_uuid = %cart, "cart served from cache");
                return Ok(cached);
            }
            Ok(None) => {}
            Err(error) => {
                warn!(cart_uuid = %cart, error = %error, "failed to read cached cart");
            }
        }

        let found = self
            .repository
            .find_cart(cart)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        if let Err(error) = self.cache.create(&key, &found).await {
            warn!(cart_uuid = %cart, error = %error, "failed to cache cart");
        }

        Ok(found)
    }

    async fn list_carts(&self, filter: CartsFilter) -> Result<Vec<Cart>, CartsServiceError> {
        Ok(self.repository.list_carts(filter).await?)
    }

    async fn create_cart(&self, cart: NewCart) -> Result<CartUuid, CartsServiceError> {
        let uuid = self.repository.insert_cart(cart).await?;

        debug!(cart_uuid = %uuid, "cart created");

        Ok(uuid)
    }

    async fn update_cart(&self, cart: CartUuid, update: CartUpdate) -> Result<(), CartsServiceError> {
        self.ensure_exists(cart).await?;

        let expected_version = update.expected_version;
        let rows_affected = self.repository.update_cart(cart, update).await?;

        self.invalidate(cart).await;

        if rows_affected == 0 {
            warn!(cart_uuid = %cart, expected_version, "cart version conflict");
            return Err(CartsServiceError::Conflict);
        }

        Ok(())
    }

    async fn delete_cart(&self, cart: CartUuid) -> Result<(), CartsServiceError> {
        self.ensure_exists(cart).await?;

        if self.repository.delete_cart(cart).await? == 0 {
            return Err(CartsServiceError::NotFound);
        }

        self.invalidate(cart).await;

        Ok(())
    }

    async fn delete_carts(&self, filter: CartsFilter) -> Result<u64, CartsServiceError> {
        let deleted = self.repository.delete_carts(filter).await?;

        for cart in &deleted {
            self.invalidate(*cart).await;
        }

        debug!(deleted = deleted.len(), "carts deleted");

        Ok(deleted.len() as u64)
    }

    async fn clear_cache(&self) -> Result<u64, CartsServiceError> {
        Ok(self.cache.clear().await?)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve a single cart, from the cache when possible.
    async fn get_cart(&self, cart: CartUuid) -> Result<Cart, CartsServiceError>;

    /// List carts, newest first.
    async fn list_carts(&self, filter: CartsFilter) -> Result<Vec<Cart>, CartsServiceError>;

    /// Store a new cart with totals derived from its items and discounts.
    async fn create_cart(&self, cart: NewCart) -> Result<CartUuid, CartsServiceError>;

    /// Apply one item mutation with its recomputed totals.
    ///
    /// Fails with [`CartsServiceError::Conflict`] when the cart has moved past
    /// `update.expected_version`.
    async fn update_cart(&self, cart: CartUuid, update: CartUpdate) -> Result<(), CartsServiceError>;

    /// Deletes the cart with the given UUID.
    async fn delete_cart(&self, cart: CartUuid) -> Result<(), CartsServiceError>;

    /// Deletes every cart matching `filter`, returning how many were removed.
    async fn delete_carts(&self, filter: CartsFilter) -> Result<u64, CartsServiceError>;

    /// Drop every cached cart.
    async fn clear_cache(&self) -> Result<u64, CartsServiceError>;
}
