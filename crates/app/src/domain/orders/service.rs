//! Orders service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::domain::{
    history::UpdatedEntry,
    orders::{
        errors::OrdersServiceError,
        models::{NewOrder, Order, OrderFilter, OrderStatus, OrderUuid, OrdersFilter},
        repository::OrdersRepository,
    },
};

#[derive(Clone)]
pub struct StoredOrdersService {
    repository: Arc<dyn OrdersRepository>,
}

impl StoredOrdersService {
    #[must_use]
    pub fn new(repository: Arc<dyn OrdersRepository>) -> Self {
        Self { repository }
    }
}

impl Debug for StoredOrdersService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("StoredOrdersService").finish_non_exhaustive()
    }
}

#[async_trait]
impl OrdersService for StoredOrdersService {
    async fn get_order(&self, filter: OrderFilter) -> Result<Order, OrdersServiceError> {
        self.repository
            .find_order(filter)
            .await?
            .ok_or(OrdersServiceError::NotFound)
    }

    async fn list_orders(&self, filter: OrdersFilter) -> Result<Vec<Order>, OrdersServiceError> {
        Ok(self.repository.list_orders(filter).await?)
    }

    async fn create_order(&self, order: NewOrder) -> Result<OrderUuid, OrdersServiceError> {
        let cart_uuid = order.cart_uuid;
        let uuid = self.repository.insert_order(order).await?;

        info!(order_uuid = %uuid, cart_uuid = %cart_uuid, "order created");

        Ok(uuid)
    }

    async fn update_order_status(
        &self,
        order: OrderUuid,
        next: OrderStatus,
        by: String,
    ) -> Result<Order, OrdersServiceError> {
        let current = self.get_order(OrderFilter::Uuid(order)).await?;

        if !current.status.can_transition_to(next) {
            return Err(OrdersServiceError::InvalidTransition {
                from: current.status,
                to: next,
            });
        }

        let rows_affected = self
            .repository
            .update_order_status(order, current.status, next, UpdatedEntry::now(by))
            .await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::Conflict);
        }

        debug!(order_uuid = %order, from = %current.status, to = %next, "order status changed");

        self.get_order(OrderFilter::Uuid(order)).await
    }

    async fn delete_order(&self, order: OrderUuid) -> Result<(), OrdersServiceError> {
        if !self.repository.order_exists(order).await? {
            return Err(OrdersServiceError::NotFound);
        }

        if self.repository.delete_order(order).await? == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        Ok(())
    }

    async fn delete_orders(&self, filter: OrdersFilter) -> Result<u64, OrdersServiceError> {
        Ok(self.repository.delete_orders(filter).await?)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Retrieve a single order by id, or the open order of a cart.
    async fn get_order(&self, filter: OrderFilter) -> Result<Order, OrdersServiceError>;

    /// List orders, newest first.
    async fn list_orders(&self, filter: OrdersFilter) -> Result<Vec<Order>, OrdersServiceError>;

    /// Store a new order.
    ///
    /// Fails with [`OrdersServiceError::AlreadyExists`] if the cart already has an open order.
    async fn create_order(&self, order: NewOrder) -> Result<OrderUuid, OrdersServiceError>;

    /// Move an order to `next`, recording who did it.
    async fn update_order_status(
        &self,
        order: OrderUuid,
        next: OrderStatus,
        by: String,
    ) -> Result<Order, OrdersServiceError>;

    /// Deletes the order with the given UUID.
    async fn delete_order(&self, order: OrderUuid) -> Result<(), OrdersServiceError>;

    /// Deletes every order matching `filter`, returning how many were removed.
    async fn delete_orders(&self, filter: OrdersFilter) -> Result<u64, OrdersServiceError>;
}
