//! In-memory stand-ins for the Redis and Postgres collaborators.

use std::{
    collections::HashMap,
    error::Error as StdError,
    sync::{
        Mutex, MutexGuard,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use jiff::Timestamp;
use redis::RedisError;
use sqlx::error::{DatabaseError, ErrorKind};
use thiserror::Error;

use crate::{
    domain::{
        carts::{
            CartsRepository,
            models::{Cart, CartUpdate, CartUuid, CartsFilter, NewCart},
        },
        history::UpdatedEntry,
        orders::{
            OrdersRepository,
            models::{NewOrder, Order, OrderFilter, OrderStatus, OrderUuid, OrdersFilter},
        },
    },
    sessions::{CacheError, KeyValueStore},
};

/// Stand-in for the error Postgres raises on a unique index conflict.
#[derive(Debug, Error)]
#[error("duplicate key value violates unique constraint \"orders_one_open_per_cart_idx\"")]
struct UniqueViolation;

impl DatabaseError for UniqueViolation {
    fn message(&self) -> &str {
        "duplicate key value violates unique constraint"
    }

    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
        self
    }

    fn constraint(&self) -> Option<&str> {
        Some("orders_one_open_per_cart_idx")
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::UniqueViolation
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn unavailable() -> CacheError {
    CacheError::Connection(RedisError::from((redis::ErrorKind::IoError, "store unavailable")))
}

/// Expiring key-value store kept in a map. TTLs are recorded, never enforced.
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    values: Mutex<HashMap<String, (String, u64)>>,
    failing: bool,
    sets: AtomicUsize,
}

impl MemoryStore {
    /// A store whose every call fails as if Redis were down.
    pub(crate) fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub(crate) fn insert(&self, key: &str, value: &str) {
        lock(&self.values).insert(key.to_string(), (value.to_string(), 0));
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        lock(&self.values).contains_key(key)
    }

    pub(crate) fn value(&self, key: &str) -> Option<String> {
        lock(&self.values).get(key).map(|(value, _)| value.clone())
    }

    pub(crate) fn len(&self) -> usize {
        lock(&self.values).len()
    }

    /// Number of successful `set` calls so far.
    pub(crate) fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), CacheError> {
        if self.failing { Err(unavailable()) } else { Ok(()) }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> Result<(), CacheError> {
        self.check()?;
        lock(&self.values).insert(key.to_string(), (value, ttl_seconds));
        self.sets.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.check()?;

        Ok(self.value(key))
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<(), CacheError> {
        self.check()?;

        if let Some((_, ttl)) = lock(&self.values).get_mut(key) {
            *ttl = ttl_seconds;
        }

        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), CacheError> {
        self.check()?;
        lock(&self.values).remove(key);

        Ok(())
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, CacheError> {
        self.check()?;

        let prefix = pattern.trim_end_matches('*');

        Ok(lock(&self.values)
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }
}

/// Cart documents kept in a map, honouring the version check.
#[derive(Debug, Default)]
pub(crate) struct MemoryCartsRepository {
    carts: Mutex<HashMap<CartUuid, Cart>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl MemoryCartsRepository {
    pub(crate) fn stored(&self, cart: CartUuid) -> Option<Cart> {
        lock(&self.carts).get(&cart).cloned()
    }

    /// Number of `find_cart` calls so far.
    pub(crate) fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `update_cart` calls so far, successful or not.
    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Bump the stored version as if another writer got there first.
    pub(crate) fn touch(&self, cart: CartUuid) {
        if let Some(stored) = lock(&self.carts).get_mut(&cart) {
            stored.version += 1;
        }
    }
}

#[async_trait]
impl CartsRepository for MemoryCartsRepository {
    async fn find_cart(&self, cart: CartUuid) -> Result<Option<Cart>, sqlx::Error> {
        self.reads.fetch_add(1, Ordering::SeqCst);

        Ok(self.stored(cart))
    }

    async fn cart_exists(&self, cart: CartUuid) -> Result<bool, sqlx::Error> {
        Ok(lock(&self.carts).contains_key(&cart))
    }

    async fn list_carts(&self, filter: CartsFilter) -> Result<Vec<Cart>, sqlx::Error> {
        let mut carts: Vec<Cart> = lock(&self.carts)
            .values()
            .filter(|cart| filter.status.is_none_or(|status| cart.status == status))
            .cloned()
            .collect();

        carts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        carts.truncate(filter.limit.map_or(usize::MAX, |limit| limit as usize));

        Ok(carts)
    }

    async fn insert_cart(&self, cart: NewCart) -> Result<CartUuid, sqlx::Error> {
        let totals = cart.totals();
        let uuid = CartUuid::new();

        let stored = Cart {
            uuid,
            status: cart.status,
            customer: cart.customer,
            items: cart.items,
            discounts: cart.discounts,
            sub_total: totals.sub_total,
            total: totals.total,
            delivery_charge: cart.delivery_charge,
            remarks: cart.remarks,
            created_at: Timestamp::now(),
            created_by: cart.created_by,
            updated: Vec::new(),
            version: 0,
        };

        lock(&self.carts).insert(uuid, stored);

        Ok(uuid)
    }

    async fn update_cart(&self, cart: CartUuid, update: CartUpdate) -> Result<u64, sqlx::Error> {
        self.writes.fetch_add(1, Ordering::SeqCst);

        let mut carts = lock(&self.carts);

        let Some(stored) = carts.get(&cart) else {
            return Ok(0);
        };

        if stored.version != update.expected_version {
            return Ok(0);
        }

        let updated = stored.clone().with_update(&update);
        carts.insert(cart, updated);

        Ok(1)
    }

    async fn delete_cart(&self, cart: CartUuid) -> Result<u64, sqlx::Error> {
        Ok(u64::from(lock(&self.carts).remove(&cart).is_some()))
    }

    async fn delete_carts(&self, filter: CartsFilter) -> Result<Vec<CartUuid>, sqlx::Error> {
        let mut carts = lock(&self.carts);
        let mut deleted = Vec::new();

        carts.retain(|uuid, cart| {
            let keep = filter.status.is_some_and(|status| cart.status != status);

            if !keep {
                deleted.push(*uuid);
            }

            keep
        });

        Ok(deleted)
    }
}

/// Order documents kept in a map, with at most one open order per cart.
#[derive(Debug, Default)]
pub(crate) struct MemoryOrdersRepository {
    orders: Mutex<HashMap<OrderUuid, Order>>,
    inserts: AtomicUsize,
}

impl MemoryOrdersRepository {
    /// Number of successful `insert_order` calls so far.
    pub(crate) fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    fn matches(order: &Order, filter: &OrdersFilter) -> bool {
        filter.cart.is_none_or(|cart| order.cart_uuid == cart)
            && filter.status.is_none_or(|status| order.status == status)
    }
}

#[async_trait]
impl OrdersRepository for MemoryOrdersRepository {
    async fn find_order(&self, filter: OrderFilter) -> Result<Option<Order>, sqlx::Error> {
        let orders = lock(&self.orders);

        Ok(match filter {
            OrderFilter::Uuid(order) => orders.get(&order).cloned(),
            OrderFilter::OpenForCart(cart) => orders
                .values()
                .filter(|order| order.cart_uuid == cart && order.status.is_open())
                .max_by_key(|order| order.created_at)
                .cloned(),
        })
    }

    async fn order_exists(&self, order: OrderUuid) -> Result<bool, sqlx::Error> {
        Ok(lock(&self.orders).contains_key(&order))
    }

    async fn list_orders(&self, filter: OrdersFilter) -> Result<Vec<Order>, sqlx::Error> {
        let mut orders: Vec<Order> = lock(&self.orders)
            .values()
            .filter(|order| Self::matches(order, &filter))
            .cloned()
            .collect();

        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders.truncate(filter.limit.map_or(usize::MAX, |limit| limit as usize));

        Ok(orders)
    }

    async fn insert_order(&self, order: NewOrder) -> Result<OrderUuid, sqlx::Error> {
        let mut orders = lock(&self.orders);

        if order.status.is_open()
            && orders
                .values()
                .any(|existing| existing.cart_uuid == order.cart_uuid && existing.status.is_open())
        {
            return Err(sqlx::Error::Database(Box::new(UniqueViolation)));
        }

        let uuid = OrderUuid::new();

        orders.insert(
            uuid,
            Order {
                uuid,
                cart_uuid: order.cart_uuid,
                status: order.status,
                fulfillment: order.fulfillment,
                customer: order.customer,
                items: order.items,
                discounts: order.discounts,
                sub_total: order.sub_total,
                total: order.total,
                delivery_charge: order.delivery_charge,
                remarks: order.remarks,
                billing_address: order.billing_address,
                shipping_address: order.shipping_address,
                created_at: order.created_at,
                created_by: order.created_by,
                updated: Vec::new(),
            },
        );

        self.inserts.fetch_add(1, Ordering::SeqCst);

        Ok(uuid)
    }

    async fn update_order_status(
        &self,
        order: OrderUuid,
        from: OrderStatus,
        to: OrderStatus,
        updated: UpdatedEntry,
    ) -> Result<u64, sqlx::Error> {
        let mut orders = lock(&self.orders);

        match orders.get_mut(&order) {
            Some(stored) if stored.status == from => {
                stored.status = to;
                stored.updated.push(updated);

                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn delete_order(&self, order: OrderUuid) -> Result<u64, sqlx::Error> {
        Ok(u64::from(lock(&self.orders).remove(&order).is_some()))
    }

    async fn delete_orders(&self, filter: OrdersFilter) -> Result<u64, sqlx::Error> {
        let mut orders = lock(&self.orders);
        let before = orders.len();

        orders.retain(|_, order| !Self::matches(order, &filter));

        Ok((before - orders.len()) as u64)
    }
}
