//! Checkout service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info, warn};
use trolley::calculate_totals;

use crate::{
    domain::{
        carts::{
            CartsService,
            models::{Cart, CartUpdate, CartUuid, ItemsMutation, NewCart},
        },
        checkout::errors::CheckoutError,
        history::UpdatedEntry,
        items::LineItem,
        orders::{
            OrdersService, OrdersServiceError,
            models::{NewOrder, Order, OrderFilter},
        },
    },
    sessions::{CartSession, CartSessionToken, CartSessionUpdate, ExpiringStore},
};

/// Recorded as the author of cart changes made through checkout workflows.
const CHECKOUT_ACTOR: &str = "checkout";

/// Checkout workflows over session bindings, the cart cache and the cart and order services.
#[derive(Clone)]
pub struct SessionCheckoutService {
    carts: Arc<dyn CartsService>,
    orders: Arc<dyn OrdersService>,
    sessions: ExpiringStore<CartSession>,
    cart_cache: ExpiringStore<Cart>,
}

impl SessionCheckoutService {
    #[must_use]
    pub fn new(
        carts: Arc<dyn CartsService>,
        orders: Arc<dyn OrdersService>,
        sessions: ExpiringStore<CartSession>,
        cart_cache: ExpiringStore<Cart>,
    ) -> Self {
        Self {
            carts,
            orders,
            sessions,
            cart_cache,
        }
    }

    /// The raw session key inside `token`.
    fn session_key<'t>(&self, token: &'t str) -> Result<&'t str, CheckoutError> {
        token
            .strip_prefix(self.sessions.prefix())
            .filter(|key| !key.is_empty())
            .ok_or(CheckoutError::SessionInvalid)
    }

    /// Persist one item mutation against the loaded `cart` and cache the result.
    async fn apply(&self, cart: Cart, items: ItemsMutation, remaining: &[LineItem]) -> Result<Cart, CheckoutError> {
        let update = CartUpdate {
            expected_version: cart.version,
            totals: calculate_totals(remaining, &cart.discounts),
            items,
            updated: UpdatedEntry::now(CHECKOUT_ACTOR),
        };

        self.carts.update_cart(cart.uuid, update.clone()).await?;

        let updated = cart.with_update(&update);

        if let Err(error) = self.cart_cache.create(&updated.uuid.to_string(), &updated).await {
            warn!(cart_uuid = %updated.uuid, error = %error, "failed to cache updated cart");
        }

        Ok(updated)
    }
}

impl Debug for SessionCheckoutService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SessionCheckoutService")
            .field("sessions", &self.sessions)
            .field("cart_cache", &self.cart_cache)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CheckoutService for SessionCheckoutService {
    async fn resolve_session(&self, token: &str) -> Result<CartUuid, CheckoutError> {
        let key = self.session_key(token)?;

        let session = self
            .sessions
            .get(key)
            .await?
            .ok_or(CheckoutError::SessionInvalid)?;

        Ok(session.cart_uuid)
    }

    async fn resolve_cart(&self, token: &str) -> Result<Cart, CheckoutError> {
        let cart = self.resolve_session(token).await?;

        Ok(self.carts.get_cart(cart).await?)
    }

    async fn start_session(&self, cart: NewCart) -> Result<CartSessionToken, CheckoutError> {
        let cart_uuid = self.carts.create_cart(cart).await?;
        let key = cart_uuid.to_string();

        self.sessions
            .create(
                &key,
                &CartSession {
                    cart_uuid,
                    user_id: None,
                },
            )
            .await?;

        info!(cart_uuid = %cart_uuid, "cart session started");

        Ok(CartSessionToken {
            cart_uuid,
            token: format!("{}{key}", self.sessions.prefix()),
        })
    }

    async fn identify_session(&self, token: &str, user_id: String) -> Result<(), CheckoutError> {
        let key = self.session_key(token)?;

        let update = CartSessionUpdate {
            user_id: Some(user_id),
        };

        if self.sessions.update(key, &update).await? {
            Ok(())
        } else {
            Err(CheckoutError::SessionInvalid)
        }
    }

    async fn add_item(&self, cart: CartUuid, mut item: LineItem) -> Result<(), CheckoutError> {
        item.slug = item.slug.trim().to_string();

        if item.slug.is_empty() {
            return Err(CheckoutError::InvalidInput("item slug is required".to_string()));
        }

        let cart = self.carts.get_cart(cart).await?;

        let mut items = cart.items.clone();
        items.push(item.clone());

        let updated = self.apply(cart, ItemsMutation::Append(item), &items).await?;

        debug!(cart_uuid = %updated.uuid, total = %updated.total, "item added");

        Ok(())
    }

    async fn remove_item(&self, cart: CartUuid, slug: &str) -> Result<Cart, CheckoutError> {
        let slug = slug.trim();

        if slug.is_empty() {
            return Err(CheckoutError::InvalidInput("item slug is required".to_string()));
        }

        let cart = self.carts.get_cart(cart).await?;

        if !cart.has_item(slug) {
            return Err(CheckoutError::ItemNotFound);
        }

        let remaining: Vec<LineItem> = cart
            .items
            .iter()
            .filter(|item| item.slug != slug)
            .cloned()
            .collect();

        let updated = self
            .apply(cart, ItemsMutation::RemoveBySlug(slug.to_string()), &remaining)
            .await?;

        debug!(cart_uuid = %updated.uuid, total = %updated.total, "item removed");

        Ok(updated)
    }

    async fn checkout(&self, cart: CartUuid) -> Result<Order, CheckoutError> {
        let cart = self.carts.get_cart(cart).await?;

        match self.orders.get_order(OrderFilter::OpenForCart(cart.uuid)).await {
            Ok(open) => {
                debug!(cart_uuid = %cart.uuid, order_uuid = %open.uuid, "reusing open order");
                return Ok(open);
            }
            Err(OrdersServiceError::NotFound) => {}
            Err(error) => return Err(error.into()),
        }

        let order = match self.orders.create_order(NewOrder::draft_from_cart(&cart)).await {
            Ok(order) => order,
            Err(OrdersServiceError::AlreadyExists) => {
                debug!(cart_uuid = %cart.uuid, "lost checkout race, reusing open order");

                return Ok(self
                    .orders
                    .get_order(OrderFilter::OpenForCart(cart.uuid))
                    .await?);
            }
            Err(error) => return Err(error.into()),
        };

        Ok(self.orders.get_order(OrderFilter::Uuid(order)).await?)
    }

    async fn clear_sessions(&self) -> Result<u64, CheckoutError> {
        Ok(self.sessions.clear().await?)
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// The cart bound to a session token.
    async fn resolve_session(&self, token: &str) -> Result<CartUuid, CheckoutError>;

    /// The cart bound to a session token, loaded.
    async fn resolve_cart(&self, token: &str) -> Result<Cart, CheckoutError>;

    /// Create a cart and bind a new session to it.
    async fn start_session(&self, cart: NewCart) -> Result<CartSessionToken, CheckoutError>;

    /// Attach a user to an existing session.
    async fn identify_session(&self, token: &str, user_id: String) -> Result<(), CheckoutError>;

    /// Append an item and reprice the cart.
    async fn add_item(&self, cart: CartUuid, item: LineItem) -> Result<(), CheckoutError>;

    /// Remove every item with `slug` and reprice the cart.
    async fn remove_item(&self, cart: CartUuid, slug: &str) -> Result<Cart, CheckoutError>;

    /// Turn the cart into a draft order, or return the cart's open order if it has one.
    async fn checkout(&self, cart: CartUuid) -> Result<Order, CheckoutError>;

    /// Drop every session binding.
    async fn clear_sessions(&self) -> Result<u64, CheckoutError>;
}

#[cfg(test)]
mod tests {
    use mockall::{Sequence, predicate::eq};
    use rust_decimal::Decimal;
    use testresult::TestResult;
    use trolley::DiscountKind;

    use crate::{
        domain::{
            carts::{CachedCartsService, MockCartsService},
            items::Discount,
            orders::{MockOrdersService, StoredOrdersService},
        },
        test::{MemoryCartsRepository, MemoryOrdersRepository, MemoryStore, fixtures},
    };

    use super::*;

    struct Harness {
        checkout: SessionCheckoutService,
        carts: Arc<MemoryCartsRepository>,
        orders: Arc<MemoryOrdersRepository>,
        store: Arc<MemoryStore>,
    }

    fn harness() -> Harness {
        let store = Arc::new(MemoryStore::default());
        let carts = Arc::new(MemoryCartsRepository::default());
        let orders = Arc::new(MemoryOrdersRepository::default());

        let sessions = ExpiringStore::new(store.clone(), "cart_session:", 3_600);
        let cart_cache = ExpiringStore::new(store.clone(), "cart_cache:", 3_600);

        let checkout = SessionCheckoutService::new(
            Arc::new(CachedCartsService::new(carts.clone(), cart_cache.clone())),
            Arc::new(StoredOrdersService::new(orders.clone())),
            sessions,
            cart_cache,
        );

        Harness {
            checkout,
            carts,
            orders,
            store,
        }
    }

    fn with_mocks(carts: MockCartsService, orders: MockOrdersService) -> SessionCheckoutService {
        let store = Arc::new(MemoryStore::default());

        SessionCheckoutService::new(
            Arc::new(carts),
            Arc::new(orders),
            ExpiringStore::new(store.clone(), "cart_session:", 3_600),
            ExpiringStore::new(store, "cart_cache:", 3_600),
        )
    }

    fn discount(kind: DiscountKind, amount: i64) -> Discount {
        Discount {
            id: None,
            code: None,
            name: String::new(),
            kind,
            amount: Decimal::from(amount),
        }
    }

    #[tokio::test]
    async fn started_session_resolves_to_its_cart() -> TestResult {
        let h = harness();

        let session = h
            .checkout
            .start_session(fixtures::new_cart(vec![fixtures::item("shirt", 75, 1)]))
            .await?;

        assert_eq!(session.token, format!("cart_session:{}", session.cart_uuid));
        assert_eq!(h.checkout.resolve_session(&session.token).await?, session.cart_uuid);

        let cart = h.checkout.resolve_cart(&session.token).await?;

        assert_eq!(cart.uuid, session.cart_uuid);
        assert_eq!(cart.total, Decimal::from(75));

        Ok(())
    }

    #[tokio::test]
    async fn malformed_or_unknown_tokens_are_invalid_sessions() -> TestResult {
        let h = harness();
        let session = h.checkout.start_session(fixtures::new_cart(Vec::new())).await?;
        let raw = session.cart_uuid.to_string();

        for token in [raw.as_str(), "cart_session:", "cart_session:unknown", "other:abc"] {
            let result = h.checkout.resolve_session(token).await;

            assert!(
                matches!(result, Err(CheckoutError::SessionInvalid)),
                "expected SessionInvalid for {token:?}, got {result:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn add_then_remove_reprices_the_cart() -> TestResult {
        let h = harness();

        let session = h
            .checkout
            .start_session(fixtures::new_cart(vec![fixtures::item("shirt", 75, 1)]))
            .await?;
        let cart = session.cart_uuid;

        let started = h.checkout.resolve_cart(&session.token).await?;

        assert_eq!((started.sub_total, started.total), (Decimal::from(75), Decimal::from(75)));

        h.checkout.add_item(cart, fixtures::item("socks", 25, 2)).await?;

        let added = h.checkout.resolve_cart(&session.token).await?;

        assert_eq!((added.sub_total, added.total), (Decimal::from(125), Decimal::from(125)));
        assert_eq!(added.version, 1);

        let removed = h.checkout.remove_item(cart, "shirt").await?;

        assert_eq!((removed.sub_total, removed.total), (Decimal::from(50), Decimal::from(50)));
        assert_eq!(removed.items.len(), 1);
        assert_eq!(h.carts.stored(cart).map(|stored| stored.total), Some(Decimal::from(50)));

        Ok(())
    }

    #[tokio::test]
    async fn item_and_cart_discounts_both_apply() -> TestResult {
        let h = harness();

        let mut new_cart = fixtures::new_cart(Vec::new());
        new_cart.discounts = vec![discount(DiscountKind::Percentage, 10)];

        let session = h.checkout.start_session(new_cart).await?;

        let mut item = fixtures::item("jacket", 100, 1);
        item.discounts = vec![discount(DiscountKind::Fixed, 10)];

        h.checkout.add_item(session.cart_uuid, item).await?;

        let cart = h.checkout.resolve_cart(&session.token).await?;

        assert_eq!(cart.sub_total, Decimal::from(90));
        assert_eq!(cart.total, Decimal::from(81));

        Ok(())
    }

    #[tokio::test]
    async fn mutated_cart_is_served_from_cache() -> TestResult {
        let h = harness();
        let session = h.checkout.start_session(fixtures::new_cart(Vec::new())).await?;

        h.checkout
            .add_item(session.cart_uuid, fixtures::item("shirt", 75, 1))
            .await?;

        let reads = h.carts.reads();
        let cart = h.checkout.resolve_cart(&session.token).await?;

        assert_eq!(h.carts.reads(), reads);
        assert_eq!(Some(cart), h.carts.stored(session.cart_uuid));

        Ok(())
    }

    #[tokio::test]
    async fn removing_unknown_slug_writes_nothing() -> TestResult {
        let h = harness();
        let session = h
            .checkout
            .start_session(fixtures::new_cart(vec![fixtures::item("shirt", 75, 1)]))
            .await?;

        h.checkout.resolve_cart(&session.token).await?;

        let sets = h.store.sets();
        let result = h.checkout.remove_item(session.cart_uuid, "hat").await;

        assert!(
            matches!(result, Err(CheckoutError::ItemNotFound)),
            "expected ItemNotFound, got {result:?}"
        );
        assert_eq!(h.carts.writes(), 0);
        assert_eq!(h.store.sets(), sets);

        Ok(())
    }

    #[tokio::test]
    async fn blank_slug_is_invalid_input() {
        let result = harness().checkout.remove_item(CartUuid::new(), "  ").await;

        assert!(
            matches!(result, Err(CheckoutError::InvalidInput(_))),
            "expected InvalidInput, got {result:?}"
        );
    }

    #[tokio::test]
    async fn padded_slug_is_stored_trimmed_and_removable() -> TestResult {
        let h = harness();
        let session = h.checkout.start_session(fixtures::new_cart(Vec::new())).await?;
        let cart = session.cart_uuid;

        h.checkout.add_item(cart, fixtures::item(" tee ", 30, 1)).await?;

        let stored_slugs: Vec<String> = h
            .carts
            .stored(cart)
            .map(|stored| stored.items.into_iter().map(|item| item.slug).collect())
            .unwrap_or_default();

        assert_eq!(stored_slugs, vec!["tee".to_string()]);

        let removed = h.checkout.remove_item(cart, " tee ").await?;

        assert!(removed.items.is_empty(), "expected the padded slug to be removed");
        assert_eq!(removed.total, Decimal::ZERO);

        Ok(())
    }

    #[tokio::test]
    async fn adding_blank_slug_is_invalid_input() -> TestResult {
        let h = harness();
        let session = h.checkout.start_session(fixtures::new_cart(Vec::new())).await?;

        let result = h.checkout.add_item(session.cart_uuid, fixtures::item("   ", 30, 1)).await;

        assert!(
            matches!(result, Err(CheckoutError::InvalidInput(_))),
            "expected InvalidInput, got {result:?}"
        );
        assert_eq!(h.carts.writes(), 0);

        Ok(())
    }

    #[tokio::test]
    async fn removing_duplicate_slug_removes_every_match() -> TestResult {
        let h = harness();
        let session = h
            .checkout
            .start_session(fixtures::new_cart(vec![
                fixtures::item("shirt", 75, 1),
                fixtures::item("socks", 25, 2),
                fixtures::item("shirt", 75, 2),
            ]))
            .await?;

        let cart = h.checkout.remove_item(session.cart_uuid, "shirt").await?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total, Decimal::from(50));

        Ok(())
    }

    #[tokio::test]
    async fn stale_cart_write_is_a_conflict_and_purges_cache() -> TestResult {
        let h = harness();
        let session = h.checkout.start_session(fixtures::new_cart(Vec::new())).await?;
        let cart = session.cart_uuid;

        h.checkout.resolve_cart(&session.token).await?;
        h.carts.touch(cart);

        let result = h.checkout.add_item(cart, fixtures::item("shirt", 75, 1)).await;

        assert!(
            matches!(result, Err(CheckoutError::Conflict)),
            "expected Conflict, got {result:?}"
        );
        assert!(!h.store.contains(&format!("cart_cache:{cart}")));

        h.checkout.add_item(cart, fixtures::item("shirt", 75, 1)).await?;

        Ok(())
    }

    #[tokio::test]
    async fn checkout_twice_returns_the_same_order() -> TestResult {
        let h = harness();
        let session = h
            .checkout
            .start_session(fixtures::new_cart(vec![fixtures::item("shirt", 75, 1)]))
            .await?;

        let first = h.checkout.checkout(session.cart_uuid).await?;
        let second = h.checkout.checkout(session.cart_uuid).await?;

        assert_eq!(first.uuid, second.uuid);
        assert_eq!(first.cart_uuid, session.cart_uuid);
        assert_eq!(first.total, Decimal::from(75));
        assert_eq!(first.delivery_charge, Decimal::ZERO);
        assert_eq!(h.orders.inserts(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_of_unknown_cart_is_not_found() {
        let result = harness().checkout.checkout(CartUuid::new()).await;

        assert!(
            matches!(result, Err(CheckoutError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn checkout_race_returns_the_winning_order() -> TestResult {
        let cart = fixtures::cart(vec![fixtures::item("shirt", 75, 1)]);
        let cart_uuid = cart.uuid;
        let winner = fixtures::order(cart_uuid);
        let winner_uuid = winner.uuid;

        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .with(eq(cart_uuid))
            .return_once(move |_| Ok(cart));

        let mut orders = MockOrdersService::new();
        let mut seq = Sequence::new();

        orders
            .expect_get_order()
            .once()
            .in_sequence(&mut seq)
            .with(eq(OrderFilter::OpenForCart(cart_uuid)))
            .return_once(|_| Err(OrdersServiceError::NotFound));
        orders
            .expect_create_order()
            .once()
            .in_sequence(&mut seq)
            .return_once(|_| Err(OrdersServiceError::AlreadyExists));
        orders
            .expect_get_order()
            .once()
            .in_sequence(&mut seq)
            .with(eq(OrderFilter::OpenForCart(cart_uuid)))
            .return_once(move |_| Ok(winner));

        let order = with_mocks(carts, orders).checkout(cart_uuid).await?;

        assert_eq!(order.uuid, winner_uuid);

        Ok(())
    }

    #[tokio::test]
    async fn identify_session_binds_a_user() -> TestResult {
        let h = harness();
        let session = h.checkout.start_session(fixtures::new_cart(Vec::new())).await?;

        h.checkout
            .identify_session(&session.token, "user-1".to_string())
            .await?;

        let stored = h
            .store
            .value(&session.token)
            .ok_or("session binding should exist")?;

        assert!(stored.contains("\"user_id\":\"user-1\""), "{stored}");
        assert_eq!(h.checkout.resolve_session(&session.token).await?, session.cart_uuid);

        let result = h
            .checkout
            .identify_session("cart_session:unknown", "user-1".to_string())
            .await;

        assert!(
            matches!(result, Err(CheckoutError::SessionInvalid)),
            "expected SessionInvalid, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn session_store_outage_is_a_storage_failure() {
        let store = Arc::new(MemoryStore::failing());

        let checkout = SessionCheckoutService::new(
            Arc::new(MockCartsService::new()),
            Arc::new(MockOrdersService::new()),
            ExpiringStore::new(store.clone(), "cart_session:", 3_600),
            ExpiringStore::new(store, "cart_cache:", 3_600),
        );

        let result = checkout.resolve_session("cart_session:abc").await;

        assert!(
            matches!(result, Err(CheckoutError::Storage(_))),
            "expected Storage, got {result:?}"
        );
    }

    #[tokio::test]
    async fn clear_sessions_leaves_cart_cache_alone() -> TestResult {
        let h = harness();
        let session = h.checkout.start_session(fixtures::new_cart(Vec::new())).await?;

        h.checkout.resolve_cart(&session.token).await?;

        assert_eq!(h.checkout.clear_sessions().await?, 1);
        assert!(h.store.contains(&format!("cart_cache:{}", session.cart_uuid)));

        Ok(())
    }
}
