//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use trolley_app::domain::{
    carts::{
        MockCartsService,
        models::{Cart, CartStatus, CartUuid},
    },
    checkout::MockCheckoutService,
    customers::Customer,
    items::{ItemSource, LineItem, ProductUuid},
    orders::{
        MockOrdersService,
        models::{NewOrder, Order, OrderUuid},
    },
};

use crate::state::State;

pub(crate) const TEST_API_KEY: &str = "test-api-key";

pub(crate) const TEST_SESSION: &str = "cart_session:0190b6f4-5c1e-7d2a-9f00-1a2b3c4d5e6f";

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_list_carts().never();
    carts.expect_delete_carts().never();

    carts
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_get_order().never();
    orders.expect_list_orders().never();
    orders.expect_delete_order().never();

    orders
}

fn strict_checkout_mock() -> MockCheckoutService {
    let mut checkout = MockCheckoutService::new();

    checkout.expect_resolve_session().never();
    checkout.expect_checkout().never();

    checkout
}

fn state(carts: MockCartsService, orders: MockOrdersService, checkout: MockCheckoutService) -> Arc<State> {
    Arc::new(State::new(
        Arc::new(carts),
        Arc::new(orders),
        Arc::new(checkout),
        TEST_API_KEY.to_string(),
    ))
}

pub(crate) fn strict_state() -> Arc<State> {
    state(strict_carts_mock(), strict_orders_mock(), strict_checkout_mock())
}

fn service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}

pub(crate) fn checkout_service(checkout: MockCheckoutService, route: Router) -> Service {
    service(state(strict_carts_mock(), strict_orders_mock(), checkout), route)
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    service(state(carts, strict_orders_mock(), strict_checkout_mock()), route)
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    service(state(strict_carts_mock(), orders, strict_checkout_mock()), route)
}

pub(crate) fn make_item(slug: &str, price: i64) -> LineItem {
    LineItem {
        source: ItemSource::Catalog {
            product_id: ProductUuid::new(),
        },
        name: slug.to_string(),
        description: String::new(),
        price: Decimal::from(price),
        quantity: Decimal::ONE,
        sku: slug.to_uppercase(),
        slug: slug.to_string(),
        options: Vec::new(),
        categories: Vec::new(),
        tags: Vec::new(),
        discounts: Vec::new(),
    }
}

pub(crate) fn make_cart(uuid: CartUuid, items: Vec<LineItem>) -> Cart {
    let total = items.iter().map(|item| item.price * item.quantity).sum::<Decimal>();

    Cart {
        uuid,
        status: CartStatus::Active,
        customer: Customer {
            email: "shopper@example.com".to_string(),
            ..Customer::default()
        },
        items,
        discounts: Vec::new(),
        sub_total: total,
        total,
        delivery_charge: Decimal::ZERO,
        remarks: String::new(),
        created_at: Timestamp::UNIX_EPOCH,
        created_by: "test".to_string(),
        updated: Vec::new(),
        version: 0,
    }
}

pub(crate) fn make_order(uuid: OrderUuid, cart: CartUuid) -> Order {
    let draft = NewOrder::draft_from_cart(&make_cart(cart, vec![make_item("tee", 75)]));

    Order {
        uuid,
        cart_uuid: draft.cart_uuid,
        status: draft.status,
        fulfillment: draft.fulfillment,
        customer: draft.customer,
        items: draft.items,
        discounts: draft.discounts,
        sub_total: draft.sub_total,
        total: draft.total,
        delivery_charge: draft.delivery_charge,
        remarks: draft.remarks,
        billing_address: draft.billing_address,
        shipping_address: draft.shipping_address,
        created_at: draft.created_at,
        created_by: draft.created_by,
        updated: Vec::new(),
    }
}
