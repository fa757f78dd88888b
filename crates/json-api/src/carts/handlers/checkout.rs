//! Checkout Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::{Span, field};

use crate::{carts::errors::checkout_status_error, extensions::*, orders::models::OrderResponse};

/// Checkout Handler
///
/// Converts the session's cart into a draft order. Repeated calls return the same open order.
#[endpoint(
    tags("carts"),
    summary = "Checkout Cart",
    security(("api_key" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Open order for the cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Session is missing or expired"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::CONFLICT, description = "Checkout raced another request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.checkout",
    skip(session, depot),
    fields(cart_uuid = field::Empty, order_uuid = field::Empty),
    err
)]
pub(crate) async fn handler(
    session: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let cart = state
        .checkout
        .resolve_session(&session.into_inner())
        .await
        .map_err(checkout_status_error)?;

    Span::current().record("cart_uuid", field::display(cart));

    let order = state
        .checkout
        .checkout(cart)
        .await
        .map_err(checkout_status_error)?;

    Span::current().record("order_uuid", field::display(order.uuid));

    Ok(Json(order.into()))
}
