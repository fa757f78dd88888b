//! Add Cart Item Handler

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use tracing::{Span, field};

use trolley_app::domain::items::LineItem;

use crate::{carts::errors::checkout_status_error, extensions::*, schemas::LineItemBody};

/// Add Cart Item Handler
///
/// Appends an item and reprices the cart.
#[endpoint(
    tags("carts"),
    summary = "Add Item to Cart",
    security(("api_key" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Item added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::CONFLICT, description = "Cart was changed by another request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.items.create",
    skip(session, json, depot),
    fields(cart_uuid = field::Empty, slug = field::Empty),
    err
)]
pub(crate) async fn handler(
    session: PathParam<String>,
    json: JsonBody<LineItemBody>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;
    let item = LineItem::try_from(json.into_inner()).or_400("invalid item")?;

    let cart = state
        .checkout
        .resolve_session(&session.into_inner())
        .await
        .map_err(checkout_status_error)?;

    let span = Span::current();

    span.record("cart_uuid", field::display(cart));
    span.record("slug", item.slug.as_str());

    state
        .checkout
        .add_item(cart, item)
        .await
        .map_err(checkout_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
