//! Remove Cart Item Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;

use crate::{
    carts::{errors::checkout_status_error, models::CartResponse},
    extensions::*,
};

/// Remove Cart Item Handler
///
/// Removes every item with the slug and returns the repriced cart.
#[endpoint(
    tags("carts"),
    summary = "Remove Item from Cart",
    security(("api_key" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item removed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown slug or session"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::CONFLICT, description = "Cart was changed by another request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    session: PathParam<String>,
    slug: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let slug = slug.into_inner();

    let cart = state
        .checkout
        .resolve_session(&session.into_inner())
        .await
        .map_err(checkout_status_error)?;

    let cart = state
        .checkout
        .remove_item(cart, &slug)
        .await
        .map_err(checkout_status_error)?;

    info!(cart_uuid = %cart.uuid, slug = %slug, "removed cart item");

    Ok(Json(cart.into()))
}
