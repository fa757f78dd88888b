//! Get Cart Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    carts::{errors::checkout_status_error, models::CartResponse},
    extensions::*,
};

/// Get Cart Handler
///
/// Returns the cart bound to a session.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    security(("api_key" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Session is missing or expired"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    session: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let cart = state
        .checkout
        .resolve_cart(&session.into_inner())
        .await
        .map_err(checkout_status_error)?;

    Ok(Json(cart.into()))
}
