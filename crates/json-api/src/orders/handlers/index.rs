//! Order Index Handler

use salvo::{oapi::extract::QueryParam, prelude::*};
use uuid::Uuid;

use trolley_app::domain::orders::models::{OrderStatus, OrdersFilter};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrdersResponse},
};

/// Order Index Handler
///
/// Returns orders, newest first, optionally narrowed to one cart or status.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("api_key" = []))
)]
pub(crate) async fn handler(
    cart: QueryParam<Uuid, false>,
    status: QueryParam<String, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let filter = OrdersFilter {
        cart: cart.into_inner().map(Into::into),
        status: status
            .into_inner()
            .map(|status| status.parse::<OrderStatus>())
            .transpose()
            .or_400("invalid status")?,
        limit: limit.into_inner(),
    };

    let orders = state
        .orders
        .list_orders(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}
