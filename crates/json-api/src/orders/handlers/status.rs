//! Update Order Status Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use trolley_app::domain::orders::models::OrderStatus;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
};

const DEFAULT_ACTOR: &str = "api";

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// Target status
    pub status: String,

    /// Who made the change; recorded in the order history
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by: Option<String>,
}

/// Update Order Status Handler
///
/// Moves an order along the payment state machine.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("api_key" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status or transition not allowed"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order was changed by another request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let request = json.into_inner();

    let next = request.status.parse::<OrderStatus>().or_400("invalid status")?;

    let by = request
        .by
        .filter(|by| !by.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ACTOR.to_string());

    let order = state
        .orders
        .update_order_status(order.into_inner().into(), next, by)
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
