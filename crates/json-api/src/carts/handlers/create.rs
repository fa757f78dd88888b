//! Start Session Handler

use rust_decimal::Decimal;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use trolley_app::domain::{
    carts::models::{CartStatus, NewCart},
    items::LineItem,
};

use crate::{
    carts::errors::checkout_status_error,
    extensions::*,
    schemas::{CustomerBody, DiscountBody, InvalidLineItem, LineItemBody},
};

/// Start Session Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StartSessionRequest {
    pub customer: CustomerBody,

    #[serde(default)]
    pub items: Vec<LineItemBody>,

    #[serde(default)]
    pub discounts: Vec<DiscountBody>,

    #[serde(default)]
    #[salvo(schema(value_type = f64))]
    pub delivery_charge: Decimal,

    #[serde(default)]
    pub remarks: String,

    /// Recorded as the cart's creator; defaults to the customer's email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl TryFrom<StartSessionRequest> for NewCart {
    type Error = InvalidLineItem;

    fn try_from(request: StartSessionRequest) -> Result<Self, Self::Error> {
        let items = request
            .items
            .into_iter()
            .map(LineItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let created_by = request
            .created_by
            .filter(|created_by| !created_by.trim().is_empty())
            .unwrap_or_else(|| request.customer.email.clone());

        Ok(NewCart {
            status: CartStatus::Active,
            customer: request.customer.into(),
            items,
            discounts: request.discounts.into_iter().map(Into::into).collect(),
            delivery_charge: request.delivery_charge,
            remarks: request.remarks,
            created_by,
        })
    }
}

/// Session Started Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionStartedResponse {
    /// Created cart UUID
    pub cart_uuid: Uuid,

    /// Session token to use in `/api/cart/{session}` paths
    pub session: String,
}

/// Start Session Handler
///
/// Creates a cart and binds a new session to it.
#[endpoint(
    tags("carts"),
    summary = "Start Cart Session",
    security(("api_key" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Cart created and session bound"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<StartSessionRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionStartedResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let cart = NewCart::try_from(json.into_inner()).or_400("invalid cart")?;

    let started = state
        .checkout
        .start_session(cart)
        .await
        .map_err(checkout_status_error)?;

    res.add_header(LOCATION, format!("/api/cart/{}", started.token), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(SessionStartedResponse {
        cart_uuid: started.cart_uuid.into(),
        session: started.token,
    }))
}
