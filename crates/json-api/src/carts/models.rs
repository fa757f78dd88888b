//! Cart Responses

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use trolley_app::domain::carts::models::Cart;

use crate::schemas::{CustomerBody, DiscountBody, LineItemBody, UpdatedResponse};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    /// `abandoned`, `active` or `completed`
    pub status: String,

    pub customer: CustomerBody,

    /// The items in the cart, in the order they were added
    pub items: Vec<LineItemBody>,

    /// Cart-level discounts
    pub discounts: Vec<DiscountBody>,

    /// Sum of discounted line totals
    #[salvo(schema(value_type = f64))]
    pub sub_total: Decimal,

    /// Sub total less cart-level discounts
    #[salvo(schema(value_type = f64))]
    pub total: Decimal,

    #[salvo(schema(value_type = f64))]
    pub delivery_charge: Decimal,

    pub remarks: String,

    /// The date and time the cart was created
    pub created_at: String,

    pub created_by: String,

    pub updated: Vec<UpdatedResponse>,

    /// Bumped on every item change
    pub version: u64,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            uuid: cart.uuid.into(),
            status: cart.status.as_str().to_string(),
            customer: cart.customer.into(),
            items: cart.items.into_iter().map(Into::into).collect(),
            discounts: cart.discounts.into_iter().map(Into::into).collect(),
            sub_total: cart.sub_total,
            total: cart.total,
            delivery_charge: cart.delivery_charge,
            remarks: cart.remarks,
            created_at: cart.created_at.to_string(),
            created_by: cart.created_by,
            updated: cart.updated.into_iter().map(Into::into).collect(),
            version: cart.version,
        }
    }
}

/// Carts Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartsResponse {
    /// Carts, newest first
    pub carts: Vec<CartResponse>,
}
