//! Order Responses

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use trolley_app::domain::orders::models::Order;

use crate::schemas::{AddressResponse, CustomerBody, DiscountBody, LineItemBody, UpdatedResponse};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    /// Cart the order was checked out from
    pub cart_uuid: Uuid,

    /// `draft`, `pending`, `paid`, `partial`, `partial-refund`, `refund` or `cancel`
    pub status: String,

    /// Production and delivery progress
    pub fulfillment: String,

    pub customer: CustomerBody,

    pub items: Vec<LineItemBody>,

    pub discounts: Vec<DiscountBody>,

    #[salvo(schema(value_type = f64))]
    pub sub_total: Decimal,

    #[salvo(schema(value_type = f64))]
    pub total: Decimal,

    #[salvo(schema(value_type = f64))]
    pub delivery_charge: Decimal,

    pub remarks: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<AddressResponse>,

    pub shipping_address: AddressResponse,

    pub created_at: String,

    pub created_by: String,

    pub updated: Vec<UpdatedResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            uuid: order.uuid.into(),
            cart_uuid: order.cart_uuid.into(),
            status: order.status.as_str().to_string(),
            fulfillment: order.fulfillment.as_str().to_string(),
            customer: order.customer.into(),
            items: order.items.into_iter().map(Into::into).collect(),
            discounts: order.discounts.into_iter().map(Into::into).collect(),
            sub_total: order.sub_total,
            total: order.total,
            delivery_charge: order.delivery_charge,
            remarks: order.remarks,
            billing_address: order.billing_address.map(Into::into),
            shipping_address: order.shipping_address.into(),
            created_at: order.created_at.to_string(),
            created_by: order.created_by,
            updated: order.updated.into_iter().map(Into::into).collect(),
        }
    }
}

/// Orders Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// Orders, newest first
    pub orders: Vec<OrderResponse>,
}
