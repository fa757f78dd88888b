//! Order Models

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    domain::{
        carts::models::{Cart, CartUuid},
        customers::{Address, Customer},
        history::UpdatedEntry,
        items::{Discount, LineItem},
    },
    uuids::TypedUuid,
};

pub type OrderUuid = TypedUuid<Order>;

#[derive(Debug, Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    Draft,
    Pending,
    Paid,
    Partial,
    PartialRefund,
    Refund,
    Cancel,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Partial => "partial",
            Self::PartialRefund => "partial-refund",
            Self::Refund => "refund",
            Self::Cancel => "cancel",
        }
    }

    /// Draft and pending orders are open; checkout reuses them instead of creating another.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Draft | Self::Pending)
    }

    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (
                Self::Draft | Self::Pending,
                Self::Paid | Self::Partial | Self::Cancel
            ) | (Self::Partial, Self::PartialRefund | Self::Paid)
                | (Self::Paid, Self::Refund)
        )
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "draft" => Ok(Self::Draft),
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "partial" => Ok(Self::Partial),
            "partial-refund" => Ok(Self::PartialRefund),
            "refund" => Ok(Self::Refund),
            "cancel" => Ok(Self::Cancel),
            other => Err(UnknownVariant {
                kind: "order status",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fulfillment {
    #[default]
    New,
    OrderQueuingForProduction,
    OrderProducing,
    OrderProductionDone,
    TransitFromOverseasFacility,
    TransitRegionalsFacility,
    #[serde(rename = "logistic_recieved_from_facility")]
    LogisticReceivedFromFacility,
    ReadyToDeliver,
    LogisticArrangedForDelivery,
    Fulfilled,
}

impl Fulfillment {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::OrderQueuingForProduction => "order_queuing_for_production",
            Self::OrderProducing => "order_producing",
            Self::OrderProductionDone => "order_production_done",
            Self::TransitFromOverseasFacility => "transit_from_overseas_facility",
            Self::TransitRegionalsFacility => "transit_regionals_facility",
            Self::LogisticReceivedFromFacility => "logistic_recieved_from_facility",
            Self::ReadyToDeliver => "ready_to_deliver",
            Self::LogisticArrangedForDelivery => "logistic_arranged_for_delivery",
            Self::Fulfilled => "fulfilled",
        }
    }
}

impl FromStr for Fulfillment {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        [
            Self::New,
            Self::OrderQueuingForProduction,
            Self::OrderProducing,
            Self::OrderProductionDone,
            Self::TransitFromOverseasFacility,
            Self::TransitRegionalsFacility,
            Self::LogisticReceivedFromFacility,
            Self::ReadyToDeliver,
            Self::LogisticArrangedForDelivery,
            Self::Fulfilled,
        ]
        .into_iter()
        .find(|fulfillment| fulfillment.as_str() == value)
        .ok_or_else(|| UnknownVariant {
            kind: "fulfillment",
            value: value.to_string(),
        })
    }
}

/// Order Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub uuid: OrderUuid,
    pub cart_uuid: CartUuid,
    pub status: OrderStatus,
    pub fulfillment: Fulfillment,
    pub customer: Customer,
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub discounts: Vec<Discount>,
    pub sub_total: Decimal,
    pub total: Decimal,
    pub delivery_charge: Decimal,
    #[serde(default)]
    pub remarks: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
    pub shipping_address: Address,
    pub created_at: Timestamp,
    pub created_by: String,
    #[serde(default)]
    pub updated: Vec<UpdatedEntry>,
}

/// New Order Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub cart_uuid: CartUuid,
    pub status: OrderStatus,
    pub fulfillment: Fulfillment,
    pub customer: Customer,
    pub items: Vec<LineItem>,
    pub discounts: Vec<Discount>,
    pub sub_total: Decimal,
    pub total: Decimal,
    pub delivery_charge: Decimal,
    pub remarks: String,
    pub billing_address: Option<Address>,
    pub shipping_address: Address,
    pub created_at: Timestamp,
    pub created_by: String,
}

impl NewOrder {
    /// A fresh draft order carrying the cart's commerce fields.
    ///
    /// Delivery is not priced at checkout, so the delivery charge starts at zero and the shipping
    /// address is a blank one to be filled in later.
    #[must_use]
    pub fn draft_from_cart(cart: &Cart) -> Self {
        let created_at = Timestamp::now();

        Self {
            cart_uuid: cart.uuid,
            status: OrderStatus::Draft,
            fulfillment: Fulfillment::New,
            customer: cart.customer.clone(),
            items: cart.items.clone(),
            discounts: cart.discounts.clone(),
            sub_total: cart.sub_total,
            total: cart.total,
            delivery_charge: Decimal::ZERO,
            remarks: cart.remarks.clone(),
            billing_address: None,
            shipping_address: Address::blank_shipping(created_at, cart.created_by.clone()),
            created_at,
            created_by: cart.created_by.clone(),
        }
    }
}

/// Selects a single order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderFilter {
    Uuid(OrderUuid),

    /// The draft or pending order of a cart.
    OpenForCart(CartUuid),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdersFilter {
    #[serde(default)]
    pub cart: Option<CartUuid>,

    #[serde(default)]
    pub status: Option<OrderStatus>,

    #[serde(default)]
    pub limit: Option<u32>,
}
