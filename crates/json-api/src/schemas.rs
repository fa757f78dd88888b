//! Request and response bodies shared by the cart and order endpoints.

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use trolley::DiscountKind;
use trolley_app::domain::{
    customers::{Address, Customer, CustomerName, PhoneDetails},
    history::UpdatedEntry,
    items::{Discount, ItemSource, LineItem},
};

/// A line item body that cannot become a [`LineItem`].
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum InvalidLineItem {
    #[error("catalog items need a product_id")]
    MissingProduct,

    #[error("custom items cannot carry a product_id")]
    UnexpectedProduct,

    #[error("slug must not be blank")]
    BlankSlug,
}

/// Discount type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum DiscountKindBody {
    /// Subtracts `amount` from the base
    Fixed,

    /// Subtracts `amount` percent of the base
    Percentage,
}

impl From<DiscountKind> for DiscountKindBody {
    fn from(kind: DiscountKind) -> Self {
        match kind {
            DiscountKind::Fixed => Self::Fixed,
            DiscountKind::Percentage => Self::Percentage,
        }
    }
}

impl From<DiscountKindBody> for DiscountKind {
    fn from(kind: DiscountKindBody) -> Self {
        match kind {
            DiscountKindBody::Fixed => Self::Fixed,
            DiscountKindBody::Percentage => Self::Percentage,
        }
    }
}

/// Discount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct DiscountBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "type")]
    pub kind: DiscountKindBody,

    /// Flat amount or percentage; `value` is accepted as an alias
    #[serde(alias = "value")]
    #[salvo(schema(value_type = f64))]
    pub amount: Decimal,
}

impl From<Discount> for DiscountBody {
    fn from(discount: Discount) -> Self {
        Self {
            id: discount.id.map(Into::into),
            code: discount.code,
            name: discount.name,
            kind: discount.kind.into(),
            amount: discount.amount,
        }
    }
}

impl From<DiscountBody> for Discount {
    fn from(body: DiscountBody) -> Self {
        Self {
            id: body.id.map(Into::into),
            code: body.code,
            name: body.name,
            kind: body.kind.into(),
            amount: body.amount,
        }
    }
}

/// Where a line item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ItemSourceBody {
    Catalog,
    Custom,
}

/// Line Item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct LineItemBody {
    /// Inferred from `product_id` when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ItemSourceBody>,

    /// Catalog product; required for `catalog` items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<Uuid>,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[salvo(schema(value_type = f64))]
    pub price: Decimal,

    #[salvo(schema(value_type = f64))]
    pub quantity: Decimal,

    #[serde(default)]
    pub sku: String,

    /// Removal key within the cart
    pub slug: String,

    #[serde(default)]
    pub options: Vec<String>,

    #[serde(default)]
    pub categories: Vec<Uuid>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub discounts: Vec<DiscountBody>,
}

impl From<LineItem> for LineItemBody {
    fn from(item: LineItem) -> Self {
        let (source, product_id) = match item.source {
            ItemSource::Catalog { product_id } => (ItemSourceBody::Catalog, Some(product_id.into())),
            ItemSource::Custom => (ItemSourceBody::Custom, None),
        };

        Self {
            source: Some(source),
            product_id,
            name: item.name,
            description: item.description,
            price: item.price,
            quantity: item.quantity,
            sku: item.sku,
            slug: item.slug,
            options: item.options,
            categories: item.categories.into_iter().map(Into::into).collect(),
            tags: item.tags,
            discounts: item.discounts.into_iter().map(Into::into).collect(),
        }
    }
}

impl TryFrom<LineItemBody> for LineItem {
    type Error = InvalidLineItem;

    fn try_from(body: LineItemBody) -> Result<Self, Self::Error> {
        let source = match (body.source, body.product_id) {
            (Some(ItemSourceBody::Catalog) | None, Some(product_id)) => ItemSource::Catalog {
                product_id: product_id.into(),
            },
            (Some(ItemSourceBody::Catalog), None) => return Err(InvalidLineItem::MissingProduct),
            (Some(ItemSourceBody::Custom) | None, None) => ItemSource::Custom,
            (Some(ItemSourceBody::Custom), Some(_)) => return Err(InvalidLineItem::UnexpectedProduct),
        };

        let slug = body.slug.trim();

        if slug.is_empty() {
            return Err(InvalidLineItem::BlankSlug);
        }

        let slug = slug.to_string();

        Ok(Self {
            source,
            name: body.name,
            description: body.description,
            price: body.price,
            quantity: body.quantity,
            sku: body.sku,
            slug,
            options: body.options,
            categories: body.categories.into_iter().map(Into::into).collect(),
            tags: body.tags,
            discounts: body.discounts.into_iter().map(Into::into).collect(),
        })
    }
}

/// Customer name parts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerNameBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
}

/// Customer phone number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct PhoneBody {
    /// Country calling code
    pub country: String,

    pub number: String,
}

/// Customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,

    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<CustomerNameBody>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<PhoneBody>,
}

impl From<Customer> for CustomerBody {
    fn from(customer: Customer) -> Self {
        Self {
            customer_id: customer.customer_id,
            email: customer.email,
            name: customer.name.map(|name| CustomerNameBody {
                first: name.first,
                middle: name.middle,
                last: name.last,
                nick: name.nick,
            }),
            phone: customer.phone.map(|phone| PhoneBody {
                country: phone.country,
                number: phone.number,
            }),
        }
    }
}

impl From<CustomerBody> for Customer {
    fn from(body: CustomerBody) -> Self {
        Self {
            customer_id: body.customer_id,
            email: body.email,
            name: body.name.map(|name| CustomerName {
                first: name.first,
                middle: name.middle,
                last: name.last,
                nick: name.nick,
            }),
            phone: body.phone.map(|phone| PhoneDetails {
                country: phone.country,
                number: phone.number,
            }),
        }
    }
}

/// Address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressResponse {
    pub address_one: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_two: Option<String>,

    pub city: String,

    pub country: String,

    pub postcode: String,

    pub state: String,

    pub created_at: String,

    pub created_by: String,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            address_one: address.address_one,
            address_two: address.address_two,
            city: address.city,
            country: address.country,
            postcode: address.postcode,
            state: address.state,
            created_at: address.created_at.to_string(),
            created_by: address.created_by,
        }
    }
}

/// Change history entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdatedResponse {
    pub at: String,
    pub by: String,
}

impl From<UpdatedEntry> for UpdatedResponse {
    fn from(entry: UpdatedEntry) -> Self {
        Self {
            at: entry.at.to_string(),
            by: entry.by,
        }
    }
}
