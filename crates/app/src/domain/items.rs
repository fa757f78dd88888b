//! Line items and discounts shared by carts and orders.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trolley::{Discount as PricedDiscount, DiscountKind, Item};

use crate::uuids::TypedUuid;

/// Catalog product a line item was taken from.
#[derive(Debug)]
pub struct ProductRecord;

/// Catalog category a line item belongs to.
#[derive(Debug)]
pub struct CategoryRecord;

/// Discount definition a line or cart discount was copied from.
#[derive(Debug)]
pub struct DiscountRecord;

pub type ProductUuid = TypedUuid<ProductRecord>;
pub type CategoryUuid = TypedUuid<CategoryRecord>;
pub type DiscountUuid = TypedUuid<DiscountRecord>;

/// A discount attached to a line item or to a whole cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DiscountUuid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "type")]
    pub kind: DiscountKind,

    #[serde(alias = "value")]
    pub amount: Decimal,
}

impl PricedDiscount for Discount {
    fn kind(&self) -> DiscountKind {
        self.kind
    }

    fn amount(&self) -> Decimal {
        self.amount
    }
}

/// Where a line item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ItemSource {
    /// Taken from a catalog product.
    Catalog { product_id: ProductUuid },

    /// Entered by hand, with no catalog product behind it.
    Custom,
}

/// A single line in a cart or order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(flatten)]
    pub source: ItemSource,

    pub name: String,

    #[serde(default)]
    pub description: String,

    pub price: Decimal,

    pub quantity: Decimal,

    #[serde(default)]
    pub sku: String,

    /// Removal key within a cart.
    pub slug: String,

    #[serde(default)]
    pub options: Vec<String>,

    #[serde(default)]
    pub categories: Vec<CategoryUuid>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub discounts: Vec<Discount>,
}

impl Item for LineItem {
    type Discount = Discount;

    fn price(&self) -> Decimal {
        self.price
    }

    fn quantity(&self) -> Decimal {
        self.quantity
    }

    fn discounts(&self) -> &[Discount] {
        &self.discounts
    }
}
