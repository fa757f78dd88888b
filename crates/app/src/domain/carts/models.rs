//! Cart Models

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use trolley::{Totals, calculate_totals};

use crate::{
    domain::{
        customers::Customer,
        history::UpdatedEntry,
        items::{Discount, LineItem},
    },
    uuids::TypedUuid,
};

pub type CartUuid = TypedUuid<Cart>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartStatus {
    Abandoned,
    #[default]
    Active,
    Completed,
}

impl CartStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Abandoned => "abandoned",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl Display for CartStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown cart status `{0}`")]
pub struct UnknownCartStatus(String);

impl FromStr for CartStatus {
    type Err = UnknownCartStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "abandoned" => Ok(Self::Abandoned),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(UnknownCartStatus(other.to_string())),
        }
    }
}

/// Cart Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub uuid: CartUuid,
    pub status: CartStatus,
    pub customer: Customer,
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub discounts: Vec<Discount>,
    pub sub_total: Decimal,
    pub total: Decimal,
    pub delivery_charge: Decimal,
    #[serde(default)]
    pub remarks: String,
    pub created_at: Timestamp,
    pub created_by: String,
    #[serde(default)]
    pub updated: Vec<UpdatedEntry>,
    /// Incremented by every item mutation; writes are only accepted against the current value.
    pub version: u64,
}

impl Cart {
    #[must_use]
    pub fn totals(&self) -> Totals {
        Totals {
            sub_total: self.sub_total,
            total: self.total,
        }
    }

    #[must_use]
    pub fn has_item(&self, slug: &str) -> bool {
        self.items.iter().any(|item| item.slug == slug)
    }

    /// The cart as it reads after `update` has been persisted.
    #[must_use]
    pub fn with_update(mut self, update: &CartUpdate) -> Self {
        match &update.items {
            ItemsMutation::Append(item) => self.items.push(item.clone()),
            ItemsMutation::RemoveBySlug(slug) => self.items.retain(|item| item.slug != *slug),
        }

        self.sub_total = update.totals.sub_total;
        self.total = update.totals.total;
        self.updated.push(update.updated.clone());
        self.version = update.expected_version + 1;

        self
    }
}

/// New Cart Model
///
/// Totals are always derived from the items and discounts, never taken from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCart {
    #[serde(default)]
    pub status: CartStatus,
    pub customer: Customer,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub discounts: Vec<Discount>,
    #[serde(default)]
    pub delivery_charge: Decimal,
    #[serde(default)]
    pub remarks: String,
    pub created_by: String,
}

impl NewCart {
    #[must_use]
    pub fn totals(&self) -> Totals {
        calculate_totals(&self.items, &self.discounts)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartsFilter {
    #[serde(default)]
    pub status: Option<CartStatus>,

    #[serde(default)]
    pub limit: Option<u32>,
}

/// Change applied to a cart's item list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemsMutation {
    Append(LineItem),

    /// Remove every item carrying this slug.
    RemoveBySlug(String),
}

/// One atomic change to a cart's items and totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartUpdate {
    /// Version the totals were computed against.
    pub expected_version: u64,
    pub totals: Totals,
    pub items: ItemsMutation,
    pub updated: UpdatedEntry,
}
