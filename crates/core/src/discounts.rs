//! Discounts

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a discount amount is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// Subtract the amount as-is.
    Fixed,

    /// Subtract `amount` percent of the base the discount is applied to.
    Percentage,
}

impl DiscountKind {
    /// Stable lowercase name, as stored and serialised.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Percentage => "percentage",
        }
    }
}

/// A discount attachable to a line item or to a whole cart.
pub trait Discount {
    /// How [`Discount::amount`] should be read.
    fn kind(&self) -> DiscountKind;

    /// Flat amount for [`DiscountKind::Fixed`], percent for [`DiscountKind::Percentage`].
    fn amount(&self) -> Decimal;
}

/// Returns how much `discount` takes off `base`.
///
/// The base is only consulted for percentage discounts: a fixed discount is worth its amount
/// whatever it is applied to.
pub fn apply_discount<D: Discount + ?Sized>(base: Decimal, discount: &D) -> Decimal {
    match discount.kind() {
        DiscountKind::Fixed => discount.amount(),
        DiscountKind::Percentage => discount.amount() / Decimal::ONE_HUNDRED * base,
    }
}
