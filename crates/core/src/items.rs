//! Items

use rust_decimal::Decimal;

use crate::discounts::Discount;

/// A priced line in a cart or order.
pub trait Item {
    /// Discount type attached to this line.
    type Discount: Discount;

    /// Unit price before discounts.
    fn price(&self) -> Decimal;

    /// Number of units.
    fn quantity(&self) -> Decimal;

    /// Discounts applied to each unit.
    fn discounts(&self) -> &[Self::Discount];
}
