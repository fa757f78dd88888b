//! Trolley
//!
//! Pure cart pricing: line item and cart-level discounts folded into a subtotal and total.

pub mod discounts;
pub mod items;
pub mod pricing;

pub use discounts::{Discount, DiscountKind, apply_discount};
pub use items::Item;
pub use pricing::{Totals, calculate_totals, line_total};
