//! Pricing

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    discounts::{Discount, apply_discount},
    items::Item,
};

/// Subtotal and total of a set of line items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of discounted line totals.
    pub sub_total: Decimal,

    /// Subtotal less cart-level discounts.
    pub total: Decimal,
}

/// Returns a single line's contribution to the subtotal.
///
/// Item discounts are taken off the unit price before multiplying by quantity, so a fixed
/// discount of `v` reduces the line by `v * quantity`.
pub fn line_total<I: Item>(item: &I) -> Decimal {
    let price = item.price();

    let discount: Decimal = item
        .discounts()
        .iter()
        .map(|discount| apply_discount(price, discount))
        .sum();

    (price - discount) * item.quantity()
}

/// Calculates subtotal and total for `items` with optional cart-level `discounts`.
///
/// Cart discounts are all evaluated against the same subtotal and summed; they do not compound.
/// Inputs are not validated: negative prices or quantities flow straight through the arithmetic.
pub fn calculate_totals<I: Item, D: Discount>(items: &[I], discounts: &[D]) -> Totals {
    let sub_total: Decimal = items.iter().map(line_total).sum();

    let cart_discount: Decimal = discounts
        .iter()
        .map(|discount| apply_discount(sub_total, discount))
        .sum();

    Totals {
        sub_total,
        total: sub_total - cart_discount,
    }
}

#[cfg(test)]
mod tests {
    use crate::discounts::DiscountKind;

    use super::*;

    #[derive(Debug, Clone)]
    struct TestDiscount {
        kind: DiscountKind,
        amount: Decimal,
    }

    impl Discount for TestDiscount {
        fn kind(&self) -> DiscountKind {
            self.kind
        }

        fn amount(&self) -> Decimal {
            self.amount
        }
    }

    #[derive(Debug, Clone)]
    struct TestItem {
        price: Decimal,
        quantity: Decimal,
        discounts: Vec<TestDiscount>,
    }

    impl Item for TestItem {
        type Discount = TestDiscount;

        fn price(&self) -> Decimal {
            self.price
        }

        fn quantity(&self) -> Decimal {
            self.quantity
        }

        fn discounts(&self) -> &[TestDiscount] {
            &self.discounts
        }
    }

    fn item(price: i64, quantity: i64) -> TestItem {
        TestItem {
            price: Decimal::from(price),
            quantity: Decimal::from(quantity),
            discounts: Vec::new(),
        }
    }

    fn fixed(amount: i64) -> TestDiscount {
        TestDiscount {
            kind: DiscountKind::Fixed,
            amount: Decimal::from(amount),
        }
    }

    fn percentage(amount: i64) -> TestDiscount {
        TestDiscount {
            kind: DiscountKind::Percentage,
            amount: Decimal::from(amount),
        }
    }

    const NO_DISCOUNTS: [TestDiscount; 0] = [];

    #[test]
    fn empty_cart_totals_zero() {
        let items: [TestItem; 0] = [];

        assert_eq!(calculate_totals(&items, &NO_DISCOUNTS), Totals::default());
    }

    #[test]
    fn undiscounted_totals_are_sum_of_price_times_quantity() {
        let items = [item(75, 1), item(25, 2), item(3, 7)];
        let totals = calculate_totals(&items, &NO_DISCOUNTS);

        assert_eq!(totals.sub_total, Decimal::from(146));
        assert_eq!(totals.total, totals.sub_total);
    }

    #[test]
    fn fixed_item_discount_applies_per_unit() {
        let mut discounted = item(100, 3);
        discounted.discounts.push(fixed(10));

        let totals = calculate_totals(&[discounted], &NO_DISCOUNTS);

        assert_eq!(totals.sub_total, Decimal::from(270));
        assert_eq!(totals.total, Decimal::from(270));
    }

    #[test]
    fn percentage_item_discount_uses_item_price_as_base() {
        let mut discounted = item(200, 2);
        discounted.discounts.push(percentage(25));

        assert_eq!(line_total(&discounted), Decimal::from(300));
    }

    #[test]
    fn item_fixed_and_cart_percentage_discounts_combine() {
        let mut discounted = item(100, 1);
        discounted.discounts.push(fixed(10));

        let totals = calculate_totals(&[discounted], &[percentage(10)]);

        assert_eq!(totals.sub_total, Decimal::from(90));
        assert_eq!(totals.total, Decimal::from(81));
    }

    #[test]
    fn cart_discounts_are_summed_not_compounded() {
        let items = [item(200, 1)];
        let totals = calculate_totals(&items, &[percentage(10), percentage(10), fixed(5)]);

        assert_eq!(totals.sub_total, Decimal::from(200));
        assert_eq!(totals.total, Decimal::from(155));
    }

    #[test]
    fn add_then_remove_scenario() {
        let first = item(75, 1);
        let second = item(25, 2);

        let opened = calculate_totals(&[first.clone()], &NO_DISCOUNTS);
        assert_eq!(opened.sub_total, Decimal::from(75));
        assert_eq!(opened.total, Decimal::from(75));

        let added = calculate_totals(&[first, second.clone()], &NO_DISCOUNTS);
        assert_eq!(added.sub_total, Decimal::from(125));
        assert_eq!(added.total, Decimal::from(125));

        let removed = calculate_totals(&[second], &NO_DISCOUNTS);
        assert_eq!(removed.sub_total, Decimal::from(50));
        assert_eq!(removed.total, Decimal::from(50));
    }

    #[test]
    fn negative_inputs_are_not_rejected() {
        let items = [item(-10, 2), item(5, -1)];
        let totals = calculate_totals(&items, &NO_DISCOUNTS);

        assert_eq!(totals.sub_total, Decimal::from(-25));
        assert_eq!(totals.total, Decimal::from(-25));
    }

    #[test]
    fn fixed_discount_larger_than_price_goes_negative() {
        let mut discounted = item(5, 2);
        discounted.discounts.push(fixed(8));

        assert_eq!(line_total(&discounted), Decimal::from(-6));
    }
}
