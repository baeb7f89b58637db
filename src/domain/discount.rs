//! Rule-based discount computation.
//!
//! Two independent rules, evaluated separately and summed, with no cap:
//! a tier based on the number of single-unit items, and a 5% volume
//! discount above a subtotal threshold.

use bigdecimal::BigDecimal;

use super::basket::LineItem;

/// A priced order preview: `total` is always `subtotal - discount`.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub subtotal: BigDecimal,
    pub discount: BigDecimal,
    pub total: BigDecimal,
}

/// An exact decimal multiplier, e.g. `percent(5)` is `0.05`.
fn percent(hundredths: i64) -> BigDecimal {
    BigDecimal::from(hundredths) / BigDecimal::from(100)
}

fn volume_threshold() -> BigDecimal {
    BigDecimal::from(5000)
}

/// Compute the discount for an order's items and subtotal.
///
/// The single-unit tier applies only when every item has quantity 1:
/// exactly two items earn 10% of the second-highest unit price, exactly
/// three earn 20% of the cheapest. Any other count earns nothing from
/// this tier; a single multi-unit item anywhere disables it entirely.
/// Independently, a subtotal strictly above 5000 earns 5% of the
/// subtotal. An empty item list yields a zero discount, not an error.
pub fn compute_discount(subtotal: BigDecimal, items: &[LineItem]) -> Quote {
    let mut discount = BigDecimal::from(0);

    if !items.is_empty() && items.iter().all(|item| item.quantity == 1) {
        // Stable sort: equal prices keep their basket order.
        let mut by_price: Vec<&LineItem> = items.iter().collect();
        by_price.sort_by(|a, b| b.unit_price.cmp(&a.unit_price));

        match by_price.len() {
            2 => discount += &by_price[1].unit_price * percent(10),
            3 => discount += &by_price[2].unit_price * percent(20),
            _ => {}
        }
    }

    if subtotal > volume_threshold() {
        discount += &subtotal * percent(5);
    }

    let total = &subtotal - &discount;
    Quote {
        subtotal,
        discount,
        total,
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn item(price: &str, quantity: i32) -> LineItem {
        LineItem {
            product_id: 0,
            product_name: "item".to_string(),
            unit_price: BigDecimal::from_str(price).unwrap(),
            quantity,
        }
    }

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn subtotal_of(items: &[LineItem]) -> BigDecimal {
        items
            .iter()
            .fold(BigDecimal::from(0), |acc, i| acc + i.line_total())
    }

    #[test]
    fn no_items_means_no_discount() {
        let quote = compute_discount(dec("0"), &[]);

        assert_eq!(quote.discount, dec("0"));
        assert_eq!(quote.total, dec("0"));
    }

    #[test]
    fn single_item_earns_no_tier_discount() {
        let items = [item("200", 1)];

        let quote = compute_discount(subtotal_of(&items), &items);

        assert_eq!(quote.discount, dec("0"));
    }

    #[test]
    fn two_single_unit_items_earn_ten_percent_of_the_cheaper() {
        let items = [item("200", 1), item("100", 1)];

        let quote = compute_discount(subtotal_of(&items), &items);

        assert_eq!(quote.discount, dec("10"));
        assert_eq!(quote.total, dec("290"));
    }

    #[test]
    fn three_single_unit_items_earn_twenty_percent_of_the_cheapest() {
        let items = [item("200", 1), item("100", 1), item("50", 1)];

        let quote = compute_discount(subtotal_of(&items), &items);

        assert_eq!(quote.discount, dec("10"));
        assert_eq!(quote.total, dec("340"));
    }

    #[test]
    fn four_single_unit_items_earn_no_tier_discount() {
        let items = [
            item("200", 1),
            item("100", 1),
            item("50", 1),
            item("25", 1),
        ];

        let quote = compute_discount(subtotal_of(&items), &items);

        assert_eq!(quote.discount, dec("0"));
    }

    #[test]
    fn any_multi_unit_item_disables_the_tier() {
        let items = [item("200", 1), item("100", 2)];

        let quote = compute_discount(subtotal_of(&items), &items);

        assert_eq!(quote.discount, dec("0"));
        assert_eq!(quote.total, dec("400"));
    }

    #[test]
    fn sorting_is_by_price_not_insertion_order() {
        // The cheapest item comes first in the basket.
        let items = [item("50", 1), item("200", 1), item("100", 1)];

        let quote = compute_discount(subtotal_of(&items), &items);

        assert_eq!(quote.discount, dec("10"));
    }

    #[test]
    fn subtotal_at_threshold_earns_nothing() {
        let items = [item("2500", 2)];

        let quote = compute_discount(subtotal_of(&items), &items);

        assert_eq!(quote.subtotal, dec("5000"));
        assert_eq!(quote.discount, dec("0"));
    }

    #[test]
    fn subtotal_just_above_threshold_earns_five_percent() {
        let items = [item("5000.01", 1)];

        let quote = compute_discount(subtotal_of(&items), &items);

        assert_eq!(quote.discount, dec("250.0005"));
        assert_eq!(quote.total, dec("4750.0095"));
    }

    #[test]
    fn six_thousand_with_multi_unit_items_earns_three_hundred() {
        let items = [item("1000", 6)];

        let quote = compute_discount(subtotal_of(&items), &items);

        assert_eq!(quote.discount, dec("300"));
        assert_eq!(quote.total, dec("5700"));
    }

    #[test]
    fn tiers_are_additive_without_a_cap() {
        let items = [item("4000", 1), item("2000", 1)];

        let quote = compute_discount(subtotal_of(&items), &items);

        // 10% of 2000 plus 5% of 6000.
        assert_eq!(quote.discount, dec("500"));
        assert_eq!(quote.total, dec("5500"));
    }

    #[test]
    fn is_deterministic_and_keeps_the_total_invariant() {
        let items = [item("2600", 1), item("2600", 1)];
        let subtotal = subtotal_of(&items);

        let first = compute_discount(subtotal.clone(), &items);
        let second = compute_discount(subtotal.clone(), &items);

        assert_eq!(first, second);
        assert_eq!(&first.total + &first.discount, subtotal);
    }
}
