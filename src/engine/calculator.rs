use crate::Amount;
use crate::model::{Quantity, RuleKind};

use super::PricingError;

/// Compute the charge for `quantity` units of one product.
///
/// - no rule: `quantity * base_price`
/// - `Deal`: each full bundle of `buy` units is billed as `pay_for` units at
///   the base price, leftover units at the base price
/// - `Discount`: `unit_price` applies to every unit once `quantity >= min_quantity`,
///   otherwise the base price does
///
/// Zero quantities are never passed here; the pipeline skips those lines.
pub fn calculate(
    rule: Option<&RuleKind>,
    quantity: Quantity,
    base_price: Amount,
) -> Result<Amount, PricingError> {
    let overflow = || PricingError::Overflow(quantity);

    match rule {
        None => base_price.checked_mul(quantity).ok_or_else(overflow),
        Some(kind @ RuleKind::Deal { buy, pay_for }) => {
            kind.validate()?;
            let bundles = quantity / buy;
            let remainder = quantity % buy;

            let bundled = base_price
                .checked_mul(*pay_for)
                .and_then(|bundle| bundle.checked_mul(bundles))
                .ok_or_else(overflow)?;
            let loose = base_price.checked_mul(remainder).ok_or_else(overflow)?;

            bundled.checked_add(loose).ok_or_else(overflow)
        }
        Some(RuleKind::Discount {
            min_quantity,
            unit_price,
        }) => {
            let unit = if quantity >= *min_quantity {
                *unit_price
            } else {
                base_price
            };
            unit.checked_mul(quantity).ok_or_else(overflow)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(minor: u64) -> Amount {
        Amount::from_minor(minor)
    }

    fn deal(buy: Quantity, pay_for: Quantity) -> RuleKind {
        RuleKind::Deal { buy, pay_for }
    }

    fn discount(min_quantity: Quantity, unit_price: u64) -> RuleKind {
        RuleKind::Discount {
            min_quantity,
            unit_price: price(unit_price),
        }
    }

    // Standard pricing

    #[test]
    fn no_rule_is_quantity_times_base() {
        for (quantity, base) in [(1, 0), (1, 34999), (7, 10), (100, 99999)] {
            assert_eq!(
                calculate(None, quantity, price(base)),
                Ok(price(u64::from(quantity) * base))
            );
        }
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let rule = deal(3, 2);
        let first = calculate(Some(&rule), 11, price(59999));
        for _ in 0..10 {
            assert_eq!(calculate(Some(&rule), 11, price(59999)), first);
        }
    }

    // Deal

    #[test]
    fn deal_one_exact_bundle_bills_pay_for_units() {
        assert_eq!(calculate(Some(&deal(5, 3)), 5, price(59999)), Ok(price(179997)));
        assert_eq!(calculate(Some(&deal(3, 2)), 3, price(10)), Ok(price(20)));
    }

    #[test]
    fn deal_bills_remainder_at_base_price() {
        // 2 bundles * 2 units * 10 + 1 leftover * 10
        assert_eq!(calculate(Some(&deal(3, 2)), 7, price(10)), Ok(price(50)));
    }

    #[test]
    fn deal_below_bundle_size_is_standard_pricing() {
        assert_eq!(calculate(Some(&deal(5, 3)), 4, price(100)), Ok(price(400)));
    }

    #[test]
    fn deal_paying_for_more_than_bought_is_evaluated_as_is() {
        assert_eq!(calculate(Some(&deal(2, 3)), 4, price(10)), Ok(price(60)));
        assert_eq!(calculate(Some(&deal(2, 2)), 5, price(10)), Ok(price(50)));
    }

    #[test]
    fn deal_with_empty_bundle_fails_fast() {
        let result = calculate(Some(&deal(0, 1)), 4, price(10));
        assert!(matches!(
            result,
            Err(PricingError::InvalidRule { kind: "deal", .. })
        ));
    }

    // Discount

    #[test]
    fn discount_applies_to_every_unit_at_threshold() {
        assert_eq!(calculate(Some(&discount(3, 23990)), 3, price(34999)), Ok(price(71970)));
        assert_eq!(calculate(Some(&discount(3, 23990)), 10, price(34999)), Ok(price(239900)));
    }

    #[test]
    fn discount_below_threshold_is_standard_pricing() {
        assert_eq!(calculate(Some(&discount(3, 23990)), 2, price(34999)), Ok(price(69998)));
    }

    #[test]
    fn discount_threshold_boundary_is_inclusive() {
        let rule = discount(4, 80);
        assert_eq!(calculate(Some(&rule), 3, price(100)), Ok(price(300)));
        assert_eq!(calculate(Some(&rule), 4, price(100)), Ok(price(320)));
    }

    // Monotonicity

    fn assert_non_decreasing(rule: Option<&RuleKind>, base: Amount) {
        let mut previous = Amount::ZERO;
        for quantity in 1..=50 {
            let charge = calculate(rule, quantity, base).unwrap();
            assert!(
                charge >= previous,
                "charge dropped at quantity {quantity}: {previous} -> {charge}"
            );
            previous = charge;
        }
    }

    #[test]
    fn standard_pricing_is_monotonic() {
        assert_non_decreasing(None, price(99999));
    }

    #[test]
    fn bundle_keeping_pace_with_leftovers_is_monotonic() {
        // pay_for >= buy - 1, so completing a bundle never costs less
        assert_non_decreasing(Some(&deal(3, 2)), price(10));
    }

    #[test]
    fn discount_not_undercutting_below_threshold_is_monotonic() {
        // 3 * 23990 >= 2 * 34999
        assert_non_decreasing(Some(&discount(3, 23990)), price(34999));
    }

    // Overflow

    #[test]
    fn overflow_is_reported_not_wrapped() {
        assert_eq!(
            calculate(None, 2, price(u64::MAX)),
            Err(PricingError::Overflow(2))
        );
        assert_eq!(
            calculate(Some(&deal(2, 2)), 4, price(u64::MAX / 3)),
            Err(PricingError::Overflow(4))
        );
        assert_eq!(
            calculate(Some(&discount(1, u64::MAX)), 2, price(1)),
            Err(PricingError::Overflow(2))
        );
    }
}
