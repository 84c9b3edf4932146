//! Bounds of the figures a user may submit for a valuation.
//!
//! Keeping every submitted unit, rate and stored value within these bounds
//! keeps the products and quotients of the valuation pipeline representable
//! by a [`Decimal`].

use rust_decimal::Decimal;

/// Largest accepted figure.
pub const MAX: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Largest accepted number of decimal places.
pub const MAX_SCALE: u32 = 4;

/// Indicates whether the provided `value` is a non-negative figure within
/// [`MAX`] and [`MAX_SCALE`].
#[must_use]
pub fn is_valid(value: Decimal) -> bool {
    (Decimal::ZERO..=MAX).contains(&value)
        && value.normalize().scale() <= MAX_SCALE
}

#[cfg(test)]
mod spec {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn accepts_bounded_figures() {
        for value in [Decimal::ZERO, dec!(0.0001), dec!(12.50), MAX] {
            assert!(is_valid(value), "{value} rejected");
        }
        assert!(is_valid(dec!(9.000000)));
    }

    #[test]
    fn rejects_negative_huge_and_too_precise_figures() {
        for value in [
            dec!(-0.01),
            dec!(-10),
            MAX + Decimal::ONE,
            dec!(100000000000000000000),
            dec!(0.00001),
        ] {
            assert!(!is_valid(value), "{value} accepted");
        }
    }
}
