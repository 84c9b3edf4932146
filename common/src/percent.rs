//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;

/// One hundredth, the multiplier turning a percentage into a fraction.
pub const HUNDREDTH: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Returns the fraction represented by the provided percentage `value`.
///
/// No bounds are checked, so stored figures outside of a valid [`Percent`]
/// range are still converted as-is.
#[must_use]
pub fn fraction(value: Decimal) -> Decimal {
    value * HUNDREDTH
}

/// Percentage in the `0..=100` range.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Percent(Decimal);

impl Percent {
    /// Zero [`Percent`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Percent`] by checking the provided value is within
    /// the `0..=100` range.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        (Decimal::ZERO..=Decimal::ONE_HUNDRED)
            .contains(&val)
            .then_some(Self(val))
    }

    /// Returns the value of this [`Percent`], e.g. `10` for `10%`.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }

    /// Returns this [`Percent`] as a fraction, e.g. `0.1` for `10%`.
    #[must_use]
    pub fn fraction(self) -> Decimal {
        fraction(self.0)
    }
}

impl From<Percent> for Decimal {
    fn from(percent: Percent) -> Self {
        percent.0
    }
}

impl TryFrom<Decimal> for Percent {
    type Error = &'static str;

    fn try_from(val: Decimal) -> Result<Self, Self::Error> {
        Self::new(val).ok_or("percent value out of `0..=100` range")
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Percentage in the `0..=100` range, e.g. `"12.5"` for `12.5%`.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Percent = super::Percent;

    impl Percent {
        fn to_output<S: ScalarValue>(m: &Percent) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Percent` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Percent` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal_macros::dec;

    use super::{fraction, Percent};

    #[test]
    fn checks_range() {
        assert!(Percent::new(dec!(0)).is_some());
        assert!(Percent::new(dec!(100)).is_some());
        assert!(Percent::new(dec!(12.5)).is_some());

        assert!(Percent::new(dec!(-0.01)).is_none());
        assert!(Percent::new(dec!(100.01)).is_none());
        assert!(Percent::from_str("abc").is_err());
        assert!(Percent::from_str("101").is_err());
    }

    #[test]
    fn converts_to_fraction() {
        assert_eq!(Percent::new(dec!(10)).unwrap().fraction(), dec!(0.1));
        assert_eq!(Percent::ZERO.fraction(), dec!(0));
        assert_eq!(fraction(dec!(250)), dec!(2.5));
    }
}
