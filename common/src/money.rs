//! [`Money`]-related definitions.

use std::{fmt, iter::Sum, ops, str::FromStr};

#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places a [`Money`] amount is kept with.
pub const CENTS: u32 = 2;

/// Rounds the provided `value` to `dp` decimal places, with halves rounded
/// away from zero.
#[must_use]
pub fn round(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Amount of money rounded to [`CENTS`].
///
/// Every arithmetic operation producing a [`Money`] rounds its result, so
/// accumulating a sequence of amounts rounds after each addition rather than
/// once at the end.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(transparent)
)]
pub struct Money(Decimal);

impl Money {
    /// Zero amount of [`Money`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Money`] by rounding the provided `amount` to [`CENTS`].
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        Self(round(amount, CENTS))
    }

    /// Sums the provided `terms`, rounding the running total to [`CENTS`]
    /// after each addition.
    #[must_use]
    pub fn accumulate<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = Decimal>,
    {
        terms
            .into_iter()
            .fold(Self::ZERO, |total, term| Self::new(total.0 + term))
    }

    /// Returns the amount of this [`Money`].
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Indicates whether this [`Money`] is zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.0 + rhs.0)
    }
}

impl ops::Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.0 - rhs.0)
    }
}

impl ops::Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Self::new(self.0 * rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self::accumulate(iter.map(Self::amount))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s).map_err(|_| "invalid amount")?;
        if amount.scale() > CENTS {
            return Err("too many decimal places");
        }
        Ok(Self(amount))
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Amount of money in `{major}.{minor}` format, where:
    /// - `major` is an integer;
    /// - `minor` is an optional integer of at most two digits.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::{round, Money};

    #[test]
    fn rounds_halves_away_from_zero() {
        assert_eq!(round(dec!(0.005), 2), dec!(0.01));
        assert_eq!(round(dec!(0.015), 2), dec!(0.02));
        assert_eq!(round(dec!(-0.005), 2), dec!(-0.01));
        assert_eq!(round(dec!(12.25), 1), dec!(12.3));
        assert_eq!(round(dec!(1980.5), 0), dec!(1981));
    }

    #[test]
    fn accumulates_with_rounding_on_each_step() {
        let terms = [dec!(0.005), dec!(0.005), dec!(0.005)];

        let stepwise = Money::accumulate(terms);
        let naive = Money::new(terms.iter().copied().sum::<Decimal>());

        assert_eq!(stepwise.amount(), dec!(0.03));
        assert_eq!(naive.amount(), dec!(0.02));
        assert_ne!(stepwise, naive);
    }

    #[test]
    fn sum_rounds_like_accumulate() {
        let total: Money = [dec!(10.10), dec!(0.20), dec!(3)]
            .into_iter()
            .map(Money::new)
            .sum();

        assert_eq!(total.amount(), dec!(13.30));
        assert_eq!(Money::accumulate([]), Money::ZERO);
    }

    #[test]
    fn arithmetic_rounds_results() {
        let m = Money::new(dec!(100.00));

        assert_eq!((m * dec!(0.333)).amount(), dec!(33.30));
        assert_eq!((m * dec!(0.00333)).amount(), dec!(0.33));
        assert_eq!((m - Money::new(dec!(0.005))).amount(), dec!(99.99));
        assert_eq!((m + Money::new(dec!(0.004))).amount(), dec!(100.00));
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("123.45").unwrap(),
            Money::new(dec!(123.45)),
        );
        assert_eq!(Money::from_str("123").unwrap(), Money::new(dec!(123)));
        assert_eq!(Money::from_str("-7.5").unwrap(), Money::new(dec!(-7.5)));

        assert!(Money::from_str("123.456").is_err());
        assert!(Money::from_str("123.45USD").is_err());
        assert!(Money::from_str("").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(Money::new(dec!(123.45)).to_string(), "123.45");
        assert_eq!(Money::new(dec!(123)).to_string(), "123.00");
        assert_eq!(Money::new(dec!(123.4)).to_string(), "123.40");
        assert_eq!(Money::new(dec!(0.005)).to_string(), "0.01");
    }
}
