//! GraphQL scalar definitions.

use std::{fmt, marker::PhantomData, str::FromStr};

use derive_more::{AsRef, Display, From, Into};
use juniper::{
    GraphQLScalar, GraphQLType, InputValue, ParseScalarResult,
    ParseScalarValue, ScalarToken, ScalarValue, Value,
};

/// Helper type to use in `#[graphql(with = ..)]` attribute.
///
/// Uses [`FromStr`]/[`Display`] impls of `As` type to convert the target type
/// to/from GraphQL scalar.
///
/// Target type must implement [`TryFrom`] and [`AsRef`] for `As` type.
///
/// [`Display`]: fmt::Display
#[derive(Debug)]
pub struct Via<As>(PhantomData<As>);

impl<As> Via<As> {
    /// Convert the target type into scalar [`Value`] by using [`Display`] impl
    /// of `As` type.
    ///
    /// [`Display`]: fmt::Display
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        As: fmt::Display,
        T: AsRef<As>,
        S: ScalarValue,
    {
        Value::from(value.as_ref().to_string())
    }

    /// Constructs the target type from scalar [`Value`] by using [`FromStr`]
    /// impl of `As` type.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the input value is not a string;
    /// - the input value cannot be parsed into `As` type;
    /// - the parsed value cannot be converted into the target type.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        As: FromStr + fmt::Display,
        As::Err: fmt::Display,
        T: TryFrom<As> + GraphQLType<S, TypeInfo = ()>,
        T::Error: fmt::Display,
        S: ScalarValue,
    {
        let s = input.as_string_value().ok_or_else(|| {
            format!(
                "Cannot parse input scalar `{}`: expected string input \
                 value, found: {input}",
                T::name(&()).expect("always has a name"),
            )
        })?;
        s.parse::<As>()
            .map_err(|e| {
                format!(
                    "Cannot parse input scalar `{}` from \"{s}\" string: {e}",
                    T::name(&()).expect("always has a name"),
                )
            })?
            .try_into()
            .map_err(|e| {
                format!(
                    "Cannot parse input scalar `{}`: {e}",
                    T::name(&()).expect("always has a name"),
                )
            })
    }

    /// Parse the provided [`ScalarToken`].
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be parsed as [`String`].
    pub fn parse_token<S: ScalarValue>(
        value: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <String as ParseScalarValue<S>>::from_str(value)
    }
}

/// Arbitrary precision decimal number, transferred as a string to keep its
/// precision, e.g. `"1234.5"`.
#[derive(
    AsRef,
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    From,
    GraphQLScalar,
    Into,
    PartialEq,
)]
#[graphql(with = Via::<rust_decimal::Decimal>)]
pub struct Decimal(rust_decimal::Decimal);

#[cfg(test)]
mod spec {
    use juniper::{DefaultScalarValue, InputValue, Value};
    use rust_decimal_macros::dec;

    use super::{Decimal, Via};

    #[test]
    fn outputs_decimal_as_string() {
        let value: Value<DefaultScalarValue> =
            Via::<rust_decimal::Decimal>::to_output(&Decimal::from(dec!(
                891000.00
            )));

        assert_eq!(value, Value::scalar("891000.00".to_owned()));
    }

    #[test]
    fn parses_decimal_from_string() {
        let input = InputValue::<DefaultScalarValue>::scalar("12.5".to_owned());

        let parsed: Decimal =
            Via::<rust_decimal::Decimal>::from_input(&input).unwrap();

        assert_eq!(parsed, Decimal::from(dec!(12.5)));
    }

    #[test]
    fn rejects_non_decimal_input() {
        let text = InputValue::<DefaultScalarValue>::scalar("12,5".to_owned());
        let number = InputValue::<DefaultScalarValue>::scalar(12);

        assert!(Via::<rust_decimal::Decimal>::from_input::<Decimal, _>(&text)
            .is_err());
        assert!(
            Via::<rust_decimal::Decimal>::from_input::<Decimal, _>(&number)
                .is_err()
        );
    }
}
