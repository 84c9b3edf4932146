//! Income capitalisation of a [`Plot`] into its market value.

use common::{money, percent, Money};
use rust_decimal::Decimal;

#[cfg(doc)]
use crate::domain::Plot;

/// Figures the income capitalisation is computed out of.
#[derive(Clone, Copy, Debug, Default)]
pub struct Inputs {
    /// Annual gross rental.
    pub gross_annual: Money,

    /// Annual outgoings.
    pub annual_outgoings: Money,

    /// Share of the gross rental lost to vacancies, in percent.
    pub vacancy: Decimal,

    /// Recovered amount per let area unit.
    pub recovery_figure: Decimal,

    /// Let area, as declared by the client.
    pub total_area: Decimal,

    /// Capitalisation rate, in percent.
    pub capitalisation_rate: Decimal,

    /// Area of the undeveloped portion of the [`Plot`].
    pub undeveloped_portion: Decimal,

    /// Rate per area unit of the undeveloped portion.
    pub rate_for_undeveloped_portion: Decimal,

    /// Forced sale discount, in percent.
    pub fsv_adjustment: Decimal,
}

/// Figures resulting from the income capitalisation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Outputs {
    /// Rental lost to vacancies.
    pub vacancies: Money,

    /// Recovered outgoings.
    pub recoveries: Money,

    /// Net annual rental income.
    pub net_annual_rental_income: Money,

    /// Capitalised value of the net income.
    pub capitalised_value: Money,

    /// Capitalised value per let area unit, rounded to whole units.
    pub capitalised_figure: Decimal,

    /// Value of the undeveloped portion.
    pub value_of_undeveloped_portion: Money,

    /// Market value.
    pub market_value: Money,

    /// Forced sale value.
    pub forced_sale_value: Money,
}

/// Evaluates the provided [`Inputs`].
///
/// Zero capitalisation rate or zero area yield zero dependent figures rather
/// than failing.
#[must_use]
pub fn evaluate(inputs: &Inputs) -> Outputs {
    let vacancies = Money::new(
        inputs.gross_annual.amount() * percent::fraction(inputs.vacancy),
    );
    let recoveries = Money::new(inputs.recovery_figure * inputs.total_area);
    let net_annual_rental_income =
        inputs.gross_annual - vacancies - inputs.annual_outgoings + recoveries;

    let capitalised_value = if inputs.capitalisation_rate > Decimal::ZERO {
        Money::new(
            net_annual_rental_income.amount()
                / percent::fraction(inputs.capitalisation_rate),
        )
    } else {
        Money::ZERO
    };
    let capitalised_figure = if inputs.total_area > Decimal::ZERO {
        money::round(capitalised_value.amount() / inputs.total_area, 0)
    } else {
        Decimal::ZERO
    };

    let value_of_undeveloped_portion = Money::new(
        inputs.undeveloped_portion * inputs.rate_for_undeveloped_portion,
    );
    let market_value = value_of_undeveloped_portion + capitalised_value;
    let forced_sale_value = Money::new(
        market_value.amount()
            - percent::fraction(inputs.fsv_adjustment) * market_value.amount(),
    );

    Outputs {
        vacancies,
        recoveries,
        net_annual_rental_income,
        capitalised_value,
        capitalised_figure,
        value_of_undeveloped_portion,
        market_value,
        forced_sale_value,
    }
}

/// Computes the management fee: the annual gross rental net of vacancies.
#[must_use]
pub fn management_fee(gross_annual: Money, vacancy: Decimal) -> Money {
    Money::new(
        gross_annual.amount()
            - gross_annual.amount() * percent::fraction(vacancy),
    )
}

#[cfg(test)]
mod spec {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn evaluates_reference_chain() {
        let out = evaluate(&Inputs {
            gross_annual: Money::new(dec!(120000)),
            annual_outgoings: Money::new(dec!(20000)),
            vacancy: dec!(5),
            recovery_figure: dec!(10),
            total_area: dec!(500),
            capitalisation_rate: dec!(10),
            undeveloped_portion: Decimal::ZERO,
            rate_for_undeveloped_portion: dec!(300),
            fsv_adjustment: dec!(10),
        });

        assert_eq!(out.vacancies, Money::new(dec!(6000)));
        assert_eq!(out.recoveries, Money::new(dec!(5000)));
        assert_eq!(out.net_annual_rental_income, Money::new(dec!(99000)));
        assert_eq!(out.capitalised_value, Money::new(dec!(990000)));
        assert_eq!(out.capitalised_figure, dec!(1980));
        assert_eq!(out.value_of_undeveloped_portion, Money::ZERO);
        assert_eq!(out.market_value, Money::new(dec!(990000)));
        assert_eq!(out.forced_sale_value, Money::new(dec!(891000.00)));
        assert_eq!(out.forced_sale_value.to_string(), "891000.00");
    }

    #[test]
    fn zero_capitalisation_rate_yields_zero_value() {
        let out = evaluate(&Inputs {
            gross_annual: Money::new(dec!(1000)),
            total_area: dec!(10),
            undeveloped_portion: dec!(2),
            rate_for_undeveloped_portion: dec!(50.005),
            ..Inputs::default()
        });

        assert_eq!(out.net_annual_rental_income, Money::new(dec!(1000)));
        assert_eq!(out.capitalised_value, Money::ZERO);
        assert_eq!(out.capitalised_figure, Decimal::ZERO);
        assert_eq!(out.value_of_undeveloped_portion, Money::new(dec!(100.01)));
        assert_eq!(out.market_value, Money::new(dec!(100.01)));
    }

    #[test]
    fn zero_area_yields_zero_figure() {
        let out = evaluate(&Inputs {
            gross_annual: Money::new(dec!(1000)),
            capitalisation_rate: dec!(8),
            ..Inputs::default()
        });

        assert_eq!(out.capitalised_value, Money::new(dec!(12500)));
        assert_eq!(out.capitalised_figure, Decimal::ZERO);
    }

    #[test]
    fn capitalised_figure_rounds_to_whole_units() {
        let out = evaluate(&Inputs {
            gross_annual: Money::new(dec!(1000)),
            total_area: dec!(3),
            capitalisation_rate: dec!(10),
            ..Inputs::default()
        });

        assert_eq!(out.capitalised_figure, dec!(3333));
    }

    #[test]
    fn forced_sale_value_rounds_once() {
        let out = evaluate(&Inputs {
            undeveloped_portion: dec!(1),
            rate_for_undeveloped_portion: dec!(0.50),
            fsv_adjustment: dec!(1),
            ..Inputs::default()
        });

        assert_eq!(out.market_value, Money::new(dec!(0.50)));
        assert_eq!(out.forced_sale_value, Money::new(dec!(0.50)));
    }

    #[test]
    fn management_fee_rounds_once() {
        assert_eq!(
            management_fee(Money::new(dec!(0.50)), dec!(1)),
            Money::new(dec!(0.50)),
        );
    }

    #[test]
    fn management_fee_nets_out_vacancies() {
        assert_eq!(
            management_fee(Money::new(dec!(120000)), dec!(5)),
            Money::new(dec!(114000)),
        );
        assert_eq!(
            management_fee(Money::new(dec!(120000)), Decimal::ZERO),
            Money::new(dec!(120000)),
        );
    }
}
