//! Aggregation of [`Plot`] records into rental, area and outgoing totals.

use common::{money, Money};
use rust_decimal::Decimal;

#[cfg(doc)]
use crate::domain::Plot;
use crate::domain::{Outgoing, Parking, Tenant};

/// Number of months in a year.
pub const MONTHS: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Monthly income along with its annual counterpart.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Income {
    /// Income per month.
    pub monthly: Money,

    /// Income per year.
    pub annual: Money,
}

impl Income {
    /// Creates a new [`Income`] out of the provided `monthly` one.
    #[must_use]
    pub fn from_monthly(monthly: Money) -> Self {
        Self {
            monthly,
            annual: monthly * MONTHS,
        }
    }
}

/// Pair of figures as declared by the client and as assessed on the market.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Sides<T> {
    /// Figure as declared by the client.
    pub client: T,

    /// Figure as assessed on the market.
    pub market: T,
}

/// Sums the gross income of all the provided [`Tenant`]s.
#[must_use]
pub fn total_rental_income(tenants: &[Tenant]) -> Income {
    Income::from_monthly(Money::accumulate(
        tenants.iter().map(Tenant::gross_income),
    ))
}

/// Sums the monthly income of all the provided [`Parking`]s.
#[must_use]
pub fn total_parking_income(parking: &[Parking]) -> Money {
    Money::accumulate(parking.iter().map(Parking::income))
}

/// Combines the rental and parking incomes into the gross rental.
#[must_use]
pub fn gross_rental(rental: Income, parking: Money) -> Income {
    Income {
        monthly: rental.monthly + parking,
        annual: rental.annual + parking * MONTHS,
    }
}

/// Sums the let area of all the provided [`Tenant`]s.
#[must_use]
pub fn total_area(tenants: &[Tenant]) -> Sides<Decimal> {
    tenants.iter().fold(Sides::default(), |total, t| Sides {
        client: total.client + t.area_per_client,
        market: total.market + t.area_per_market,
    })
}

/// Sums the annual totals of all the provided [`Outgoing`]s.
#[must_use]
pub fn annual_outgoings(outgoings: &[Outgoing]) -> Sides<Money> {
    Sides {
        client: Money::accumulate(
            outgoings.iter().map(Outgoing::total_per_client),
        ),
        market: Money::accumulate(
            outgoings.iter().map(Outgoing::total_per_market),
        ),
    }
}

/// Spreads the `annual` outgoings over months and the let `area`.
///
/// A side with no let area yields zero.
#[must_use]
pub fn monthly_outgoings(
    annual: Sides<Money>,
    area: Sides<Decimal>,
) -> Sides<Money> {
    let per_area = |annual: Money, area: Decimal| {
        if area > Decimal::ZERO {
            Money::new(annual.amount() / MONTHS / area)
        } else {
            Money::ZERO
        }
    };
    Sides {
        client: per_area(annual.client, area.client),
        market: per_area(annual.market, area.market),
    }
}

/// Returns the annual outgoings as a percentage of the annual gross rental.
///
/// Zero gross rental yields zero.
#[must_use]
pub fn outgoings_to_income_ratio(
    outgoings: Money,
    gross_annual: Money,
) -> Decimal {
    if gross_annual.is_zero() {
        return Decimal::ZERO;
    }
    money::round(
        outgoings.amount() / gross_annual.amount() * Decimal::ONE_HUNDRED,
        money::CENTS,
    )
}

#[cfg(test)]
mod spec {
    use common::DateTime;
    use rust_decimal_macros::dec;

    use crate::domain::{
        outgoing::{self, ItemType},
        parking, plot, property_type, tenant, PropertyType,
    };

    use super::*;

    fn tenant(
        property_type: &str,
        area: Decimal,
        rate: Decimal,
    ) -> Tenant {
        Tenant {
            id: tenant::Id::new(),
            plot_id: plot::Id::default(),
            name: "Tenant".into(),
            area_per_client: area,
            area_per_market: area + dec!(1),
            rate_per_client: rate,
            rate_per_market: rate,
            gross_monthly_rental: dec!(999_999),
            property_type: PropertyType {
                id: property_type::Id::default(),
                identifier: property_type.into(),
            },
            start_date: DateTime::now().coerce(),
            end_date: DateTime::now().coerce(),
        }
    }

    fn outgoing(item_type: ItemType, unit: Decimal, rate: Decimal) -> Outgoing {
        Outgoing::new(
            plot::Id::default(),
            outgoing::Draft {
                identifier: "Rates".into(),
                item_type,
                unit_per_client: unit,
                rate_per_client: rate,
                unit_per_market: unit,
                rate_per_market: rate,
            },
        )
    }

    #[test]
    fn rental_income_ignores_stale_gross_monthly_rental() {
        let tenants = [
            tenant("Retail", dec!(100), dec!(12.5)),
            tenant("Office", dec!(40), dec!(20)),
        ];

        let income = total_rental_income(&tenants);

        assert_eq!(income.monthly, Money::new(dec!(2050)));
        assert_eq!(income.annual, Money::new(dec!(24600)));
    }

    #[test]
    fn gross_rental_adds_parking_on_both_periods() {
        let parking = [parking::Parking::new(
            plot::Id::default(),
            parking::Draft {
                parking_type_id: 1.into(),
                unit_per_client: dec!(10),
                rate_per_client: dec!(50),
                unit_per_market: dec!(10),
                rate_per_market: dec!(60),
            },
        )];
        let rental = Income::from_monthly(Money::new(dec!(1000)));

        let gross = gross_rental(rental, total_parking_income(&parking));

        assert_eq!(gross.monthly, Money::new(dec!(1500)));
        assert_eq!(gross.annual, Money::new(dec!(18000)));
    }

    #[test]
    fn tracks_both_area_sides() {
        let tenants = [
            tenant("Retail", dec!(100), dec!(1)),
            tenant("Retail", dec!(50.5), dec!(1)),
        ];

        assert_eq!(
            total_area(&tenants),
            Sides {
                client: dec!(150.5),
                market: dec!(152.5),
            },
        );
    }

    #[test]
    fn percentage_outgoing_is_a_fraction() {
        let rows = [outgoing(ItemType::Percentage, dec!(100), dec!(20))];

        assert_eq!(annual_outgoings(&rows).client, Money::new(dec!(20.00)));
    }

    #[test]
    fn outgoings_round_after_each_addition() {
        let rows = [
            outgoing(ItemType::Annual, dec!(1), dec!(0.005)),
            outgoing(ItemType::Annual, dec!(1), dec!(0.005)),
            outgoing(ItemType::Annual, dec!(1), dec!(0.005)),
        ];

        let total = annual_outgoings(&rows).client;

        assert_eq!(total, Money::new(dec!(0.03)));
        assert_ne!(total, Money::new(dec!(0.005) * dec!(3)));
    }

    #[test]
    fn monthly_outgoings_guard_zero_area() {
        let annual = Sides {
            client: Money::new(dec!(12000)),
            market: Money::new(dec!(24000)),
        };

        assert_eq!(
            monthly_outgoings(
                annual,
                Sides {
                    client: Decimal::ZERO,
                    market: dec!(100),
                },
            ),
            Sides {
                client: Money::ZERO,
                market: Money::new(dec!(20)),
            },
        );
    }

    #[test]
    fn ratio_guards_zero_gross_rental() {
        assert_eq!(
            outgoings_to_income_ratio(Money::new(dec!(500)), Money::ZERO),
            Decimal::ZERO,
        );
        assert_eq!(
            outgoings_to_income_ratio(
                Money::new(dec!(20000)),
                Money::new(dec!(120000)),
            ),
            dec!(16.67),
        );
    }
}
