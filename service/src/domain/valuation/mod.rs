//! Valuation of a [`Plot`] out of its records.
//!
//! The pipeline is pure: it never touches the database. The [`Derived`]
//! outgoing rows it reconciles are substituted in memory, and the writes
//! needed to persist them are returned as [`Upsert`]s for the caller to
//! apply within its transaction.
//!
//! [`Derived`]: crate::domain::outgoing::Derived

pub mod aggregate;
pub mod derived;
pub mod grouping;
pub mod income;
pub mod insurance;

use common::Money;
use rust_decimal::Decimal;

use crate::domain::{
    outgoing, stored_value::Key, Insurance, Outgoing, Parking, Plot,
    StoredValues, Tenant,
};

pub use self::{
    aggregate::{Income, Sides},
    derived::Upsert,
    grouping::AssetTypeGroup,
    insurance::ReplacementCost,
};

/// Records of a single [`Plot`] a [`Valuation`] is computed out of.
#[derive(Clone, Copy, Debug)]
pub struct Records<'a> {
    /// [`Plot`] being valued.
    pub plot: &'a Plot,

    /// [`Tenant`]s of the [`Plot`].
    pub tenants: &'a [Tenant],

    /// [`Parking`]s of the [`Plot`].
    pub parking: &'a [Parking],

    /// [`Outgoing`]s of the [`Plot`], as persisted.
    pub outgoings: &'a [Outgoing],

    /// [`Insurance`] lines of the [`Plot`].
    pub insurances: &'a [Insurance],

    /// [`StoredValues`] of the [`Plot`].
    pub stored_values: &'a StoredValues,
}

/// Valuation figures of a [`Plot`].
#[derive(Clone, Debug, PartialEq)]
pub struct Valuation {
    /// Rental income of all the tenants.
    pub total_rental_income: Income,

    /// Monthly income of all the parking.
    pub total_parking_income: Money,

    /// Rental and parking incomes combined.
    pub gross_rental: Income,

    /// Let area.
    pub total_area: Sides<Decimal>,

    /// Breakdown of the insured replacement cost.
    pub replacement_cost: ReplacementCost,

    /// Management fee.
    pub management_fee: Money,

    /// Annual outgoings.
    pub annual_outgoings: Sides<Money>,

    /// Monthly outgoings per let area unit.
    pub monthly_outgoings: Sides<Money>,

    /// Rental lost to vacancies.
    pub vacancies: Money,

    /// Recovered outgoings.
    pub recoveries: Money,

    /// Net annual rental income.
    pub net_annual_rental_income: Money,

    /// Capitalised value of the net income.
    pub capitalised_value: Money,

    /// Capitalised value per let area unit.
    pub capitalised_figure: Decimal,

    /// Value of the undeveloped portion.
    pub value_of_undeveloped_portion: Money,

    /// Market value.
    pub market_value: Money,

    /// Forced sale value.
    pub forced_sale_value: Money,

    /// Annual outgoings as a percentage of the annual gross rental.
    pub outgoings_to_income_ratio: Decimal,

    /// Tenancies grouped by their asset type.
    pub grouped_asset_types: Vec<AssetTypeGroup>,
}

/// Result of a [`compute`] run.
#[derive(Clone, Debug)]
pub struct Computation {
    /// Computed [`Valuation`].
    pub valuation: Valuation,

    /// [`Outgoing`]s with the reconciled rows substituted, sorted for
    /// display.
    pub outgoings: Vec<Outgoing>,

    /// Writes persisting the reconciled rows.
    pub upserts: Vec<Upsert>,
}

/// Computes the [`Valuation`] of the provided [`Records`].
#[must_use]
pub fn compute(records: Records<'_>) -> Computation {
    let Records {
        plot,
        tenants,
        parking,
        outgoings,
        insurances,
        stored_values,
    } = records;
    let vacancy = stored_values.value(Key::VacancyPercentage);

    let total_rental_income = aggregate::total_rental_income(tenants);
    let total_parking_income = aggregate::total_parking_income(parking);
    let gross_rental =
        aggregate::gross_rental(total_rental_income, total_parking_income);
    let total_area = aggregate::total_area(tenants);

    let replacement_cost = ReplacementCost::compute(
        insurances,
        insurance::Rates::from_stored(stored_values),
    );
    let management_fee = income::management_fee(gross_rental.annual, vacancy);

    let upserts = derived::reconcile(
        plot.id,
        outgoings,
        &derived::Computed {
            management_fee,
            insurance_total: replacement_cost.total,
        },
    );
    let mut outgoings = outgoings.to_vec();
    derived::apply(&mut outgoings, &upserts);
    outgoing::sort_for_display(&mut outgoings);

    let annual_outgoings = aggregate::annual_outgoings(&outgoings);
    let monthly_outgoings =
        aggregate::monthly_outgoings(annual_outgoings, total_area);

    let income = income::evaluate(&income::Inputs {
        gross_annual: gross_rental.annual,
        annual_outgoings: annual_outgoings.client,
        vacancy,
        recovery_figure: stored_values.value(Key::RecoveryFigure),
        total_area: total_area.client,
        capitalisation_rate: stored_values.value(Key::CapitalisationRate),
        undeveloped_portion: plot.undeveloped_portion,
        rate_for_undeveloped_portion: plot.rate_for_undeveloped_portion,
        fsv_adjustment: stored_values.value(Key::FsvAdjustment),
    });

    let valuation = Valuation {
        total_rental_income,
        total_parking_income,
        gross_rental,
        total_area,
        replacement_cost,
        management_fee,
        annual_outgoings,
        monthly_outgoings,
        vacancies: income.vacancies,
        recoveries: income.recoveries,
        net_annual_rental_income: income.net_annual_rental_income,
        capitalised_value: income.capitalised_value,
        capitalised_figure: income.capitalised_figure,
        value_of_undeveloped_portion: income.value_of_undeveloped_portion,
        market_value: income.market_value,
        forced_sale_value: income.forced_sale_value,
        outgoings_to_income_ratio: aggregate::outgoings_to_income_ratio(
            annual_outgoings.client,
            gross_rental.annual,
        ),
        grouped_asset_types: grouping::group_by_asset_type(
            tenants,
            total_area.client,
        ),
    };

    Computation {
        valuation,
        outgoings,
        upserts,
    }
}

#[cfg(test)]
mod spec {
    use common::DateTime;
    use rust_decimal_macros::dec;

    use crate::domain::{
        outgoing::ItemType, plot, property_type, stored_value, tenant,
        PropertyType, StoredValue,
    };

    use super::*;

    fn plot() -> Plot {
        Plot {
            id: plot::Id::new(),
            name: plot::Name::new("Riverside Mall").unwrap(),
            undeveloped_portion: Decimal::ZERO,
            rate_for_undeveloped_portion: dec!(150),
            created_at: DateTime::now().coerce(),
        }
    }

    fn tenant(plot_id: plot::Id, area: Decimal, rate: Decimal) -> Tenant {
        Tenant {
            id: tenant::Id::new(),
            plot_id,
            name: "Anchor".into(),
            area_per_client: area,
            area_per_market: area,
            rate_per_client: rate,
            rate_per_market: rate,
            gross_monthly_rental: Decimal::ZERO,
            property_type: PropertyType {
                id: property_type::Id::default(),
                identifier: "Retail".into(),
            },
            start_date: DateTime::now().coerce(),
            end_date: DateTime::now().coerce(),
        }
    }

    fn stored(plot_id: plot::Id, values: &[(Key, Decimal)]) -> StoredValues {
        values
            .iter()
            .map(|&(key, value)| StoredValue {
                id: stored_value::Id::new(),
                plot_id,
                key,
                value,
            })
            .collect()
    }

    #[test]
    fn values_plot_end_to_end() {
        let plot = plot();
        let tenants = [tenant(plot.id, dec!(500), dec!(20))];
        let outgoings = [Outgoing::new(
            plot.id,
            outgoing::Draft {
                identifier: "Rates and Taxes".into(),
                item_type: ItemType::Annual,
                unit_per_client: Decimal::ONE,
                rate_per_client: dec!(18860),
                unit_per_market: Decimal::ONE,
                rate_per_market: dec!(18860),
            },
        )];
        let stored_values = stored(
            plot.id,
            &[
                (Key::VacancyPercentage, dec!(5)),
                (Key::RecoveryFigure, dec!(10)),
                (Key::CapitalisationRate, dec!(10)),
                (Key::FsvAdjustment, dec!(10)),
            ],
        );

        let Computation {
            valuation,
            outgoings,
            upserts,
        } = compute(Records {
            plot: &plot,
            tenants: &tenants,
            parking: &[],
            outgoings: &outgoings,
            insurances: &[],
            stored_values: &stored_values,
        });

        assert_eq!(upserts.len(), 3);
        assert_eq!(outgoings.len(), 4);
        assert_eq!(outgoings[0].identifier.as_str(), "Rates and Taxes");
        assert_eq!(valuation.gross_rental.monthly, Money::new(dec!(10000)));
        assert_eq!(valuation.gross_rental.annual, Money::new(dec!(120000)));
        assert_eq!(valuation.management_fee, Money::new(dec!(114000)));
        assert_eq!(valuation.annual_outgoings.client, Money::new(dec!(20000)));
        assert_eq!(
            valuation.annual_outgoings.market,
            Money::new(dec!(18860.03)),
        );
        assert_eq!(valuation.monthly_outgoings.client, Money::new(dec!(3.33)));
        assert_eq!(valuation.vacancies, Money::new(dec!(6000)));
        assert_eq!(valuation.recoveries, Money::new(dec!(5000)));
        assert_eq!(
            valuation.net_annual_rental_income,
            Money::new(dec!(99000)),
        );
        assert_eq!(valuation.capitalised_value, Money::new(dec!(990000)));
        assert_eq!(valuation.market_value, Money::new(dec!(990000)));
        assert_eq!(valuation.forced_sale_value, Money::new(dec!(891000)));
        assert_eq!(valuation.outgoings_to_income_ratio, dec!(16.67));
        assert_eq!(valuation.grouped_asset_types.len(), 1);
        assert_eq!(valuation.grouped_asset_types[0].area, dec!(500));
    }

    #[test]
    fn empty_plot_values_to_zero() {
        let plot = plot();

        let Computation {
            valuation, upserts, ..
        } = compute(Records {
            plot: &plot,
            tenants: &[],
            parking: &[],
            outgoings: &[],
            insurances: &[],
            stored_values: &StoredValues::default(),
        });

        assert_eq!(upserts.len(), 3);
        assert_eq!(valuation.gross_rental, Income::default());
        assert_eq!(valuation.monthly_outgoings, Sides::default());
        assert_eq!(valuation.capitalised_value, Money::ZERO);
        assert_eq!(valuation.capitalised_figure, Decimal::ZERO);
        assert_eq!(valuation.outgoings_to_income_ratio, Decimal::ZERO);
        assert!(valuation.grouped_asset_types.is_empty());
    }

    #[test]
    fn recompute_after_sync_writes_nothing() {
        let plot = plot();
        let tenants = [tenant(plot.id, dec!(120), dec!(35.5))];
        let stored_values =
            stored(plot.id, &[(Key::VacancyPercentage, dec!(7.5))]);
        let records = Records {
            plot: &plot,
            tenants: &tenants,
            parking: &[],
            outgoings: &[],
            insurances: &[],
            stored_values: &stored_values,
        };

        let first = compute(records);
        let second = compute(Records {
            outgoings: &first.outgoings,
            ..records
        });

        assert_eq!(first.upserts.len(), 3);
        assert!(second.upserts.is_empty());
        assert_eq!(first.valuation, second.valuation);
    }
}
