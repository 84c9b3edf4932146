//! Replacement cost computation out of [`Insurance`] lines.

use common::{money, percent, Money};
use rust_decimal::Decimal;

use crate::domain::{stored_value::Key, Insurance, StoredValues};

use super::aggregate::MONTHS;

/// Common property share of the replacement cost.
///
/// Not assessed separately yet, so always zero.
pub const COM_PROPERTY: Money = Money::ZERO;

/// Percentages and periods the replacement cost is escalated with.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rates {
    /// VAT, in percent.
    pub vat: Decimal,

    /// Professional fees, in percent.
    pub prof_fees: Decimal,

    /// Annual pre-tender escalation, in percent.
    pub pre_tender_perc: Decimal,

    /// Months of pre-tender escalation.
    pub pre_tender_at: Decimal,

    /// Annual post-tender escalation, in percent.
    pub post_tender_perc: Decimal,

    /// Months of post-tender escalation.
    pub post_tender_at: Decimal,
}

impl Rates {
    /// Reads the [`Rates`] out of the provided [`StoredValues`].
    #[must_use]
    pub fn from_stored(values: &StoredValues) -> Self {
        Self {
            vat: values.value(Key::InsuranceVat),
            prof_fees: values.value(Key::ProfFees),
            pre_tender_perc: values.value(Key::PreTenderEscalationPerc),
            pre_tender_at: values.value(Key::PreTenderEscalationAt),
            post_tender_perc: values.value(Key::PostTenderEscalationPerc),
            post_tender_at: values.value(Key::PostTenderEscalationAt),
        }
    }
}

/// Breakdown of the gross replacement cost of a building.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ReplacementCost {
    /// Sum of all the [`Insurance`] lines.
    pub sub_total: Money,

    /// VAT upon the [`ReplacementCost::sub_total`].
    pub vat: Money,

    /// Common property share, see [`COM_PROPERTY`].
    pub com_property: Money,

    /// Professional fees.
    pub prof_fees: Money,

    /// Replacement cost before escalations.
    pub replacement_cost: Money,

    /// Escalation until the tender.
    pub pre_tender_escalation: Money,

    /// Escalation after the tender.
    pub post_tender_escalation: Money,

    /// Insured total, rounded to a single decimal place.
    pub total: Decimal,
}

impl ReplacementCost {
    /// Computes the [`ReplacementCost`] of the provided [`Insurance`] lines.
    #[must_use]
    pub fn compute(lines: &[Insurance], rates: Rates) -> Self {
        let sub_total = Money::accumulate(lines.iter().map(Insurance::cost));
        let vat =
            Money::new(sub_total.amount() * rates.vat / Decimal::ONE_HUNDRED);
        let com_property = COM_PROPERTY;
        let prof_fees = Money::new(
            percent::fraction(rates.prof_fees)
                * (sub_total + vat + com_property).amount(),
        );
        let replacement_cost = sub_total + vat + com_property + prof_fees;
        let pre_tender_escalation = Money::new(
            escalation(rates.pre_tender_perc, rates.pre_tender_at)
                * replacement_cost.amount(),
        );
        let post_tender_escalation = Money::new(
            escalation(rates.post_tender_perc, rates.post_tender_at)
                * sub_total.amount(),
        );
        let total = money::round(
            (replacement_cost + pre_tender_escalation + post_tender_escalation)
                .amount(),
            1,
        );

        Self {
            sub_total,
            vat,
            com_property,
            prof_fees,
            replacement_cost,
            pre_tender_escalation,
            post_tender_escalation,
            total,
        }
    }
}

/// Returns the escalation factor of the provided annual `perc` over `months`.
fn escalation(perc: Decimal, months: Decimal) -> Decimal {
    perc / Decimal::ONE_HUNDRED * months / MONTHS
}

#[cfg(test)]
mod spec {
    use rust_decimal_macros::dec;

    use crate::domain::{insurance, plot};

    use super::*;

    fn line(rate: Decimal, area: Decimal) -> Insurance {
        Insurance {
            id: insurance::Id::new(),
            plot_id: plot::Id::default(),
            item: "Main building".into(),
            rate,
            area,
        }
    }

    #[test]
    fn computes_full_chain() {
        let cost = ReplacementCost::compute(
            &[line(dec!(1000), dec!(80)), line(dec!(500), dec!(40))],
            Rates {
                vat: dec!(15),
                prof_fees: dec!(10),
                pre_tender_perc: dec!(6),
                pre_tender_at: dec!(6),
                post_tender_perc: dec!(12),
                post_tender_at: dec!(3),
            },
        );

        assert_eq!(cost.sub_total, Money::new(dec!(100000)));
        assert_eq!(cost.vat, Money::new(dec!(15000)));
        assert_eq!(cost.com_property, Money::ZERO);
        assert_eq!(cost.prof_fees, Money::new(dec!(11500)));
        assert_eq!(cost.replacement_cost, Money::new(dec!(126500)));
        assert_eq!(cost.pre_tender_escalation, Money::new(dec!(3795)));
        assert_eq!(cost.post_tender_escalation, Money::new(dec!(3000)));
        assert_eq!(cost.total, dec!(133295));
    }

    #[test]
    fn rounds_total_to_single_decimal() {
        let cost = ReplacementCost::compute(
            &[line(dec!(10.25), dec!(1))],
            Rates::default(),
        );

        assert_eq!(cost.replacement_cost, Money::new(dec!(10.25)));
        assert_eq!(cost.total, dec!(10.3));
    }

    #[test]
    fn no_lines_cost_nothing() {
        let cost = ReplacementCost::compute(&[], Rates {
            vat: dec!(15),
            ..Rates::default()
        });

        assert_eq!(cost, ReplacementCost::default());
    }
}
