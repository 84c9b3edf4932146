//! [`StoredValue`]-related definitions.

use juniper::{GraphQLEnum, GraphQLInputObject, GraphQLObject};
use service::domain::stored_value;

use crate::{api::scalar::Decimal, Context};

/// Adjustment figure of a `Plot` valuation.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct StoredValue {
    /// Key of this figure.
    pub key: Key,

    /// Value of this figure, zero if not stored.
    pub value: Decimal,

    /// Indicator whether this figure is actually stored, rather than
    /// defaulted to zero.
    pub is_stored: bool,
}

/// New value of an adjustment figure.
#[derive(Clone, Copy, Debug, GraphQLInputObject)]
#[graphql(name = "StoredValueInput")]
pub struct Input {
    /// Key of the figure.
    pub key: Key,

    /// New value of the figure.
    ///
    /// Percentages must lie within `0..=100`, other figures must not be
    /// negative.
    pub value: Decimal,
}

impl From<Input> for (stored_value::Key, rust_decimal::Decimal) {
    fn from(Input { key, value }: Input) -> Self {
        (key.into(), value.into())
    }
}

/// Key of an adjustment figure.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "StoredValueKey")]
pub enum Key {
    /// Share of the gross rental lost to vacancies, in percent.
    VacancyPercentage,

    /// Discount of the market value giving the forced sale value, in
    /// percent.
    FsvAdjustment,

    /// Recovered amount per lettable area unit.
    RecoveryFigure,

    /// Capitalisation rate, in percent.
    CapitalisationRate,

    /// Net annual escalation, in percent.
    NetAnnualEscalation,

    /// Discount rate, in percent.
    DiscountRate,

    /// Last capitalised rate, in percent.
    LastCapitalisedPerc,

    /// VAT applied to the insured replacement cost, in percent.
    InsuranceVat,

    /// Professional fees, in percent.
    ProfFees,

    /// Months of pre-tender escalation.
    PreTenderEscalationAt,

    /// Annual pre-tender escalation, in percent.
    PreTenderEscalationPerc,

    /// Months of post-tender escalation.
    PostTenderEscalationAt,

    /// Annual post-tender escalation, in percent.
    PostTenderEscalationPerc,
}

impl From<stored_value::Key> for Key {
    fn from(key: stored_value::Key) -> Self {
        use stored_value::Key as K;
        match key {
            K::VacancyPercentage => Self::VacancyPercentage,
            K::FsvAdjustment => Self::FsvAdjustment,
            K::RecoveryFigure => Self::RecoveryFigure,
            K::CapitalisationRate => Self::CapitalisationRate,
            K::NetAnnualEscalation => Self::NetAnnualEscalation,
            K::DiscountRate => Self::DiscountRate,
            K::LastCapitalisedPerc => Self::LastCapitalisedPerc,
            K::InsuranceVat => Self::InsuranceVat,
            K::ProfFees => Self::ProfFees,
            K::PreTenderEscalationAt => Self::PreTenderEscalationAt,
            K::PreTenderEscalationPerc => Self::PreTenderEscalationPerc,
            K::PostTenderEscalationAt => Self::PostTenderEscalationAt,
            K::PostTenderEscalationPerc => Self::PostTenderEscalationPerc,
        }
    }
}

impl From<Key> for stored_value::Key {
    fn from(key: Key) -> Self {
        match key {
            Key::VacancyPercentage => Self::VacancyPercentage,
            Key::FsvAdjustment => Self::FsvAdjustment,
            Key::RecoveryFigure => Self::RecoveryFigure,
            Key::CapitalisationRate => Self::CapitalisationRate,
            Key::NetAnnualEscalation => Self::NetAnnualEscalation,
            Key::DiscountRate => Self::DiscountRate,
            Key::LastCapitalisedPerc => Self::LastCapitalisedPerc,
            Key::InsuranceVat => Self::InsuranceVat,
            Key::ProfFees => Self::ProfFees,
            Key::PreTenderEscalationAt => Self::PreTenderEscalationAt,
            Key::PreTenderEscalationPerc => Self::PreTenderEscalationPerc,
            Key::PostTenderEscalationAt => Self::PostTenderEscalationAt,
            Key::PostTenderEscalationPerc => Self::PostTenderEscalationPerc,
        }
    }
}
