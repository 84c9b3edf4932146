//! [`StoredValue`] definitions.

use std::collections::HashMap;

use common::define_kind;
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Plot;
use crate::domain::{audit, plot};

/// Adjustment figure of a [`Plot`] valuation, keyed by its [`Key`].
///
/// There is at most one [`StoredValue`] per [`Plot`] and [`Key`].
#[derive(Clone, Debug, PartialEq)]
pub struct StoredValue {
    /// ID of this [`StoredValue`].
    pub id: Id,

    /// ID of the [`Plot`] this [`StoredValue`] belongs to.
    pub plot_id: plot::Id,

    /// [`Key`] of this [`StoredValue`].
    pub key: Key,

    /// Value of this [`StoredValue`].
    pub value: Decimal,
}

impl audit::Record for StoredValue {
    const DOMAIN: audit::Domain = audit::Domain::StoredValue;

    fn record_id(&self) -> Uuid {
        self.id.into()
    }

    fn snapshot(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "plot_id": self.plot_id,
            "key": self.key.to_string(),
            "value": self.value.to_string(),
        })
    }
}

/// ID of a [`StoredValue`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

define_kind! {
    #[doc = "Key of a [`StoredValue`]."]
    enum Key {
        #[doc = "Share of the gross rental lost to vacancies, in percent."]
        VacancyPercentage = 1,

        #[doc = "Discount of the market value giving the forced sale value, \
                 in percent."]
        FsvAdjustment = 2,

        #[doc = "Recovered amount per lettable area unit."]
        RecoveryFigure = 3,

        #[doc = "Capitalisation rate, in percent."]
        CapitalisationRate = 4,

        #[doc = "Net annual escalation, in percent."]
        NetAnnualEscalation = 5,

        #[doc = "Discount rate, in percent."]
        DiscountRate = 6,

        #[doc = "Last capitalised rate, in percent."]
        LastCapitalisedPerc = 7,

        #[doc = "VAT applied to the insured replacement cost, in percent."]
        InsuranceVat = 8,

        #[doc = "Professional fees, in percent."]
        ProfFees = 9,

        #[doc = "Months of pre-tender escalation."]
        PreTenderEscalationAt = 10,

        #[doc = "Annual pre-tender escalation, in percent."]
        PreTenderEscalationPerc = 11,

        #[doc = "Months of post-tender escalation."]
        PostTenderEscalationAt = 12,

        #[doc = "Annual post-tender escalation, in percent."]
        PostTenderEscalationPerc = 13,
    }
}

impl Key {
    /// Indicates whether values of this [`Key`] are percentages, so must lie
    /// within `0..=100`.
    #[must_use]
    pub const fn is_percentage(self) -> bool {
        !matches!(
            self,
            Self::RecoveryFigure
                | Self::PreTenderEscalationAt
                | Self::PostTenderEscalationAt,
        )
    }
}

/// All the [`StoredValue`]s of a single [`Plot`], indexed by their [`Key`]s.
#[derive(Clone, Debug, Default)]
pub struct StoredValues(HashMap<Key, StoredValue>);

impl StoredValues {
    /// Returns the value of the provided [`Key`], along with whether it is
    /// actually stored.
    ///
    /// Missing values default to zero.
    #[must_use]
    pub fn get_or_default(&self, key: Key) -> (Decimal, bool) {
        self.0
            .get(&key)
            .map_or((Decimal::ZERO, false), |v| (v.value, true))
    }

    /// Returns the value of the provided [`Key`], defaulting to zero.
    #[must_use]
    pub fn value(&self, key: Key) -> Decimal {
        self.get_or_default(key).0
    }

    /// Returns the [`StoredValue`] of the provided [`Key`], if any.
    #[must_use]
    pub fn get(&self, key: Key) -> Option<&StoredValue> {
        self.0.get(&key)
    }

    /// Sets the provided [`StoredValue`], returning the replaced one, if any.
    pub fn set(&mut self, value: StoredValue) -> Option<StoredValue> {
        self.0.insert(value.key, value)
    }

    /// Iterates over all the stored [`StoredValue`]s.
    pub fn iter(&self) -> impl Iterator<Item = &StoredValue> {
        self.0.values()
    }
}

impl FromIterator<StoredValue> for StoredValues {
    fn from_iter<I: IntoIterator<Item = StoredValue>>(iter: I) -> Self {
        Self(iter.into_iter().map(|v| (v.key, v)).collect())
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn missing_values_default_to_zero() {
        let plot_id = plot::Id::new();
        let values = [StoredValue {
            id: Id::new(),
            plot_id,
            key: Key::VacancyPercentage,
            value: dec!(5),
        }]
        .into_iter()
        .collect::<StoredValues>();

        assert_eq!(
            values.get_or_default(Key::VacancyPercentage),
            (dec!(5), true),
        );
        assert_eq!(
            values.get_or_default(Key::CapitalisationRate),
            (Decimal::ZERO, false),
        );
        assert_eq!(values.value(Key::FsvAdjustment), Decimal::ZERO);
    }

    #[test]
    fn classifies_percentage_keys() {
        let figures = Key::ALL
            .iter()
            .copied()
            .filter(|k| !k.is_percentage())
            .collect::<Vec<_>>();

        assert_eq!(
            figures,
            [
                Key::RecoveryFigure,
                Key::PreTenderEscalationAt,
                Key::PostTenderEscalationAt,
            ],
        );
    }

    #[test]
    fn keys_roundtrip_through_u8() {
        for key in Key::ALL {
            assert_eq!(Key::from_u8(key.u8()), Some(*key));
        }
        assert_eq!(Key::from_u8(0), None);
    }
}
