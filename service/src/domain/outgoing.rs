//! [`Outgoing`] definitions.

use common::{define_kind, percent};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Plot;
use crate::domain::{audit, figure, plot};

/// Annual operating expense of a [`Plot`].
#[derive(Clone, Debug, PartialEq)]
pub struct Outgoing {
    /// ID of this [`Outgoing`].
    pub id: Id,

    /// ID of the [`Plot`] this [`Outgoing`] belongs to.
    pub plot_id: plot::Id,

    /// [`Identifier`] of this [`Outgoing`].
    pub identifier: Identifier,

    /// [`ItemType`] of this [`Outgoing`].
    pub item_type: ItemType,

    /// Number of units, as declared by the client.
    pub unit_per_client: Decimal,

    /// Rate per unit, as declared by the client.
    pub rate_per_client: Decimal,

    /// Number of units, as measured for the market valuation.
    pub unit_per_market: Decimal,

    /// Rate per unit on the market.
    pub rate_per_market: Decimal,
}

impl Outgoing {
    /// Creates a new [`Outgoing`] on the provided [`Plot`] out of the
    /// provided [`Draft`].
    #[must_use]
    pub fn new(plot_id: plot::Id, draft: Draft) -> Self {
        draft.apply(Id::new(), plot_id)
    }

    /// Returns the annual total of this [`Outgoing`] on the client side.
    #[must_use]
    pub fn total_per_client(&self) -> Decimal {
        self.item_type.total(self.unit_per_client, self.rate_per_client)
    }

    /// Returns the annual total of this [`Outgoing`] on the market side.
    #[must_use]
    pub fn total_per_market(&self) -> Decimal {
        self.item_type.total(self.unit_per_market, self.rate_per_market)
    }

    /// Returns the [`Derived`] kind of this [`Outgoing`], if it's a
    /// system-maintained one.
    #[must_use]
    pub fn derived(&self) -> Option<Derived> {
        Derived::of(&self.identifier)
    }
}

impl audit::Record for Outgoing {
    const DOMAIN: audit::Domain = audit::Domain::Outgoing;

    fn record_id(&self) -> Uuid {
        self.id.into()
    }

    fn snapshot(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "plot_id": self.plot_id,
            "identifier": self.identifier.as_str(),
            "item_type": self.item_type.as_str(),
            "unit_per_client": self.unit_per_client.to_string(),
            "rate_per_client": self.rate_per_client.to_string(),
            "unit_per_market": self.unit_per_market.to_string(),
            "rate_per_market": self.rate_per_market.to_string(),
        })
    }
}

/// Sorts the provided [`Outgoing`]s for display.
///
/// Rows go by [`ItemType`] (`12`, then `1`, then `%`), with the blank
/// [`Identifier`]s put last. The sort is stable.
pub fn sort_for_display(outgoings: &mut [Outgoing]) {
    outgoings
        .sort_by_key(|o| (o.identifier.is_blank(), o.item_type.priority()));
}

/// Editable fields of an [`Outgoing`].
#[derive(Clone, Debug, PartialEq)]
pub struct Draft {
    /// [`Identifier`] of the [`Outgoing`].
    pub identifier: Identifier,

    /// [`ItemType`] of the [`Outgoing`].
    pub item_type: ItemType,

    /// Number of units, as declared by the client.
    pub unit_per_client: Decimal,

    /// Rate per unit, as declared by the client.
    pub rate_per_client: Decimal,

    /// Number of units, as measured for the market valuation.
    pub unit_per_market: Decimal,

    /// Rate per unit on the market.
    pub rate_per_market: Decimal,
}

impl Draft {
    /// Indicates whether all the figures of this [`Draft`] are
    /// [valid](figure::is_valid).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [
            self.unit_per_client,
            self.rate_per_client,
            self.unit_per_market,
            self.rate_per_market,
        ]
        .into_iter()
        .all(figure::is_valid)
    }

    /// Materializes this [`Draft`] into an [`Outgoing`] with the provided
    /// IDs.
    #[must_use]
    pub fn apply(self, id: Id, plot_id: plot::Id) -> Outgoing {
        let Self {
            identifier,
            item_type,
            unit_per_client,
            rate_per_client,
            unit_per_market,
            rate_per_market,
        } = self;
        Outgoing {
            id,
            plot_id,
            identifier,
            item_type,
            unit_per_client,
            rate_per_client,
            unit_per_market,
            rate_per_market,
        }
    }
}

/// ID of an [`Outgoing`].
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

/// Free-form identifier of an [`Outgoing`].
///
/// May be blank for rows the user hasn't named yet.
#[derive(AsRef, Clone, Debug, Default, Display, Eq, From, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
#[from(forward)]
pub struct Identifier(String);

impl Identifier {
    /// Returns this [`Identifier`] as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Indicates whether this [`Identifier`] is blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

define_kind! {
    #[doc = "Type of an [`Outgoing`] row, defining how its total is \
             computed."]
    enum ItemType {
        #[doc = "Amount charged once a year."]
        #[serialize = "12"]
        Annual,

        #[doc = "Amount charged every month."]
        #[serialize = "1"]
        Monthly,

        #[doc = "Percentage of a base amount."]
        #[serialize = "%"]
        Percentage,
    }
}

impl ItemType {
    /// Returns the display order of this [`ItemType`].
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Annual => 0,
            Self::Monthly => 1,
            Self::Percentage => 2,
        }
    }

    /// Computes the total of a row of this [`ItemType`].
    #[must_use]
    pub fn total(self, unit: Decimal, rate: Decimal) -> Decimal {
        match self {
            Self::Annual | Self::Monthly => unit * rate,
            Self::Percentage => unit * percent::fraction(rate),
        }
    }
}

/// System-maintained [`Outgoing`] rows, kept in sync with the computed
/// figures of a [`Plot`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Derived {
    /// Management fee, computed out of the gross rental.
    ManagementFee,

    /// Maintenance and repairs, computed out of the insurance total.
    MaintenanceAndRepairs,

    /// Insurance, computed out of the insurance total.
    Insurance,
}

impl Derived {
    /// All the [`Derived`] rows, in their creation order.
    pub const ALL: [Self; 3] =
        [Self::ManagementFee, Self::MaintenanceAndRepairs, Self::Insurance];

    /// Returns the [`Identifier`] text of this [`Derived`] row.
    #[must_use]
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::ManagementFee => "Management Fee",
            Self::MaintenanceAndRepairs => "Maintenance and Repairs",
            Self::Insurance => "Insurance",
        }
    }

    /// Detects the [`Derived`] row the provided [`Identifier`] names.
    #[must_use]
    pub fn of(identifier: &Identifier) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.identifier() == identifier.as_str())
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal_macros::dec;

    use super::*;

    fn outgoing(identifier: &str, item_type: ItemType) -> Outgoing {
        Outgoing::new(
            plot::Id::new(),
            Draft {
                identifier: identifier.into(),
                item_type,
                unit_per_client: dec!(100),
                rate_per_client: dec!(20),
                unit_per_market: dec!(3),
                rate_per_market: dec!(4),
            },
        )
    }

    #[test]
    fn percentage_row_takes_fraction_of_rate() {
        let o = outgoing("Levy", ItemType::Percentage);

        assert_eq!(o.total_per_client(), dec!(20));
        assert_eq!(o.total_per_market(), dec!(0.12));
    }

    #[test]
    fn plain_rows_multiply_unit_by_rate() {
        for ty in [ItemType::Annual, ItemType::Monthly] {
            let o = outgoing("Rates", ty);

            assert_eq!(o.total_per_client(), dec!(2000));
            assert_eq!(o.total_per_market(), dec!(12));
        }
    }

    #[test]
    fn item_type_uses_short_codes() {
        assert_eq!(ItemType::Annual.as_str(), "12");
        assert_eq!(ItemType::Monthly.to_string(), "1");
        assert_eq!("%".parse::<ItemType>(), Ok(ItemType::Percentage));
        assert!("weekly".parse::<ItemType>().is_err());
    }

    #[test]
    fn sorts_by_item_type_with_blanks_last() {
        let rows = vec![
            outgoing("", ItemType::Annual),
            outgoing("Levy", ItemType::Percentage),
            outgoing("Water", ItemType::Monthly),
            outgoing("  ", ItemType::Monthly),
            outgoing("Rates", ItemType::Annual),
            outgoing("Security", ItemType::Monthly),
        ];
        let reversed = rows.iter().rev().cloned().collect::<Vec<_>>();

        for base in [rows, reversed] {
            for shift in 0..base.len() {
                let mut input = base.clone();
                input.rotate_left(shift);
                let mut sorted = input.clone();

                sort_for_display(&mut sorted);

                let keys = sorted
                    .iter()
                    .map(|o| (o.identifier.is_blank(), o.item_type.priority()))
                    .collect::<Vec<_>>();
                assert!(keys.is_sorted(), "unsorted for shift {shift}");
                assert!(
                    sorted[..4].iter().all(|o| !o.identifier.is_blank()),
                    "blank row before named ones for shift {shift}",
                );

                let position = |rows: &[Outgoing], name: &str| {
                    rows.iter().position(|o| o.identifier.as_str() == name)
                };
                assert_eq!(
                    position(&input, "Water") < position(&input, "Security"),
                    position(&sorted, "Water") < position(&sorted, "Security"),
                    "unstable for shift {shift}",
                );
            }
        }
    }

    #[test]
    fn detects_derived_rows() {
        assert_eq!(
            outgoing("Management Fee", ItemType::Percentage).derived(),
            Some(Derived::ManagementFee),
        );
        assert_eq!(
            outgoing("Insurance", ItemType::Annual).derived(),
            Some(Derived::Insurance),
        );
        assert_eq!(outgoing("insurance", ItemType::Annual).derived(), None);
    }
}
