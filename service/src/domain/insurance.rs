//! [`Insurance`] definitions.

use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Plot;
use crate::domain::plot;

/// Replacement cost line of a [`Plot`] building.
#[derive(Clone, Debug, PartialEq)]
pub struct Insurance {
    /// ID of this [`Insurance`].
    pub id: Id,

    /// ID of the [`Plot`] this [`Insurance`] belongs to.
    pub plot_id: plot::Id,

    /// [`Item`] being insured.
    pub item: Item,

    /// Construction rate per area unit.
    pub rate: Decimal,

    /// Built area of the [`Item`].
    pub area: Decimal,
}

impl Insurance {
    /// Returns the replacement cost of this [`Insurance`] line.
    #[must_use]
    pub fn cost(&self) -> Decimal {
        self.rate * self.area
    }
}

/// ID of an [`Insurance`].
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

/// Name of an insured item.
#[derive(AsRef, Clone, Debug, Display, Eq, From, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
#[from(forward)]
pub struct Item(String);
