//! [`Tenant`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{plot, PropertyType};
#[cfg(doc)]
use crate::domain::Plot;

/// Occupier of a lettable space on a [`Plot`].
#[derive(Clone, Debug)]
pub struct Tenant {
    /// ID of this [`Tenant`].
    pub id: Id,

    /// ID of the [`Plot`] this [`Tenant`] occupies.
    pub plot_id: plot::Id,

    /// [`Name`] of this [`Tenant`].
    pub name: Name,

    /// Area let to this [`Tenant`], as declared by the client.
    pub area_per_client: Decimal,

    /// Area let to this [`Tenant`], as measured for the market valuation.
    pub area_per_market: Decimal,

    /// Rental rate per area unit, as declared by the client.
    pub rate_per_client: Decimal,

    /// Rental rate per area unit on the market.
    pub rate_per_market: Decimal,

    /// Gross monthly rental entered on the lease.
    ///
    /// May be stale, so it's never used in the valuation totals.
    pub gross_monthly_rental: Decimal,

    /// [`PropertyType`] of the let space.
    pub property_type: PropertyType,

    /// [`DateTime`] when the lease starts.
    pub start_date: StartDateTime,

    /// [`DateTime`] when the lease ends.
    pub end_date: EndDateTime,
}

impl Tenant {
    /// Returns the monthly gross income of this [`Tenant`].
    #[must_use]
    pub fn gross_income(&self) -> Decimal {
        self.area_per_client * self.rate_per_market
    }
}

/// ID of a [`Tenant`].
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

/// Name of a [`Tenant`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
#[from(forward)]
pub struct Name(String);

/// [`DateTime`] when a [`Tenant`] lease starts.
pub type StartDateTime = DateTimeOf<(Tenant, unit::Start)>;

/// [`DateTime`] when a [`Tenant`] lease ends.
pub type EndDateTime = DateTimeOf<(Tenant, unit::End)>;
