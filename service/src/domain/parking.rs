//! [`Parking`] definitions.

use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Plot;
use crate::domain::{audit, figure, plot};

/// Parking bays let on a [`Plot`].
#[derive(Clone, Debug, PartialEq)]
pub struct Parking {
    /// ID of this [`Parking`].
    pub id: Id,

    /// ID of the [`Plot`] this [`Parking`] belongs to.
    pub plot_id: plot::Id,

    /// ID of the parking type (covered, open, basement, etc.).
    pub parking_type_id: TypeId,

    /// Number of bays, as declared by the client.
    pub unit_per_client: Decimal,

    /// Monthly rate per bay, as declared by the client.
    pub rate_per_client: Decimal,

    /// Number of bays, as measured for the market valuation.
    pub unit_per_market: Decimal,

    /// Monthly rate per bay on the market.
    pub rate_per_market: Decimal,
}

impl Parking {
    /// Creates a new [`Parking`] on the provided [`Plot`] out of the provided
    /// [`Draft`].
    #[must_use]
    pub fn new(plot_id: plot::Id, draft: Draft) -> Self {
        draft.apply(Id::new(), plot_id)
    }

    /// Returns the monthly income of this [`Parking`].
    #[must_use]
    pub fn income(&self) -> Decimal {
        self.unit_per_client * self.rate_per_client
    }
}

impl audit::Record for Parking {
    const DOMAIN: audit::Domain = audit::Domain::Parking;

    fn record_id(&self) -> Uuid {
        self.id.into()
    }

    fn snapshot(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "plot_id": self.plot_id,
            "parking_type_id": self.parking_type_id,
            "unit_per_client": self.unit_per_client.to_string(),
            "rate_per_client": self.rate_per_client.to_string(),
            "unit_per_market": self.unit_per_market.to_string(),
            "rate_per_market": self.rate_per_market.to_string(),
        })
    }
}

/// Editable fields of a [`Parking`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Draft {
    /// ID of the parking type.
    pub parking_type_id: TypeId,

    /// Number of bays, as declared by the client.
    pub unit_per_client: Decimal,

    /// Monthly rate per bay, as declared by the client.
    pub rate_per_client: Decimal,

    /// Number of bays, as measured for the market valuation.
    pub unit_per_market: Decimal,

    /// Monthly rate per bay on the market.
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

    /// Materializes this [`Draft`] into a [`Parking`] with the provided IDs.
    #[must_use]
    pub fn apply(self, id: Id, plot_id: plot::Id) -> Parking {
        let Self {
            parking_type_id,
            unit_per_client,
            rate_per_client,
            unit_per_market,
            rate_per_market,
        } = self;
        Parking {
            id,
            plot_id,
            parking_type_id,
            unit_per_client,
            rate_per_client,
            unit_per_market,
            rate_per_market,
        }
    }
}

/// ID of a [`Parking`].
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

/// ID of a parking type.
#[derive(
    Clone,
    Copy,
    Debug,
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
pub struct TypeId(i32);
