//! [`Plot`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Valued property, the aggregate root of all the valuation records.
#[derive(Clone, Debug)]
pub struct Plot {
    /// ID of this [`Plot`].
    pub id: Id,

    /// [`Name`] of this [`Plot`].
    pub name: Name,

    /// Area of the portion of this [`Plot`] which is not developed yet.
    pub undeveloped_portion: Decimal,

    /// Rate per area unit the undeveloped portion of this [`Plot`] is valued
    /// with.
    pub rate_for_undeveloped_portion: Decimal,

    /// [`DateTime`] when this [`Plot`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Plot`].
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

/// Name of a [`Plot`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// [`DateTime`] when a [`Plot`] was created.
pub type CreationDateTime = DateTimeOf<(Plot, unit::Creation)>;
