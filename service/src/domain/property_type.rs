//! [`PropertyType`] definitions.

use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Asset type a lettable space is classified with (e.g. retail or office).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PropertyType {
    /// ID of this [`PropertyType`].
    pub id: Id,

    /// [`Identifier`] of this [`PropertyType`].
    pub identifier: Identifier,
}

/// ID of a [`PropertyType`].
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

/// Human-readable identifier of a [`PropertyType`], unique among all of them.
#[derive(AsRef, Clone, Debug, Display, Eq, From, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
#[from(forward)]
pub struct Identifier(String);
