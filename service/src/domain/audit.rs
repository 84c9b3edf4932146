//! Audit [`Event`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::user;
#[cfg(doc)]
use crate::domain::User;

/// Record of a single mutation performed upon a valuation record.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// ID of this [`Event`].
    pub id: Id,

    /// ID of the [`User`] who performed the mutation.
    pub user_id: user::Id,

    /// [`Domain`] of the mutated record.
    pub domain: Domain,

    /// [`Action`] performed upon the record.
    pub action: Action,

    /// ID of the mutated record.
    pub record_id: Uuid,

    /// Snapshots of the record taken before and/or after the mutation.
    pub record_data: serde_json::Value,

    /// [`DateTime`] when this [`Event`] happened.
    pub created_at: CreationDateTime,
}

impl Event {
    /// Creates a new [`Event`] of the provided [`Record`] creation.
    #[must_use]
    pub fn created<R: Record>(user_id: user::Id, after: &R) -> Self {
        Self::new(
            user_id,
            R::DOMAIN,
            Action::Create,
            after.record_id(),
            json!({ "after": after.snapshot() }),
        )
    }

    /// Creates a new [`Event`] of the provided [`Record`] update.
    #[must_use]
    pub fn updated<R: Record>(
        user_id: user::Id,
        before: &R,
        after: &R,
    ) -> Self {
        Self::new(
            user_id,
            R::DOMAIN,
            Action::Update,
            after.record_id(),
            json!({ "before": before.snapshot(), "after": after.snapshot() }),
        )
    }

    /// Creates a new [`Event`] of the provided [`Record`] deletion.
    #[must_use]
    pub fn deleted<R: Record>(user_id: user::Id, before: &R) -> Self {
        Self::new(
            user_id,
            R::DOMAIN,
            Action::Delete,
            before.record_id(),
            json!({ "before": before.snapshot() }),
        )
    }

    /// Creates a new [`Event`] happening right now.
    fn new(
        user_id: user::Id,
        domain: Domain,
        action: Action,
        record_id: Uuid,
        record_data: serde_json::Value,
    ) -> Self {
        Self {
            id: Id::new(),
            user_id,
            domain,
            action,
            record_id,
            record_data,
            created_at: CreationDateTime::now(),
        }
    }
}

/// Audited record.
pub trait Record {
    /// [`Domain`] of this [`Record`].
    const DOMAIN: Domain;

    /// Returns the ID of this [`Record`].
    fn record_id(&self) -> Uuid;

    /// Takes a JSON snapshot of this [`Record`].
    fn snapshot(&self) -> serde_json::Value;
}

/// ID of an [`Event`].
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
    #[doc = "Domain of an audited record."]
    enum Domain {
        #[doc = "A parking record."]
        Parking = 1,

        #[doc = "An outgoing record."]
        Outgoing = 2,

        #[doc = "A stored value."]
        StoredValue = 3,
    }
}

define_kind! {
    #[doc = "Action performed upon an audited record."]
    enum Action {
        #[doc = "The record was created."]
        Create = 1,

        #[doc = "The record was updated."]
        Update = 2,

        #[doc = "The record was deleted."]
        Delete = 3,
    }
}

/// [`DateTime`] when an [`Event`] happened.
pub type CreationDateTime = DateTimeOf<(Event, unit::Creation)>;
