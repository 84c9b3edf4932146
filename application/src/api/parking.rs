//! [`Parking`]-related definitions.

use derive_more::{Display, From, Into};
use juniper::{GraphQLInputObject, GraphQLObject, GraphQLScalar};
use service::{command::update_income_and_outgoings, domain};
use uuid::Uuid;

use crate::{api::scalar::Decimal, Context};

/// Parking income row of a `Plot`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct Parking {
    /// Unique identifier of this `Parking` row.
    pub id: Id,

    /// Type of the parking bays.
    pub parking_type_id: TypeId,

    /// Number of bays as declared by the client.
    pub unit_per_client: Decimal,

    /// Rate per bay as declared by the client.
    pub rate_per_client: Decimal,

    /// Number of bays as assessed against the market.
    pub unit_per_market: Decimal,

    /// Rate per bay as assessed against the market.
    pub rate_per_market: Decimal,

    /// Monthly income of this row, being the client bays at the client rate.
    pub income: Decimal,
}

impl From<&domain::Parking> for Parking {
    fn from(parking: &domain::Parking) -> Self {
        Self {
            id: parking.id.into(),
            parking_type_id: parking.parking_type_id.into(),
            unit_per_client: parking.unit_per_client.into(),
            rate_per_client: parking.rate_per_client.into(),
            unit_per_market: parking.unit_per_market.into(),
            rate_per_market: parking.rate_per_market.into(),
            income: parking.income().into(),
        }
    }
}

/// Unique identifier of a `Parking` row.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::parking::Id)]
#[into(domain::parking::Id)]
#[graphql(name = "ParkingId", transparent)]
pub struct Id(Uuid);

/// Identifier of a parking bay type.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::parking::TypeId)]
#[into(domain::parking::TypeId)]
#[graphql(name = "ParkingTypeId", transparent)]
pub struct TypeId(i32);

/// Editable fields of a `Parking` row.
#[derive(Clone, Copy, Debug, GraphQLInputObject)]
#[graphql(name = "ParkingDraft")]
pub struct Draft {
    /// Type of the parking bays.
    pub parking_type_id: TypeId,

    /// Number of bays as declared by the client.
    pub unit_per_client: Decimal,

    /// Rate per bay as declared by the client.
    pub rate_per_client: Decimal,

    /// Number of bays as assessed against the market.
    pub unit_per_market: Decimal,

    /// Rate per bay as assessed against the market.
    pub rate_per_market: Decimal,
}

impl From<Draft> for domain::parking::Draft {
    fn from(draft: Draft) -> Self {
        let Draft {
            parking_type_id,
            unit_per_client,
            rate_per_client,
            unit_per_market,
            rate_per_market,
        } = draft;
        Self {
            parking_type_id: parking_type_id.into(),
            unit_per_client: unit_per_client.into(),
            rate_per_client: rate_per_client.into(),
            unit_per_market: unit_per_market.into(),
            rate_per_market: rate_per_market.into(),
        }
    }
}

/// New fields of an existing `Parking` row.
#[derive(Clone, Copy, Debug, GraphQLInputObject)]
#[graphql(name = "ParkingUpdate")]
pub struct Update {
    /// ID of the `Parking` row to update.
    pub id: Id,

    /// New fields of the row.
    pub draft: Draft,
}

/// Changes of the `Parking` rows submitted at once.
#[derive(Clone, Debug, Default, GraphQLInputObject)]
#[graphql(name = "ParkingChanges")]
pub struct Changes {
    /// Rows to create.
    #[graphql(default)]
    pub created: Vec<Draft>,

    /// Rows to update.
    #[graphql(default)]
    pub updated: Vec<Update>,

    /// IDs of the rows to delete.
    #[graphql(default)]
    pub deleted: Vec<Id>,
}

impl From<Changes>
    for update_income_and_outgoings::Changes<
        domain::parking::Id,
        domain::parking::Draft,
    >
{
    fn from(changes: Changes) -> Self {
        let Changes {
            created,
            updated,
            deleted,
        } = changes;
        Self {
            created: created.into_iter().map(Into::into).collect(),
            updated: updated
                .into_iter()
                .map(|Update { id, draft }| (id.into(), draft.into()))
                .collect(),
            deleted: deleted.into_iter().map(Into::into).collect(),
        }
    }
}
