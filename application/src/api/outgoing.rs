//! [`Outgoing`]-related definitions.

use derive_more::{Display, From, Into};
use juniper::{GraphQLEnum, GraphQLInputObject, GraphQLObject, GraphQLScalar};
use service::{command::update_income_and_outgoings, domain};
use uuid::Uuid;

use crate::{api::scalar::Decimal, Context};

/// Outgoing (expense) row of a `Plot`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct Outgoing {
    /// Unique identifier of this `Outgoing` row.
    pub id: Id,

    /// Free-form name of this row, blank if not named yet.
    pub identifier: String,

    /// Type of this row, defining how its totals are computed.
    pub item_type: ItemType,

    /// Units as declared by the client.
    pub unit_per_client: Decimal,

    /// Rate as declared by the client.
    pub rate_per_client: Decimal,

    /// Units as assessed against the market.
    pub unit_per_market: Decimal,

    /// Rate as assessed against the market.
    pub rate_per_market: Decimal,

    /// Annual total as declared by the client.
    pub total_per_client: Decimal,

    /// Annual total as assessed against the market.
    pub total_per_market: Decimal,

    /// Indicator whether this row is maintained by the system out of the
    /// computed figures.
    pub is_derived: bool,
}

impl From<&domain::Outgoing> for Outgoing {
    fn from(outgoing: &domain::Outgoing) -> Self {
        Self {
            id: outgoing.id.into(),
            identifier: outgoing.identifier.to_string(),
            item_type: outgoing.item_type.into(),
            unit_per_client: outgoing.unit_per_client.into(),
            rate_per_client: outgoing.rate_per_client.into(),
            unit_per_market: outgoing.unit_per_market.into(),
            rate_per_market: outgoing.rate_per_market.into(),
            total_per_client: outgoing.total_per_client().into(),
            total_per_market: outgoing.total_per_market().into(),
            is_derived: outgoing.derived().is_some(),
        }
    }
}

/// Unique identifier of an `Outgoing` row.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::outgoing::Id)]
#[into(domain::outgoing::Id)]
#[graphql(name = "OutgoingId", transparent)]
pub struct Id(Uuid);

/// Type of an `Outgoing` row.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "OutgoingItemType")]
pub enum ItemType {
    /// Amount charged once a year.
    Annual,

    /// Amount charged every month, so counted twelve times a year.
    Monthly,

    /// Percentage of the units, with the rate being the percentage.
    Percentage,
}

impl From<domain::outgoing::ItemType> for ItemType {
    fn from(item_type: domain::outgoing::ItemType) -> Self {
        use domain::outgoing::ItemType as T;
        match item_type {
            T::Annual => Self::Annual,
            T::Monthly => Self::Monthly,
            T::Percentage => Self::Percentage,
        }
    }
}

impl From<ItemType> for domain::outgoing::ItemType {
    fn from(item_type: ItemType) -> Self {
        match item_type {
            ItemType::Annual => Self::Annual,
            ItemType::Monthly => Self::Monthly,
            ItemType::Percentage => Self::Percentage,
        }
    }
}

/// Editable fields of an `Outgoing` row.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "OutgoingDraft")]
pub struct Draft {
    /// Free-form name of the row.
    #[graphql(default)]
    pub identifier: String,

    /// Type of the row.
    pub item_type: ItemType,

    /// Units as declared by the client.
    pub unit_per_client: Decimal,

    /// Rate as declared by the client.
    pub rate_per_client: Decimal,

    /// Units as assessed against the market.
    pub unit_per_market: Decimal,

    /// Rate as assessed against the market.
    pub rate_per_market: Decimal,
}

impl From<Draft> for domain::outgoing::Draft {
    fn from(draft: Draft) -> Self {
        let Draft {
            identifier,
            item_type,
            unit_per_client,
            rate_per_client,
            unit_per_market,
            rate_per_market,
        } = draft;
        Self {
            identifier: identifier.into(),
            item_type: item_type.into(),
            unit_per_client: unit_per_client.into(),
            rate_per_client: rate_per_client.into(),
            unit_per_market: unit_per_market.into(),
            rate_per_market: rate_per_market.into(),
        }
    }
}

/// New fields of an existing `Outgoing` row.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "OutgoingUpdate")]
pub struct Update {
    /// ID of the `Outgoing` row to update.
    pub id: Id,

    /// New fields of the row.
    pub draft: Draft,
}

/// Changes of the `Outgoing` rows submitted at once.
#[derive(Clone, Debug, Default, GraphQLInputObject)]
#[graphql(name = "OutgoingChanges")]
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
        domain::outgoing::Id,
        domain::outgoing::Draft,
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

#[cfg(test)]
mod spec {
    use rust_decimal_macros::dec;
    use service::domain::outgoing::Derived;

    use super::*;

    fn draft(identifier: &str, item_type: ItemType) -> Draft {
        Draft {
            identifier: identifier.to_owned(),
            item_type,
            unit_per_client: dec!(100).into(),
            rate_per_client: dec!(20).into(),
            unit_per_market: dec!(100).into(),
            rate_per_market: dec!(20).into(),
        }
    }

    #[test]
    fn converts_item_types_both_ways() {
        for item_type in
            [ItemType::Annual, ItemType::Monthly, ItemType::Percentage]
        {
            let converted: domain::outgoing::ItemType = item_type.into();

            assert_eq!(ItemType::from(converted), item_type);
        }
        assert_eq!(
            domain::outgoing::ItemType::from(ItemType::Percentage).as_str(),
            "%",
        );
    }

    #[test]
    fn outputs_computed_totals() {
        let plot_id = domain::plot::Id::new();
        let row = domain::Outgoing::new(
            plot_id,
            draft("Cleaning", ItemType::Percentage).into(),
        );

        let out = Outgoing::from(&row);

        assert_eq!(out.total_per_client, dec!(20).into());
        assert_eq!(out.total_per_market, dec!(20).into());
        assert!(!out.is_derived);
    }

    #[test]
    fn flags_derived_rows() {
        let plot_id = domain::plot::Id::new();
        let row = domain::Outgoing::new(
            plot_id,
            draft(Derived::Insurance.identifier(), ItemType::Percentage)
                .into(),
        );

        assert!(Outgoing::from(&row).is_derived);
    }

    #[test]
    fn splits_changes() {
        let id = domain::outgoing::Id::new();
        let changes = Changes {
            created: vec![draft("Rates", ItemType::Annual)],
            updated: vec![Update {
                id: id.into(),
                draft: draft("Water", ItemType::Monthly),
            }],
            deleted: vec![id.into()],
        };

        let changes: update_income_and_outgoings::Changes<
            domain::outgoing::Id,
            domain::outgoing::Draft,
        > = changes.into();

        assert_eq!(changes.created.len(), 1);
        assert_eq!(changes.created[0].identifier.as_str(), "Rates");
        assert_eq!(changes.updated[0].0, id);
        assert_eq!(
            changes.updated[0].1.item_type,
            domain::outgoing::ItemType::Monthly,
        );
        assert_eq!(changes.deleted, vec![id]);
    }
}
