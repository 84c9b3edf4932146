//! [`Plot`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLObject, GraphQLScalar};
use service::{
    domain::{self, outgoing::sort_for_display, stored_value::Key},
    read,
};
use uuid::Uuid;

use crate::{
    api::{self, scalar, scalar::Decimal},
    Context,
};

/// A valued property with all the records it's valued out of.
#[derive(Clone, Debug)]
pub struct Plot(read::plot::Graph);

impl From<read::plot::Graph> for Plot {
    fn from(mut graph: read::plot::Graph) -> Self {
        sort_for_display(&mut graph.outgoings);
        Self(graph)
    }
}

/// A valued property with all the records it's valued out of.
#[graphql_object(context = Context)]
impl Plot {
    /// Unique identifier of this `Plot`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Plot.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.plot.id.into()
    }

    /// Name of this `Plot`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Plot.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn name(&self) -> Name {
        self.0.plot.name.clone().into()
    }

    /// Area of the portion of this `Plot` which is not developed yet.
    pub fn undeveloped_portion(&self) -> Decimal {
        self.0.plot.undeveloped_portion.into()
    }

    /// Rate per area unit the undeveloped portion is valued with.
    pub fn rate_for_undeveloped_portion(&self) -> Decimal {
        self.0.plot.rate_for_undeveloped_portion.into()
    }

    /// `DateTime` when this `Plot` was created.
    pub fn created_at(&self) -> DateTime {
        self.0.plot.created_at.coerce()
    }

    /// `Tenant`s of this `Plot`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Plot.tenants",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn tenants(&self) -> Vec<Tenant> {
        self.0.tenants.iter().map(Into::into).collect()
    }

    /// `Parking` income rows of this `Plot`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Plot.parking",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn parking(&self) -> Vec<api::Parking> {
        self.0.parking.iter().map(Into::into).collect()
    }

    /// `Outgoing` rows of this `Plot`.
    ///
    /// Named rows go first, ordered by their type: annual, then monthly, then
    /// percentage ones.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Plot.outgoings",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn outgoings(&self) -> Vec<api::Outgoing> {
        self.0.outgoings.iter().map(Into::into).collect()
    }

    /// `Insurance` lines of this `Plot`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Plot.insurances",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn insurances(&self) -> Vec<Insurance> {
        self.0.insurances.iter().map(Into::into).collect()
    }

    /// Adjustment figures of this `Plot`, one per `StoredValueKey`.
    ///
    /// Missing figures are reported as zero.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Plot.storedValues",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn stored_values(&self) -> Vec<api::StoredValue> {
        Key::ALL
            .iter()
            .map(|&key| {
                let (value, is_stored) =
                    self.0.stored_values.get_or_default(key);
                api::StoredValue {
                    key: key.into(),
                    value: value.into(),
                    is_stored,
                }
            })
            .collect()
    }
}

/// Unique identifier of a `Plot`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::plot::Id)]
#[into(domain::plot::Id)]
#[graphql(name = "PlotId", transparent)]
pub struct Id(Uuid);

/// Name of a `Plot`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PlotName",
    with = scalar::Via::<domain::plot::Name>,
)]
pub struct Name(domain::plot::Name);

/// Lettable space of a `Plot`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct Tenant {
    /// Unique identifier of this `Tenant`.
    pub id: Uuid,

    /// Name of this `Tenant`.
    pub name: String,

    /// Asset type of the space, e.g. `Retail` or `Office`.
    pub property_type: String,

    /// Area as declared by the client.
    pub area_per_client: Decimal,

    /// Area as assessed against the market.
    pub area_per_market: Decimal,

    /// Rate per area unit as declared by the client.
    pub rate_per_client: Decimal,

    /// Rate per area unit as assessed against the market.
    pub rate_per_market: Decimal,

    /// Gross monthly rental as declared by the client.
    pub gross_monthly_rental: Decimal,

    /// Monthly gross income of this `Tenant`, valued as the client area at
    /// the market rate.
    pub gross_income: Decimal,

    /// `DateTime` when the lease starts.
    pub start_date: DateTime,

    /// `DateTime` when the lease ends.
    pub end_date: DateTime,
}

impl From<&domain::Tenant> for Tenant {
    fn from(tenant: &domain::Tenant) -> Self {
        Self {
            id: tenant.id.into(),
            name: tenant.name.to_string(),
            property_type: tenant.property_type.identifier.to_string(),
            area_per_client: tenant.area_per_client.into(),
            area_per_market: tenant.area_per_market.into(),
            rate_per_client: tenant.rate_per_client.into(),
            rate_per_market: tenant.rate_per_market.into(),
            gross_monthly_rental: tenant.gross_monthly_rental.into(),
            gross_income: tenant.gross_income().into(),
            start_date: tenant.start_date.coerce(),
            end_date: tenant.end_date.coerce(),
        }
    }
}

/// Insured building item of a `Plot`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct Insurance {
    /// Unique identifier of this `Insurance` line.
    pub id: Uuid,

    /// Insured item.
    pub item: String,

    /// Replacement rate per area unit.
    pub rate: Decimal,

    /// Insured area.
    pub area: Decimal,

    /// Replacement cost of this line, being its area at its rate.
    pub cost: Decimal,
}

impl From<&domain::Insurance> for Insurance {
    fn from(line: &domain::Insurance) -> Self {
        Self {
            id: line.id.into(),
            item: line.item.to_string(),
            rate: line.rate.into(),
            area: line.area.into(),
            cost: line.cost().into(),
        }
    }
}
