//! [`Valuation`]-related definitions.

use common::Money;
use derive_more::From;
use juniper::{graphql_object, GraphQLObject};
use service::{domain::valuation, read};

use crate::{api, api::scalar::Decimal, AsError, Context, Error};

/// Valuation of a `Plot`, computed out of its current records.
#[derive(Clone, Debug, From)]
pub struct Valuation(read::plot::Valuated);

/// Valuation of a `Plot`, computed out of its current records.
#[graphql_object(context = Context)]
impl Valuation {
    /// Valued `Plot`, with its derived `Outgoing` rows reconciled with the
    /// computed figures.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Valuation.plot",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn plot(&self) -> api::Plot {
        self.0.graph.clone().into()
    }

    /// Rental income of all the `Tenant`s.
    pub fn total_rental_income(&self) -> Income {
        self.0.valuation.total_rental_income.into()
    }

    /// Monthly income of all the `Parking` rows.
    pub fn total_parking_income(&self) -> Money {
        self.0.valuation.total_parking_income
    }

    /// Rental income along with the parking one.
    pub fn gross_rental(&self) -> Income {
        self.0.valuation.gross_rental.into()
    }

    /// Let area of all the `Tenant`s.
    pub fn total_area(&self) -> Area {
        self.0.valuation.total_area.into()
    }

    /// Gross replacement cost of the building.
    pub fn replacement_cost(&self) -> ReplacementCost {
        self.0.valuation.replacement_cost.into()
    }

    /// Annual management fee.
    pub fn management_fee(&self) -> Money {
        self.0.valuation.management_fee
    }

    /// Annual outgoings of the `Plot`.
    pub fn annual_outgoings(&self) -> Outgoings {
        self.0.valuation.annual_outgoings.into()
    }

    /// Annual outgoings per let area unit per month.
    pub fn monthly_outgoings(&self) -> Outgoings {
        self.0.valuation.monthly_outgoings.into()
    }

    /// Annual income lost to vacancies.
    pub fn vacancies(&self) -> Money {
        self.0.valuation.vacancies
    }

    /// Annual outgoings recovered from the `Tenant`s.
    pub fn recoveries(&self) -> Money {
        self.0.valuation.recoveries
    }

    /// Net annual rental income.
    pub fn net_annual_rental_income(&self) -> Money {
        self.0.valuation.net_annual_rental_income
    }

    /// Net annual rental income capitalised at the capitalisation rate.
    pub fn capitalised_value(&self) -> Money {
        self.0.valuation.capitalised_value
    }

    /// Capitalised value per let area unit, rounded to a whole number.
    pub fn capitalised_figure(&self) -> Decimal {
        self.0.valuation.capitalised_figure.into()
    }

    /// Value of the undeveloped portion of the `Plot`.
    pub fn value_of_undeveloped_portion(&self) -> Money {
        self.0.valuation.value_of_undeveloped_portion
    }

    /// Market value of the `Plot`.
    pub fn market_value(&self) -> Money {
        self.0.valuation.market_value
    }

    /// Forced sale value of the `Plot`.
    pub fn forced_sale_value(&self) -> Money {
        self.0.valuation.forced_sale_value
    }

    /// Annual outgoings as a percentage of the gross annual rental, rounded
    /// to two decimal places.
    pub fn outgoings_to_income_ratio(&self) -> Decimal {
        self.0.valuation.outgoings_to_income_ratio.into()
    }

    /// `Tenant`s summed up per asset type, in order of their first
    /// appearance.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Valuation.groupedAssetTypes",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn grouped_asset_types(
        &self,
        ctx: &Context,
    ) -> Result<Vec<AssetTypeGroup>, Error> {
        self.0
            .valuation
            .grouped_asset_types
            .iter()
            .map(AssetTypeGroup::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }
}

/// Monthly income along with its annual counterpart.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(context = Context, name = "ValuationIncome")]
pub struct Income {
    /// Income per month.
    pub monthly: Money,

    /// Income per year, being twelve monthly ones.
    pub annual: Money,
}

impl From<valuation::Income> for Income {
    fn from(income: valuation::Income) -> Self {
        let valuation::Income { monthly, annual } = income;
        Self { monthly, annual }
    }
}

/// Let area as declared by the client and as assessed against the market.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(context = Context, name = "ValuationArea")]
pub struct Area {
    /// Area as declared by the client.
    pub client: Decimal,

    /// Area as assessed against the market.
    pub market: Decimal,
}

impl From<valuation::Sides<rust_decimal::Decimal>> for Area {
    fn from(area: valuation::Sides<rust_decimal::Decimal>) -> Self {
        Self {
            client: area.client.into(),
            market: area.market.into(),
        }
    }
}

/// Outgoings as declared by the client and as assessed against the market.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(context = Context, name = "ValuationOutgoings")]
pub struct Outgoings {
    /// Outgoings as declared by the client.
    pub client: Money,

    /// Outgoings as assessed against the market.
    pub market: Money,
}

impl From<valuation::Sides<Money>> for Outgoings {
    fn from(outgoings: valuation::Sides<Money>) -> Self {
        let valuation::Sides { client, market } = outgoings;
        Self { client, market }
    }
}

/// Breakdown of the gross replacement cost of a building.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct ReplacementCost {
    /// Sum of all the `Insurance` lines.
    pub sub_total: Money,

    /// VAT upon the sub-total.
    pub vat: Money,

    /// Common property share.
    pub com_property: Money,

    /// Professional fees.
    pub prof_fees: Money,

    /// Replacement cost before escalations.
    pub replacement_cost: Money,

    /// Escalation until the tender.
    pub pre_tender_escalation: Money,

    /// Escalation after the tender.
    pub post_tender_escalation: Money,

    /// Insured total, rounded to a single decimal place.
    pub total: Decimal,
}

impl From<valuation::ReplacementCost> for ReplacementCost {
    fn from(cost: valuation::ReplacementCost) -> Self {
        let valuation::ReplacementCost {
            sub_total,
            vat,
            com_property,
            prof_fees,
            replacement_cost,
            pre_tender_escalation,
            post_tender_escalation,
            total,
        } = cost;
        Self {
            sub_total,
            vat,
            com_property,
            prof_fees,
            replacement_cost,
            pre_tender_escalation,
            post_tender_escalation,
            total: total.into(),
        }
    }
}

/// `Tenant`s of a single asset type summed up.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct AssetTypeGroup {
    /// Asset type of this group.
    pub property_type: String,

    /// Let area of this group.
    pub area: Decimal,

    /// Monthly gross income of this group.
    pub gross_income: Money,

    /// Number of `Tenant`s in this group.
    pub count: i32,

    /// Gross income per let area unit.
    pub blended_rate: Money,

    /// Share of the total let area, as a fraction of one.
    pub gla_percent: Decimal,
}

impl TryFrom<&valuation::AssetTypeGroup> for AssetTypeGroup {
    type Error = std::num::TryFromIntError;

    fn try_from(
        group: &valuation::AssetTypeGroup,
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            property_type: group.property_type.to_string(),
            area: group.area.into(),
            gross_income: group.gross_income,
            count: group.count.try_into()?,
            blended_rate: group.blended_rate,
            gla_percent: group.gla_percent.into(),
        })
    }
}
