//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{query, Query as _};

use crate::{api, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the `Plot` with the specified ID, along with its records as
    /// they are stored.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PLOT_NOT_EXISTS` - the `Plot` with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "plot",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn plot(
        id: api::plot::Id,
        ctx: &Context,
    ) -> Result<api::Plot, Error> {
        ctx.service()
            .execute(query::plot::Graph::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| api::PlotError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Computes the `Valuation` of the `Plot` with the specified ID.
    ///
    /// Nothing is persisted: stale or missing derived `Outgoing` rows are
    /// substituted in the returned `Valuation` only.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PLOT_NOT_EXISTS` - the `Plot` with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "valuation",
            otel.name = Self::SPAN_NAME,
            plot_id = %plot_id,
        ),
    )]
    pub async fn valuation(
        plot_id: api::plot::Id,
        ctx: &Context,
    ) -> Result<api::Valuation, Error> {
        ctx.service()
            .execute(query::ValuationOf {
                plot_id: plot_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| api::PlotError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }
}
