//! GraphQL [`Mutation`]s definitions.

use juniper::graphql_object;
use service::{command, Command as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL mutations.
///
/// Every mutation requires the `Authorization: Bearer <token>` header.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Syncs the derived `Outgoing` rows (management fee, maintenance and
    /// repairs, insurance) of the `Plot` with its computed figures, creating
    /// the missing ones.
    ///
    /// Running it again upon unchanged records writes nothing.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - no authentication token is provided;
    /// - `INVALID_AUTH_TOKEN` - the provided token is invalid or expired;
    /// - `PLOT_NOT_EXISTS` - the `Plot` with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "syncDerivedOutgoings",
            otel.name = Self::SPAN_NAME,
            plot_id = %plot_id,
        ),
    )]
    pub async fn sync_derived_outgoings(
        plot_id: api::plot::Id,
        ctx: &Context,
    ) -> Result<api::Valuation, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(command::SyncDerivedOutgoings {
                plot_id: plot_id.into(),
                initiator_id: my_id,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Applies the submitted changes of the income and outgoing records of
    /// the `Plot` at once, re-syncing its derived `Outgoing` rows afterwards.
    ///
    /// Unchanged records are not written.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - no authentication token is provided;
    /// - `INVALID_AUTH_TOKEN` - the provided token is invalid or expired;
    /// - `PLOT_NOT_EXISTS` - the `Plot` with the specified ID does not exist;
    /// - `PARKING_NOT_EXISTS` - an updated or deleted `Parking` row does not
    ///                          exist on the `Plot`;
    /// - `OUTGOING_NOT_EXISTS` - an updated or deleted `Outgoing` row does
    ///                           not exist on the `Plot`;
    /// - `DERIVED_OUTGOING_CONFLICT` - a user-edited `Outgoing` row reuses
    ///                                 or drops the identifier of a derived
    ///                                 one;
    /// - `INVALID_PARKING` - a `Parking` row has negative or too large
    ///                      figures;
    /// - `INVALID_OUTGOING` - an `Outgoing` row has negative or too large
    ///                       figures;
    /// - `INVALID_STORED_VALUE` - a `StoredValue` is out of its range.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateIncomeAndOutgoings",
            otel.name = Self::SPAN_NAME,
            plot_id = %plot_id,
        ),
    )]
    pub async fn update_income_and_outgoings(
        plot_id: api::plot::Id,
        #[graphql(default)] parking: api::parking::Changes,
        #[graphql(default)] outgoings: api::outgoing::Changes,
        #[graphql(default)] stored_values: Vec<api::stored_value::Input>,
        ctx: &Context,
    ) -> Result<api::Valuation, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(command::UpdateIncomeAndOutgoings {
                plot_id: plot_id.into(),
                initiator_id: my_id,
                parking: parking.into(),
                outgoings: outgoings.into(),
                stored_values: stored_values
                    .into_iter()
                    .map(Into::into)
                    .collect(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

impl AsError for command::sync_derived_outgoings::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PlotNotExists(_) => Some(api::PlotError::NotExists.into()),
        }
    }
}

impl AsError for command::update_income_and_outgoings::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "DERIVED_OUTGOING_CONFLICT"]
                #[status = CONFLICT]
                #[message = "`Outgoing` identifier is reserved for a derived \
                             row"]
                DerivedOutgoingConflict,

                #[code = "INVALID_OUTGOING"]
                #[status = BAD_REQUEST]
                #[message = "`Outgoing` figures are out of their allowed \
                             range"]
                InvalidOutgoing,

                #[code = "INVALID_PARKING"]
                #[status = BAD_REQUEST]
                #[message = "`Parking` figures are out of their allowed range"]
                InvalidParking,

                #[code = "INVALID_STORED_VALUE"]
                #[status = BAD_REQUEST]
                #[message = "`StoredValue` is out of its allowed range"]
                InvalidStoredValue,

                #[code = "OUTGOING_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Outgoing` with the specified ID does not exist"]
                OutgoingNotExists,

                #[code = "PARKING_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Parking` with the specified ID does not exist"]
                ParkingNotExists,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::DerivedOutgoingConflict(_) => {
                Some(Error::DerivedOutgoingConflict.into())
            }
            Self::InvalidOutgoing(_) => Some(Error::InvalidOutgoing.into()),
            Self::InvalidParking(_) => Some(Error::InvalidParking.into()),
            Self::InvalidStoredValue(_) => {
                Some(Error::InvalidStoredValue.into())
            }
            Self::OutgoingNotExists(_) => Some(Error::OutgoingNotExists.into()),
            Self::ParkingNotExists(_) => Some(Error::ParkingNotExists.into()),
            Self::PlotNotExists(_) => Some(api::PlotError::NotExists.into()),
        }
    }
}
