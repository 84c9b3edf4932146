//! GraphQL API definitions.

mod mutation;
pub mod outgoing;
pub mod parking;
pub mod plot;
mod query;
pub mod scalar;
pub mod stored_value;
pub mod valuation;

use juniper::EmptySubscription;

use crate::{define_error, Context};

pub use self::{
    mutation::Mutation, outgoing::Outgoing, parking::Parking, plot::Plot,
    query::Query, stored_value::StoredValue, valuation::Valuation,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

/// Creates a new [`Schema`].
#[must_use]
pub fn schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}

define_error! {
    enum PlotError {
        #[code = "PLOT_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Plot` with the specified ID does not exist"]
        NotExists,
    }
}
