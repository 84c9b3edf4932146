//! [`Command`] definition.

pub mod authorize_user_session;
pub mod sync_derived_outgoings;
pub mod update_income_and_outgoings;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_user_session::AuthorizeUserSession,
    sync_derived_outgoings::SyncDerivedOutgoings,
    update_income_and_outgoings::UpdateIncomeAndOutgoings,
};
