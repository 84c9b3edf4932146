//! Domain definitions.

pub mod audit;
pub mod figure;
pub mod insurance;
pub mod outgoing;
pub mod parking;
pub mod plot;
pub mod property_type;
pub mod stored_value;
pub mod tenant;
pub mod user;
pub mod valuation;

pub use self::{
    insurance::Insurance,
    outgoing::Outgoing,
    parking::Parking,
    plot::Plot,
    property_type::PropertyType,
    stored_value::{StoredValue, StoredValues},
    tenant::Tenant,
    user::User,
    valuation::Valuation,
};
