//! Read entities definitions.

pub mod plot;
