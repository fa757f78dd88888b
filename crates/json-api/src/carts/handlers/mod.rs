//! Cart Handlers

pub(crate) mod checkout;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod identify;
pub(crate) mod index;
pub(crate) mod purge;
