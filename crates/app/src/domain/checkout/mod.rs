//! Checkout
//!
//! Request-level cart workflows: session resolution, item mutations with repricing, and
//! conversion of a cart into an order.

pub mod errors;
pub mod service;

pub use errors::{CheckoutError, StoreFailure};
pub use service::*;
