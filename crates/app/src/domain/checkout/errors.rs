//! Checkout errors.

use thiserror::Error;

use crate::{
    domain::{carts::CartsServiceError, orders::OrdersServiceError},
    sessions::CacheError,
};

/// A backing store failed; the request may be retried.
#[derive(Debug, Error)]
pub enum StoreFailure {
    #[error("document store failure")]
    Sql(#[source] sqlx::Error),

    #[error("session store failure")]
    Cache(#[source] CacheError),
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("session is missing or expired")]
    SessionInvalid,

    #[error("not found")]
    NotFound,

    #[error("cart has no item with that slug")]
    ItemNotFound,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("cart or order was changed by another request")]
    Conflict,

    #[error(transparent)]
    Storage(#[from] StoreFailure),
}

impl From<CartsServiceError> for CheckoutError {
    fn from(error: CartsServiceError) -> Self {
        match error {
            CartsServiceError::NotFound => Self::NotFound,
            CartsServiceError::Conflict => Self::Conflict,
            CartsServiceError::InvalidData => Self::InvalidInput("invalid cart data".to_string()),
            CartsServiceError::Sql(source) => Self::Storage(StoreFailure::Sql(source)),
            CartsServiceError::Cache(source) => Self::Storage(StoreFailure::Cache(source)),
        }
    }
}

impl From<OrdersServiceError> for CheckoutError {
    fn from(error: OrdersServiceError) -> Self {
        match error {
            OrdersServiceError::NotFound => Self::NotFound,
            OrdersServiceError::AlreadyExists | OrdersServiceError::Conflict => Self::Conflict,
            OrdersServiceError::InvalidTransition { .. } | OrdersServiceError::InvalidData => {
                Self::InvalidInput(error.to_string())
            }
            OrdersServiceError::Sql(source) => Self::Storage(StoreFailure::Sql(source)),
        }
    }
}

impl From<CacheError> for CheckoutError {
    fn from(error: CacheError) -> Self {
        Self::Storage(StoreFailure::Cache(error))
    }
}
