//! Errors

use salvo::http::StatusError;
use tracing::error;

use trolley_app::domain::{carts::CartsServiceError, checkout::CheckoutError};

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart not found"),
        CartsServiceError::Conflict => {
            StatusError::conflict().brief("Cart was changed by another request")
        }
        CartsServiceError::InvalidData => StatusError::bad_request().brief("Invalid cart payload"),
        CartsServiceError::Sql(source) => {
            error!(error = ?source, "cart store failure");

            StatusError::internal_server_error()
        }
        CartsServiceError::Cache(source) => {
            error!(error = ?source, "cart cache failure");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn checkout_status_error(error: CheckoutError) -> StatusError {
    match error {
        CheckoutError::SessionInvalid => {
            StatusError::bad_request().brief("Session is missing or expired")
        }
        CheckoutError::NotFound => StatusError::not_found().brief("Cart not found"),
        CheckoutError::ItemNotFound => {
            StatusError::bad_request().brief("Cart has no item with that slug")
        }
        CheckoutError::InvalidInput(reason) => StatusError::bad_request().brief(reason),
        CheckoutError::Conflict => {
            StatusError::conflict().brief("Cart was changed by another request")
        }
        CheckoutError::Storage(source) => {
            error!(error = ?source, "checkout store failure");

            StatusError::internal_server_error()
        }
    }
}
