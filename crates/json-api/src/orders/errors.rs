//! Errors

use salvo::http::StatusError;
use tracing::error;

use trolley_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::AlreadyExists => {
            StatusError::conflict().brief("Cart already has an open order")
        }
        OrdersServiceError::Conflict => {
            StatusError::conflict().brief("Order was changed by another request")
        }
        OrdersServiceError::InvalidTransition { from, to } => {
            StatusError::bad_request().brief(format!("Cannot move order from {from} to {to}"))
        }
        OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(source) => {
            error!(error = ?source, "order store failure");

            StatusError::internal_server_error()
        }
    }
}
