//! Delete All Carts Handler

use salvo::prelude::*;
use tracing::info;

use trolley_app::domain::carts::models::CartsFilter;

use crate::{carts::errors::into_status_error, extensions::*};

/// Delete All Carts Handler
///
/// Cached copies are left to expire.
#[endpoint(
    tags("carts"),
    summary = "Delete All Carts",
    security(("api_key" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Carts deleted"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;

    let deleted = state
        .carts
        .delete_carts(CartsFilter::default())
        .await
        .map_err(into_status_error)?;

    info!(deleted, "deleted carts");

    Ok(StatusCode::NO_CONTENT)
}
