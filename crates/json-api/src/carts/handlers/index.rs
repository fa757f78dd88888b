//! Cart Index Handler

use salvo::{oapi::extract::QueryParam, prelude::*};

use trolley_app::domain::carts::models::{CartStatus, CartsFilter};

use crate::{
    carts::{errors::into_status_error, models::CartsResponse},
    extensions::*,
};

/// Cart Index Handler
///
/// Returns carts, newest first.
#[endpoint(
    tags("carts"),
    summary = "List Carts",
    security(("api_key" = []))
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<CartsResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let filter = CartsFilter {
        status: status
            .into_inner()
            .map(|status| status.parse::<CartStatus>())
            .transpose()
            .or_400("invalid status")?,
        limit: limit.into_inner(),
    };

    let carts = state
        .carts
        .list_carts(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartsResponse {
        carts: carts.into_iter().map(Into::into).collect(),
    }))
}
