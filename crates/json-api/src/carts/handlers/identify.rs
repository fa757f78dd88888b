//! Identify Session Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{carts::errors::checkout_status_error, extensions::*};

/// Identify Session Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct IdentifySessionRequest {
    /// Identifier of the signed-in user
    pub user_id: String,
}

/// Identify Session Handler
///
/// Attaches a signed-in user to an existing session.
#[endpoint(
    tags("carts"),
    summary = "Identify Session",
    security(("api_key" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "User bound to the session"),
        (status_code = StatusCode::BAD_REQUEST, description = "Session is missing or expired"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    session: PathParam<String>,
    json: JsonBody<IdentifySessionRequest>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;
    let user_id = json.into_inner().user_id;

    if user_id.trim().is_empty() {
        return Err(StatusError::bad_request().brief("user_id must not be blank"));
    }

    state
        .checkout
        .identify_session(&session.into_inner(), user_id)
        .await
        .map_err(checkout_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
