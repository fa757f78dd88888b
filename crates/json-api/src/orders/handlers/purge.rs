//! Delete All Orders Handler

use salvo::prelude::*;
use tracing::info;

use trolley_app::domain::orders::models::OrdersFilter;

use crate::{extensions::*, orders::errors::into_status_error};

/// Delete All Orders Handler
#[endpoint(
    tags("orders"),
    summary = "Delete All Orders",
    security(("api_key" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Orders deleted"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;

    let deleted = state
        .orders
        .delete_orders(OrdersFilter::default())
        .await
        .map_err(into_status_error)?;

    info!(deleted, "deleted orders");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use trolley_app::domain::orders::MockOrdersService;

    use crate::test_helpers::orders_service;

    use super::*;

    #[tokio::test]
    async fn test_delete_all_returns_204() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_delete_orders()
            .once()
            .withf(|filter| *filter == OrdersFilter::default())
            .return_once(|_| Ok(2));

        let res = TestClient::delete("http://example.com/order")
            .send(&orders_service(orders, Router::with_path("order").delete(handler)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }
}
