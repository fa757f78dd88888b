use trolley_app::{
    context::AppContext,
    domain::{carts::models::CartsFilter, orders::models::OrdersFilter},
};

/// Counts of what a reset removed.
#[derive(Debug, Default)]
pub(crate) struct Removed {
    carts: u64,
    orders: u64,
    sessions: u64,
    cached_carts: u64,
}

pub(crate) async fn reset(app: &AppContext) -> Result<Removed, String> {
    let carts = app
        .carts
        .delete_carts(CartsFilter::default())
        .await
        .map_err(|error| format!("failed to delete carts: {error}"))?;

    let orders = app
        .orders
        .delete_orders(OrdersFilter::default())
        .await
        .map_err(|error| format!("failed to delete orders: {error}"))?;

    let sessions = app
        .checkout
        .clear_sessions()
        .await
        .map_err(|error| format!("failed to clear sessions: {error}"))?;

    let cached_carts = app
        .carts
        .clear_cache()
        .await
        .map_err(|error| format!("failed to clear cart cache: {error}"))?;

    Ok(Removed {
        carts,
        orders,
        sessions,
        cached_carts,
    })
}

pub(crate) async fn run(app: &AppContext) -> Result<(), String> {
    let removed = reset(app).await?;

    println!("carts_deleted: {}", removed.carts);
    println!("orders_deleted: {}", removed.orders);
    println!("sessions_cleared: {}", removed.sessions);
    println!("cached_carts_cleared: {}", removed.cached_carts);

    Ok(())
}
