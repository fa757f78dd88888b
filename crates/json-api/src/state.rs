//! State

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use trolley_app::{
    context::AppContext,
    domain::{carts::CartsService, checkout::CheckoutService, orders::OrdersService},
};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) carts: Arc<dyn CartsService>,
    pub(crate) orders: Arc<dyn OrdersService>,
    pub(crate) checkout: Arc<dyn CheckoutService>,
    api_key: String,
}

impl State {
    #[must_use]
    pub(crate) fn new(
        carts: Arc<dyn CartsService>,
        orders: Arc<dyn OrdersService>,
        checkout: Arc<dyn CheckoutService>,
        api_key: String,
    ) -> Self {
        Self {
            carts,
            orders,
            checkout,
            api_key,
        }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: &AppContext, api_key: String) -> Arc<Self> {
        Arc::new(Self::new(
            app.carts.clone(),
            app.orders.clone(),
            app.checkout.clone(),
            api_key,
        ))
    }

    pub(crate) fn accepts_api_key(&self, candidate: &str) -> bool {
        !self.api_key.is_empty() && self.api_key == candidate
    }
}

impl Debug for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("State").finish_non_exhaustive()
    }
}
