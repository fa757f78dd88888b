//! App Router

use salvo::Router;

use crate::{auth, carts, orders};

/// Routes under `/api`, guarded by the API key.
pub(crate) fn api_router() -> Router {
    Router::with_path("api")
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("cart")
                .get(carts::index::handler)
                .post(carts::create::handler)
                .delete(carts::purge::handler)
                .push(
                    Router::with_path("{session}")
                        .get(carts::get::handler)
                        .push(
                            Router::with_path("items")
                                .post(carts::items::create::handler)
                                .push(
                                    Router::with_path("{slug}")
                                        .delete(carts::items::delete::handler),
                                ),
                        )
                        .push(Router::with_path("checkout").post(carts::checkout::handler))
                        .push(Router::with_path("user").put(carts::identify::handler)),
                ),
        )
        .push(
            Router::with_path("order")
                .get(orders::index::handler)
                .delete(orders::purge::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .delete(orders::delete::handler)
                        .push(Router::with_path("status").put(orders::status::handler)),
                ),
        )
}
