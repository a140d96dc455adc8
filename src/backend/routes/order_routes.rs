//! Order Routes
//!
//! Every order endpoint requires a session.

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::backend::middleware::auth_middleware;
use crate::backend::orders::{
    accept_order, get_order, my_orders, place_order, reject_order, seller_orders, seller_pending_orders,
    update_order_status,
};
use crate::backend::server::state::AppState;

/// Add order routes to `router`
pub fn configure_order_routes(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/placeOrder", post(place_order))
        .route("/myOrders", get(my_orders))
        .route("/sellerOrders", get(seller_orders))
        .route("/sellerPendingOrders", get(seller_pending_orders))
        .route("/updateOrderStatus", post(update_order_status))
        .route("/acceptOrder", post(accept_order))
        .route("/rejectOrder", post(reject_order))
        .route("/order/{orderId}", get(get_order))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    router.merge(protected)
}
