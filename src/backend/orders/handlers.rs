/**
 * Order Handlers
 *
 * # Endpoints (all authenticated)
 *
 * - `POST /placeOrder` - place an order at a site
 * - `GET /myOrders` - orders the caller placed
 * - `GET /sellerOrders` - orders received at the caller's sites
 * - `GET /sellerPendingOrders` - received orders still `pending`
 * - `POST /updateOrderStatus` - seller sets an order's status
 * - `POST /acceptOrder`, `POST /rejectOrder` - shortcuts for `approved` / `cancelled`
 * - `GET /order/{orderId}` - one order, for its buyer or seller
 *
 * # Pricing
 *
 * Prices, the seller and the site name are read from the site when the
 * order is placed. Values for them in the request body are ignored, and the
 * total is computed here.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::middleware::{ApiJson, AuthUser, AuthenticatedUser};
use crate::backend::orders::db::{self, NewOrder};
use crate::backend::server::state::AppState;
use crate::backend::sites::db::get_site;
use crate::shared::order::{
    price_order, BuyerDetails, OrderActionRequest, PlaceOrderRequest, UpdateOrderStatusRequest,
};
use crate::shared::site::parse_id;
use crate::shared::{ApiResponse, Order, OrderStatus, SharedError};

const NOT_FOUND_OR_UNAUTHORIZED: &str = "Order not found or unauthorized";

fn parse_order_id(raw: &str) -> Result<Uuid, SharedError> {
    parse_id("orderId", raw).map_err(|_| SharedError::validation("orderId", "Invalid order ID"))
}

/// Place an order
///
/// # Errors
///
/// * `400 Bad Request` - Malformed site ID, inactive site, unknown material,
///   non-positive quantity or quantity above stock
/// * `404 Not Found` - No such site
pub async fn place_order(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Order>>), BackendError> {
    let site_id = parse_id("siteId", &request.site_id)?;

    let site = get_site(&state.db, site_id).await?.ok_or_else(|| {
        tracing::warn!("Order for unknown site: {}", site_id);
        BackendError::not_found("Site not found")
    })?;
    if !site.is_active {
        tracing::warn!("Order for inactive site: {}", site_id);
        return Err(BackendError::bad_request("Site is not accepting orders"));
    }

    let (materials, total_amount) = price_order(&site.materials, &request.materials).map_err(|e| {
        tracing::warn!("Rejected order from {} at {} ({}): {}", user.email, site_id, e.field(), e);
        e
    })?;

    let buyer = get_user_by_id(&state.db, user.user_id)
        .await?
        .ok_or_else(|| BackendError::unauthorized("Please login first"))?;

    let new_order = NewOrder {
        buyer_email: buyer.email,
        seller_email: site.email,
        site_id: site.id,
        site_name: site.name,
        materials,
        total_amount,
        buyer_details: BuyerDetails {
            first_name: buyer.first_name,
            last_name: buyer.last_name,
            phone: buyer.phone,
        },
        shipping_address: request.shipping_address.unwrap_or_default(),
    };
    let order = db::create_order(&state.db, &new_order).await?;

    tracing::info!(
        "Order placed: {} by {} at site {} for {}",
        order.id,
        order.buyer_email,
        order.site_id,
        order.total_amount
    );
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(order, "Order placed successfully")),
    ))
}

/// Orders the caller placed, newest first
pub async fn my_orders(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ApiResponse<Vec<Order>>>, BackendError> {
    let orders = db::list_orders_by_buyer(&state.db, &user.email).await?;
    Ok(Json(ApiResponse::success(orders)))
}

/// Orders received at the caller's sites, newest first
pub async fn seller_orders(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ApiResponse<Vec<Order>>>, BackendError> {
    let orders = db::list_orders_by_seller(&state.db, &user.email, None).await?;
    Ok(Json(ApiResponse::success(orders)))
}

/// Received orders still awaiting a decision
pub async fn seller_pending_orders(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ApiResponse<Vec<Order>>>, BackendError> {
    let orders = db::list_orders_by_seller(&state.db, &user.email, Some(OrderStatus::Pending)).await?;
    Ok(Json(ApiResponse::success(orders)))
}

async fn set_status(
    state: &AppState,
    user: &AuthenticatedUser,
    order_id: Uuid,
    status: OrderStatus,
) -> Result<Order, BackendError> {
    let order = db::update_status_for_seller(&state.db, order_id, &user.email, status)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Status change on {} refused for {}", order_id, user.email);
            BackendError::not_found(NOT_FOUND_OR_UNAUTHORIZED)
        })?;

    tracing::info!("Order {} set to {} by {}", order.id, order.status, user.email);
    Ok(order)
}

/// Set an order's status
///
/// Only the seller may change it, and only to one of `approved`,
/// `shipping`, `delivered`, `cancelled` or `completed`.
///
/// # Errors
///
/// * `400 Bad Request` - Malformed order ID or invalid status
/// * `404 Not Found` - No such order, or the caller is not its seller
pub async fn update_order_status(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<UpdateOrderStatusRequest>,
) -> Result<Json<ApiResponse<Order>>, BackendError> {
    let order_id = parse_order_id(&request.order_id)?;
    let status = OrderStatus::parse_seller_target(&request.status)?;

    let order = set_status(&state, &user, order_id, status).await?;
    Ok(Json(ApiResponse::success_with_message(order, "Order status updated")))
}

/// Approve an order
pub async fn accept_order(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<OrderActionRequest>,
) -> Result<Json<ApiResponse<Order>>, BackendError> {
    let order_id = parse_order_id(&request.order_id)?;
    let order = set_status(&state, &user, order_id, OrderStatus::Approved).await?;
    Ok(Json(ApiResponse::success_with_message(order, "Order accepted")))
}

/// Cancel an order; an optional reason is logged
pub async fn reject_order(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<OrderActionRequest>,
) -> Result<Json<ApiResponse<Order>>, BackendError> {
    let order_id = parse_order_id(&request.order_id)?;
    if let Some(reason) = request.reason.as_deref() {
        tracing::info!("Order {} rejected: {}", order_id, reason);
    }
    let order = set_status(&state, &user, order_id, OrderStatus::Cancelled).await?;
    Ok(Json(ApiResponse::success_with_message(order, "Order rejected")))
}

/// Fetch one order for its buyer or seller
///
/// Anyone else gets the same 404 as for a missing order.
pub async fn get_order(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(order_id): Path<String>,
) -> Result<Json<ApiResponse<Order>>, BackendError> {
    let order_id = parse_order_id(&order_id)?;

    let order = db::get_order_for_participant(&state.db, order_id, &user.email)
        .await?
        .ok_or_else(|| BackendError::not_found(NOT_FOUND_OR_UNAUTHORIZED))?;

    Ok(Json(ApiResponse::success(order)))
}
