//! Back-office order desk. Every handler requires a staff token; the
//! staff check itself lives in `admin_service`.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};
use uuid::Uuid;

use crate::{
    dto::orders::{OrderList, OrderWithItems, UpdateOrderStatusRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Order,
    response::ApiResponse,
    routes::params::OrderListQuery,
    services::admin_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(order_desk))
        .route("/orders/{id}", get(order_detail))
        .route("/orders/{id}/status", patch(set_order_status))
}

/// Orders from every customer, newest first unless `sort_order=asc`.
#[utoipa::path(
    get,
    path = "/api/admin/orders",
    params(
        ("page" = Option<i64>, Query, description = "1-based page, capped at 100000"),
        ("per_page" = Option<i64>, Query, description = "1 to 100, default 20"),
        ("status" = Option<String>, Query, description = "Only orders in this status"),
        ("sort_order" = Option<String>, Query, description = "asc or desc by creation time")
    ),
    responses(
        (status = 200, description = "Page of orders across all customers", body = ApiResponse<OrderList>),
        (status = 401, description = "No valid token"),
        (status = 403, description = "Caller is not staff"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn order_desk(
    State(state): State<AppState>,
    staff: AuthUser,
    Query(filter): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    admin_service::list_all_orders(&state, &staff, filter)
        .await
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/admin/orders/{id}",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order with its frozen line items", body = ApiResponse<OrderWithItems>),
        (status = 403, description = "Caller is not staff"),
        (status = 404, description = "No such order"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn order_detail(
    State(state): State<AppState>,
    staff: AuthUser,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    admin_service::get_order_admin(&state, &staff, order_id)
        .await
        .map(Json)
}

/// Move an order through `Pending`, `Paid`, `Shipped`, `Delivered` or
/// `Cancelled`. Totals and items never change here.
#[utoipa::path(
    patch,
    path = "/api/admin/orders/{id}/status",
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order after the status change", body = ApiResponse<Order>),
        (status = 403, description = "Caller is not staff"),
        (status = 404, description = "No such order"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn set_order_status(
    State(state): State<AppState>,
    staff: AuthUser,
    Path(order_id): Path<Uuid>,
    Json(change): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    admin_service::update_order_status(&state, &staff, order_id, change)
        .await
        .map(Json)
}
