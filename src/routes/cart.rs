use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch},
};
use uuid::Uuid;

use crate::{
    cart::{CartOp, CartSnapshot},
    dto::cart::{AddToCartRequest, UpdateCartRequest},
    error::AppResult,
    response::ApiResponse,
    services::cart_service,
    session::SessionId,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(view_cart).post(add_to_cart).delete(clear_cart))
        .route("/{product_id}", patch(update_cart).delete(remove_from_cart))
}

#[utoipa::path(
    get,
    path = "/api/cart",
    params(
        ("x-session-id" = Uuid, Header, description = "Cart session id")
    ),
    responses(
        (status = 200, description = "Cart lines and total", body = ApiResponse<CartSnapshot>),
        (status = 400, description = "Missing or invalid session header")
    ),
    tag = "Cart"
)]
pub async fn view_cart(
    State(state): State<AppState>,
    session: SessionId,
) -> AppResult<Json<ApiResponse<CartSnapshot>>> {
    let resp = cart_service::view_cart(&state, session).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    params(
        ("x-session-id" = Uuid, Header, description = "Cart session id")
    ),
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Add one unit of a watch", body = ApiResponse<CartSnapshot>),
        (status = 404, description = "Watch not found"),
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    session: SessionId,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<ApiResponse<CartSnapshot>>> {
    let resp = cart_service::add_to_cart(&state, session, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    params(
        ("x-session-id" = Uuid, Header, description = "Cart session id")
    ),
    responses(
        (status = 200, description = "Cart emptied", body = ApiResponse<CartSnapshot>)
    ),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    session: SessionId,
) -> AppResult<Json<ApiResponse<CartSnapshot>>> {
    let resp = cart_service::clear_cart(&state, session).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/cart/{product_id}",
    params(
        ("x-session-id" = Uuid, Header, description = "Cart session id"),
        ("product_id" = Uuid, Path, description = "Watch ID")
    ),
    request_body = UpdateCartRequest,
    responses(
        (status = 200, description = "Increase, decrease or remove a line", body = ApiResponse<CartSnapshot>),
        (status = 404, description = "Watch is not in the cart"),
    ),
    tag = "Cart"
)]
pub async fn update_cart(
    State(state): State<AppState>,
    session: SessionId,
    Path(product_id): Path<Uuid>,
    Json(payload): Json<UpdateCartRequest>,
) -> AppResult<Json<ApiResponse<CartSnapshot>>> {
    let resp = cart_service::update_cart(&state, session, product_id, payload.op).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{product_id}",
    params(
        ("x-session-id" = Uuid, Header, description = "Cart session id"),
        ("product_id" = Uuid, Path, description = "Watch ID")
    ),
    responses(
        (status = 200, description = "Line removed", body = ApiResponse<CartSnapshot>),
        (status = 404, description = "Watch is not in the cart"),
    ),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    session: SessionId,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CartSnapshot>>> {
    let resp = cart_service::update_cart(&state, session, product_id, CartOp::Remove).await?;
    Ok(Json(resp))
}
